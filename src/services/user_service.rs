use std::sync::{Arc, OnceLock};

use uuid::Uuid;

use crate::auth::access::{admin_only_change, require_role, require_self_or_admin, Caller};
use crate::auth::jwt::TokenCodec;
use crate::auth::password::CredentialHasher;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::repositories::{CompanyRepository, UserRepository};
use crate::domain::user::{Role, User};

/// A user account to create, with its plaintext password
#[derive(Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Profile edit of an existing user
///
/// `role` is only honoured for admin callers.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub name: String,
    pub email: String,
    pub role: Option<String>,
}

/// Successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
}

/// How a user creation was authorized
enum Grant {
    Admin,
    /// Anonymous signup of a company's first account
    Bootstrap,
}

pub struct UserService {
    users: Arc<dyn UserRepository>,
    companies: Arc<dyn CompanyRepository>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<TokenCodec>,
    /// Verified against when the email is unknown
    decoy_hash: OnceLock<String>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        companies: Arc<dyn CompanyRepository>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<TokenCodec>,
    ) -> Self {
        Self {
            users,
            companies,
            hasher,
            tokens,
            decoy_hash: OnceLock::new(),
        }
    }

    /// Creates one user under a company
    ///
    /// Admins may always create users. Without a caller, creation is only
    /// allowed while the company has no users yet, which is how the first
    /// account of a freshly registered company comes to exist.
    pub async fn create(
        &self,
        caller: Option<&Caller>,
        company_id: Uuid,
        input: NewUser,
    ) -> DomainResult<User> {
        let grant = self.authorize_creation(caller, company_id).await?;

        let user = self.build(company_id, input)?;
        match grant {
            Grant::Admin => self.users.create(&user).await?,
            Grant::Bootstrap => self.bootstrap(company_id, std::slice::from_ref(&user)).await?,
        }

        tracing::info!(user_id = %user.id(), company_id = %company_id, "user created");
        Ok(user)
    }

    /// Creates several users under a company, all or none
    ///
    /// Every element is validated before anything is written, and storage
    /// inserts the batch in a single transaction.
    pub async fn create_batch(
        &self,
        caller: Option<&Caller>,
        company_id: Uuid,
        inputs: Vec<NewUser>,
    ) -> DomainResult<Vec<User>> {
        if inputs.is_empty() {
            return Err(DomainError::invalid("batch contains no users"));
        }
        let grant = self.authorize_creation(caller, company_id).await?;

        let users = inputs
            .into_iter()
            .map(|input| self.build(company_id, input))
            .collect::<DomainResult<Vec<_>>>()?;
        match grant {
            Grant::Admin => self.users.create_batch(&users).await?,
            Grant::Bootstrap => self.bootstrap(company_id, &users).await?,
        }

        tracing::info!(company_id = %company_id, count = users.len(), "user batch created");
        Ok(users)
    }

    pub async fn get(&self, caller: &Caller, id: Uuid) -> DomainResult<User> {
        require_self_or_admin(caller, id)?;
        self.users.find_by_id(id).await?.ok_or(DomainError::NotFound)
    }

    /// Users of a company; open to any authenticated caller
    pub async fn list_by_company(
        &self,
        _caller: &Caller,
        company_id: Uuid,
    ) -> DomainResult<Vec<User>> {
        self.require_company(company_id).await?;
        Ok(self.users.find_by_company(company_id).await?)
    }

    /// Edits name, email and (for admins) role
    ///
    /// A role submitted by a non-admin is discarded and the stored role is
    /// written back unchanged.
    pub async fn update(
        &self,
        caller: &Caller,
        id: Uuid,
        changes: UserChanges,
    ) -> DomainResult<User> {
        require_self_or_admin(caller, id)?;

        let requested_role = changes
            .role
            .as_deref()
            .map(str::parse::<Role>)
            .transpose()?;

        let mut user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound)?;

        let role = admin_only_change(caller, requested_role, user.role());
        if requested_role.is_some_and(|requested| requested != role) {
            tracing::warn!(user_id = %caller.user_id, target = %id, "discarded role change from non-admin");
        }

        user.update(changes.name, &changes.email, role)?;
        self.users.update(&user).await?;

        tracing::info!(user_id = %id, "user updated");
        Ok(user)
    }

    /// Deletes a user with their contracts and vacations
    pub async fn delete(&self, caller: &Caller, id: Uuid) -> DomainResult<()> {
        require_role(caller, Role::Admin)?;
        self.users.delete(id).await?;

        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }

    /// Checks credentials and mints an identity token
    ///
    /// Unknown email and wrong password fail identically, and both pay for
    /// one hash verification.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<LoginOutcome> {
        let user = match self.users.find_by_email(email.trim()).await? {
            Some(user) => user,
            None => {
                self.hasher.verify(password, self.decoy_hash()?)?;
                tracing::warn!("login rejected");
                return Err(DomainError::InvalidCredentials);
            }
        };

        if !self.hasher.verify(password, user.password_hash())? {
            tracing::warn!("login rejected");
            return Err(DomainError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(user.id(), user.role())
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.id(), "user logged in");
        Ok(LoginOutcome { token, user })
    }

    async fn require_company(&self, company_id: Uuid) -> DomainResult<()> {
        match self.companies.find_by_id(company_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound),
        }
    }

    async fn authorize_creation(
        &self,
        caller: Option<&Caller>,
        company_id: Uuid,
    ) -> DomainResult<Grant> {
        self.require_company(company_id).await?;

        match caller {
            Some(caller) => {
                require_role(caller, Role::Admin)?;
                Ok(Grant::Admin)
            }
            None if self.users.count_by_company(company_id).await? == 0 => Ok(Grant::Bootstrap),
            None => Err(DomainError::Unauthenticated),
        }
    }

    /// Inserts anonymous signups, re-checking emptiness atomically with the write
    async fn bootstrap(&self, company_id: Uuid, users: &[User]) -> DomainResult<()> {
        if self.users.create_if_company_empty(company_id, users).await? {
            return Ok(());
        }

        tracing::warn!(company_id = %company_id, "anonymous signup after company gained users");
        Err(DomainError::Unauthenticated)
    }

    fn decoy_hash(&self) -> DomainResult<&str> {
        if let Some(hash) = self.decoy_hash.get() {
            return Ok(hash.as_str());
        }
        let hash = self.hasher.hash("decoy credential for unknown accounts")?;
        Ok(self.decoy_hash.get_or_init(|| hash).as_str())
    }

    fn build(&self, company_id: Uuid, input: NewUser) -> DomainResult<User> {
        let role: Role = input.role.parse()?;
        if input.password.is_empty() {
            return Err(DomainError::invalid("password is required"));
        }
        let password_hash = self.hasher.hash(&input.password)?;

        User::new(company_id, input.name, &input.email, password_hash, role)
    }
}
