use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::value_objects::{Email, Role};
use crate::domain::errors::{DomainError, DomainResult};

/// User aggregate
///
/// Belongs to exactly one company for its whole lifetime. The credential is
/// only ever held in hashed form.
///
/// # Invariants
/// - Name cannot be empty
/// - Email is a valid [`Email`] (uniqueness is enforced by storage)
/// - Credential hash cannot be empty
/// - Role is one of [`Role`]
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: Uuid,
    company_id: Uuid,
    name: String,
    email: Email,
    password_hash: String,
    role: Role,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user under `company_id`
    ///
    /// The caller is responsible for hashing the credential first.
    pub fn new(
        company_id: Uuid,
        name: String,
        email: &str,
        password_hash: String,
        role: Role,
    ) -> DomainResult<Self> {
        let (name, email) = Self::validate_profile(name, email)?;
        if password_hash.is_empty() {
            return Err(DomainError::invalid("credential is required"));
        }
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            company_id,
            name,
            email,
            password_hash,
            role,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces the editable profile fields
    ///
    /// Runs the creation rules again; on error nothing is changed. Whether the
    /// caller may change `role` at all is decided before this is called.
    pub fn update(&mut self, name: String, email: &str, role: Role) -> DomainResult<()> {
        let (name, email) = Self::validate_profile(name, email)?;
        self.name = name;
        self.email = email;
        self.role = role;
        self.updated_at = Utc::now();
        Ok(())
    }

    fn validate_profile(name: String, email: &str) -> DomainResult<(String, Email)> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::invalid("name is required"));
        }
        let email = Email::new(email)?;
        Ok((name, email))
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn company_id(&self) -> Uuid {
        self.company_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Rebuilds a user from a stored row without re-validating it
    ///
    /// Only repository implementations should call this.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persistence(
        id: Uuid,
        company_id: Uuid,
        name: String,
        email: Email,
        password_hash: String,
        role: Role,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            company_id,
            name,
            email,
            password_hash,
            role,
            created_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee() -> User {
        User::new(
            Uuid::new_v4(),
            "Ana".to_string(),
            "ana@acme.test",
            "$2b$04$hash".to_string(),
            Role::Employee,
        )
        .unwrap()
    }

    #[test]
    fn create_user_with_valid_fields() {
        let company_id = Uuid::new_v4();
        let user = User::new(
            company_id,
            "Ana".to_string(),
            "ana@acme.test",
            "$2b$04$hash".to_string(),
            Role::Admin,
        )
        .unwrap();

        assert_eq!(user.company_id(), company_id);
        assert_eq!(user.name(), "Ana");
        assert_eq!(user.email().as_str(), "ana@acme.test");
        assert_eq!(user.role(), Role::Admin);
    }

    #[test]
    fn empty_name_is_rejected() {
        let result = User::new(
            Uuid::new_v4(),
            " ".to_string(),
            "ana@acme.test",
            "hash".to_string(),
            Role::Employee,
        );
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn empty_email_is_rejected() {
        let result = User::new(
            Uuid::new_v4(),
            "Ana".to_string(),
            "",
            "hash".to_string(),
            Role::Employee,
        );
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn empty_credential_is_rejected() {
        let result = User::new(
            Uuid::new_v4(),
            "Ana".to_string(),
            "ana@acme.test",
            String::new(),
            Role::Employee,
        );
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn update_uses_creation_rules() {
        let mut user = employee();

        let result = user.update("Ana".to_string(), "", Role::Admin);
        assert!(result.is_err());
        assert_eq!(user.email().as_str(), "ana@acme.test");
        assert_eq!(user.role(), Role::Employee);
    }

    #[test]
    fn update_keeps_identity_and_company() {
        let mut user = employee();
        let (id, company_id) = (user.id(), user.company_id());

        user.update("Ana Ruiz".to_string(), "ana.ruiz@acme.test", Role::Employee)
            .unwrap();

        assert_eq!(user.id(), id);
        assert_eq!(user.company_id(), company_id);
        assert_eq!(user.name(), "Ana Ruiz");
        assert_eq!(user.email().as_str(), "ana.ruiz@acme.test");
    }
}
