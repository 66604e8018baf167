// In-memory storage adapter
// Implements every repository port over one mutex-guarded set of tables,
// with the same uniqueness, cascade and batch semantics as the Postgres schema

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::company::Company;
use crate::domain::contract::Contract;
use crate::domain::repositories::{
    CompanyRepository, ContractRepository, StorageError, StorageResult, UserRepository,
    VacationRepository,
};
use crate::domain::user::User;
use crate::domain::vacation::Vacation;

#[derive(Default)]
struct Tables {
    companies: HashMap<Uuid, Company>,
    users: HashMap<Uuid, User>,
    contracts: HashMap<Uuid, Contract>,
    vacations: HashMap<Uuid, Vacation>,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.users
            .values()
            .any(|u| u.email().as_str() == email && Some(u.id()) != except)
    }

    fn tax_id_taken(&self, tax_id: &str, except: Option<Uuid>) -> bool {
        self.companies
            .values()
            .any(|c| c.tax_id() == tax_id && Some(c.id()) != except)
    }

    fn require_company(&self, id: Uuid) -> StorageResult<()> {
        if self.companies.contains_key(&id) {
            Ok(())
        } else {
            Err(StorageError::Backend(format!(
                "foreign key violation: company {} does not exist",
                id
            )))
        }
    }

    fn require_user(&self, id: Uuid) -> StorageResult<()> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(StorageError::Backend(format!(
                "foreign key violation: user {} does not exist",
                id
            )))
        }
    }

    /// Checks the whole batch (against storage and against itself) before
    /// inserting anything
    fn insert_users(&mut self, users: &[User]) -> StorageResult<()> {
        for (i, user) in users.iter().enumerate() {
            self.require_company(user.company_id())?;

            let repeated = users[..i]
                .iter()
                .any(|prev| prev.id() == user.id() || prev.email() == user.email());
            if repeated
                || self.users.contains_key(&user.id())
                || self.email_taken(user.email().as_str(), None)
            {
                return Err(StorageError::UniqueViolation);
            }
        }

        for user in users {
            self.users.insert(user.id(), user.clone());
        }
        Ok(())
    }

    fn remove_user_cascade(&mut self, user_id: Uuid) -> bool {
        self.contracts.retain(|_, c| c.user_id() != user_id);
        self.vacations.retain(|_, v| v.user_id() != user_id);
        self.users.remove(&user_id).is_some()
    }
}

/// Repository adapter backed by process memory
///
/// Used by tests and for running the API without a database. Cheap to share
/// behind an `Arc`; every port method takes the table lock once.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> StorageResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|e| StorageError::Backend(format!("in-memory store lock poisoned: {}", e)))
    }
}

#[async_trait]
impl CompanyRepository for InMemoryStore {
    async fn create(&self, company: &Company) -> StorageResult<()> {
        let mut tables = self.tables()?;
        if tables.companies.contains_key(&company.id())
            || tables.tax_id_taken(company.tax_id(), None)
        {
            return Err(StorageError::UniqueViolation);
        }
        tables.companies.insert(company.id(), company.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<Company>> {
        Ok(self.tables()?.companies.get(&id).cloned())
    }

    async fn find_by_tax_id(&self, tax_id: &str) -> StorageResult<Option<Company>> {
        Ok(self
            .tables()?
            .companies
            .values()
            .find(|c| c.tax_id() == tax_id)
            .cloned())
    }

    async fn update(&self, company: &Company) -> StorageResult<()> {
        let mut tables = self.tables()?;
        if !tables.companies.contains_key(&company.id()) {
            return Err(StorageError::NoRowsAffected);
        }
        if tables.tax_id_taken(company.tax_id(), Some(company.id())) {
            return Err(StorageError::UniqueViolation);
        }
        tables.companies.insert(company.id(), company.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StorageResult<()> {
        let mut tables = self.tables()?;
        if tables.companies.remove(&id).is_none() {
            return Err(StorageError::NoRowsAffected);
        }

        let members: Vec<Uuid> = tables
            .users
            .values()
            .filter(|u| u.company_id() == id)
            .map(User::id)
            .collect();
        for user_id in members {
            tables.remove_user_cascade(user_id);
        }
        Ok(())
    }

    async fn count(&self) -> StorageResult<i64> {
        Ok(self.tables()?.companies.len() as i64)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &User) -> StorageResult<()> {
        self.create_batch(std::slice::from_ref(user)).await
    }

    async fn create_batch(&self, users: &[User]) -> StorageResult<()> {
        self.tables()?.insert_users(users)
    }

    async fn create_if_company_empty(
        &self,
        company_id: Uuid,
        users: &[User],
    ) -> StorageResult<bool> {
        let mut tables = self.tables()?;
        if !tables.companies.contains_key(&company_id) {
            return Err(StorageError::NoRowsAffected);
        }
        if tables.users.values().any(|u| u.company_id() == company_id) {
            return Ok(false);
        }

        tables.insert_users(users)?;
        Ok(true)
    }

    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<User>> {
        Ok(self.tables()?.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        Ok(self
            .tables()?
            .users
            .values()
            .find(|u| u.email().as_str() == email)
            .cloned())
    }

    async fn find_by_company(&self, company_id: Uuid) -> StorageResult<Vec<User>> {
        let mut users: Vec<User> = self
            .tables()?
            .users
            .values()
            .filter(|u| u.company_id() == company_id)
            .cloned()
            .collect();
        users.sort_by_key(|u| (u.created_at(), u.id()));
        Ok(users)
    }

    async fn update(&self, user: &User) -> StorageResult<()> {
        let mut tables = self.tables()?;
        if !tables.users.contains_key(&user.id()) {
            return Err(StorageError::NoRowsAffected);
        }
        if tables.email_taken(user.email().as_str(), Some(user.id())) {
            return Err(StorageError::UniqueViolation);
        }
        tables.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StorageResult<()> {
        if self.tables()?.remove_user_cascade(id) {
            Ok(())
        } else {
            Err(StorageError::NoRowsAffected)
        }
    }

    async fn count(&self) -> StorageResult<i64> {
        Ok(self.tables()?.users.len() as i64)
    }

    async fn count_by_company(&self, company_id: Uuid) -> StorageResult<i64> {
        Ok(self
            .tables()?
            .users
            .values()
            .filter(|u| u.company_id() == company_id)
            .count() as i64)
    }
}

#[async_trait]
impl ContractRepository for InMemoryStore {
    async fn create(&self, contract: &Contract) -> StorageResult<()> {
        let mut tables = self.tables()?;
        tables.require_user(contract.user_id())?;
        if tables.contracts.contains_key(&contract.id()) {
            return Err(StorageError::UniqueViolation);
        }
        tables.contracts.insert(contract.id(), contract.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<Contract>> {
        Ok(self.tables()?.contracts.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: Uuid) -> StorageResult<Vec<Contract>> {
        let mut contracts: Vec<Contract> = self
            .tables()?
            .contracts
            .values()
            .filter(|c| c.user_id() == user_id)
            .cloned()
            .collect();
        contracts.sort_by_key(|c| (c.start_date(), c.created_at()));
        Ok(contracts)
    }

    async fn update(&self, contract: &Contract) -> StorageResult<()> {
        let mut tables = self.tables()?;
        match tables.contracts.get_mut(&contract.id()) {
            Some(stored) => {
                *stored = contract.clone();
                Ok(())
            }
            None => Err(StorageError::NoRowsAffected),
        }
    }

    async fn delete(&self, id: Uuid) -> StorageResult<()> {
        match self.tables()?.contracts.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StorageError::NoRowsAffected),
        }
    }

    async fn count(&self) -> StorageResult<i64> {
        Ok(self.tables()?.contracts.len() as i64)
    }

    async fn sum_salaries(&self) -> StorageResult<Decimal> {
        Ok(self
            .tables()?
            .contracts
            .values()
            .map(Contract::salary)
            .sum())
    }
}

#[async_trait]
impl VacationRepository for InMemoryStore {
    async fn create(&self, vacation: &Vacation) -> StorageResult<()> {
        let mut tables = self.tables()?;
        tables.require_user(vacation.user_id())?;
        if tables.vacations.contains_key(&vacation.id()) {
            return Err(StorageError::UniqueViolation);
        }
        tables.vacations.insert(vacation.id(), vacation.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<Vacation>> {
        Ok(self.tables()?.vacations.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: Uuid) -> StorageResult<Vec<Vacation>> {
        let mut vacations: Vec<Vacation> = self
            .tables()?
            .vacations
            .values()
            .filter(|v| v.user_id() == user_id)
            .cloned()
            .collect();
        vacations.sort_by_key(|v| (v.start_date(), v.created_at()));
        Ok(vacations)
    }

    async fn update(&self, vacation: &Vacation) -> StorageResult<()> {
        let mut tables = self.tables()?;
        match tables.vacations.get_mut(&vacation.id()) {
            Some(stored) => {
                *stored = vacation.clone();
                Ok(())
            }
            None => Err(StorageError::NoRowsAffected),
        }
    }

    async fn delete(&self, id: Uuid) -> StorageResult<()> {
        match self.tables()?.vacations.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StorageError::NoRowsAffected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contract::{ContractTerms, ContractType};
    use crate::domain::user::Role;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn company(tax_id: &str) -> Company {
        Company::new("Acme".to_string(), tax_id.to_string()).unwrap()
    }

    fn user(company_id: Uuid, email: &str) -> User {
        User::new(
            company_id,
            "Ada".to_string(),
            email,
            "hash".to_string(),
            Role::Employee,
        )
        .unwrap()
    }

    fn contract(user_id: Uuid, salary: i64) -> Contract {
        Contract::new(
            user_id,
            ContractTerms {
                start_date: date(2024, 1, 1),
                end_date: None,
                contract_type: ContractType::Indefinite,
                position: "Engineer".to_string(),
                salary: Decimal::new(salary, 0),
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn duplicate_tax_id_is_unique_violation() {
        let store = InMemoryStore::new();
        CompanyRepository::create(&store, &company("B-1")).await.unwrap();

        let result = CompanyRepository::create(&store, &company("B-1")).await;
        assert_eq!(result, Err(StorageError::UniqueViolation));
    }

    #[tokio::test]
    async fn update_missing_row_is_no_rows_affected() {
        let store = InMemoryStore::new();
        let result = CompanyRepository::update(&store, &company("B-2")).await;
        assert_eq!(result, Err(StorageError::NoRowsAffected));

        let result = VacationRepository::delete(&store, Uuid::new_v4()).await;
        assert_eq!(result, Err(StorageError::NoRowsAffected));
    }

    #[tokio::test]
    async fn batch_with_duplicate_email_persists_nothing() {
        let store = InMemoryStore::new();
        let acme = company("B-3");
        CompanyRepository::create(&store, &acme).await.unwrap();

        let batch = vec![
            user(acme.id(), "one@acme.test"),
            user(acme.id(), "two@acme.test"),
            user(acme.id(), "one@acme.test"),
        ];
        let result = store.create_batch(&batch).await;

        assert_eq!(result, Err(StorageError::UniqueViolation));
        assert_eq!(UserRepository::count(&store).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn changing_email_to_taken_one_is_unique_violation() {
        let store = InMemoryStore::new();
        let acme = company("B-4");
        CompanyRepository::create(&store, &acme).await.unwrap();
        UserRepository::create(&store, &user(acme.id(), "taken@acme.test"))
            .await
            .unwrap();
        let mut other = user(acme.id(), "free@acme.test");
        UserRepository::create(&store, &other).await.unwrap();

        other
            .update("Ada".to_string(), "taken@acme.test", Role::Employee)
            .unwrap();
        let result = UserRepository::update(&store, &other).await;
        assert_eq!(result, Err(StorageError::UniqueViolation));
    }

    #[tokio::test]
    async fn deleting_company_cascades_to_everything_it_owns() {
        let store = InMemoryStore::new();
        let acme = company("B-5");
        CompanyRepository::create(&store, &acme).await.unwrap();
        let ada = user(acme.id(), "ada@acme.test");
        UserRepository::create(&store, &ada).await.unwrap();
        ContractRepository::create(&store, &contract(ada.id(), 1000))
            .await
            .unwrap();
        let vacation = Vacation::new(ada.id(), date(2024, 8, 1), date(2024, 8, 10)).unwrap();
        VacationRepository::create(&store, &vacation).await.unwrap();

        CompanyRepository::delete(&store, acme.id()).await.unwrap();

        assert_eq!(UserRepository::count(&store).await.unwrap(), 0);
        assert_eq!(ContractRepository::count(&store).await.unwrap(), 0);
        assert!(VacationRepository::find_by_user(&store, ada.id())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn sum_salaries_adds_every_contract() {
        let store = InMemoryStore::new();
        let acme = company("B-6");
        CompanyRepository::create(&store, &acme).await.unwrap();
        let ada = user(acme.id(), "sum@acme.test");
        UserRepository::create(&store, &ada).await.unwrap();

        assert_eq!(store.sum_salaries().await.unwrap(), Decimal::ZERO);

        ContractRepository::create(&store, &contract(ada.id(), 1500))
            .await
            .unwrap();
        ContractRepository::create(&store, &contract(ada.id(), 2500))
            .await
            .unwrap();

        assert_eq!(store.sum_salaries().await.unwrap(), Decimal::new(4000, 0));
    }

    #[tokio::test]
    async fn create_if_company_empty_only_admits_the_first_users() {
        let store = InMemoryStore::new();
        let acme = company("B-7");
        CompanyRepository::create(&store, &acme).await.unwrap();

        let first = store
            .create_if_company_empty(acme.id(), &[user(acme.id(), "first@acme.test")])
            .await
            .unwrap();
        assert!(first);

        let second = store
            .create_if_company_empty(acme.id(), &[user(acme.id(), "second@acme.test")])
            .await
            .unwrap();
        assert!(!second);
        assert_eq!(store.count_by_company(acme.id()).await.unwrap(), 1);

        let missing = store
            .create_if_company_empty(Uuid::new_v4(), &[user(acme.id(), "third@acme.test")])
            .await;
        assert_eq!(missing, Err(StorageError::NoRowsAffected));
    }

    #[tokio::test]
    async fn user_under_unknown_company_is_rejected() {
        let store = InMemoryStore::new();
        let result = UserRepository::create(&store, &user(Uuid::new_v4(), "x@acme.test")).await;
        assert!(matches!(result, Err(StorageError::Backend(_))));
    }
}
