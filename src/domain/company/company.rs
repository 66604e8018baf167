use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};

/// Company aggregate root
///
/// Owns zero or more users. Created through registration and afterwards
/// only edited through its name and tax id.
///
/// # Invariants
/// - Name cannot be empty
/// - Tax id cannot be empty (global uniqueness is enforced by storage)
///
/// # Example
/// ```
/// use staffbook_api::domain::company::Company;
///
/// let company = Company::new("Acme".to_string(), "B12345678".to_string())
///     .expect("valid company");
/// assert_eq!(company.name(), "Acme");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    id: Uuid,
    name: String,
    tax_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Company {
    /// Creates a new company after validating name and tax id
    pub fn new(name: String, tax_id: String) -> DomainResult<Self> {
        let (name, tax_id) = Self::validate(name, tax_id)?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            tax_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces name and tax id, applying the same rules as creation
    ///
    /// On error the company is left untouched.
    pub fn update(&mut self, name: String, tax_id: String) -> DomainResult<()> {
        let (name, tax_id) = Self::validate(name, tax_id)?;
        self.name = name;
        self.tax_id = tax_id;
        self.updated_at = Utc::now();
        Ok(())
    }

    fn validate(name: String, tax_id: String) -> DomainResult<(String, String)> {
        let name = name.trim().to_string();
        let tax_id = tax_id.trim().to_string();

        if name.is_empty() {
            return Err(DomainError::invalid("company name is required"));
        }
        if tax_id.is_empty() {
            return Err(DomainError::invalid("tax id is required"));
        }

        Ok((name, tax_id))
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tax_id(&self) -> &str {
        &self.tax_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Rebuilds a company from a stored row without re-validating it
    ///
    /// Only repository implementations should call this.
    pub fn from_persistence(
        id: Uuid,
        name: String,
        tax_id: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            tax_id,
            created_at,
            updated_at,
        }
    }
}
