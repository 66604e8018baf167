use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::value_objects::ContractType;
use crate::domain::errors::{DomainError, DomainResult};

/// Largest salary the `NUMERIC(12, 2)` column holds
pub fn max_salary() -> Decimal {
    Decimal::new(999_999_999_999, SALARY_SCALE)
}

/// Salaries are stored in cents
pub const SALARY_SCALE: u32 = 2;

/// Editable terms of a contract
///
/// Both creation and update go through [`ContractTerms::normalize`], so the
/// end-date rule is enforced identically on both paths:
/// - `Indefinite`: any supplied end date is dropped
/// - any other type: end date is required and cannot precede the start date
#[derive(Debug, Clone, PartialEq)]
pub struct ContractTerms {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub contract_type: ContractType,
    pub position: String,
    pub salary: Decimal,
}

impl ContractTerms {
    /// Validates the terms and returns them in canonical form
    ///
    /// # Example
    /// ```
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    /// use staffbook_api::domain::contract::{ContractTerms, ContractType};
    ///
    /// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let terms = ContractTerms {
    ///     start_date: start,
    ///     end_date: NaiveDate::from_ymd_opt(2024, 6, 1),
    ///     contract_type: ContractType::Indefinite,
    ///     position: "Engineer".to_string(),
    ///     salary: Decimal::from(30000),
    /// }
    /// .normalize()
    /// .expect("valid terms");
    ///
    /// assert_eq!(terms.end_date, None);
    /// ```
    pub fn normalize(self) -> DomainResult<Self> {
        let position = self.position.trim().to_string();
        if position.is_empty() {
            return Err(DomainError::invalid("position is required"));
        }
        if self.salary < Decimal::ZERO {
            return Err(DomainError::invalid("salary cannot be negative"));
        }
        if self.salary > max_salary() {
            return Err(DomainError::invalid(format!(
                "salary cannot exceed {}",
                max_salary()
            )));
        }
        if self.salary.normalize().scale() > SALARY_SCALE {
            return Err(DomainError::invalid(format!(
                "salary cannot have more than {} decimal places",
                SALARY_SCALE
            )));
        }

        let end_date = if self.contract_type.requires_end_date() {
            match self.end_date {
                None => {
                    return Err(DomainError::invalid(format!(
                        "end date is required for {} contracts",
                        self.contract_type
                    )))
                }
                Some(end) if end < self.start_date => {
                    return Err(DomainError::invalid("end date cannot be before start date"))
                }
                Some(end) => Some(end),
            }
        } else {
            None
        };

        Ok(Self {
            start_date: self.start_date,
            end_date,
            contract_type: self.contract_type,
            position,
            salary: self.salary,
        })
    }
}

/// Employment contract held by a user
#[derive(Debug, Clone, PartialEq)]
pub struct Contract {
    id: Uuid,
    user_id: Uuid,
    terms: ContractTerms,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Contract {
    /// Creates a contract for `user_id` from normalized terms
    pub fn new(user_id: Uuid, terms: ContractTerms) -> DomainResult<Self> {
        let terms = terms.normalize()?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            terms,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces all terms; on error the contract is left untouched
    pub fn update(&mut self, terms: ContractTerms) -> DomainResult<()> {
        self.terms = terms.normalize()?;
        self.updated_at = Utc::now();
        Ok(())
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn terms(&self) -> &ContractTerms {
        &self.terms
    }

    pub fn start_date(&self) -> NaiveDate {
        self.terms.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.terms.end_date
    }

    pub fn contract_type(&self) -> ContractType {
        self.terms.contract_type
    }

    pub fn position(&self) -> &str {
        &self.terms.position
    }

    pub fn salary(&self) -> Decimal {
        self.terms.salary
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Rebuilds a contract from a stored row without re-validating it
    ///
    /// Only repository implementations should call this.
    pub fn from_persistence(
        id: Uuid,
        user_id: Uuid,
        terms: ContractTerms,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            terms,
            created_at,
            updated_at,
        }
    }
}
