use serde::{Deserialize, Serialize};

/// Kind of employment contract
///
/// Only `Indefinite` contracts are open-ended; every other kind must carry
/// an end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "contract_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractType {
    /// Open-ended, never has an end date
    Indefinite,
    /// Fixed term
    Temporary,
    /// Training or internship
    Training,
    /// Seasonal work that repeats in cycles
    FixedDiscontinuous,
}

impl ContractType {
    /// Whether contracts of this type must carry an end date
    ///
    /// # Example
    /// ```
    /// use staffbook_api::domain::contract::ContractType;
    ///
    /// assert!(!ContractType::Indefinite.requires_end_date());
    /// assert!(ContractType::Temporary.requires_end_date());
    /// ```
    pub fn requires_end_date(&self) -> bool {
        match self {
            ContractType::Indefinite => false,
            ContractType::Temporary
            | ContractType::Training
            | ContractType::FixedDiscontinuous => true,
        }
    }
}

impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractType::Indefinite => write!(f, "INDEFINITE"),
            ContractType::Temporary => write!(f, "TEMPORARY"),
            ContractType::Training => write!(f, "TRAINING"),
            ContractType::FixedDiscontinuous => write!(f, "FIXED_DISCONTINUOUS"),
        }
    }
}
