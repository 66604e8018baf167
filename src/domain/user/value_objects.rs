use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::DomainError;

/// Email address of a user
///
/// # Invariants
/// - Not empty once surrounding whitespace is trimmed
/// - Contains an '@' character
/// - Is immutable after construction
///
/// Uniqueness is not checked here; storage enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validates and wraps an email address
    ///
    /// # Example
    /// ```
    /// use staffbook_api::domain::user::Email;
    ///
    /// let email = Email::new("ana@acme.test").expect("valid email");
    /// assert_eq!(email.as_str(), "ana@acme.test");
    /// assert!(Email::new("").is_err());
    /// ```
    pub fn new(email: impl Into<String>) -> Result<Self, DomainError> {
        let email = email.into().trim().to_string();
        if email.is_empty() {
            return Err(DomainError::invalid("email is required"));
        }
        if !email.contains('@') {
            return Err(DomainError::invalid(format!("invalid email: {}", email)));
        }
        Ok(Email(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Email::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

/// Role held by a user inside their company
///
/// A closed set: every access decision matches on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Company administrator, may act on any record
    Admin,
    /// Regular employee, may act on their own records only
    Employee,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        match self {
            Role::Admin => true,
            Role::Employee => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::Employee => write!(f, "EMPLOYEE"),
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "EMPLOYEE" => Ok(Role::Employee),
            other => Err(DomainError::invalid(format!("unknown role: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_email() {
        assert!(Email::new("test@example.com").is_ok());
    }

    #[test]
    fn email_is_trimmed() {
        let email = Email::new("  ana@acme.test ").unwrap();
        assert_eq!(email.as_str(), "ana@acme.test");
    }

    #[test]
    fn empty_email_is_invalid_input() {
        assert!(matches!(Email::new(""), Err(DomainError::InvalidInput(_))));
        assert!(matches!(Email::new("   "), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn email_without_at_symbol_is_rejected() {
        assert!(Email::new("invalid").is_err());
    }

    #[test]
    fn email_deserialization_validates() {
        let ok: Result<Email, _> = serde_json::from_str("\"a@x.com\"");
        assert!(ok.is_ok());

        let bad: Result<Email, _> = serde_json::from_str("\"\"");
        assert!(bad.is_err());
    }

    #[test]
    fn role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"EMPLOYEE\"").unwrap(),
            Role::Employee
        );
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(serde_json::from_str::<Role>("\"SUPERUSER\"").is_err());
        assert!(matches!(
            "SUPERUSER".parse::<Role>(),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn role_display_round_trips_through_from_str() {
        assert_eq!(Role::Admin.to_string().parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(
            Role::Employee.to_string().parse::<Role>().unwrap(),
            Role::Employee
        );
    }

    #[test]
    fn only_admin_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Employee.is_admin());
    }
}
