use thiserror::Error;

/// Errors surfaced by validators, the access layer and the services
///
/// Every failure in the core is one of these kinds. The HTTP adapter maps
/// each kind to a fixed status; `Internal` detail is logged, never returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("not found")]
    NotFound,

    #[error("already exists")]
    Duplicate,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("unauthenticated")]
    Unauthenticated,

    #[error("forbidden")]
    Forbidden,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Shorthand for an `InvalidInput` with a reason
    pub fn invalid(reason: impl Into<String>) -> Self {
        DomainError::InvalidInput(reason.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
