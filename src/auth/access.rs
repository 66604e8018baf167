//! Access decisions
//!
//! Pure functions over the caller's verified identity and the requested
//! action. Nothing here touches storage; callers fetch whatever stored state
//! a decision needs and pass it in.
//!
//! ```text
//! Unauthenticated --(token verified)--> Authenticated --(policy)--> Authorized | Forbidden
//! ```

use uuid::Uuid;

use crate::auth::jwt::TokenCodec;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::Role;

/// Verified identity of the caller of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: Uuid,
    pub role: Role,
}

impl Caller {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Resolves the caller from a raw `Authorization` header value
///
/// A missing header, a header that is not `Bearer <token>`, and every token
/// verification failure all collapse into `Unauthenticated`.
pub fn require_authenticated(
    codec: &TokenCodec,
    authorization: Option<&str>,
) -> DomainResult<Caller> {
    let token = authorization
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(DomainError::Unauthenticated)?;

    let claims = codec.verify(token).map_err(|e| {
        tracing::debug!(reason = %e, "rejected bearer token");
        DomainError::Unauthenticated
    })?;

    Ok(claims.caller())
}

/// Allows only callers holding `expected`
pub fn require_role(caller: &Caller, expected: Role) -> DomainResult<()> {
    if caller.role == expected {
        Ok(())
    } else {
        tracing::warn!(user_id = %caller.user_id, role = %caller.role, required = %expected, "role check denied");
        Err(DomainError::Forbidden)
    }
}

/// Allows admins, or the caller acting on their own user record
pub fn require_self_or_admin(caller: &Caller, target_user_id: Uuid) -> DomainResult<()> {
    match caller.role {
        Role::Admin => Ok(()),
        Role::Employee if caller.user_id == target_user_id => Ok(()),
        Role::Employee => {
            tracing::warn!(user_id = %caller.user_id, target = %target_user_id, "self-or-admin check denied");
            Err(DomainError::Forbidden)
        }
    }
}

/// Parses a resource identifier taken from the request path
pub fn resolve_target_id(raw: Option<&str>) -> DomainResult<Uuid> {
    let raw = raw
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| DomainError::BadRequest("missing resource id".to_string()))?;

    Uuid::parse_str(raw).map_err(|_| DomainError::BadRequest(format!("invalid id: {}", raw)))
}

/// Picks the value to persist for a field only admins may change
///
/// Non-admin callers get the stored value back whatever they asked for; the
/// requested value is silently discarded. `stored` must come from storage.
pub fn admin_only_change<T>(caller: &Caller, requested: Option<T>, stored: T) -> T {
    match caller.role {
        Role::Admin => requested.unwrap_or(stored),
        Role::Employee => stored,
    }
}
