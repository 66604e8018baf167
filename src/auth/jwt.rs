// Identity token issuing and verification
// HS256-signed tokens carrying user id and role, valid for 24 hours

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::access::Caller;
use crate::domain::user::Role;

/// The only algorithm tokens are issued with and accepted under
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Default token lifetime
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Signing configuration for a [`TokenCodec`]
///
/// Built once at startup and injected; the codec never reads ambient state.
#[derive(Clone)]
pub struct TokenConfig {
    /// Symmetric signing key
    pub secret: String,
    /// Lifetime of issued tokens
    pub ttl: Duration,
}

impl TokenConfig {
    /// Config with the default 24 hour lifetime
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl: Duration::hours(TOKEN_TTL_HOURS),
        }
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Token claims (the identity assertion)
///
/// # Fields
/// * `sub` - Subject (user_id)
/// * `role` - Role of the subject at login time
/// * `iat` - Issued at (seconds since epoch)
/// * `exp` - Expiry (seconds since epoch)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// The verified identity carried by these claims
    pub fn caller(&self) -> Caller {
        Caller::new(self.sub, self.role)
    }
}

/// Token verification and signing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature is invalid")]
    SignatureInvalid,

    #[error("token has expired")]
    Expired,

    #[error("token signing failed: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            // A token signed under any other algorithm was not produced by us
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                TokenError::SignatureInvalid
            }
            _ => TokenError::Malformed,
        }
    }
}

/// Issues and verifies identity tokens
///
/// Holds no mutable state; clones share nothing but the key material and
/// are safe to use from any number of tasks.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(config: &TokenConfig) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "iat", "exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            ttl: config.ttl,
        }
    }

    /// Creates a token for a user, issued now
    ///
    /// # Example
    /// ```
    /// use staffbook_api::auth::jwt::{TokenCodec, TokenConfig};
    /// use staffbook_api::domain::user::Role;
    /// use uuid::Uuid;
    ///
    /// let codec = TokenCodec::new(&TokenConfig::new("doc-test-secret"));
    /// let user_id = Uuid::new_v4();
    /// let token = codec.issue(user_id, Role::Employee).expect("valid token");
    ///
    /// let claims = codec.verify(&token).expect("valid verification");
    /// assert_eq!(claims.sub, user_id);
    /// assert_eq!(claims.role, Role::Employee);
    /// ```
    pub fn issue(&self, user_id: Uuid, role: Role) -> Result<String, TokenError> {
        self.issue_at(user_id, role, Utc::now())
    }

    /// Creates a token as if it had been issued at `issued_at`
    pub fn issue_at(
        &self,
        user_id: Uuid,
        role: Role,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user_id,
            role,
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verifies signature, algorithm and expiry, returning the claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::from)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &ALGORITHM)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-unit-tests";

    fn codec() -> TokenCodec {
        TokenCodec::new(&TokenConfig::new(TEST_SECRET))
    }

    #[test]
    fn issue_and_verify_token() {
        let user_id = Uuid::new_v4();
        let token = codec().issue(user_id, Role::Admin).expect("valid token");

        let claims = codec().verify(&token).expect("valid verification");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.caller(), Caller::new(user_id, Role::Admin));
    }

    #[test]
    fn token_expires_24_hours_after_issue() {
        let issued_at = Utc::now();
        let token = codec()
            .issue_at(Uuid::new_v4(), Role::Employee, issued_at)
            .unwrap();

        let claims = codec().verify(&token).unwrap();
        assert_eq!(claims.iat, issued_at.timestamp());
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn token_still_valid_before_expiry() {
        let issued_at = Utc::now() - Duration::hours(23);
        let token = codec()
            .issue_at(Uuid::new_v4(), Role::Employee, issued_at)
            .unwrap();

        assert!(codec().verify(&token).is_ok());
    }

    #[test]
    fn expired_token_fails() {
        let issued_at = Utc::now() - Duration::hours(25);
        let token = codec()
            .issue_at(Uuid::new_v4(), Role::Employee, issued_at)
            .unwrap();

        assert_eq!(codec().verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn wrong_secret_fails() {
        let token = codec().issue(Uuid::new_v4(), Role::Admin).unwrap();

        let other = TokenCodec::new(&TokenConfig::new("another-secret-key-entirely"));
        assert_eq!(other.verify(&token), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn tampered_payload_fails() {
        let admin = codec().issue(Uuid::new_v4(), Role::Admin).unwrap();
        let employee = codec().issue(Uuid::new_v4(), Role::Employee).unwrap();

        let admin_parts: Vec<&str> = admin.split('.').collect();
        let employee_parts: Vec<&str> = employee.split('.').collect();
        let forged = format!(
            "{}.{}.{}",
            employee_parts[0], admin_parts[1], employee_parts[2]
        );

        assert_eq!(codec().verify(&forged), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn other_hmac_algorithm_is_rejected() {
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            role: Role::Admin,
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(codec().verify(&token), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn unsigned_token_is_rejected() {
        // {"alg":"none","typ":"JWT"} . admin claims expiring in 2100 . no signature
        let token = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.\
                     eyJzdWIiOiIwMDAwMDAwMC0wMDAwLTAwMDAtMDAwMC0wMDAwMDAwMDAwMDEiLCJyb2xlIjoiQURNSU4iLCJpYXQiOjE3MDAwMDAwMDAsImV4cCI6NDEwMjQ0NDgwMH0.";

        assert!(codec().verify(token).is_err());
    }

    #[test]
    fn invalid_token_fails() {
        assert_eq!(
            codec().verify("invalid.token.string"),
            Err(TokenError::Malformed)
        );
        assert_eq!(codec().verify(""), Err(TokenError::Malformed));
    }

    #[test]
    fn debug_output_hides_secret() {
        let config = TokenConfig::new(TEST_SECRET);
        assert!(!format!("{:?}", config).contains(TEST_SECRET));
    }
}
