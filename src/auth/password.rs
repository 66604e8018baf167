// Credential hashing
// One-way bcrypt hashes; plaintext never leaves this module

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::domain::errors::{DomainError, DomainResult};

/// One-way credential hashing used by the user service
///
/// Implementations must never log or keep the plaintext.
pub trait CredentialHasher: Send + Sync {
    /// Hashes a plaintext credential
    fn hash(&self, plaintext: &str) -> DomainResult<String>;

    /// Checks a plaintext credential against a stored hash
    fn verify(&self, plaintext: &str, hash: &str) -> DomainResult<bool>;
}

/// bcrypt-backed [`CredentialHasher`]
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Hasher with an explicit work factor (bcrypt accepts 4..=31)
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl CredentialHasher for BcryptHasher {
    /// # Example
    /// ```
    /// use staffbook_api::auth::password::{BcryptHasher, CredentialHasher};
    ///
    /// let hasher = BcryptHasher::new(4);
    /// let hash = hasher.hash("my_password").expect("valid hash");
    /// assert!(hasher.verify("my_password", &hash).unwrap());
    /// ```
    fn hash(&self, plaintext: &str) -> DomainResult<String> {
        hash(plaintext, self.cost)
            .map_err(|e| DomainError::Internal(format!("failed to hash credential: {}", e)))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> DomainResult<bool> {
        verify(plaintext, hash)
            .map_err(|e| DomainError::Internal(format!("failed to verify credential: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> BcryptHasher {
        BcryptHasher::new(4)
    }

    #[test]
    fn hash_and_verify_password() {
        let password = "test_password_123";
        let hash = hasher().hash(password).expect("valid hash");

        let valid = hasher().verify(password, &hash).expect("valid verification");
        assert!(valid);
    }

    #[test]
    fn verify_wrong_password() {
        let password = "test_password_123";
        let hash = hasher().hash(password).expect("valid hash");

        let valid = hasher()
            .verify("wrong_password", &hash)
            .expect("valid verification");
        assert!(!valid);
    }

    #[test]
    fn hash_different_outputs() {
        let password = "test_password_123";
        let hash1 = hasher().hash(password).expect("valid hash");
        let hash2 = hasher().hash(password).expect("valid hash");

        // Hashes should be different due to salt
        assert_ne!(hash1, hash2);
        assert!(!hash1.contains(password));
    }

    #[test]
    fn garbage_hash_is_internal_error() {
        let result = hasher().verify("secret", "not-a-bcrypt-hash");
        assert!(matches!(result, Err(DomainError::Internal(_))));
    }
}
