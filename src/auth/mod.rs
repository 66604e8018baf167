// Authentication and authorization core
// Token codec, credential hashing and access decisions; no HTTP or SQL here

pub mod access;
pub mod jwt;
pub mod password;

pub use access::Caller;
pub use jwt::{Claims, TokenCodec, TokenConfig, TokenError};
pub use password::{BcryptHasher, CredentialHasher};
