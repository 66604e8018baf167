// Request extractors shared by the handlers

pub mod auth;
pub mod json;

pub use auth::{AuthUser, MaybeAuthUser};
pub use json::ApiJson;
