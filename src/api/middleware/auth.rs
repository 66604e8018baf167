use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::api::errors::ApiError;
use crate::auth::access::{require_authenticated, Caller};
use crate::auth::jwt::TokenCodec;

/// Bearer token extractor for protected routes
///
/// Usage:
/// ```rust,ignore
/// async fn protected_handler(
///     AuthUser(caller): AuthUser,
/// ) -> Result<String, ApiError> {
///     Ok(format!("Hello user {}", caller.user_id))
/// }
/// ```
pub struct AuthUser(pub Caller);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    Arc<TokenCodec>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let codec = Arc::<TokenCodec>::from_ref(state);
        let caller = require_authenticated(&codec, authorization(parts))?;
        Ok(AuthUser(caller))
    }
}

/// Like [`AuthUser`], for routes that also serve anonymous callers
///
/// A request without an `Authorization` header yields `None`; a header that
/// is present but does not verify is still rejected.
pub struct MaybeAuthUser(pub Option<Caller>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeAuthUser
where
    Arc<TokenCodec>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(MaybeAuthUser(None));
        }

        let codec = Arc::<TokenCodec>::from_ref(state);
        let caller = require_authenticated(&codec, authorization(parts))?;
        Ok(MaybeAuthUser(Some(caller)))
    }
}

fn authorization(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}
