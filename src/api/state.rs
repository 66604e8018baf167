use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::jwt::TokenCodec;
use crate::services::Services;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub tokens: Arc<TokenCodec>,
}

impl AppState {
    pub fn new(services: Services, tokens: Arc<TokenCodec>) -> Self {
        Self { services, tokens }
    }
}

impl FromRef<AppState> for Arc<TokenCodec> {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}
