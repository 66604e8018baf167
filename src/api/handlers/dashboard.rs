use axum::{extract::State, Json};

use crate::api::errors::ApiError;
use crate::api::middleware::AuthUser;
use crate::api::state::AppState;
use crate::services::DashboardStats;

/// Aggregate counts for admins
///
/// GET /dashboard/stats
pub async fn get_stats(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<DashboardStats>, ApiError> {
    let stats = state.services.dashboard.stats(&caller).await?;
    Ok(Json(stats))
}
