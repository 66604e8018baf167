use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::middleware::{ApiJson, AuthUser};
use crate::api::state::AppState;
use crate::auth::access::resolve_target_id;
use crate::domain::vacation::{Vacation, VacationChanges, VacationStatus};

/// Request body for a new vacation; any submitted status is ignored
#[derive(Debug, Deserialize)]
pub struct CreateVacationRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
pub struct UpdateVacationRequest {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<VacationStatus>,
}

impl From<UpdateVacationRequest> for VacationChanges {
    fn from(req: UpdateVacationRequest) -> Self {
        VacationChanges {
            start_date: req.start_date,
            end_date: req.end_date,
            status: req.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VacationResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: VacationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Vacation> for VacationResponse {
    fn from(vacation: &Vacation) -> Self {
        Self {
            id: vacation.id(),
            user_id: vacation.user_id(),
            start_date: vacation.start_date(),
            end_date: vacation.end_date(),
            status: vacation.status(),
            created_at: vacation.created_at(),
            updated_at: vacation.updated_at(),
        }
    }
}

/// Request a vacation for a user
///
/// POST /users/:id/vacations
pub async fn create_vacation(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(user_id): Path<String>,
    ApiJson(req): ApiJson<CreateVacationRequest>,
) -> Result<(StatusCode, Json<VacationResponse>), ApiError> {
    let user_id = resolve_target_id(Some(&user_id))?;
    let vacation = state
        .services
        .vacations
        .create(&caller, user_id, req.start_date, req.end_date)
        .await?;

    Ok((StatusCode::CREATED, Json(VacationResponse::from(&vacation))))
}

/// GET /users/:id/vacations
pub async fn list_user_vacations(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<VacationResponse>>, ApiError> {
    let user_id = resolve_target_id(Some(&user_id))?;
    let vacations = state
        .services
        .vacations
        .list_by_user(&caller, user_id)
        .await?;

    Ok(Json(vacations.iter().map(VacationResponse::from).collect()))
}

/// GET /vacations/:id
pub async fn get_vacation(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<VacationResponse>, ApiError> {
    let id = resolve_target_id(Some(&id))?;
    let vacation = state.services.vacations.get(&caller, id).await?;

    Ok(Json(VacationResponse::from(&vacation)))
}

/// PUT /vacations/:id
pub async fn update_vacation(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateVacationRequest>,
) -> Result<Json<VacationResponse>, ApiError> {
    let id = resolve_target_id(Some(&id))?;
    let vacation = state
        .services
        .vacations
        .update(&caller, id, req.into())
        .await?;

    Ok(Json(VacationResponse::from(&vacation)))
}

/// DELETE /vacations/:id
pub async fn delete_vacation(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = resolve_target_id(Some(&id))?;
    state.services.vacations.delete(&caller, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
