use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::handlers::users::{NewUserRequest, UserResponse};
use crate::api::middleware::{ApiJson, AuthUser, MaybeAuthUser};
use crate::api::state::AppState;
use crate::auth::access::resolve_target_id;
use crate::domain::company::Company;
use crate::services::CompanyInput;

/// Request body for registering or editing a company
#[derive(Debug, Deserialize)]
pub struct CompanyRequest {
    pub name: String,
    pub tax_id: String,
}

impl From<CompanyRequest> for CompanyInput {
    fn from(req: CompanyRequest) -> Self {
        CompanyInput {
            name: req.name,
            tax_id: req.tax_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    pub id: Uuid,
    pub name: String,
    pub tax_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Company> for CompanyResponse {
    fn from(company: &Company) -> Self {
        Self {
            id: company.id(),
            name: company.name().to_string(),
            tax_id: company.tax_id().to_string(),
            created_at: company.created_at(),
            updated_at: company.updated_at(),
        }
    }
}

/// Register a new company
///
/// POST /companies
pub async fn create_company(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CompanyRequest>,
) -> Result<(StatusCode, Json<CompanyResponse>), ApiError> {
    let company = state.services.companies.create(req.into()).await?;

    Ok((StatusCode::CREATED, Json(CompanyResponse::from(&company))))
}

/// Get a company by ID
///
/// GET /companies/:id
pub async fn get_company(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<CompanyResponse>, ApiError> {
    let id = resolve_target_id(Some(&id))?;
    let company = state.services.companies.get(&caller, id).await?;

    Ok(Json(CompanyResponse::from(&company)))
}

/// PUT /companies/:id
pub async fn update_company(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<CompanyRequest>,
) -> Result<Json<CompanyResponse>, ApiError> {
    let id = resolve_target_id(Some(&id))?;
    let company = state
        .services
        .companies
        .update(&caller, id, req.into())
        .await?;

    Ok(Json(CompanyResponse::from(&company)))
}

/// Delete a company and everything under it
///
/// DELETE /companies/:id
pub async fn delete_company(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = resolve_target_id(Some(&id))?;
    state.services.companies.delete(&caller, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /companies/:id/users
pub async fn list_company_users(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let id = resolve_target_id(Some(&id))?;
    let users = state.services.users.list_by_company(&caller, id).await?;

    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// Create several users at once; none are created if any is rejected
///
/// POST /companies/:id/users/batch
pub async fn batch_create_users(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<Vec<NewUserRequest>>,
) -> Result<(StatusCode, Json<Vec<UserResponse>>), ApiError> {
    let id = resolve_target_id(Some(&id))?;
    let inputs = req.into_iter().map(Into::into).collect();
    let users = state
        .services
        .users
        .create_batch(caller.as_ref(), id, inputs)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(users.iter().map(UserResponse::from).collect()),
    ))
}
