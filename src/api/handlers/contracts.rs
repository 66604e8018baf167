use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::middleware::{ApiJson, AuthUser};
use crate::api::state::AppState;
use crate::auth::access::resolve_target_id;
use crate::domain::contract::{Contract, ContractTerms, ContractType};

/// Request body for creating or replacing a contract
#[derive(Debug, Deserialize)]
pub struct ContractRequest {
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub contract_type: ContractType,
    pub position: String,
    pub salary: Decimal,
}

impl From<ContractRequest> for ContractTerms {
    fn from(req: ContractRequest) -> Self {
        ContractTerms {
            start_date: req.start_date,
            end_date: req.end_date,
            contract_type: req.contract_type,
            position: req.position,
            salary: req.salary,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContractResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub contract_type: ContractType,
    pub position: String,
    pub salary: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Contract> for ContractResponse {
    fn from(contract: &Contract) -> Self {
        Self {
            id: contract.id(),
            user_id: contract.user_id(),
            start_date: contract.start_date(),
            end_date: contract.end_date(),
            contract_type: contract.contract_type(),
            position: contract.position().to_string(),
            salary: contract.salary(),
            created_at: contract.created_at(),
            updated_at: contract.updated_at(),
        }
    }
}

/// POST /users/:id/contracts
pub async fn create_contract(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(user_id): Path<String>,
    ApiJson(req): ApiJson<ContractRequest>,
) -> Result<(StatusCode, Json<ContractResponse>), ApiError> {
    let user_id = resolve_target_id(Some(&user_id))?;
    let contract = state
        .services
        .contracts
        .create(&caller, user_id, req.into())
        .await?;

    Ok((StatusCode::CREATED, Json(ContractResponse::from(&contract))))
}

/// GET /users/:id/contracts
pub async fn list_user_contracts(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<ContractResponse>>, ApiError> {
    let user_id = resolve_target_id(Some(&user_id))?;
    let contracts = state
        .services
        .contracts
        .list_by_user(&caller, user_id)
        .await?;

    Ok(Json(contracts.iter().map(ContractResponse::from).collect()))
}

/// GET /contracts/:id
pub async fn get_contract(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ContractResponse>, ApiError> {
    let id = resolve_target_id(Some(&id))?;
    let contract = state.services.contracts.get(&caller, id).await?;

    Ok(Json(ContractResponse::from(&contract)))
}

/// PUT /contracts/:id
pub async fn update_contract(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<ContractRequest>,
) -> Result<Json<ContractResponse>, ApiError> {
    let id = resolve_target_id(Some(&id))?;
    let contract = state
        .services
        .contracts
        .update(&caller, id, req.into())
        .await?;

    Ok(Json(ContractResponse::from(&contract)))
}

/// DELETE /contracts/:id
pub async fn delete_contract(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = resolve_target_id(Some(&id))?;
    state.services.contracts.delete(&caller, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
