use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::middleware::{ApiJson, AuthUser, MaybeAuthUser};
use crate::api::state::AppState;
use crate::auth::access::resolve_target_id;
use crate::domain::user::{Role, User};
use crate::services::{NewUser, UserChanges};

/// One user to create, as submitted
#[derive(Deserialize)]
pub struct NewUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl From<NewUserRequest> for NewUser {
    fn from(req: NewUserRequest) -> Self {
        NewUser {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
        }
    }
}

/// Request body for creating a single user
#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub company_id: Uuid,
    #[serde(flatten)]
    pub user: NewUserRequest,
}

/// Request body for editing a user
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// User as returned by the API; never carries the credential hash
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            company_id: user.company_id(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            role: user.role(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

/// Create a user
///
/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state
        .services
        .users
        .create(caller.as_ref(), req.company_id, req.user.into())
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// Get a user by ID
///
/// GET /users/:id
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = resolve_target_id(Some(&id))?;
    let user = state.services.users.get(&caller, id).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// Edit a user
///
/// PUT /users/:id
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = resolve_target_id(Some(&id))?;
    let changes = UserChanges {
        name: req.name,
        email: req.email,
        role: req.role,
    };
    let user = state.services.users.update(&caller, id, changes).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// Delete a user
///
/// DELETE /users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = resolve_target_id(Some(&id))?;
    state.services.users.delete(&caller, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
