//! Storefront user admin routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::{CreateUserRequest, ListUsersQuery, User};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use persistence::repositories::UserRepository;

/// Paged user listing response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListUsersResponse {
    pub users: Vec<User>,
    pub total: i64,
}

/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let repo = UserRepository::new(state.pool.clone());

    if repo.email_exists(&request.email).await? {
        return Err(ApiError::Conflict(format!(
            "User with email '{}' already exists",
            request.email
        )));
    }

    let user = repo.create(&request.email, &request.username).await?;

    info!(user_id = %user.id, "Created user");

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = UserRepository::new(state.pool.clone());
    let (users, total) = repo.list(&query).await?;

    Ok((StatusCode::OK, Json(ListUsersResponse { users, total })))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = UserRepository::new(state.pool.clone());
    let user = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok((StatusCode::OK, Json(user)))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = UserRepository::new(state.pool.clone());
    let deleted = repo.delete(id).await?;

    if !deleted {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    info!(user_id = %id, "Deleted user");

    Ok(StatusCode::NO_CONTENT)
}
