//! User endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidId};
use crate::http::state::AppState;
use crate::models::{CreateUserDto, UpdateUserDto, UserResponse};

/// GET /users - list all users with their post ids
async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    Ok(Json(state.users.find_all().await?))
}

/// GET /users/{id}
async fn get_user(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("user", id))?;

    Ok(Json(user))
}

/// POST /users
async fn create_user(
    State(state): State<Arc<AppState>>,
    JsonBody(dto): JsonBody<CreateUserDto>,
) -> Result<Json<UserResponse>, ApiError> {
    Ok(Json(state.users.create(dto).await?))
}

/// PUT /users/{id}
async fn update_user(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    JsonBody(dto): JsonBody<UpdateUserDto>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .users
        .update(id, dto)
        .await?
        .ok_or_else(|| ApiError::not_found("user", id))?;

    Ok(Json(user))
}

/// DELETE /users/{id} - posts of the user stay, unowned
async fn delete_user(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<String, ApiError> {
    if !state.users.delete_by_id(id).await? {
        return Err(ApiError::not_found("user", id));
    }

    tracing::info!(id, "user deleted");
    Ok(format!("User with id {} deleted successfully.", id))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
