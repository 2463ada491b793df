//! Post endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidId};
use crate::http::state::AppState;
use crate::models::{CreatePostDto, PostResponse, UpdatePostDto};

/// GET /posts
async fn list_posts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    Ok(Json(state.posts.find_all().await?))
}

/// GET /posts/{id}
async fn get_post(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<PostResponse>, ApiError> {
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("post", id))?;

    Ok(Json(post))
}

/// POST /posts - an unknown userId still creates the post, without owner
async fn create_post(
    State(state): State<Arc<AppState>>,
    JsonBody(dto): JsonBody<CreatePostDto>,
) -> Result<Json<PostResponse>, ApiError> {
    Ok(Json(state.posts.create(dto).await?))
}

/// PUT /posts/{id}
async fn update_post(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    JsonBody(dto): JsonBody<UpdatePostDto>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = state
        .posts
        .update(id, dto)
        .await?
        .ok_or_else(|| ApiError::not_found("post", id))?;

    Ok(Json(post))
}

/// DELETE /posts/{id}
async fn delete_post(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<String, ApiError> {
    if !state.posts.delete_by_id(id).await? {
        return Err(ApiError::not_found("post", id));
    }

    tracing::info!(id, "post deleted");
    Ok(format!("Post with id {} deleted successfully.", id))
}

/// Post routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
}
