//! Student endpoints
//!
//! The student API returns the stored record itself on every verb.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidId};
use crate::http::state::AppState;
use crate::models::{Student, StudentInput};

/// GET /students - list all students
async fn list_students(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Student>>, ApiError> {
    Ok(Json(state.students.find_all().await?))
}

/// GET /students/{id} - get a single student
async fn get_student(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Student>, ApiError> {
    let student = state
        .students
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("student", id))?;

    Ok(Json(student))
}

/// POST /students - create a student
async fn create_student(
    State(state): State<Arc<AppState>>,
    JsonBody(input): JsonBody<StudentInput>,
) -> Result<Json<Student>, ApiError> {
    Ok(Json(state.students.create(input).await?))
}

/// PUT /students/{id} - overwrite the fields present in the body
async fn update_student(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    JsonBody(input): JsonBody<StudentInput>,
) -> Result<Json<Student>, ApiError> {
    let student = state
        .students
        .update(id, input)
        .await?
        .ok_or_else(|| ApiError::not_found("student", id))?;

    Ok(Json(student))
}

/// DELETE /students/{id}
async fn delete_student(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<String, ApiError> {
    if !state.students.delete_by_id(id).await? {
        return Err(ApiError::not_found("student", id));
    }

    tracing::info!(id, "student deleted");
    Ok(format!("Student with id {} deleted successfully.", id))
}

/// Student routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route(
            "/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
}
