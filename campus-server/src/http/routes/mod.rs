//! Route handlers organized by resource

pub mod health;
pub mod posts;
pub mod students;
pub mod users;

use std::sync::Arc;

use axum::Router;

use super::state::AppState;

/// Everything served under `/api`
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(students::router())
        .merge(users::router())
        .merge(posts::router())
}
