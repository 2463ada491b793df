//! Service layer: DTO to record mapping on top of the repositories
//!
//! Lookups return `Option` and leave the not-found decision to the HTTP
//! layer. Deletes report whether a row was removed.

pub mod post;
pub mod student;
pub mod user;

pub use post::PostService;
pub use student::StudentService;
pub use user::UserService;

use crate::db::DbError;
use crate::models::ValidationErrors;

/// Failure of a create or update call
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Db(#[from] DbError),
}
