//! Repository traits and their PostgreSQL implementations
//!
//! Each repository follows these patterns:
//! - `save(None, ..)` inserts and lets the database assign the id
//! - `save(Some(id), ..)` rewrites the whole row and fails with NotFound if it is gone
//! - `delete_by_id` is no-op-safe and reports whether a row was removed
//! - `find_all` returns rows in ascending id order

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Post, PostDraft, Student, StudentDraft, User, UserDraft};

pub mod posts;
pub mod students;
pub mod users;

pub use posts::PgPosts;
pub use students::PgStudents;
pub use users::PgUsers;

use super::MemoryStore;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, DbError>;

    async fn find_all(&self) -> Result<Vec<Student>, DbError>;

    async fn save(&self, id: Option<i64>, draft: StudentDraft) -> Result<Student, DbError>;

    async fn delete_by_id(&self, id: i64) -> Result<bool, DbError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DbError>;

    async fn find_all(&self) -> Result<Vec<User>, DbError>;

    async fn save(&self, id: Option<i64>, draft: UserDraft) -> Result<User, DbError>;

    async fn delete_by_id(&self, id: i64) -> Result<bool, DbError>;
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DbError>;

    async fn find_all(&self) -> Result<Vec<Post>, DbError>;

    async fn save(&self, id: Option<i64>, draft: PostDraft) -> Result<Post, DbError>;

    async fn delete_by_id(&self, id: i64) -> Result<bool, DbError>;
}

/// One handle per table, shared by the services
#[derive(Clone)]
pub struct Repositories {
    pub students: Arc<dyn StudentRepository>,
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
}

impl Repositories {
    /// Repositories backed by PostgreSQL through a shared pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            students: Arc::new(PgStudents::new(pool.clone())),
            users: Arc::new(PgUsers::new(pool.clone())),
            posts: Arc::new(PgPosts::new(pool)),
        }
    }

    /// Repositories backed by one fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::from_memory(MemoryStore::new())
    }

    /// Repositories sharing an existing in-memory store.
    pub fn from_memory(store: MemoryStore) -> Self {
        Self {
            students: Arc::new(store.clone()),
            users: Arc::new(store.clone()),
            posts: Arc::new(store),
        }
    }
}
