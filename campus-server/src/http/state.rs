//! Application state shared across handlers

use crate::config::StorageBackend;
use crate::db::Repositories;
use crate::service::{PostService, StudentService, UserService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub students: StudentService,
    pub users: UserService,
    pub posts: PostService,
    pub storage: StorageBackend,
}

impl AppState {
    pub fn new(repos: Repositories, storage: StorageBackend) -> Self {
        Self {
            students: StudentService::new(repos.students),
            users: UserService::new(repos.users.clone()),
            posts: PostService::new(repos.posts, repos.users),
            storage,
        }
    }

    /// State over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Repositories::in_memory(), StorageBackend::Memory)
    }
}
