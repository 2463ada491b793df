//! campus-server: Student and User/Post CRUD over HTTP
//!
//! Route handlers delegate to services, services map DTOs onto records and
//! call repository traits, and the repositories run against PostgreSQL or an
//! in-memory store.

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod service;

pub use config::{ConfigError, ServerConfig, StorageBackend};
pub use http::{build_router, run_server, AppState, ServerError};
