//! Schema migrations for the students, users and posts tables
//!
//! Every statement is idempotent, so `run` is safe on every startup.

use sqlx::PgPool;

use super::DbError;

const STATEMENTS: &[(&str, &str)] = &[
    (
        "students",
        r#"
        CREATE TABLE IF NOT EXISTS students (
            id BIGSERIAL PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL
        )
        "#,
    ),
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    ),
    (
        "posts",
        r#"
        CREATE TABLE IF NOT EXISTS posts (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            published_at TEXT NOT NULL,
            user_id BIGINT REFERENCES users(id) ON DELETE SET NULL
        )
        "#,
    ),
    (
        "idx_posts_user_id",
        "CREATE INDEX IF NOT EXISTS idx_posts_user_id ON posts(user_id)",
    ),
];

/// Run all migrations in order.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running migrations...");

    for (name, sql) in STATEMENTS {
        tracing::debug!(object = *name, "applying migration");
        sqlx::query(*sql).execute(pool).await?;
    }

    tracing::info!(count = STATEMENTS.len(), "Migrations complete");
    Ok(())
}
