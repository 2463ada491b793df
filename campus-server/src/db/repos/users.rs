//! User repository
//!
//! Every read LEFT JOINs posts and aggregates their ids in the same query,
//! so listing users never costs one query per user.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{DbError, UserRepository};
use crate::models::{User, UserDraft};

/// User repository over PostgreSQL
pub struct PgUsers {
    pool: PgPool,
}

impl PgUsers {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUsers {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as(
            r#"
            SELECT
                u.id,
                u.name,
                u.email,
                u.created_at,
                COALESCE(
                    ARRAY_AGG(p.id ORDER BY p.id) FILTER (WHERE p.id IS NOT NULL),
                    ARRAY[]::BIGINT[]
                ) AS post_ids
            FROM users u
            LEFT JOIN posts p ON p.user_id = u.id
            WHERE u.id = $1
            GROUP BY u.id, u.name, u.email, u.created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as(
            r#"
            SELECT
                u.id,
                u.name,
                u.email,
                u.created_at,
                COALESCE(
                    ARRAY_AGG(p.id ORDER BY p.id) FILTER (WHERE p.id IS NOT NULL),
                    ARRAY[]::BIGINT[]
                ) AS post_ids
            FROM users u
            LEFT JOIN posts p ON p.user_id = u.id
            GROUP BY u.id, u.name, u.email, u.created_at
            ORDER BY u.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn save(&self, id: Option<i64>, draft: UserDraft) -> Result<User, DbError> {
        let Some(id) = id else {
            // A fresh row cannot be referenced by any post yet
            let user = sqlx::query_as(
                r#"
                INSERT INTO users (name, email, created_at)
                VALUES ($1, $2, $3)
                RETURNING id, name, email, created_at, ARRAY[]::BIGINT[] AS post_ids
                "#,
            )
            .bind(&draft.name)
            .bind(&draft.email)
            .bind(&draft.created_at)
            .fetch_one(&self.pool)
            .await?;

            return Ok(user);
        };

        // Single query: CTE for the update + JOIN for post ids
        sqlx::query_as(
            r#"
            WITH updated AS (
                UPDATE users
                SET name = $2, email = $3, created_at = $4
                WHERE id = $1
                RETURNING id, name, email, created_at
            )
            SELECT
                u.id,
                u.name,
                u.email,
                u.created_at,
                COALESCE(
                    ARRAY_AGG(p.id ORDER BY p.id) FILTER (WHERE p.id IS NOT NULL),
                    ARRAY[]::BIGINT[]
                ) AS post_ids
            FROM updated u
            LEFT JOIN posts p ON p.user_id = u.id
            GROUP BY u.id, u.name, u.email, u.created_at
            "#,
        )
        .bind(id)
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.created_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("user", id))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, DbError> {
        // posts.user_id is ON DELETE SET NULL, the posts survive
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
