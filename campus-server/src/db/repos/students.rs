//! Student repository
//!
//! Plain single-table CRUD over `students`.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{DbError, StudentRepository};
use crate::models::{Student, StudentDraft};

/// Student repository over PostgreSQL
pub struct PgStudents {
    pool: PgPool,
}

impl PgStudents {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentRepository for PgStudents {
    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, DbError> {
        let student = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name
            FROM students
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    async fn find_all(&self) -> Result<Vec<Student>, DbError> {
        let students = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name
            FROM students
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    async fn save(&self, id: Option<i64>, draft: StudentDraft) -> Result<Student, DbError> {
        let Some(id) = id else {
            let student = sqlx::query_as(
                r#"
                INSERT INTO students (first_name, last_name)
                VALUES ($1, $2)
                RETURNING id, first_name, last_name
                "#,
            )
            .bind(&draft.first_name)
            .bind(&draft.last_name)
            .fetch_one(&self.pool)
            .await?;

            return Ok(student);
        };

        sqlx::query_as(
            r#"
            UPDATE students
            SET first_name = $2, last_name = $3
            WHERE id = $1
            RETURNING id, first_name, last_name
            "#,
        )
        .bind(id)
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("student", id))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
