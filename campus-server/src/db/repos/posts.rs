//! Post repository

use async_trait::async_trait;
use sqlx::PgPool;

use super::{DbError, PostRepository};
use crate::models::{Post, PostDraft};

/// Post repository over PostgreSQL
pub struct PgPosts {
    pool: PgPool,
}

impl PgPosts {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPosts {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DbError> {
        let post = sqlx::query_as(
            r#"
            SELECT id, title, content, published_at, user_id
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn find_all(&self) -> Result<Vec<Post>, DbError> {
        let posts = sqlx::query_as(
            r#"
            SELECT id, title, content, published_at, user_id
            FROM posts
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    // The owner goes through a subquery so a user deleted since the service
    // looked it up becomes NULL instead of an FK violation.
    async fn save(&self, id: Option<i64>, draft: PostDraft) -> Result<Post, DbError> {
        let Some(id) = id else {
            let post = sqlx::query_as(
                r#"
                INSERT INTO posts (title, content, published_at, user_id)
                VALUES ($1, $2, $3, (SELECT id FROM users WHERE id = $4))
                RETURNING id, title, content, published_at, user_id
                "#,
            )
            .bind(&draft.title)
            .bind(&draft.content)
            .bind(&draft.published_at)
            .bind(draft.user_id)
            .fetch_one(&self.pool)
            .await?;

            return Ok(post);
        };

        sqlx::query_as(
            r#"
            UPDATE posts
            SET title = $2,
                content = $3,
                published_at = $4,
                user_id = (SELECT id FROM users WHERE id = $5)
            WHERE id = $1
            RETURNING id, title, content, published_at, user_id
            "#,
        )
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(&draft.published_at)
        .bind(draft.user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("post", id))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn connect() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool creation failed");
        crate::db::migrations::run(&pool).await.expect("migrations failed");
        pool
    }

    fn draft(user_id: Option<i64>) -> PostDraft {
        PostDraft {
            title: "Hi".into(),
            content: "...".into(),
            published_at: "2024-01-02".into(),
            user_id,
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn unknown_owner_is_stored_as_null() {
        let posts = PgPosts::new(connect().await);

        let post = posts.save(None, draft(Some(i64::MAX))).await.unwrap();
        assert_eq!(post.user_id, None);

        let updated = posts.save(Some(post.id), draft(Some(i64::MAX - 1))).await.unwrap();
        assert_eq!(updated.user_id, None);

        posts.delete_by_id(post.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn post_ids_follow_user_id() {
        use crate::db::{PgUsers, UserRepository};
        use crate::models::UserDraft;

        let pool = connect().await;
        let users = PgUsers::new(pool.clone());
        let posts = PgPosts::new(pool);

        let user = users
            .save(
                None,
                UserDraft {
                    name: "Ana".into(),
                    email: "a@x.com".into(),
                    created_at: "2024-01-01".into(),
                },
            )
            .await
            .unwrap();
        let post = posts.save(None, draft(Some(user.id))).await.unwrap();

        let fetched = users.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(fetched.post_ids, vec![post.id]);

        users.delete_by_id(user.id).await.unwrap();
        let orphan = posts.find_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(orphan.user_id, None);
        posts.delete_by_id(post.id).await.unwrap();
    }
}
