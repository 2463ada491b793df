use std::sync::Arc;

use super::ServiceError;
use crate::db::{DbError, PostRepository, UserRepository};
use crate::models::{CreatePostDto, PostResponse, UpdatePostDto};

#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { posts, users }
    }

    pub async fn find_all(&self) -> Result<Vec<PostResponse>, DbError> {
        let posts = self.posts.find_all().await?;
        Ok(posts.into_iter().map(PostResponse::from).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<PostResponse>, DbError> {
        Ok(self.posts.find_by_id(id).await?.map(PostResponse::from))
    }

    /// Create a post. A `userId` that matches no user is not an error: the
    /// post is stored without an owner.
    pub async fn create(&self, dto: CreatePostDto) -> Result<PostResponse, ServiceError> {
        let mut draft = dto.validate()?;
        draft.user_id = match draft.user_id {
            Some(user_id) => self.resolve_user(user_id).await?,
            None => None,
        };

        let post = self.posts.save(None, draft).await?;
        tracing::debug!(id = post.id, user_id = ?post.user_id, "post created");
        Ok(PostResponse::from(post))
    }

    /// `Ok(None)` when no post has this id. A `userId` that matches no user
    /// leaves the current owner in place.
    pub async fn update(
        &self,
        id: i64,
        dto: UpdatePostDto,
    ) -> Result<Option<PostResponse>, ServiceError> {
        let Some(existing) = self.posts.find_by_id(id).await? else {
            return Ok(None);
        };

        let requested_user = dto.user_id;
        let mut draft = dto.apply(&existing);
        if let Some(user_id) = requested_user {
            if let Some(resolved) = self.resolve_user(user_id).await? {
                draft.user_id = Some(resolved);
            }
        }

        let post = self.posts.save(Some(id), draft).await?;
        Ok(Some(PostResponse::from(post)))
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<bool, DbError> {
        self.posts.delete_by_id(id).await
    }

    async fn resolve_user(&self, user_id: i64) -> Result<Option<i64>, DbError> {
        let user = self.users.find_by_id(user_id).await?;
        if user.is_none() {
            tracing::warn!(user_id, "post references unknown user, leaving owner unset");
        }
        Ok(user.map(|u| u.id))
    }
}
