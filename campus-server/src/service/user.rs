use std::sync::Arc;

use super::ServiceError;
use crate::db::{DbError, UserRepository};
use crate::models::{CreateUserDto, UpdateUserDto, UserResponse};

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn find_all(&self) -> Result<Vec<UserResponse>, DbError> {
        let users = self.users.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<UserResponse>, DbError> {
        Ok(self.users.find_by_id(id).await?.map(UserResponse::from))
    }

    pub async fn create(&self, dto: CreateUserDto) -> Result<UserResponse, ServiceError> {
        let draft = dto.validate()?;
        let user = self.users.save(None, draft).await?;
        tracing::debug!(id = user.id, "user created");
        Ok(UserResponse::from(user))
    }

    /// `Ok(None)` when no user has this id.
    pub async fn update(
        &self,
        id: i64,
        dto: UpdateUserDto,
    ) -> Result<Option<UserResponse>, ServiceError> {
        let Some(existing) = self.users.find_by_id(id).await? else {
            return Ok(None);
        };

        let draft = dto.apply(&existing);
        let user = self.users.save(Some(id), draft).await?;
        Ok(Some(UserResponse::from(user)))
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<bool, DbError> {
        self.users.delete_by_id(id).await
    }
}
