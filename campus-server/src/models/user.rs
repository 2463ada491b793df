//! User record and its wire shapes

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationErrors;

/// User row with the ids of the posts that reference it.
///
/// `post_ids` is computed from `posts.user_id` on every read and is never
/// written back.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub post_ids: Vec<i64>,
}

/// Column values for an insert or a full-row update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub created_at: String,
}

/// POST /api/users body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    pub name: Option<String>,
    pub email: Option<String>,
    pub created_at: Option<String>,
}

impl CreateUserDto {
    pub fn validate(self) -> Result<UserDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = errors.require_text("name", self.name);
        let email = errors.require_text("email", self.email);
        let created_at = errors.require_text("createdAt", self.created_at);
        errors.into_result()?;

        Ok(UserDraft {
            name,
            email,
            created_at,
        })
    }
}

/// PUT /api/users/{id} body; every field optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    pub name: Option<String>,
    pub email: Option<String>,
    pub created_at: Option<String>,
}

impl UpdateUserDto {
    /// Overlay the present fields on an existing user.
    pub fn apply(self, existing: &User) -> UserDraft {
        UserDraft {
            name: self.name.unwrap_or_else(|| existing.name.clone()),
            email: self.email.unwrap_or_else(|| existing.email.clone()),
            created_at: self
                .created_at
                .unwrap_or_else(|| existing.created_at.clone()),
        }
    }
}

/// User as returned by every /api/users endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub post_ids: Vec<i64>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            created_at: u.created_at,
            post_ids: u.post_ids,
        }
    }
}
