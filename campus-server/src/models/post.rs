//! Post record and its wire shapes

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationErrors;

/// Post row; `user_id` is the nullable FK to `users.id`
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub published_at: String,
    pub user_id: Option<i64>,
}

/// Column values for an insert or a full-row update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub published_at: String,
    pub user_id: Option<i64>,
}

/// POST /api/posts body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostDto {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published_at: Option<String>,
    pub user_id: Option<i64>,
}

impl CreatePostDto {
    /// Validate the body.
    ///
    /// The returned draft carries the *requested* user id; the caller replaces
    /// it with the resolved one before saving.
    pub fn validate(self) -> Result<PostDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let title = errors.require_text("title", self.title);
        let content = errors.require_text("content", self.content);
        let published_at = errors.require_text("publishedAt", self.published_at);
        let user_id = errors.require("userId", self.user_id);
        errors.into_result()?;

        Ok(PostDraft {
            title,
            content,
            published_at,
            user_id,
        })
    }
}

/// PUT /api/posts/{id} body; every field optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostDto {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published_at: Option<String>,
    pub user_id: Option<i64>,
}

impl UpdatePostDto {
    /// Overlay the present scalar fields on an existing post.
    ///
    /// The user reference is copied from `existing`; re-resolving `user_id`
    /// is the service's job.
    pub fn apply(self, existing: &Post) -> PostDraft {
        PostDraft {
            title: self.title.unwrap_or_else(|| existing.title.clone()),
            content: self.content.unwrap_or_else(|| existing.content.clone()),
            published_at: self
                .published_at
                .unwrap_or_else(|| existing.published_at.clone()),
            user_id: existing.user_id,
        }
    }
}

/// Post as returned by every /api/posts endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub published_at: String,
    pub user_id: Option<i64>,
}

impl From<Post> for PostResponse {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            title: p.title,
            content: p.content,
            published_at: p.published_at,
            user_id: p.user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationError;

    fn hello() -> Post {
        Post {
            id: 2,
            title: "Hi".into(),
            content: "...".into(),
            published_at: "2024-01-02".into(),
            user_id: Some(1),
        }
    }

    #[test]
    fn create_requires_user_id() {
        let err = CreatePostDto {
            title: Some("Hi".into()),
            content: Some("...".into()),
            published_at: Some("2024-01-02".into()),
            user_id: None,
        }
        .validate()
        .unwrap_err();

        assert_eq!(err.errors(), &[ValidationError::Required { field: "userId" }]);
    }

    #[test]
    fn create_keeps_requested_user() {
        let dto: CreatePostDto = serde_json::from_str(
            r#"{"title": "Hi", "content": "...", "publishedAt": "2024-01-02", "userId": 7}"#,
        )
        .unwrap();
        assert_eq!(dto.validate().unwrap().user_id, Some(7));
    }

    #[test]
    fn update_never_touches_user_reference() {
        let draft = UpdatePostDto {
            title: Some("Hello".into()),
            user_id: Some(42),
            ..Default::default()
        }
        .apply(&hello());

        assert_eq!(draft.title, "Hello");
        assert_eq!(draft.content, "...");
        assert_eq!(draft.user_id, Some(1));
    }

    #[test]
    fn response_serializes_missing_user_as_null() {
        let post = Post {
            user_id: None,
            ..hello()
        };
        let json = serde_json::to_value(PostResponse::from(post)).unwrap();
        assert_eq!(json["userId"], serde_json::Value::Null);
        assert_eq!(json["publishedAt"], "2024-01-02");
    }
}
