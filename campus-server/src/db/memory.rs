//! In-memory store implementing every repository trait
//!
//! Mirrors the PostgreSQL semantics: per-table id sequences starting at 1,
//! ascending-id iteration, `post_ids` derived from `posts.user_id`, and
//! `ON DELETE SET NULL` when a user is removed. Used by tests and by
//! `storage = "memory"`.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DbError, PostRepository, StudentRepository, UserRepository};
use crate::models::{Post, PostDraft, Student, StudentDraft, User, UserDraft};

/// Id sequence plus rows keyed by id
#[derive(Debug)]
struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[derive(Debug, Default)]
struct Tables {
    students: Table<StudentDraft>,
    users: Table<UserDraft>,
    posts: Table<PostDraft>,
}

impl Tables {
    fn post_ids_for(&self, user_id: i64) -> Vec<i64> {
        self.posts
            .rows
            .iter()
            .filter(|(_, post)| post.user_id == Some(user_id))
            .map(|(id, _)| *id)
            .collect()
    }

    fn user(&self, id: i64) -> Option<User> {
        self.users.rows.get(&id).map(|row| User {
            id,
            name: row.name.clone(),
            email: row.email.clone(),
            created_at: row.created_at.clone(),
            post_ids: self.post_ids_for(id),
        })
    }
}

fn student(id: i64, row: &StudentDraft) -> Student {
    Student {
        id,
        first_name: row.first_name.clone(),
        last_name: row.last_name.clone(),
    }
}

fn post(id: i64, row: &PostDraft) -> Post {
    Post {
        id,
        title: row.title.clone(),
        content: row.content.clone(),
        published_at: row.published_at.clone(),
        user_id: row.user_id,
    }
}

/// Shared in-memory database; clones see the same tables
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.students.rows.get(&id).map(|row| student(id, row)))
    }

    async fn find_all(&self) -> Result<Vec<Student>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .students
            .rows
            .iter()
            .map(|(id, row)| student(*id, row))
            .collect())
    }

    async fn save(&self, id: Option<i64>, draft: StudentDraft) -> Result<Student, DbError> {
        let mut tables = self.tables.write().await;
        let id = match id {
            Some(id) if tables.students.rows.contains_key(&id) => id,
            Some(id) => return Err(DbError::not_found("student", id)),
            None => tables.students.allocate_id(),
        };

        let saved = student(id, &draft);
        tables.students.rows.insert(id, draft);
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, DbError> {
        let mut tables = self.tables.write().await;
        Ok(tables.students.rows.remove(&id).is_some())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.user(id))
    }

    async fn find_all(&self) -> Result<Vec<User>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .rows
            .keys()
            .filter_map(|id| tables.user(*id))
            .collect())
    }

    async fn save(&self, id: Option<i64>, draft: UserDraft) -> Result<User, DbError> {
        let mut tables = self.tables.write().await;
        let id = match id {
            Some(id) if tables.users.rows.contains_key(&id) => id,
            Some(id) => return Err(DbError::not_found("user", id)),
            None => tables.users.allocate_id(),
        };

        tables.users.rows.insert(id, draft);
        tables
            .user(id)
            .ok_or_else(|| DbError::not_found("user", id))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, DbError> {
        let mut tables = self.tables.write().await;
        if tables.users.rows.remove(&id).is_none() {
            return Ok(false);
        }

        // ON DELETE SET NULL
        for post in tables.posts.rows.values_mut() {
            if post.user_id == Some(id) {
                post.user_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.rows.get(&id).map(|row| post(id, row)))
    }

    async fn find_all(&self) -> Result<Vec<Post>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .rows
            .iter()
            .map(|(id, row)| post(*id, row))
            .collect())
    }

    async fn save(&self, id: Option<i64>, mut draft: PostDraft) -> Result<Post, DbError> {
        let mut tables = self.tables.write().await;
        let id = match id {
            Some(id) if tables.posts.rows.contains_key(&id) => id,
            Some(id) => return Err(DbError::not_found("post", id)),
            None => tables.posts.allocate_id(),
        };

        // A dangling FK would be rejected by PostgreSQL; the store keeps the
        // row but never points at a missing user.
        if let Some(user_id) = draft.user_id {
            if !tables.users.rows.contains_key(&user_id) {
                tracing::warn!(post_id = id, user_id, "dropping reference to missing user");
                draft.user_id = None;
            }
        }

        let saved = post(id, &draft);
        tables.posts.rows.insert(id, draft);
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, DbError> {
        let mut tables = self.tables.write().await;
        Ok(tables.posts.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> UserDraft {
        UserDraft {
            name: "Ana".into(),
            email: "a@x.com".into(),
            created_at: "2024-01-01".into(),
        }
    }

    fn hello(user_id: Option<i64>) -> PostDraft {
        PostDraft {
            title: "Hi".into(),
            content: "...".into(),
            published_at: "2024-01-02".into(),
            user_id,
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_per_table() {
        let store = MemoryStore::new();
        let first = UserRepository::save(&store, None, ana()).await.unwrap();
        let second = UserRepository::save(&store, None, ana()).await.unwrap();
        let post = PostRepository::save(&store, None, hello(None)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(post.id, 1);
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let store = MemoryStore::new();
        let draft = StudentDraft {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
        };
        let first = StudentRepository::save(&store, None, draft.clone()).await.unwrap();
        assert!(StudentRepository::delete_by_id(&store, first.id).await.unwrap());

        let second = StudentRepository::save(&store, None, draft).await.unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn user_reads_derive_post_ids() {
        let store = MemoryStore::new();
        let user = UserRepository::save(&store, None, ana()).await.unwrap();
        let a = PostRepository::save(&store, None, hello(Some(user.id))).await.unwrap();
        PostRepository::save(&store, None, hello(None)).await.unwrap();
        let b = PostRepository::save(&store, None, hello(Some(user.id))).await.unwrap();

        let fetched = UserRepository::find_by_id(&store, user.id).await.unwrap().unwrap();
        assert_eq!(fetched.post_ids, vec![a.id, b.id]);
    }

    #[tokio::test]
    async fn deleting_user_clears_post_reference() {
        let store = MemoryStore::new();
        let user = UserRepository::save(&store, None, ana()).await.unwrap();
        let post = PostRepository::save(&store, None, hello(Some(user.id))).await.unwrap();

        assert!(UserRepository::delete_by_id(&store, user.id).await.unwrap());
        let orphan = PostRepository::find_by_id(&store, post.id).await.unwrap().unwrap();
        assert_eq!(orphan.user_id, None);
    }

    #[tokio::test]
    async fn update_of_missing_row_is_not_found() {
        let store = MemoryStore::new();
        let err = UserRepository::save(&store, Some(9), ana()).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "user", .. }));
    }

    #[tokio::test]
    async fn delete_of_missing_row_is_noop() {
        let store = MemoryStore::new();
        assert!(!PostRepository::delete_by_id(&store, 3).await.unwrap());
    }

    #[tokio::test]
    async fn dangling_user_reference_is_dropped() {
        let store = MemoryStore::new();
        let post = PostRepository::save(&store, None, hello(Some(5))).await.unwrap();
        assert_eq!(post.user_id, None);
    }
}
