use std::sync::Arc;

use super::ServiceError;
use crate::db::{DbError, StudentRepository};
use crate::models::{Student, StudentInput};

#[derive(Clone)]
pub struct StudentService {
    students: Arc<dyn StudentRepository>,
}

impl StudentService {
    pub fn new(students: Arc<dyn StudentRepository>) -> Self {
        Self { students }
    }

    pub async fn find_all(&self) -> Result<Vec<Student>, DbError> {
        self.students.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Student>, DbError> {
        self.students.find_by_id(id).await
    }

    pub async fn create(&self, input: StudentInput) -> Result<Student, ServiceError> {
        let draft = input.into_draft()?;
        let student = self.students.save(None, draft).await?;
        tracing::debug!(id = student.id, "student created");
        Ok(student)
    }

    /// `Ok(None)` when no student has this id.
    pub async fn update(
        &self,
        id: i64,
        input: StudentInput,
    ) -> Result<Option<Student>, ServiceError> {
        let Some(existing) = self.students.find_by_id(id).await? else {
            return Ok(None);
        };

        let draft = input.apply(&existing);
        Ok(Some(self.students.save(Some(id), draft).await?))
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<bool, DbError> {
        self.students.delete_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn service() -> StudentService {
        StudentService::new(Arc::new(MemoryStore::new()))
    }

    fn input(first: &str, last: &str) -> StudentInput {
        StudentInput {
            first_name: Some(first.into()),
            last_name: Some(last.into()),
        }
    }

    #[tokio::test]
    async fn create_then_find() {
        let service = service();
        let created = service.create(input("Ada", "Lovelace")).await.unwrap();
        let found = service.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn invalid_create_stores_nothing() {
        let service = service();
        let err = service.create(input("Ada", " ")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(service.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_missing_is_none() {
        let service = service();
        let result = service.update(8, input("Ada", "King")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn empty_update_is_noop() {
        let service = service();
        let created = service.create(input("Ada", "Lovelace")).await.unwrap();
        let updated = service
            .update(created.id, StudentInput::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated, created);
    }
}
