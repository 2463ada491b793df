//! Student record
//!
//! The student API has no separate DTO layer: the same camelCase shape is
//! accepted on input and returned on output.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationErrors;

/// Student row as stored and as returned by every student endpoint
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

/// Column values for an insert or a full-row update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDraft {
    pub first_name: String,
    pub last_name: String,
}

/// Request body for POST and PUT. An `id` in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl StudentInput {
    /// Validate a create request: both names present and non-blank.
    pub fn into_draft(self) -> Result<StudentDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let first_name = errors.require_text("firstName", self.first_name);
        let last_name = errors.require_text("lastName", self.last_name);
        errors.into_result()?;

        Ok(StudentDraft {
            first_name,
            last_name,
        })
    }

    /// Overlay the present fields on an existing student.
    pub fn apply(self, existing: &Student) -> StudentDraft {
        StudentDraft {
            first_name: self
                .first_name
                .unwrap_or_else(|| existing.first_name.clone()),
            last_name: self.last_name.unwrap_or_else(|| existing.last_name.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationError;

    fn ada() -> Student {
        Student {
            id: 4,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
        }
    }

    #[test]
    fn body_ignores_id() {
        let input: StudentInput =
            serde_json::from_str(r#"{"id": 99, "firstName": "Ada", "lastName": "Lovelace"}"#)
                .unwrap();
        let draft = input.into_draft().unwrap();
        assert_eq!(draft.first_name, "Ada");
        assert_eq!(draft.last_name, "Lovelace");
    }

    #[test]
    fn create_requires_both_names() {
        let err = StudentInput {
            first_name: Some("".into()),
            last_name: None,
        }
        .into_draft()
        .unwrap_err();

        assert_eq!(
            err.errors(),
            &[
                ValidationError::Blank { field: "firstName" },
                ValidationError::Required { field: "lastName" },
            ]
        );
    }

    #[test]
    fn empty_update_keeps_everything() {
        let draft = StudentInput::default().apply(&ada());
        assert_eq!(draft.first_name, "Ada");
        assert_eq!(draft.last_name, "Lovelace");
    }

    #[test]
    fn update_overwrites_present_fields() {
        let draft = StudentInput {
            first_name: None,
            last_name: Some("King".into()),
        }
        .apply(&ada());
        assert_eq!(draft.first_name, "Ada");
        assert_eq!(draft.last_name, "King");
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(ada()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 4, "firstName": "Ada", "lastName": "Lovelace"})
        );
    }
}
