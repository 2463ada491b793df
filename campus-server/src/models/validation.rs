//! Validation error types

use std::fmt;

use serde::Serialize;

/// Validation error for a single input field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is absent or null
    Required { field: &'static str },

    /// Field is present but empty or whitespace only
    Blank { field: &'static str },

    /// Value doesn't match the required format (e.g., numeric id)
    InvalidFormat { field: &'static str, reason: &'static str },
}

impl ValidationError {
    /// Name of the offending field as it appears on the wire.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Required { field } | Self::Blank { field } | Self::InvalidFormat { field, .. } => {
                field
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required { field } => write!(f, "{} is required", field),
            Self::Blank { field } => write!(f, "{} must not be blank", field),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// One entry of the `fields` list in a 400 response
#[derive(Debug, Serialize)]
pub struct FieldMessage {
    pub field: &'static str,
    pub message: String,
}

/// All field errors found in one request body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: ValidationError) {
        self.0.push(err);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn field_messages(&self) -> Vec<FieldMessage> {
        self.0
            .iter()
            .map(|e| FieldMessage {
                field: e.field(),
                message: e.to_string(),
            })
            .collect()
    }

    /// Take a required text field, recording an error when it is absent or blank.
    ///
    /// The value is returned untrimmed; only the emptiness check ignores whitespace.
    pub fn require_text(&mut self, field: &'static str, value: Option<String>) -> String {
        match value {
            None => {
                self.push(ValidationError::Required { field });
                String::new()
            }
            Some(s) if s.trim().is_empty() => {
                self.push(ValidationError::Blank { field });
                String::new()
            }
            Some(s) => s,
        }
    }

    /// Take a required non-text field, recording an error when it is absent.
    pub fn require<T>(&mut self, field: &'static str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.push(ValidationError::Required { field });
        }
        value
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(err: ValidationError) -> Self {
        Self(vec![err])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationErrors {}
