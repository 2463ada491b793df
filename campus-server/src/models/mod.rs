//! Domain records and wire shapes
//!
//! Request bodies are validated into drafts before anything reaches a
//! repository. Invalid input returns ValidationErrors, not panic.

pub mod validation;
pub mod student;
pub mod user;
pub mod post;

pub use validation::{FieldMessage, ValidationError, ValidationErrors};
pub use student::{Student, StudentDraft, StudentInput};
pub use user::{CreateUserDto, UpdateUserDto, User, UserDraft, UserResponse};
pub use post::{CreatePostDto, Post, PostDraft, PostResponse, UpdatePostDto};
