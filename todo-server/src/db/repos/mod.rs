//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One statement per operation; mutations use RETURNING instead of a
//!   follow-up SELECT
//! - Owner-scoped tables filter on `user_id` before any other predicate
//! - Rely on DB constraints and map violations, no check-then-insert

pub mod todos;
pub mod users;

pub use todos::{Todo, TodoRepo};
pub use users::{User, UserCredentials, UserRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("conflict: {0}")]
    Conflict(String),
}

impl DbError {
    pub fn todo_not_found(id: i32) -> Self {
        Self::NotFound {
            resource: "todo",
            id: id.to_string(),
        }
    }

    pub fn user_not_found(id: i32) -> Self {
        Self::NotFound {
            resource: "user",
            id: id.to_string(),
        }
    }
}
