//! API error type with IntoResponse
//!
//! Every error body has the shape `{"detail": "..."}`.

use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::auth::AuthError;
use crate::db::DbError;
use crate::models::ValidationError;

pub const TASK_NOT_FOUND: &str = "Task not found.";
pub const INVALID_CREDENTIALS: &str = "Could not validate credentials";
pub const INCORRECT_LOGIN: &str = "Incorrect username or password";
pub const NOT_ENOUGH_PERMISSIONS: &str = "Not enough permissions";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Body, query or path failed to parse (status chosen by the rejection)
    Rejected { status: StatusCode, detail: String },

    /// Missing, malformed or unknown bearer token (401)
    Unauthorized,

    /// Wrong username or password at login (401)
    BadLogin,

    /// Authenticated, but acting on another user's account (400)
    NotEnoughPermissions,

    /// Resource not found or not owned by the caller (404)
    NotFound { resource: &'static str, id: String },

    /// Unique constraint hit (409)
    Conflict(String),

    /// Database error (500, logged)
    Database(DbError),

    /// Any other server-side failure (500, logged)
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Rejected { status, .. } => *status,
            Self::Unauthorized | Self::BadLogin => StatusCode::UNAUTHORIZED,
            Self::NotEnoughPermissions => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> String {
        match self {
            Self::Rejected { detail, .. } => detail.clone(),
            Self::Unauthorized => INVALID_CREDENTIALS.to_owned(),
            Self::BadLogin => INCORRECT_LOGIN.to_owned(),
            Self::NotEnoughPermissions => NOT_ENOUGH_PERMISSIONS.to_owned(),
            Self::NotFound { resource: "todo", .. } => TASK_NOT_FOUND.to_owned(),
            Self::NotFound { resource, .. } => format!("{} not found.", resource),
            Self::Conflict(msg) => msg.clone(),
            Self::Database(_) | Self::Internal(_) => "an internal error occurred".to_owned(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            // Log the actual error, return generic message
            Self::Database(e) => tracing::error!("Database error: {}", e),
            Self::Internal(e) => tracing::error!("Internal error: {}", e),
            Self::NotFound { resource, id } => {
                tracing::debug!(resource, id = %id, "Lookup missed")
            }
            Self::Rejected { status, detail } => {
                tracing::debug!(status = status.as_u16(), detail = %detail, "Request rejected")
            }
            _ => {}
        }

        let status = self.status();
        let body = Json(json!({ "detail": self.detail() }));

        if matches!(self, Self::Unauthorized | Self::BadLogin) {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response();
        }
        (status, body).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Conflict(msg) => Self::Conflict(msg),
            _ => Self::Database(e),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => Self::BadLogin,
            AuthError::Hash(msg) => Self::Internal(msg),
            AuthError::Db(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Rejected {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: e.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::Rejected {
            status: e.status(),
            detail: e.body_text(),
        }
    }
}

impl From<FormRejection> for ApiError {
    fn from(e: FormRejection) -> Self {
        Self::Rejected {
            status: e.status(),
            detail: e.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        // Query strings are validated like bodies
        Self::Rejected {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: e.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        Self::Rejected {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: e.body_text(),
        }
    }
}
