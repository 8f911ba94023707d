use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::auth::errors::AuthError;

pub mod health_check;
pub mod login;
pub mod logout;
pub mod me;
pub mod signup;

/// HTTP error response carrying a short machine-readable detail string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Conflict(String),
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ApiErrorBody { detail })).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidEmail(_) | AuthError::InvalidPassword(_) => {
                ApiError::BadRequest(err.to_string())
            }
            AuthError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AuthError::EmailAlreadyRegistered => ApiError::Conflict(err.to_string()),
            AuthError::SessionConflict(_)
            | AuthError::Password(_)
            | AuthError::Token(_)
            | AuthError::Database(_) => {
                // Internals are logged, never surfaced to the caller
                tracing::error!(error = %err, "Internal error");
                ApiError::InternalServerError("Internal Server Error".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub detail: String,
}
