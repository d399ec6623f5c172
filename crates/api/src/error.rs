use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invite code not found")]
    InviteNotFound,

    #[error("Invite code has expired")]
    InviteExpired,

    #[error("Invite code has no uses left")]
    InviteExhausted,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            ApiError::InvalidRole(_) => (
                StatusCode::BAD_REQUEST,
                "invalid_role",
                "Role must be admin or viewer".into(),
            ),
            ApiError::InviteNotFound => (
                StatusCode::NOT_FOUND,
                "invite_not_found",
                "Invite code not found".into(),
            ),
            ApiError::InviteExpired => (
                StatusCode::BAD_REQUEST,
                "invite_expired",
                "Invite code has expired".into(),
            ),
            ApiError::InviteExhausted => (
                StatusCode::BAD_REQUEST,
                "invite_exhausted",
                "Invite code has no uses left".into(),
            ),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".into(),
                )
            }
        };

        let body = ErrorBody {
            error: error_code.into(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(resource) => ApiError::NotFound(format!("{} not found", resource)),
            // Denials look exactly like a missing trip.
            DomainError::Forbidden(_) => ApiError::NotFound("Trip not found".into()),
            DomainError::InviteNotFound => ApiError::InviteNotFound,
            DomainError::InviteExpired => ApiError::InviteExpired,
            DomainError::InviteExhausted => ApiError::InviteExhausted,
            DomainError::InvalidRole(value) => ApiError::InvalidRole(value),
            DomainError::MissingField(field) => {
                ApiError::Validation(format!("Missing required field: {}", field))
            }
            DomainError::StorageUnavailable(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".into()),
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some("23505") => ApiError::Conflict("Resource already exists".into()),
                Some("23503") => ApiError::NotFound("Referenced resource not found".into()),
                _ => ApiError::Internal(format!("Database error: {}", db_err)),
            },
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
            })
            .collect();
        messages.sort();

        let message = match messages.len() {
            1 => messages.remove(0),
            n => format!("{} validation errors", n),
        };

        ApiError::Validation(message)
    }
}
