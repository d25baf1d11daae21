//! Application error types and HTTP response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::db::RepositoryError;
use crate::validation::ValidationErrors;

/// Convenience alias for handler and service results.
pub type Result<T> = core::result::Result<T, AppError>;

/// Application-level errors.
///
/// Every variant maps to an HTTP status and a JSON body with an `errors`
/// key. Validation failures carry the full message list; everything else
/// carries a single string.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] RepositoryError),

    #[error("password hashing failed")]
    PasswordHash,
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) | Self::PasswordHash => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Database(_) | Self::PasswordHash) {
            tracing::error!(error = %self, "internal error");
        }

        let status = self.status();
        let body = match self {
            Self::Validation(errors) => json!({ "errors": errors.into_messages() }),
            Self::Unauthorized(message)
            | Self::NotFound(message)
            | Self::Conflict(message) => json!({ "errors": message }),
            Self::Database(_) | Self::PasswordHash => {
                json!({ "errors": "Internal Server Error" })
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation(ValidationErrors::single("name is required")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthorized("Unauthorized".to_owned()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::NotFound("contact is not found".to_owned()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("username already exists".to_owned()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::PasswordHash.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_errors_convert() {
        let mut errors = ValidationErrors::new();
        errors.push("username is required");
        let error = AppError::from(errors);
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    }
}
