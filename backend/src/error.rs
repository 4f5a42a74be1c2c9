//! Error handling for the Cotton Waste Billing Platform
//!
//! Every failure is reported as `{"error": {"code", "message", "field"}}` so the
//! UI can show it inline next to the offending field or as a banner.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{LookupError, ValidationError};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Domain errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("Validation error: {message}")]
    InvalidInput { field: String, message: String },

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Gateway errors
    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let (field, message) = errors
            .field_errors()
            .into_iter()
            .next()
            .map(|(field, errs)| {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| format!("{} is invalid", field));
                (field.to_string(), message)
            })
            .unwrap_or_else(|| ("input".to_string(), errors.to_string()));

        AppError::InvalidInput { field, message }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    fn status_and_detail(&self) -> (StatusCode, ErrorDetail) {
        match self {
            AppError::Validation(err) => {
                let (status, code) = match err {
                    e if e.is_duplicate() => (StatusCode::CONFLICT, "DUPLICATE_ENTRY"),
                    ValidationError::Locked { .. } => (StatusCode::CONFLICT, "RECORD_LOCKED"),
                    ValidationError::InUse { .. } => (StatusCode::CONFLICT, "RECORD_IN_USE"),
                    ValidationError::InvalidTransition { .. } => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_STATE_TRANSITION")
                    }
                    ValidationError::WeightMismatch { .. }
                    | ValidationError::BaleCountMismatch { .. }
                    | ValidationError::NegativeNetWeight { .. } => {
                        (StatusCode::BAD_REQUEST, "RECONCILIATION_FAILED")
                    }
                    _ => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                };
                (
                    status,
                    ErrorDetail {
                        code: code.to_string(),
                        message: err.to_string(),
                        field: err.field().map(str::to_string),
                    },
                )
            }
            AppError::Lookup(err) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "LOOKUP_ERROR".to_string(),
                    message: err.to_string(),
                    field: Some("lot_no".to_string()),
                },
            ),
            AppError::InvalidInput { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::DuplicateEntry(what) => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "DUPLICATE_ENTRY".to_string(),
                    message: format!("A record with this {} already exists", what),
                    field: None,
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{} not found", resource),
                    field: None,
                },
            ),
            AppError::Repository(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "REPOSITORY_ERROR".to_string(),
                    message: msg.clone(),
                    field: None,
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message: format!("Configuration error: {}", msg),
                    field: None,
                },
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message: "A database error occurred".to_string(),
                    field: None,
                },
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred".to_string(),
                    field: None,
                },
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = self.status_and_detail();

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_duplicate_rate_is_conflict() {
        let err = AppError::from(ValidationError::DuplicateRate {
            waste_master_id: 7,
            rate_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        });
        let (status, detail) = err.status_and_detail();

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(detail.code, "DUPLICATE_ENTRY");
        assert_eq!(detail.field.as_deref(), Some("rate_date"));
    }

    #[test]
    fn test_lookup_error_is_not_found() {
        let err = AppError::from(LookupError::LotInactive("WCL-003".to_string()));
        let (status, detail) = err.status_and_detail();

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(detail.message, "Lot WCL-003 is inactive");
    }

    #[test]
    fn test_repository_message_surfaces_verbatim() {
        let err = AppError::Repository("value too long for type character varying(32)".into());
        let (status, detail) = err.status_and_detail();

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(detail.message, "value too long for type character varying(32)");
    }
}
