//! Application error type and its HTTP rendering.
//!
//! Every error body carries the numeric HTTP status next to a human readable
//! message, mirroring the success envelopes:
//!
//! ```json
//! { "status": 400, "error": "Validation failed", "errors": { "title": ["..."] } }
//! { "status": 404, "error": "Product not found" }
//! ```

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value, json};
use validator::ValidationErrors;

/// Message returned to clients for any unexpected failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

#[derive(Serialize)]
struct ErrorBody {
    status: u16,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

/// Outcome of a failed request, propagated by return value through services
/// and handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Client input failed validation. `details` holds field-level messages.
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Storage rejected the write (unique or foreign-key constraint).
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Unexpected failure. `details` are logged, never returned to the client.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::Validation { message, details } => ErrorBody {
                status: status.as_u16(),
                error: message,
                errors: Some(details),
                details: None,
            },
            AppError::NotFound { message, .. } => ErrorBody {
                status: status.as_u16(),
                error: message,
                errors: None,
                details: None,
            },
            AppError::Conflict { message, details } => ErrorBody {
                status: status.as_u16(),
                error: message,
                errors: None,
                details: Some(details),
            },
            AppError::Internal { message, details } => {
                tracing::error!(%message, %details, "Request failed with internal error");
                ErrorBody {
                    status: status.as_u16(),
                    error: INTERNAL_ERROR_MESSAGE.to_string(),
                    errors: None,
                    details: None,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return AppError::conflict(
                    "Unique constraint violation",
                    json!({ "constraint": db.constraint() }),
                );
            }
            if db.is_foreign_key_violation() {
                return AppError::conflict(
                    "Referenced record does not exist or is still in use",
                    json!({ "constraint": db.constraint() }),
                );
            }
        }

        AppError::internal("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::bad_request("Validation failed", field_messages(&errors))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Validation failed",
            json!({ "body": [rejection.body_text()] }),
        )
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(
            "Validation failed",
            json!({ "query": [rejection.body_text()] }),
        )
    }
}

/// Flattens [`ValidationErrors`] into `{ field: [message, ...] }`, sorted by field.
fn field_messages(errors: &ValidationErrors) -> Value {
    let mut fields: Vec<(String, Vec<Value>)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    let text = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("The {} field is invalid.", field));
                    Value::String(text)
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let mut map = Map::new();
    for (field, messages) in fields {
        map.insert(field, Value::Array(messages));
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use validator::ValidationError;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("x", json!({})).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("x", json!({})).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::conflict("x", json!({})).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::internal("x", json!({})).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_errors_become_field_messages() {
        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("required");
        err.message = Some(Cow::Borrowed("The status field is required."));
        errors.add("status", err);

        let app_error = AppError::from(errors);
        match app_error {
            AppError::Validation { details, .. } => {
                assert_eq!(details["status"][0], "The status field is required.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_display_uses_message() {
        let err = AppError::not_found("Product not found", json!({"id": 7}));
        assert_eq!(err.to_string(), "Product not found");
    }
}
