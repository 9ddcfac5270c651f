//! Error responses for the HTTP API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::types::ValidationError;

/// Message sent for every persistence failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Error returned by an API handler.
///
/// Persistence failures are logged with their cause and collapsed into a
/// single generic 500; callers never see whether a row was missing or the
/// connection failed.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request body or path could not be accepted.
    #[error("{message}")]
    BadRequest {
        message: String,
        field: Option<String>,
    },

    /// Anything that went wrong below the handler.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON body for error responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            field: None,
        }
    }

    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            field: Some(field.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::invalid_field(err.field(), err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::BadRequest { message, field } => {
                tracing::debug!(error = %message, field = ?field, "Rejected request");
                ErrorBody {
                    error: message,
                    field,
                }
            }
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "Request failed");
                ErrorBody {
                    error: INTERNAL_ERROR_MESSAGE.to_string(),
                    field: None,
                }
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
