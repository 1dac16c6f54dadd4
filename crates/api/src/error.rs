//! Error types for the content API.
//!
//! All failures surface as the JSON:API error envelope:
//!
//! ```json
//! {"errors": {"status": "400", "title": "Invalid Request", "detail": "..."}}
//! ```
//!
//! # Error Mapping
//!
//! | Error | HTTP Status | Title |
//! |-------|-------------|-------|
//! | `CompileError::InvalidField` | 400 | Invalid Request |
//! | `CompileError::InvalidInclude` | 400 | Invalid Request |
//! | `CompileError::UnknownContentType` | 404 | Not Found |
//! | `StoreError::UnknownContentType` | 404 | Not Found |
//! | other `StoreError` | 400 | Invalid Request (message verbatim) |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use strata_store::StoreError;

use crate::params::CompileError;
use crate::response::error_envelope;

/// The primary error type for API operations.
#[derive(Debug)]
pub enum ApiError {
    /// The requested resource, content type, menu or taxonomy does not exist
    /// (HTTP 404).
    NotFound {
        /// Human-readable description of what was not found.
        detail: String,
    },

    /// The request could not be processed as given (HTTP 400).
    InvalidRequest {
        /// Human-readable description of the problem.
        detail: String,
    },
}

impl ApiError {
    /// Convenience constructor for 404 responses.
    pub fn not_found(detail: impl Into<String>) -> Self {
        ApiError::NotFound {
            detail: detail.into(),
        }
    }

    /// Convenience constructor for 400 responses.
    pub fn invalid(detail: impl Into<String>) -> Self {
        ApiError::InvalidRequest {
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound { detail } => write!(f, "Not found: {}", detail),
            ApiError::InvalidRequest { detail } => write!(f, "Invalid request: {}", detail),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, title, detail) = match self {
            ApiError::NotFound { detail } => (StatusCode::NOT_FOUND, "Not Found", detail),
            ApiError::InvalidRequest { detail } => {
                (StatusCode::BAD_REQUEST, "Invalid Request", detail)
            }
        };

        let envelope = error_envelope(status.as_u16(), title, &detail);
        (status, Json(envelope)).into_response()
    }
}

impl From<CompileError> for ApiError {
    fn from(err: CompileError) -> Self {
        match err {
            CompileError::UnknownContentType { .. } => ApiError::NotFound {
                detail: err.to_string(),
            },
            CompileError::InvalidField { .. } | CompileError::InvalidInclude { .. } => {
                ApiError::InvalidRequest {
                    detail: err.to_string(),
                }
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UnknownContentType { .. } => ApiError::NotFound {
                detail: err.to_string(),
            },
            // The engine's message goes into `detail` verbatim.
            StoreError::InvalidQuery { .. } | StoreError::Backend { .. } => {
                ApiError::InvalidRequest {
                    detail: err.to_string(),
                }
            }
        }
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
