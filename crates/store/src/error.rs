//! Error types for the storage layer.
//!
//! Backend failures are deliberately coarse: the API layer surfaces a
//! backend's message verbatim in its error envelope, so the message text is
//! the contract.

#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for storage operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The requested content type is not part of the store's schema.
    #[error("Contenttype with name [{content_type}] not found.")]
    UnknownContentType { content_type: String },

    /// The compiled query could not be executed.
    #[error("invalid query: {message}")]
    InvalidQuery { message: String },

    /// Backend-specific failure (connection loss, corrupt data, ...).
    #[error("{message}")]
    Backend { message: String },
}

impl StoreError {
    /// Convenience constructor for backend failures.
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend {
            message: message.into(),
        }
    }
}

/// Result type alias for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
