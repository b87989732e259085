//! Client error types

use shared::{AppError, ErrorCode};
use thiserror::Error;
use zone_map::StoreError;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server replied with a structured error
    #[error("API error ({code}): {message}")]
    Api { code: ErrorCode, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// The server's error code, when it sent one
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ClientError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<AppError> for ClientError {
    fn from(err: AppError) -> Self {
        ClientError::Api {
            code: err.code,
            message: err.message,
        }
    }
}

impl From<ClientError> for StoreError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) if e.is_decode() => StoreError::Serialization(e.to_string()),
            ClientError::Http(e) => StoreError::Transport(e.to_string()),
            ClientError::Api { code, message } => StoreError::Rejected { code, message },
            ClientError::Unauthorized => StoreError::Rejected {
                code: ErrorCode::InvalidRequest,
                message: "Authentication required".to_string(),
            },
            ClientError::Forbidden(message) => StoreError::Rejected {
                code: ErrorCode::InvalidRequest,
                message,
            },
            ClientError::NotFound(message) => StoreError::Rejected {
                code: ErrorCode::NotFound,
                message,
            },
            ClientError::Validation(message) => StoreError::Rejected {
                code: ErrorCode::ValidationFailed,
                message,
            },
            ClientError::Internal(message) => StoreError::Rejected {
                code: ErrorCode::InternalError,
                message,
            },
            ClientError::InvalidResponse(message) => StoreError::Serialization(message),
            ClientError::Serialization(e) => StoreError::Serialization(e.to_string()),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
