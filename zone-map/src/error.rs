//! Zone map error types

use shared::{ErrorCode, ValidationError, ValidationErrorKind, ZoneId};
use thiserror::Error;

/// Renderer failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Image failed to decode or the surface cannot be created.
    /// Recoverable by retry or re-upload.
    #[error("Render surface unavailable: {0}")]
    RenderSurfaceUnavailable(String),
}

impl RenderError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::RenderSurfaceUnavailable(reason.into())
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::RenderSurfaceUnavailable(_) => ErrorCode::InvalidImage,
        }
    }
}

/// Persistence collaborator failure
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Network / connection failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Server answered with an error code
    #[error("Rejected ({code}): {message}")]
    Rejected { code: ErrorCode, message: String },

    /// Response body could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// The server's code for rejections; local failures are internal
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Rejected { code, .. } => *code,
            Self::Transport(_) | Self::Serialization(_) => ErrorCode::InternalError,
        }
    }
}

/// Editor error type
#[derive(Debug, Clone, Error)]
pub enum EditorError {
    /// Local validation failure, never sent over the network
    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error(transparent)]
    Render(#[from] RenderError),

    /// Save/load failure; in-memory edits are kept
    #[error("Persistence failed: {0}")]
    Store(#[from] StoreError),

    #[error("Zone not found: {0}")]
    ZoneNotFound(ZoneId),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid ticket id: {0:?}")]
    InvalidTicketId(String),
}

impl EditorError {
    /// The validation kind, when this is a validation failure
    pub fn validation_kind(&self) -> Option<ValidationErrorKind> {
        match self {
            EditorError::ValidationFailed(e) => Some(e.kind),
            _ => None,
        }
    }

    /// Wire error code for this failure
    pub fn error_code(&self) -> ErrorCode {
        match self {
            EditorError::ValidationFailed(e) => e.kind.error_code(),
            EditorError::Render(e) => e.error_code(),
            EditorError::Store(e) => e.error_code(),
            EditorError::ZoneNotFound(_) => ErrorCode::ZoneNotFound,
            EditorError::InvalidColor(_) => ErrorCode::InvalidFormat,
            EditorError::InvalidTicketId(_) => ErrorCode::InvalidRequest,
        }
    }
}

/// Selector error type
#[derive(Debug, Clone, Error)]
pub enum SelectorError {
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl SelectorError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            SelectorError::Render(e) => e.error_code(),
        }
    }
}

/// Result type for editor operations
pub type EditorResult<T> = Result<T, EditorError>;
