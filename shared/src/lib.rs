//! Shared types for the venue map
//!
//! Common types used across the editor, the selector, the HTTP client and the
//! persistence server: the persisted `VenueMap` model, the coordinate
//! transforms between image pixels and normalized space, validation rules and
//! the unified error codes.

pub mod error;
pub mod geometry;
pub mod models;
pub mod validation;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use geometry::{ImageSize, NormalizedPoint, PixelPoint};
pub use models::{Ticket, TicketCatalog, TicketId, VenueMap, Zone, ZoneId, ZoneState};
pub use validation::{ValidationError, ValidationErrorKind, ValidationResult};
