//! Unified error system for the venue map
//!
//! - [`ErrorCode`]: Standardized numeric error codes
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Unified API response format
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 70xx: Venue map errors
//! - 71xx: Zone errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::VenueMapNotFound);
//!
//! let err = AppError::with_message(ErrorCode::InvalidPolygon, "Zone polygon needs at least 3 points")
//!     .with_detail("zoneId", "z1");
//!
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(7102));
//! ```

mod codes;
mod http;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
