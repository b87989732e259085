//! Unified error codes for the venue map
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 7xxx: Venue map errors (70xx map, 71xx zone)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,

    // ==================== 70xx: Venue map ====================
    /// No venue map configured for the event
    VenueMapNotFound = 7001,
    /// Floor-plan image missing or without dimensions
    MissingImage = 7002,
    /// Venue map has no zones
    NoZones = 7003,
    /// Floor-plan image could not be decoded
    InvalidImage = 7004,

    // ==================== 71xx: Zone ====================
    /// Zone not found
    ZoneNotFound = 7101,
    /// Zone polygon has fewer than 3 points
    InvalidPolygon = 7102,
    /// Zone references more than one ticket
    TooManyTickets = 7103,
    /// Zone name is blank
    EmptyZoneName = 7104,
    /// Two zones share the same id
    DuplicateZoneId = 7105,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Check if this is a 9xxx system error
    #[inline]
    pub const fn is_system(&self) -> bool {
        self.code() >= 9000
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",

            // Venue map
            ErrorCode::VenueMapNotFound => "Venue map not found",
            ErrorCode::MissingImage => "Venue map has no floor-plan image",
            ErrorCode::NoZones => "Venue map has no zones",
            ErrorCode::InvalidImage => "Floor-plan image could not be decoded",

            // Zone
            ErrorCode::ZoneNotFound => "Zone not found",
            ErrorCode::InvalidPolygon => "Zone polygon needs at least 3 points",
            ErrorCode::TooManyTickets => "Zone can be bound to at most one ticket",
            ErrorCode::EmptyZoneName => "Zone name must not be empty",
            ErrorCode::DuplicateZoneId => "Zone id is not unique",

            // System
            ErrorCode::InternalError => "Internal server error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),

            // Venue map
            7001 => Ok(ErrorCode::VenueMapNotFound),
            7002 => Ok(ErrorCode::MissingImage),
            7003 => Ok(ErrorCode::NoZones),
            7004 => Ok(ErrorCode::InvalidImage),

            // Zone
            7101 => Ok(ErrorCode::ZoneNotFound),
            7102 => Ok(ErrorCode::InvalidPolygon),
            7103 => Ok(ErrorCode::TooManyTickets),
            7104 => Ok(ErrorCode::EmptyZoneName),
            7105 => Ok(ErrorCode::DuplicateZoneId),

            // System
            9001 => Ok(ErrorCode::InternalError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::VenueMapNotFound.code(), 7001);
        assert_eq!(ErrorCode::TooManyTickets.code(), 7103);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::InvalidPolygon).unwrap();
        assert_eq!(json, "7102");
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());
        // retired codes are not accepted
        assert!(ErrorCode::try_from(4).is_err());
        assert!(ErrorCode::try_from(9003).is_err());
    }

    #[test]
    fn test_roundtrip() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::Unknown,
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::InvalidRequest,
            ErrorCode::InvalidFormat,
            ErrorCode::VenueMapNotFound,
            ErrorCode::MissingImage,
            ErrorCode::NoZones,
            ErrorCode::InvalidImage,
            ErrorCode::ZoneNotFound,
            ErrorCode::InvalidPolygon,
            ErrorCode::TooManyTickets,
            ErrorCode::EmptyZoneName,
            ErrorCode::DuplicateZoneId,
            ErrorCode::InternalError,
        ];
        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_invalid_error_code_display() {
        let err = InvalidErrorCode(999);
        assert_eq!(format!("{}", err), "invalid error code: 999");
    }
}
