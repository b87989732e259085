//! Venue map validation
//!
//! Pure checks run by the editor before saving and by the persistence server
//! before storing. Neither function mutates its input.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use crate::error::{AppError, ErrorCode};
use crate::models::{VenueMap, Zone, ZoneId};

/// Minimum number of vertices of a zone polygon
pub const MIN_POLYGON_POINTS: usize = 3;

/// Maximum number of tickets a zone may reference
pub const MAX_TICKETS_PER_ZONE: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    InvalidPolygon,
    EmptyName,
    TooManyTickets,
    MissingImage,
    NoZones,
    DuplicateZoneId,
}

impl ValidationErrorKind {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidPolygon => ErrorCode::InvalidPolygon,
            Self::EmptyName => ErrorCode::EmptyZoneName,
            Self::TooManyTickets => ErrorCode::TooManyTickets,
            Self::MissingImage => ErrorCode::MissingImage,
            Self::NoZones => ErrorCode::NoZones,
            Self::DuplicateZoneId => ErrorCode::DuplicateZoneId,
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.error_code().message())
    }
}

/// A validation failure, tagged with the offending zone when there is one
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub zone_id: Option<ZoneId>,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind) -> Self {
        Self {
            kind,
            zone_id: None,
        }
    }

    pub fn for_zone(kind: ValidationErrorKind, zone_id: impl Into<ZoneId>) -> Self {
        Self {
            kind,
            zone_id: Some(zone_id.into()),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.zone_id {
            Some(id) => write!(f, "zone {}: {}", id, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        let app = AppError::with_message(err.kind.error_code(), err.to_string());
        match err.zone_id {
            Some(id) => app.with_detail("zoneId", id),
            None => app,
        }
    }
}

pub type ValidationResult = Result<(), ValidationError>;

/// Validate a single zone.
///
/// Checks run in order: polygon size, name, ticket count.
pub fn validate_zone(zone: &Zone) -> ValidationResult {
    let fail = |kind| Err(ValidationError::for_zone(kind, zone.id.clone()));

    if zone.polygon.len() < MIN_POLYGON_POINTS {
        return fail(ValidationErrorKind::InvalidPolygon);
    }
    if zone.name.trim().is_empty() {
        return fail(ValidationErrorKind::EmptyName);
    }
    if zone.ticket_refs.len() > MAX_TICKETS_PER_ZONE {
        return fail(ValidationErrorKind::TooManyTickets);
    }
    Ok(())
}

/// Validate a whole venue map.
///
/// Map-level problems (missing image, no zones) are reported first; after
/// that the first failing zone, in list order, wins.
pub fn validate_venue_map(map: &VenueMap) -> ValidationResult {
    if !map.has_image() {
        return Err(ValidationError::new(ValidationErrorKind::MissingImage));
    }
    if map.zones.is_empty() {
        return Err(ValidationError::new(ValidationErrorKind::NoZones));
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(map.zones.len());
    for zone in &map.zones {
        validate_zone(zone)?;
        if !seen.insert(zone.id.as_str()) {
            return Err(ValidationError::for_zone(
                ValidationErrorKind::DuplicateZoneId,
                zone.id.clone(),
            ));
        }
    }
    Ok(())
}
