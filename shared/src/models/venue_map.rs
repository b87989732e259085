//! Venue Map Model

use serde::{Deserialize, Serialize};

use super::zone::Zone;
use crate::geometry::ImageSize;

/// Current wire format version
pub const VENUE_MAP_VERSION: u32 = 1;

fn default_version() -> u32 {
    VENUE_MAP_VERSION
}

/// Venue map entity (场馆平面图)
///
/// Root persisted document: a floor-plan image reference, its native pixel
/// size, and the zones drawn on it in normalized coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueMap {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_width: Option<u32>,
    #[serde(default)]
    pub image_height: Option<u32>,
    #[serde(default)]
    pub zones: Vec<Zone>,
}

impl Default for VenueMap {
    fn default() -> Self {
        Self {
            version: VENUE_MAP_VERSION,
            image_url: None,
            image_width: None,
            image_height: None,
            zones: Vec::new(),
        }
    }
}

impl VenueMap {
    /// Create an empty map for a freshly uploaded image
    pub fn new(image_url: impl Into<String>, size: ImageSize) -> Self {
        Self {
            version: VENUE_MAP_VERSION,
            image_url: Some(image_url.into()),
            image_width: Some(size.width()),
            image_height: Some(size.height()),
            zones: Vec::new(),
        }
    }

    /// Image dimensions, if both are present and positive
    pub fn image_size(&self) -> Option<ImageSize> {
        ImageSize::new(self.image_width?, self.image_height?)
    }

    /// Non-blank image reference
    pub fn image_ref(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Whether the image reference and both dimensions are usable
    pub fn has_image(&self) -> bool {
        self.image_ref().is_some() && self.image_size().is_some()
    }

    pub fn zone(&self, id: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }

    pub fn zone_mut(&mut self, id: &str) -> Option<&mut Zone> {
        self.zones.iter_mut().find(|z| z.id == id)
    }

    /// Remove a zone by id, returning it if it existed
    pub fn remove_zone(&mut self, id: &str) -> Option<Zone> {
        let index = self.zones.iter().position(|z| z.id == id)?;
        Some(self.zones.remove(index))
    }
}
