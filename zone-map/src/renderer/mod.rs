//! Spatial overlay renderer boundary
//!
//! A renderer presents the floor-plan image and lets the user draw, drag and
//! click polygons. Everything that crosses this boundary is in image pixel
//! space ([`PixelPoint`]); the renderer's own screen coordinates
//! ([`SurfacePoint`]) never leave it.
//!
//! User gestures are reported as [`OverlayEvent`]s on an unbounded channel.
//! Each event carries the [`MountId`] of the mount that produced it, so a
//! consumer can drop callbacks that arrive after the image was swapped.

mod raster;
mod viewport;

pub use raster::RasterOverlay;
pub use viewport::{SurfacePoint, Viewport};

use serde::{Deserialize, Serialize};
use shared::{ImageSize, PixelPoint, ZoneId};
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::error::RenderError;

/// Identity of one mount of a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MountId(pub u64);

impl fmt::Display for MountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mount#{}", self.0)
    }
}

/// On-screen size of the render surface, in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self::new(1024, 768)
    }
}

/// The image to mount
#[derive(Debug, Clone)]
pub struct FloorPlan {
    /// Opaque image reference (URL or inline `data:` token)
    pub reference: String,
    /// Native pixel size the zone geometry is expressed against
    pub size: ImageSize,
    /// Raw bytes, when the caller already holds them (fresh upload)
    pub bytes: Option<Arc<[u8]>>,
}

impl FloorPlan {
    pub fn new(reference: impl Into<String>, size: ImageSize) -> Self {
        Self {
            reference: reference.into(),
            size,
            bytes: None,
        }
    }

    pub fn with_bytes(mut self, bytes: impl Into<Arc<[u8]>>) -> Self {
        self.bytes = Some(bytes.into());
        self
    }
}

/// Visual style of a drawn zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerStyle {
    #[default]
    Normal,
    /// Greyed out (zone without a purchasable ticket)
    Muted,
}

/// A zone as the renderer sees it: pixel geometry plus presentation
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnZone {
    pub id: ZoneId,
    pub label: String,
    pub color: String,
    pub polygon: Vec<PixelPoint>,
    pub style: LayerStyle,
    /// Emits `ZoneClicked` when clicked
    pub clickable: bool,
    /// Vertices and body can be dragged, emitting `ZoneEdited`
    pub editable: bool,
}

impl DrawnZone {
    pub fn new(id: impl Into<ZoneId>, polygon: Vec<PixelPoint>) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            color: String::new(),
            polygon,
            style: LayerStyle::Normal,
            clickable: true,
            editable: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_style(mut self, style: LayerStyle) -> Self {
        self.style = style;
        self
    }

    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }
}

/// What happened on the overlay
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEventKind {
    /// A drawing gesture completed
    ZoneDrawn { polygon: Vec<PixelPoint> },
    /// A drawn zone was reshaped or moved
    ZoneEdited { zone_id: ZoneId, polygon: Vec<PixelPoint> },
    /// A click-reactive zone was clicked
    ZoneClicked { zone_id: ZoneId },
}

/// An overlay event tagged with the mount that emitted it
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayEvent {
    pub mount: MountId,
    pub kind: OverlayEventKind,
}

/// Receiving half of a renderer's event stream
pub type OverlayEvents = mpsc::UnboundedReceiver<OverlayEvent>;

/// Sending half, held by the renderer
pub type OverlayEventSender = mpsc::UnboundedSender<OverlayEvent>;

/// Create a renderer event channel
pub fn event_channel() -> (OverlayEventSender, OverlayEvents) {
    mpsc::unbounded_channel()
}

/// Renderer adapter
///
/// Implementations own the zone-id → layer side-table of the current mount;
/// `mount` replaces it wholesale.
pub trait SpatialOverlayRenderer {
    /// Mount an image on a surface of the given size.
    ///
    /// Any previous mount (layers, draft, pending interactions) is torn down
    /// before the new one is created. Fails with `RenderSurfaceUnavailable`
    /// when the image cannot be decoded or the surface is empty; in that
    /// case the previous mount is left as it was.
    fn mount(&mut self, surface: SurfaceSize, plan: &FloorPlan) -> Result<MountId, RenderError>;

    /// Tear down the current mount, if any
    fn unmount(&mut self);

    /// The live mount
    fn mount_id(&self) -> Option<MountId>;

    /// Draw a zone, replacing any layer with the same id
    fn draw_zone(&mut self, zone: DrawnZone);

    /// Remove a zone layer; unknown ids are ignored
    fn remove_zone(&mut self, zone_id: &str);

    /// Toggle the selected emphasis of a zone layer
    fn restyle_zone(&mut self, zone_id: &str, is_selected: bool);
}
