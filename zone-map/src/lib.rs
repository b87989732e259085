//! Zone Map - venue floor-plan authoring and selection
//!
//! # 架构概述
//!
//! - **renderer** (`renderer`): the `SpatialOverlayRenderer` adapter boundary,
//!   the viewport, and the headless `RasterOverlay` implementation
//! - **editor** (`editor`): organizer workflow (upload, draw, edit, bind, save)
//! - **selector** (`selector`): buyer-facing read-only zone pick
//! - **store** (`store`): persistence boundary for `VenueMap` documents
//!
//! Geometry and validation live in `shared`; this crate never persists pixel
//! coordinates.

pub mod editor;
pub mod error;
pub mod palette;
pub mod renderer;
pub mod selector;
pub mod store;
pub mod upload;

pub use editor::{EditorOptions, EditorUpdate, ZoneEditor};
pub use error::{EditorError, RenderError, SelectorError, StoreError};
pub use renderer::{
    DrawnZone, FloorPlan, LayerStyle, MountId, OverlayEvent, OverlayEventKind, OverlayEvents,
    RasterOverlay, SpatialOverlayRenderer, SurfacePoint, SurfaceSize, Viewport,
};
pub use selector::{ZoneSelection, ZoneSelector};
pub use store::{MemoryStore, VenueMapStore};
pub use upload::ImageUpload;
