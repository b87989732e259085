//! Data models
//!
//! Shared between the editor, the selector and the persistence API.
//! Wire format is JSON with camelCase keys. All ids are opaque strings.

pub mod image_ref;
pub mod ticket;
pub mod venue_map;
pub mod zone;

// Re-exports
pub use image_ref::*;
pub use ticket::*;
pub use venue_map::*;
pub use zone::*;
