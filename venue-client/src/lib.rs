//! Venue Client - HTTP client for the venue map API
//!
//! Talks to the persistence server (`/api/events/{eventId}/venue-map`) and
//! reads the ticket listing. [`VenueMapClient`] plugs into the editor as its
//! [`VenueMapStore`](zone_map::VenueMapStore).

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::VenueMapClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::{ApiResponse, Ticket, TicketCatalog, VenueMap};
