//! Venue map API
//!
//! Typed calls over [`HttpClient`]. Every endpoint answers with an
//! `ApiResponse` envelope; error envelopes become [`ClientError::Api`].

use async_trait::async_trait;
use serde::Deserialize;
use shared::models::index_tickets;
use shared::{ApiResponse, ErrorCode, Ticket, TicketCatalog, VenueMap};
use zone_map::{StoreError, VenueMapStore};

use crate::{ClientConfig, ClientError, ClientResult, HttpClient};

/// `/health` payload
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
}

/// Client for one venue map server
#[derive(Debug, Clone)]
pub struct VenueMapClient {
    http: HttpClient,
}

impl VenueMapClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    pub fn from_http(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Path segments under `/api/events/{event_id}/`; the id is one segment
    fn event_path<'a>(event_id: &'a str, resource: &'a str) -> ClientResult<[&'a str; 4]> {
        if event_id.trim().is_empty() {
            return Err(ClientError::Validation("event id is empty".to_string()));
        }
        Ok(["api", "events", event_id, resource])
    }

    // ========== Venue map ==========

    /// Fetch the stored map; `None` when the event has none
    pub async fn fetch_venue_map(&self, event_id: &str) -> ClientResult<Option<VenueMap>> {
        let path = Self::event_path(event_id, "venue-map")?;
        match self.http.get::<ApiResponse<VenueMap>>(&path).await {
            Ok(response) => Ok(response.into_result()?),
            Err(ClientError::Api {
                code: ErrorCode::VenueMapNotFound,
                ..
            }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Store a map; the server validates it again before accepting
    pub async fn save_venue_map(&self, event_id: &str, map: &VenueMap) -> ClientResult<VenueMap> {
        let path = Self::event_path(event_id, "venue-map")?;
        let stored = self
            .http
            .put::<ApiResponse<VenueMap>, _>(&path, map)
            .await?
            .into_result()?
            .ok_or_else(|| ClientError::InvalidResponse("Missing venue map data".to_string()))?;
        tracing::info!(event_id, zones = stored.zones.len(), "Venue map stored");
        Ok(stored)
    }

    /// Remove the stored map. Returns whether one existed.
    pub async fn delete_venue_map(&self, event_id: &str) -> ClientResult<bool> {
        let path = Self::event_path(event_id, "venue-map")?;
        let removed = self
            .http
            .delete::<ApiResponse<bool>>(&path)
            .await?
            .into_result()?
            .unwrap_or(false);
        Ok(removed)
    }

    // ========== Tickets ==========

    /// Ticket types on sale for an event
    pub async fn fetch_tickets(&self, event_id: &str) -> ClientResult<Vec<Ticket>> {
        let path = Self::event_path(event_id, "tickets")?;
        let tickets = self
            .http
            .get::<ApiResponse<Vec<Ticket>>>(&path)
            .await?
            .into_result()?
            .unwrap_or_default();
        Ok(tickets)
    }

    /// Ticket types keyed by id, ready for the selector
    pub async fn fetch_catalog(&self, event_id: &str) -> ClientResult<TicketCatalog> {
        Ok(index_tickets(self.fetch_tickets(event_id).await?))
    }

    // ========== Health ==========

    pub async fn health(&self) -> ClientResult<HealthStatus> {
        self.http
            .get::<ApiResponse<HealthStatus>>(&["health"])
            .await?
            .into_result()?
            .ok_or_else(|| ClientError::InvalidResponse("Missing health data".to_string()))
    }
}

#[async_trait]
impl VenueMapStore for VenueMapClient {
    async fn load(&self, event_id: &str) -> Result<Option<VenueMap>, StoreError> {
        self.fetch_venue_map(event_id).await.map_err(Into::into)
    }

    async fn save(&self, event_id: &str, map: &VenueMap) -> Result<VenueMap, StoreError> {
        self.save_venue_map(event_id, map).await.map_err(Into::into)
    }
}
