//! Zone Model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::NormalizedPoint;

/// Opaque zone identifier, generated client-side
pub type ZoneId = String;

/// Ticket type identifier owned by the ticket catalog
pub type TicketId = String;

/// Zone entity (座位区 / 站席区)
///
/// `ticket_refs` keeps a list shape on the wire but holds at most one entry;
/// the single-ticket rule is enforced by validation and by the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub color: String,
    pub polygon: Vec<NormalizedPoint>,
    #[serde(default)]
    pub ticket_refs: Vec<TicketId>,
}

/// Observable lifecycle state of a zone record
///
/// Drafting lives inside the renderer and Deleted has no record, so only
/// these two states are ever reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneState {
    Created,
    Bound,
}

impl Zone {
    /// Create an unbound zone
    pub fn new(
        id: impl Into<ZoneId>,
        name: impl Into<String>,
        color: impl Into<String>,
        polygon: Vec<NormalizedPoint>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            polygon,
            ticket_refs: Vec::new(),
        }
    }

    /// Generate a fresh zone id (UUID v4)
    pub fn generate_id() -> ZoneId {
        Uuid::new_v4().to_string()
    }

    /// Builder-style ticket binding, mostly for fixtures
    pub fn with_ticket(mut self, ticket_id: impl Into<TicketId>) -> Self {
        self.ticket_refs = vec![ticket_id.into()];
        self
    }

    /// The bound ticket, if exactly one is referenced
    pub fn bound_ticket(&self) -> Option<&str> {
        match self.ticket_refs.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }

    pub fn state(&self) -> ZoneState {
        if self.ticket_refs.is_empty() {
            ZoneState::Created
        } else {
            ZoneState::Bound
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<NormalizedPoint> {
        vec![
            NormalizedPoint::new(0.1, 0.1),
            NormalizedPoint::new(0.2, 0.1),
            NormalizedPoint::new(0.15, 0.2),
        ]
    }

    #[test]
    fn test_zone_state() {
        let zone = Zone::new("z1", "Floor", "#FF0000", triangle());
        assert_eq!(zone.state(), ZoneState::Created);
        assert!(zone.bound_ticket().is_none());

        let zone = zone.with_ticket("t1");
        assert_eq!(zone.state(), ZoneState::Bound);
        assert_eq!(zone.bound_ticket(), Some("t1"));
    }

    #[test]
    fn test_zone_serialization_uses_camel_case() {
        let zone = Zone::new("z1", "Floor", "#FF0000", triangle()).with_ticket("t1");
        let json = serde_json::to_value(&zone).unwrap();
        assert_eq!(json["ticketRefs"], serde_json::json!(["t1"]));
        assert_eq!(json["polygon"][0]["x"], serde_json::json!(0.1));
    }

    #[test]
    fn test_unbound_zone_serializes_empty_array() {
        let zone = Zone::new("z1", "Floor", "#FF0000", triangle());
        let json = serde_json::to_string(&zone).unwrap();
        assert!(json.contains("\"ticketRefs\":[]"));
    }

    #[test]
    fn test_missing_ticket_refs_defaults_to_empty() {
        let zone: Zone = serde_json::from_str(
            r##"{"id":"z1","name":"A","color":"#000000","polygon":[]}"##,
        )
        .unwrap();
        assert!(zone.ticket_refs.is_empty());
    }

    #[test]
    fn test_generate_id_is_unique() {
        assert_ne!(Zone::generate_id(), Zone::generate_id());
    }
}
