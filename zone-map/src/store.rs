//! Venue map persistence boundary
//!
//! The editor only needs "load the document for an event" and "store this
//! document". The HTTP client implements this against the persistence
//! server; [`MemoryStore`] keeps documents in process.

use async_trait::async_trait;
use shared::VenueMap;
use shared::validation::validate_venue_map;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::StoreError;

#[async_trait]
pub trait VenueMapStore: Send + Sync {
    /// Fetch the stored map; `None` when the event has no map yet
    async fn load(&self, event_id: &str) -> Result<Option<VenueMap>, StoreError>;

    /// Store a map, returning the stored copy
    async fn save(&self, event_id: &str, map: &VenueMap) -> Result<VenueMap, StoreError>;
}

/// In-process store
///
/// Re-validates on save the way the persistence server does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    maps: Mutex<HashMap<String, VenueMap>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document, bypassing validation
    pub fn insert(&self, event_id: impl Into<String>, map: VenueMap) {
        self.lock().insert(event_id.into(), map);
    }

    pub fn get(&self, event_id: &str) -> Option<VenueMap> {
        self.lock().get(event_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, VenueMap>> {
        // A poisoned map is still a valid map
        self.maps.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl VenueMapStore for MemoryStore {
    async fn load(&self, event_id: &str) -> Result<Option<VenueMap>, StoreError> {
        Ok(self.get(event_id))
    }

    async fn save(&self, event_id: &str, map: &VenueMap) -> Result<VenueMap, StoreError> {
        if let Err(e) = validate_venue_map(map) {
            return Err(StoreError::Rejected {
                code: e.kind.error_code(),
                message: e.to_string(),
            });
        }
        self.insert(event_id, map.clone());
        Ok(map.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{ImageSize, NormalizedPoint, Zone};

    fn valid_map() -> VenueMap {
        let mut map = VenueMap::new("https://cdn.example.com/p.png", ImageSize::new(10, 10).unwrap());
        map.zones.push(Zone::new(
            "z1",
            "Stalls",
            "#FF0000",
            vec![
                NormalizedPoint::new(0.0, 0.0),
                NormalizedPoint::new(1.0, 0.0),
                NormalizedPoint::new(0.5, 1.0),
            ],
        ));
        map
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = MemoryStore::new();
        assert!(store.load("evt").await.unwrap().is_none());
        let saved = store.save("evt", &valid_map()).await.unwrap();
        assert_eq!(store.load("evt").await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn test_save_rejects_invalid() {
        let store = MemoryStore::new();
        let err = store.save("evt", &VenueMap::default()).await.unwrap_err();
        match err {
            StoreError::Rejected { code, .. } => assert_eq!(code, shared::ErrorCode::MissingImage),
            other => panic!("unexpected error {:?}", other),
        }
        assert!(store.is_empty());
    }
}
