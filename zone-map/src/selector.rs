//! Zone selector (buyer workflow)
//!
//! Read-only view of a saved venue map. A zone is purchasable when it
//! references exactly one ticket and that ticket is in the catalog; every
//! other zone is drawn muted and does not react to clicks.

use shared::geometry::{denormalize_polygon, polygon_contains};
use shared::validation::MIN_POLYGON_POINTS;
use shared::{NormalizedPoint, Ticket, TicketCatalog, VenueMap, Zone, ZoneId};
use std::collections::HashMap;

use crate::error::SelectorError;
use crate::renderer::{
    DrawnZone, FloorPlan, LayerStyle, MountId, OverlayEvent, OverlayEventKind, OverlayEvents,
    SpatialOverlayRenderer, SurfaceSize,
};

/// A buyer's pick: the zone and the ticket it sells
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneSelection {
    pub zone: Zone,
    pub ticket: Ticket,
}

pub struct ZoneSelector<R> {
    renderer: R,
    events: OverlayEvents,
    surface: SurfaceSize,
    mount: Option<MountId>,
    /// Drawn zones, in paint order
    zones: Vec<Zone>,
    /// zone id → ticket for purchasable zones
    available: HashMap<ZoneId, Ticket>,
    selected: Option<ZoneId>,
}

impl<R: SpatialOverlayRenderer> ZoneSelector<R> {
    pub fn new(renderer: R, events: OverlayEvents) -> Self {
        Self {
            renderer,
            events,
            surface: SurfaceSize::default(),
            mount: None,
            zones: Vec::new(),
            available: HashMap::new(),
            selected: None,
        }
    }

    pub fn with_surface(mut self, surface: SurfaceSize) -> Self {
        self.surface = surface;
        self
    }

    /// Show a venue map.
    ///
    /// Returns the number of purchasable zones. An absent map, a map without
    /// an image, or a map without zones shows nothing and is not an error.
    pub fn load(&mut self, map: Option<&VenueMap>, tickets: &TicketCatalog) -> Result<usize, SelectorError> {
        self.clear();

        let Some(map) = map.filter(|m| !m.zones.is_empty()) else {
            tracing::info!("No zones to show");
            return Ok(0);
        };
        let (Some(reference), Some(size)) = (map.image_ref(), map.image_size()) else {
            tracing::warn!(zones = map.zones.len(), "Venue map has no usable image, nothing shown");
            return Ok(0);
        };

        let mount = self.renderer.mount(self.surface, &FloorPlan::new(reference, size))?;
        self.mount = Some(mount);

        for zone in &map.zones {
            if zone.polygon.len() < MIN_POLYGON_POINTS {
                tracing::warn!(zone_id = %zone.id, "Zone with degenerate polygon skipped");
                continue;
            }
            let ticket = zone.bound_ticket().and_then(|id| tickets.get(id));
            let layer = DrawnZone::new(zone.id.clone(), denormalize_polygon(&zone.polygon, size))
                .with_label(zone.name.clone())
                .with_color(zone.color.clone())
                .clickable(ticket.is_some());
            let layer = match ticket {
                Some(ticket) => {
                    self.available.insert(zone.id.clone(), ticket.clone());
                    layer
                }
                None => layer.with_style(LayerStyle::Muted),
            };
            self.renderer.draw_zone(layer);
            self.zones.push(zone.clone());
        }

        tracing::info!(
            %mount,
            zones = self.zones.len(),
            available = self.available.len(),
            "Venue map shown"
        );
        Ok(self.available.len())
    }

    fn clear(&mut self) {
        self.renderer.unmount();
        self.mount = None;
        self.zones.clear();
        self.available.clear();
        self.selected = None;
    }

    /// A zone was clicked. Unavailable or unknown zones yield nothing.
    pub fn on_zone_clicked(&mut self, zone_id: &str) -> Option<ZoneSelection> {
        let Some(ticket) = self.available.get(zone_id) else {
            tracing::debug!(zone_id, "Click on unavailable zone ignored");
            return None;
        };
        let zone = self.zones.iter().find(|z| z.id == zone_id)?;
        let selection = ZoneSelection {
            zone: zone.clone(),
            ticket: ticket.clone(),
        };

        if let Some(previous) = self.selected.take() {
            self.renderer.restyle_zone(&previous, false);
        }
        self.renderer.restyle_zone(zone_id, true);
        self.selected = Some(zone_id.to_string());
        tracing::debug!(zone_id, ticket_id = %selection.ticket.id, "Zone selected");
        Some(selection)
    }

    /// Top-most purchasable zone containing a normalized point
    pub fn zone_at(&self, point: NormalizedPoint) -> Option<&Zone> {
        self.zones
            .iter()
            .rev()
            .filter(|z| self.available.contains_key(&z.id))
            .find(|z| polygon_contains(&z.polygon, point))
    }

    pub fn is_available(&self, zone_id: &str) -> bool {
        self.available.contains_key(zone_id)
    }

    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn mount_id(&self) -> Option<MountId> {
        self.mount
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    // ========== Event pump ==========

    /// Apply one renderer event. Only clicks on the live mount matter.
    pub fn handle_event(&mut self, event: OverlayEvent) -> Option<ZoneSelection> {
        if self.mount != Some(event.mount) {
            tracing::debug!(mount = %event.mount, "Stale overlay event dropped");
            return None;
        }
        match event.kind {
            OverlayEventKind::ZoneClicked { zone_id } => self.on_zone_clicked(&zone_id),
            OverlayEventKind::ZoneDrawn { .. } | OverlayEventKind::ZoneEdited { .. } => None,
        }
    }

    /// Wait until a click produces a selection.
    ///
    /// Returns `None` once the renderer has been dropped.
    pub async fn process_next(&mut self) -> Option<ZoneSelection> {
        loop {
            let event = self.events.recv().await?;
            if let Some(selection) = self.handle_event(event) {
                return Some(selection);
            }
        }
    }

    /// Apply every queued event, returning the selections they produced
    pub fn drain_pending(&mut self) -> Vec<ZoneSelection> {
        let mut selections = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            selections.extend(self.handle_event(event));
        }
        selections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RasterOverlay;
    use crate::upload::encode_png;
    use image::{Rgba, RgbaImage};
    use rust_decimal::Decimal;
    use shared::models::{index_tickets, inline_image_url};
    use shared::ImageSize;

    fn map_with(zones: Vec<Zone>) -> VenueMap {
        let png = encode_png(&RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255]))).unwrap();
        let mut map = VenueMap::new(inline_image_url("image/png", &png), ImageSize::new(100, 100).unwrap());
        map.zones = zones;
        map
    }

    fn square(id: &str, x: f64, y: f64) -> Zone {
        Zone::new(
            id,
            id.to_uppercase(),
            "#3366FF",
            vec![
                NormalizedPoint::new(x, y),
                NormalizedPoint::new(x + 0.3, y),
                NormalizedPoint::new(x + 0.3, y + 0.3),
                NormalizedPoint::new(x, y + 0.3),
            ],
        )
    }

    fn selector() -> ZoneSelector<RasterOverlay> {
        let (overlay, events) = RasterOverlay::new();
        ZoneSelector::new(overlay, events).with_surface(SurfaceSize::new(100, 100))
    }

    #[test]
    fn test_zone_at_ignores_unavailable() {
        let tickets = index_tickets([Ticket::new("t1", "Floor", Decimal::new(5000, 2))]);
        let map = map_with(vec![
            square("a", 0.0, 0.0).with_ticket("t1"),
            square("b", 0.5, 0.5).with_ticket("t9"),
        ]);
        let mut selector = selector();
        assert_eq!(selector.load(Some(&map), &tickets).unwrap(), 1);

        assert_eq!(selector.zone_at(NormalizedPoint::new(0.1, 0.1)).map(|z| z.id.as_str()), Some("a"));
        assert!(selector.zone_at(NormalizedPoint::new(0.6, 0.6)).is_none());
        assert!(selector.zone_at(NormalizedPoint::new(0.45, 0.1)).is_none());
    }

    #[test]
    fn test_degenerate_zone_skipped() {
        let tickets = index_tickets([Ticket::new("t1", "Floor", Decimal::ONE)]);
        let mut broken = square("x", 0.0, 0.0).with_ticket("t1");
        broken.polygon.truncate(2);
        let map = map_with(vec![broken, square("a", 0.5, 0.5).with_ticket("t1")]);

        let mut selector = selector();
        assert_eq!(selector.load(Some(&map), &tickets).unwrap(), 1);
        assert_eq!(selector.renderer().layer_count(), 1);
        assert!(!selector.is_available("x"));
    }

    #[test]
    fn test_reload_clears_selection() {
        let tickets = index_tickets([Ticket::new("t1", "Floor", Decimal::ONE)]);
        let map = map_with(vec![square("a", 0.0, 0.0).with_ticket("t1")]);
        let mut selector = selector();
        selector.load(Some(&map), &tickets).unwrap();
        assert!(selector.on_zone_clicked("a").is_some());
        assert_eq!(selector.selected(), Some("a"));

        assert_eq!(selector.load(None, &tickets).unwrap(), 0);
        assert_eq!(selector.selected(), None);
        assert!(selector.mount_id().is_none());
    }
}
