//! Zone editor (organizer workflow)
//!
//! Owns the in-memory [`VenueMap`] while an organizer uploads a floor plan,
//! draws zones on it, binds tickets and saves. The renderer only ever sees
//! pixel geometry; the model only ever stores normalized geometry.
//!
//! Renderer events are applied one at a time through [`ZoneEditor::handle_event`]
//! (or the `process_next` / `drain_pending` pumps). Events from a previous
//! mount are dropped.

use shared::geometry::{denormalize_polygon, normalize_polygon};
use shared::validation::{MAX_TICKETS_PER_ZONE, MIN_POLYGON_POINTS, validate_venue_map};
use shared::{
    ImageSize, PixelPoint, TicketId, ValidationError, ValidationErrorKind, VenueMap, Zone, ZoneId,
};

use crate::error::{EditorError, EditorResult};
use crate::palette::{self, DEFAULT_PALETTE};
use crate::renderer::{
    DrawnZone, FloorPlan, MountId, OverlayEvent, OverlayEventKind, OverlayEvents,
    SpatialOverlayRenderer, SurfaceSize,
};
use crate::store::VenueMapStore;
use crate::upload::{self, ImageUpload};

/// Editor options
#[derive(Debug, Clone)]
pub struct EditorOptions {
    /// Render surface size used for every mount
    pub surface: SurfaceSize,
    /// Default zone names are `"{prefix} {n}"`
    pub zone_name_prefix: String,
    /// Colors assigned round-robin to new zones
    pub palette: Vec<String>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            surface: SurfaceSize::default(),
            zone_name_prefix: "Zone".to_string(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Outcome of applying one renderer event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorUpdate {
    ZoneCreated(ZoneId),
    ZoneReshaped(ZoneId),
    ZoneSelected(ZoneId),
    /// The gesture was refused by a local rule
    Rejected(ValidationErrorKind),
    /// Event referred to something that no longer exists
    Ignored,
    /// Event came from a previous mount
    Stale,
}

pub struct ZoneEditor<R, S> {
    event_id: String,
    renderer: R,
    events: OverlayEvents,
    store: S,
    options: EditorOptions,
    map: VenueMap,
    mount: Option<MountId>,
    selected: Option<ZoneId>,
    dirty: bool,
    /// Zones created since the image was set, for default names
    created: usize,
}

impl<R, S> ZoneEditor<R, S>
where
    R: SpatialOverlayRenderer,
    S: VenueMapStore,
{
    /// Create an editor with an empty map for `event_id`
    pub fn new(event_id: impl Into<String>, renderer: R, events: OverlayEvents, store: S) -> Self {
        Self {
            event_id: event_id.into(),
            renderer,
            events,
            store,
            options: EditorOptions::default(),
            map: VenueMap::default(),
            mount: None,
            selected: None,
            dirty: false,
            created: 0,
        }
    }

    pub fn with_options(mut self, options: EditorOptions) -> Self {
        self.options = options;
        self
    }

    // ========== Accessors ==========

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn map(&self) -> &VenueMap {
        &self.map
    }

    pub fn zone(&self, zone_id: &str) -> Option<&Zone> {
        self.map.zone(zone_id)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn mount_id(&self) -> Option<MountId> {
        self.mount
    }

    /// Unsaved changes exist
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replacing the image now would discard drawn zones
    pub fn requires_upload_confirmation(&self) -> bool {
        !self.map.zones.is_empty()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Direct access to the renderer, for forwarding user gestures
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn image_size(&self) -> Option<ImageSize> {
        self.map.image_ref()?;
        self.map.image_size()
    }

    // ========== Loading ==========

    /// Load the stored map for this event and mount it.
    ///
    /// Returns `false` when nothing is stored; the editor is then empty. On a
    /// store or render failure the editor keeps its current state.
    pub async fn open(&mut self) -> EditorResult<bool> {
        let Some(map) = self.store.load(&self.event_id).await? else {
            tracing::info!(event_id = %self.event_id, "No venue map stored, starting empty");
            self.renderer.unmount();
            self.reset(VenueMap::default(), None);
            return Ok(false);
        };

        let plan = match (map.image_ref(), map.image_size()) {
            (Some(reference), Some(size)) => Some(FloorPlan::new(reference, size)),
            _ => None,
        };
        let mount = match plan {
            Some(plan) => Some(self.renderer.mount(self.options.surface, &plan)?),
            None => {
                self.renderer.unmount();
                None
            }
        };

        tracing::info!(
            event_id = %self.event_id,
            zones = map.zones.len(),
            mounted = mount.is_some(),
            "Venue map opened"
        );
        self.reset(map, mount);
        self.redraw_all();
        Ok(true)
    }

    fn reset(&mut self, map: VenueMap, mount: Option<MountId>) {
        self.created = map.zones.len();
        self.map = map;
        self.mount = mount;
        self.selected = None;
        self.dirty = false;
    }

    fn redraw_all(&mut self) {
        let Some(size) = self.image_size() else {
            return;
        };
        for zone in &self.map.zones {
            self.renderer.draw_zone(drawn(zone, size));
        }
    }

    fn redraw(&mut self, zone_id: &str) {
        if let (Some(size), Some(zone)) = (self.image_size(), self.map.zone(zone_id)) {
            self.renderer.draw_zone(drawn(zone, size));
        }
    }

    // ========== Operations ==========

    /// Replace the floor-plan image.
    ///
    /// All zones are discarded; callers should ask for confirmation first when
    /// [`requires_upload_confirmation`](Self::requires_upload_confirmation)
    /// is true. When the image cannot be read or mounted nothing changes.
    pub fn on_image_uploaded(&mut self, upload: ImageUpload) -> EditorResult<ImageSize> {
        let info = upload::inspect(&upload.bytes)?;
        let reference = upload::reference_for(&upload, &info);
        let plan = FloorPlan::new(reference.clone(), info.size).with_bytes(upload.bytes);

        let mount = self.renderer.mount(self.options.surface, &plan)?;

        let discarded = self.map.zones.len();
        self.reset(VenueMap::new(reference, info.size), Some(mount));
        self.created = 0;
        self.dirty = true;

        tracing::info!(
            event_id = %self.event_id,
            width = info.size.width(),
            height = info.size.height(),
            format = info.mime_type(),
            file = upload.file_name.as_deref().unwrap_or("-"),
            discarded,
            %mount,
            "Floor plan uploaded"
        );
        Ok(info.size)
    }

    /// Create a zone from a finished drawing gesture
    pub fn on_zone_drawn(&mut self, polygon: &[PixelPoint]) -> EditorResult<ZoneId> {
        let Some(size) = self.image_size() else {
            return Err(ValidationError::new(ValidationErrorKind::MissingImage).into());
        };
        if polygon.len() < MIN_POLYGON_POINTS {
            return Err(ValidationError::new(ValidationErrorKind::InvalidPolygon).into());
        }

        let n = self.created;
        let zone = Zone::new(
            Zone::generate_id(),
            format!("{} {}", self.options.zone_name_prefix, n + 1),
            palette::pick(&self.options.palette, n),
            normalize_polygon(polygon, size),
        );
        self.created += 1;

        self.renderer.draw_zone(drawn(&zone, size));
        let id = zone.id.clone();
        tracing::debug!(zone_id = %id, name = %zone.name, points = polygon.len(), "Zone created");
        self.map.zones.push(zone);
        self.dirty = true;
        Ok(id)
    }

    /// Replace a zone's geometry. Returns `Ok(false)` for unknown ids.
    ///
    /// A polygon with fewer than 3 points is refused with `InvalidPolygon`;
    /// the zone keeps its geometry and the renderer is reset to it.
    pub fn on_zone_edited(&mut self, zone_id: &str, polygon: &[PixelPoint]) -> EditorResult<bool> {
        let Some(size) = self.image_size() else {
            return Ok(false);
        };
        let Some(zone) = self.map.zone_mut(zone_id) else {
            tracing::debug!(zone_id, "Edit for unknown zone ignored");
            return Ok(false);
        };
        if polygon.len() < MIN_POLYGON_POINTS {
            self.redraw(zone_id);
            return Err(
                ValidationError::for_zone(ValidationErrorKind::InvalidPolygon, zone_id).into(),
            );
        }
        zone.polygon = normalize_polygon(polygon, size);
        self.dirty = true;
        // Pushes clamped geometry back to the renderer
        self.redraw(zone_id);
        tracing::debug!(zone_id, points = polygon.len(), "Zone reshaped");
        Ok(true)
    }

    /// Bind a ticket to a zone, or unbind with `None`.
    ///
    /// Rebinding the bound ticket is a no-op; binding a different ticket to a
    /// bound zone fails with `TooManyTickets` and changes nothing.
    pub fn bind_ticket(&mut self, zone_id: &str, ticket_id: Option<&str>) -> EditorResult<()> {
        let zone = self
            .map
            .zone_mut(zone_id)
            .ok_or_else(|| EditorError::ZoneNotFound(zone_id.to_string()))?;

        match ticket_id {
            None => {
                if !zone.ticket_refs.is_empty() {
                    zone.ticket_refs.clear();
                    self.dirty = true;
                    tracing::debug!(zone_id, "Ticket unbound");
                }
            }
            Some(ticket) if ticket.trim().is_empty() => {
                return Err(EditorError::InvalidTicketId(ticket.to_string()));
            }
            Some(ticket) if zone.bound_ticket() == Some(ticket) => {}
            Some(ticket) if !zone.ticket_refs.is_empty() => {
                tracing::warn!(zone_id, ticket, "Zone already bound to another ticket");
                return Err(
                    ValidationError::for_zone(ValidationErrorKind::TooManyTickets, zone_id).into(),
                );
            }
            Some(ticket) => {
                zone.ticket_refs = vec![ticket.to_string()];
                self.dirty = true;
                tracing::debug!(zone_id, ticket, "Ticket bound");
            }
        }
        Ok(())
    }

    /// Replace the ticket list of a zone; more than one entry is refused
    pub fn set_ticket_refs(&mut self, zone_id: &str, refs: Vec<TicketId>) -> EditorResult<()> {
        if refs.len() > MAX_TICKETS_PER_ZONE {
            return Err(
                ValidationError::for_zone(ValidationErrorKind::TooManyTickets, zone_id).into(),
            );
        }
        if let Some(blank) = refs.iter().find(|r| r.trim().is_empty()) {
            return Err(EditorError::InvalidTicketId(blank.clone()));
        }
        let zone = self
            .map
            .zone_mut(zone_id)
            .ok_or_else(|| EditorError::ZoneNotFound(zone_id.to_string()))?;
        if zone.ticket_refs != refs {
            zone.ticket_refs = refs;
            self.dirty = true;
        }
        Ok(())
    }

    pub fn rename_zone(&mut self, zone_id: &str, name: &str) -> EditorResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::for_zone(ValidationErrorKind::EmptyName, zone_id).into());
        }
        let zone = self
            .map
            .zone_mut(zone_id)
            .ok_or_else(|| EditorError::ZoneNotFound(zone_id.to_string()))?;
        zone.name = name.to_string();
        self.dirty = true;
        self.redraw(zone_id);
        Ok(())
    }

    pub fn recolor_zone(&mut self, zone_id: &str, color: &str) -> EditorResult<()> {
        if !palette::is_valid_color(color) {
            return Err(EditorError::InvalidColor(color.to_string()));
        }
        let zone = self
            .map
            .zone_mut(zone_id)
            .ok_or_else(|| EditorError::ZoneNotFound(zone_id.to_string()))?;
        zone.color = color.trim().to_string();
        self.dirty = true;
        self.redraw(zone_id);
        Ok(())
    }

    /// Remove a zone. Deleting an unknown id is not an error.
    pub fn delete_zone(&mut self, zone_id: &str) -> bool {
        let removed = self.map.remove_zone(zone_id).is_some();
        self.renderer.remove_zone(zone_id);
        if self.selected.as_deref() == Some(zone_id) {
            self.selected = None;
        }
        if removed {
            self.dirty = true;
            tracing::debug!(zone_id, "Zone deleted");
        }
        removed
    }

    /// Move the selection emphasis; `None` clears it
    pub fn select_zone(&mut self, zone_id: Option<&str>) -> EditorResult<()> {
        if let Some(id) = zone_id
            && self.map.zone(id).is_none()
        {
            return Err(EditorError::ZoneNotFound(id.to_string()));
        }
        if let Some(previous) = self.selected.take() {
            self.renderer.restyle_zone(&previous, false);
        }
        if let Some(id) = zone_id {
            self.renderer.restyle_zone(id, true);
            self.selected = Some(id.to_string());
        }
        Ok(())
    }

    // ========== Event pump ==========

    /// Apply one renderer event
    pub fn handle_event(&mut self, event: OverlayEvent) -> EditorUpdate {
        if self.mount != Some(event.mount) {
            tracing::debug!(mount = %event.mount, "Stale overlay event dropped");
            return EditorUpdate::Stale;
        }
        match event.kind {
            OverlayEventKind::ZoneDrawn { polygon } => match self.on_zone_drawn(&polygon) {
                Ok(id) => EditorUpdate::ZoneCreated(id),
                Err(e) => {
                    tracing::warn!(code = %e.error_code(), error = %e, "Drawn zone rejected");
                    e.validation_kind()
                        .map_or(EditorUpdate::Ignored, EditorUpdate::Rejected)
                }
            },
            OverlayEventKind::ZoneEdited { zone_id, polygon } => {
                match self.on_zone_edited(&zone_id, &polygon) {
                    Ok(true) => EditorUpdate::ZoneReshaped(zone_id),
                    Ok(false) => EditorUpdate::Ignored,
                    Err(e) => {
                        tracing::warn!(zone_id = %zone_id, code = %e.error_code(), error = %e, "Zone edit rejected");
                        e.validation_kind()
                            .map_or(EditorUpdate::Ignored, EditorUpdate::Rejected)
                    }
                }
            }
            OverlayEventKind::ZoneClicked { zone_id } => match self.select_zone(Some(&zone_id)) {
                Ok(()) => EditorUpdate::ZoneSelected(zone_id),
                Err(_) => EditorUpdate::Ignored,
            },
        }
    }

    /// Wait for the next renderer event and apply it.
    ///
    /// Returns `None` once the renderer has been dropped.
    pub async fn process_next(&mut self) -> Option<EditorUpdate> {
        let event = self.events.recv().await?;
        Some(self.handle_event(event))
    }

    /// Apply every event already queued, in arrival order
    pub fn drain_pending(&mut self) -> Vec<EditorUpdate> {
        let mut updates = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            updates.push(self.handle_event(event));
        }
        updates
    }

    // ========== Saving ==========

    /// Validate and persist the map.
    ///
    /// A validation failure never reaches the store. A store failure leaves
    /// the in-memory map and the dirty flag as they were.
    pub async fn save(&mut self) -> EditorResult<VenueMap> {
        if let Err(e) = validate_venue_map(&self.map) {
            tracing::warn!(event_id = %self.event_id, error = %e, "Venue map failed validation");
            return Err(e.into());
        }

        let stored = match self.store.save(&self.event_id, &self.map).await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(event_id = %self.event_id, code = %e.error_code(), error = %e, "Venue map save failed");
                return Err(e.into());
            }
        };

        self.dirty = false;
        tracing::info!(event_id = %self.event_id, zones = self.map.zones.len(), "Venue map saved");
        Ok(stored)
    }
}

fn drawn(zone: &Zone, size: ImageSize) -> DrawnZone {
    DrawnZone::new(zone.id.clone(), denormalize_polygon(&zone.polygon, size))
        .with_label(zone.name.clone())
        .with_color(zone.color.clone())
        .editable(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RasterOverlay;
    use crate::store::MemoryStore;
    use crate::upload::encode_png;
    use image::{Rgba, RgbaImage};

    fn png(w: u32, h: u32) -> Vec<u8> {
        encode_png(&RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255]))).unwrap()
    }

    fn editor() -> ZoneEditor<RasterOverlay, MemoryStore> {
        let (overlay, events) = RasterOverlay::new();
        ZoneEditor::new("evt-1", overlay, events, MemoryStore::new())
    }

    fn triangle() -> Vec<PixelPoint> {
        vec![
            PixelPoint::new(100.0, 100.0),
            PixelPoint::new(200.0, 100.0),
            PixelPoint::new(150.0, 200.0),
        ]
    }

    #[tokio::test]
    async fn test_default_names_and_colors() {
        let mut editor = editor();
        editor.on_image_uploaded(ImageUpload::new(png(1000, 500))).unwrap();
        let a = editor.on_zone_drawn(&triangle()).unwrap();
        let b = editor.on_zone_drawn(&triangle()).unwrap();
        assert_ne!(a, b);
        assert_eq!(editor.zone(&a).unwrap().name, "Zone 1");
        assert_eq!(editor.zone(&b).unwrap().name, "Zone 2");
        assert_eq!(editor.zone(&a).unwrap().color, DEFAULT_PALETTE[0]);
        assert_eq!(editor.zone(&b).unwrap().color, DEFAULT_PALETTE[1]);
        assert_eq!(editor.renderer().layer_count(), 2);
    }

    #[test]
    fn test_draw_without_image() {
        let mut editor = editor();
        let err = editor.on_zone_drawn(&triangle()).unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationErrorKind::MissingImage));
    }

    #[tokio::test]
    async fn test_rename_and_recolor() {
        let mut editor = editor();
        editor.on_image_uploaded(ImageUpload::new(png(1000, 500))).unwrap();
        let id = editor.on_zone_drawn(&triangle()).unwrap();

        editor.rename_zone(&id, "  VIP  ").unwrap();
        assert_eq!(editor.zone(&id).unwrap().name, "VIP");
        assert_eq!(editor.renderer().layer(&id).unwrap().label, "VIP");
        assert_eq!(
            editor.rename_zone(&id, "   ").unwrap_err().validation_kind(),
            Some(ValidationErrorKind::EmptyName)
        );

        editor.recolor_zone(&id, "#00FF00").unwrap();
        assert_eq!(editor.renderer().layer(&id).unwrap().color, "#00FF00");
        assert!(matches!(
            editor.recolor_zone(&id, "green"),
            Err(EditorError::InvalidColor(_))
        ));
        assert!(matches!(
            editor.rename_zone("nope", "X"),
            Err(EditorError::ZoneNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_selection_moves() {
        let mut editor = editor();
        editor.on_image_uploaded(ImageUpload::new(png(1000, 500))).unwrap();
        let a = editor.on_zone_drawn(&triangle()).unwrap();
        let b = editor.on_zone_drawn(&triangle()).unwrap();

        editor.select_zone(Some(&a)).unwrap();
        editor.select_zone(Some(&b)).unwrap();
        assert!(!editor.renderer().is_selected(&a));
        assert!(editor.renderer().is_selected(&b));

        editor.delete_zone(&b);
        assert_eq!(editor.selected(), None);
        assert!(editor.select_zone(Some(&b)).is_err());
    }

    #[tokio::test]
    async fn test_set_ticket_refs() {
        let mut editor = editor();
        editor.on_image_uploaded(ImageUpload::new(png(1000, 500))).unwrap();
        let id = editor.on_zone_drawn(&triangle()).unwrap();

        editor.set_ticket_refs(&id, vec!["t1".into()]).unwrap();
        let err = editor
            .set_ticket_refs(&id, vec!["t1".into(), "t2".into()])
            .unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationErrorKind::TooManyTickets));
        assert_eq!(editor.zone(&id).unwrap().ticket_refs, vec!["t1".to_string()]);

        editor.set_ticket_refs(&id, Vec::new()).unwrap();
        assert!(editor.zone(&id).unwrap().ticket_refs.is_empty());
    }

    #[tokio::test]
    async fn test_dirty_flag() {
        let mut editor = editor();
        assert!(!editor.is_dirty());
        editor.on_image_uploaded(ImageUpload::new(png(1000, 500))).unwrap();
        assert!(editor.is_dirty());
        let id = editor.on_zone_drawn(&triangle()).unwrap();
        editor.save().await.unwrap();
        assert!(!editor.is_dirty());

        // no-op rebind keeps the editor clean
        editor.bind_ticket(&id, None).unwrap();
        assert!(!editor.is_dirty());
        editor.bind_ticket(&id, Some("t1")).unwrap();
        assert!(editor.is_dirty());
    }
}
