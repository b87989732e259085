//! Headless raster overlay
//!
//! A [`SpatialOverlayRenderer`] that keeps its layers in memory and paints
//! them into an RGBA frame with the `image` crate. Gestures are fed in
//! surface coordinates through the methods below, the same way a UI event
//! loop would forward pointer input.

use image::{Rgba, RgbaImage};
use shared::geometry::{polygon_bounds, polygon_contains};
use shared::models::ImageRef;
use shared::{ImageSize, PixelPoint, ZoneId};
use std::collections::HashMap;
use std::sync::Arc;

use super::{
    DrawnZone, FloorPlan, LayerStyle, MountId, OverlayEvent, OverlayEventKind, OverlayEventSender,
    OverlayEvents, SpatialOverlayRenderer, SurfacePoint, SurfaceSize, Viewport, event_channel,
};
use crate::error::RenderError;
use crate::palette::{MUTED_COLOR, parse_hex};
use crate::upload::decode_rgba;

const BACKGROUND: Rgba<u8> = Rgba([32, 32, 32, 255]);
const DRAFT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
const SELECTED_OUTLINE: Rgba<u8> = Rgba([255, 215, 0, 255]);

const FILL_ALPHA: f64 = 0.35;
const SELECTED_FILL_ALPHA: f64 = 0.55;
const MUTED_FILL_ALPHA: f64 = 0.25;

/// Minimum vertices for a finished draft
const MIN_DRAFT_VERTICES: usize = 3;

struct Layer {
    zone: DrawnZone,
    selected: bool,
}

/// State owned by one mount. Dropped as a whole on remount.
struct Mounted {
    id: MountId,
    plan_size: ImageSize,
    image: Arc<RgbaImage>,
    viewport: Viewport,
    /// zone id → layer side-table
    layers: HashMap<ZoneId, Layer>,
    /// Paint order, bottom to top
    order: Vec<ZoneId>,
    draft: Option<Vec<PixelPoint>>,
}

impl Mounted {
    /// Top-most layer containing an image point that passes `filter`
    fn hit(&self, point: PixelPoint, filter: impl Fn(&Layer) -> bool) -> Option<&Layer> {
        self.order
            .iter()
            .rev()
            .filter_map(|id| self.layers.get(id))
            .find(|layer| filter(layer) && polygon_contains(&layer.zone.polygon, point))
    }
}

pub struct RasterOverlay {
    events: OverlayEventSender,
    /// Decoded images for external references
    assets: HashMap<String, Arc<RgbaImage>>,
    next_mount: u64,
    mounted: Option<Mounted>,
}

impl RasterOverlay {
    /// Create an overlay and the receiving end of its event stream
    pub fn new() -> (Self, OverlayEvents) {
        let (tx, rx) = event_channel();
        let overlay = Self {
            events: tx,
            assets: HashMap::new(),
            next_mount: 0,
            mounted: None,
        };
        (overlay, rx)
    }

    /// Make an external image reference resolvable by later mounts
    pub fn register_image(&mut self, reference: impl Into<String>, bytes: &[u8]) -> Result<(), RenderError> {
        let image = decode_rgba(bytes)?;
        self.assets.insert(reference.into(), Arc::new(image));
        Ok(())
    }

    fn resolve(&self, plan: &FloorPlan) -> Result<Arc<RgbaImage>, RenderError> {
        if let Some(bytes) = &plan.bytes {
            return decode_rgba(bytes).map(Arc::new);
        }
        match ImageRef::parse(&plan.reference) {
            inline @ ImageRef::Inline { .. } => {
                let bytes = inline
                    .decode_inline()
                    .transpose()
                    .map_err(|e| RenderError::unavailable(format!("Invalid inline image: {}", e)))?
                    .unwrap_or_default();
                decode_rgba(&bytes).map(Arc::new)
            }
            ImageRef::External(reference) => self.assets.get(reference).cloned().ok_or_else(|| {
                RenderError::unavailable(format!("Image {} has not been loaded", reference))
            }),
        }
    }

    fn emit(&self, mount: MountId, kind: OverlayEventKind) {
        if self.events.send(OverlayEvent { mount, kind }).is_err() {
            tracing::debug!(%mount, "Overlay event dropped: no listener");
        }
    }

    // ========== Drawing gesture ==========

    /// Start a new polygon draft, discarding any unfinished one
    pub fn begin_draft(&mut self) -> bool {
        match self.mounted.as_mut() {
            Some(m) => {
                m.draft = Some(Vec::new());
                true
            }
            None => false,
        }
    }

    /// Append a vertex to the current draft
    pub fn add_vertex(&mut self, at: SurfacePoint) -> bool {
        let Some(m) = self.mounted.as_mut() else {
            return false;
        };
        let point = m.viewport.to_image(at);
        match m.draft.as_mut() {
            Some(draft) => {
                draft.push(point);
                true
            }
            None => false,
        }
    }

    /// Vertices of the current draft, in image pixels
    pub fn draft(&self) -> Option<&[PixelPoint]> {
        self.mounted.as_ref()?.draft.as_deref()
    }

    /// Close the draft and emit `ZoneDrawn`.
    ///
    /// With fewer than 3 vertices the draft stays open and nothing is emitted.
    pub fn finish_draft(&mut self) -> bool {
        let Some(m) = self.mounted.as_mut() else {
            return false;
        };
        match m.draft.take() {
            Some(polygon) if polygon.len() >= MIN_DRAFT_VERTICES => {
                let mount = m.id;
                self.emit(mount, OverlayEventKind::ZoneDrawn { polygon });
                true
            }
            other => {
                m.draft = other;
                false
            }
        }
    }

    pub fn discard_draft(&mut self) {
        if let Some(m) = self.mounted.as_mut() {
            m.draft = None;
        }
    }

    // ========== Editing gestures ==========

    /// Move one vertex of an editable zone
    pub fn drag_vertex(&mut self, zone_id: &str, index: usize, to: SurfacePoint) -> bool {
        let Some(m) = self.mounted.as_mut() else {
            return false;
        };
        let target = m.viewport.to_image(to);
        let Some(layer) = m.layers.get_mut(zone_id).filter(|l| l.zone.editable) else {
            return false;
        };
        let Some(vertex) = layer.zone.polygon.get_mut(index) else {
            return false;
        };
        *vertex = target;
        let (mount, polygon) = (m.id, layer.zone.polygon.clone());
        self.emit(
            mount,
            OverlayEventKind::ZoneEdited {
                zone_id: zone_id.to_string(),
                polygon,
            },
        );
        true
    }

    /// Translate an editable zone by a surface-space delta
    pub fn drag_zone(&mut self, zone_id: &str, dx: f64, dy: f64) -> bool {
        let Some(m) = self.mounted.as_mut() else {
            return false;
        };
        let (ix, iy) = m.viewport.delta_to_image(dx, dy);
        let Some(layer) = m.layers.get_mut(zone_id).filter(|l| l.zone.editable) else {
            return false;
        };
        for p in layer.zone.polygon.iter_mut() {
            *p = p.offset(ix, iy);
        }
        let (mount, polygon) = (m.id, layer.zone.polygon.clone());
        self.emit(
            mount,
            OverlayEventKind::ZoneEdited {
                zone_id: zone_id.to_string(),
                polygon,
            },
        );
        true
    }

    /// Click on the surface.
    ///
    /// While a draft is open the click places a vertex instead. Otherwise the
    /// top-most click-reactive zone under the pointer emits `ZoneClicked`.
    pub fn click(&mut self, at: SurfacePoint) -> Option<ZoneId> {
        let m = self.mounted.as_ref()?;
        if m.draft.is_some() {
            self.add_vertex(at);
            return None;
        }
        let point = m.viewport.to_image(at);
        let zone_id = m.hit(point, |layer| layer.zone.clickable)?.zone.id.clone();
        let mount = m.id;
        self.emit(
            mount,
            OverlayEventKind::ZoneClicked {
                zone_id: zone_id.clone(),
            },
        );
        Some(zone_id)
    }

    /// Top-most zone under a surface point, regardless of interactivity
    pub fn zone_at(&self, at: SurfacePoint) -> Option<&str> {
        let m = self.mounted.as_ref()?;
        let point = m.viewport.to_image(at);
        m.hit(point, |_| true).map(|layer| layer.zone.id.as_str())
    }

    // ========== View ==========

    pub fn viewport(&self) -> Option<&Viewport> {
        self.mounted.as_ref().map(|m| &m.viewport)
    }

    pub fn zoom_by(&mut self, factor: f64, anchor: SurfacePoint) {
        if let Some(m) = self.mounted.as_mut() {
            m.viewport.zoom_by(factor, anchor);
        }
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if let Some(m) = self.mounted.as_mut() {
            m.viewport.pan_by(dx, dy);
        }
    }

    pub fn reset_view(&mut self) {
        if let Some(m) = self.mounted.as_mut() {
            m.viewport.reset();
        }
    }

    // ========== Introspection ==========

    pub fn layer(&self, zone_id: &str) -> Option<&DrawnZone> {
        self.mounted.as_ref()?.layers.get(zone_id).map(|l| &l.zone)
    }

    pub fn is_selected(&self, zone_id: &str) -> bool {
        self.mounted
            .as_ref()
            .and_then(|m| m.layers.get(zone_id))
            .is_some_and(|l| l.selected)
    }

    pub fn layer_count(&self) -> usize {
        self.mounted.as_ref().map_or(0, |m| m.layers.len())
    }

    /// Layer ids in paint order
    pub fn layer_ids(&self) -> Vec<&str> {
        self.mounted
            .as_ref()
            .map(|m| m.order.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    // ========== Painting ==========

    /// Paint the current mount into a new frame of the surface size
    pub fn render(&self) -> Option<RgbaImage> {
        let m = self.mounted.as_ref()?;
        let surface = m.viewport.surface();
        let mut frame = RgbaImage::from_pixel(surface.width, surface.height, BACKGROUND);

        paint_image(&mut frame, m);
        for layer in m.order.iter().filter_map(|id| m.layers.get(id)) {
            paint_layer(&mut frame, &m.viewport, layer);
        }
        if let Some(draft) = &m.draft {
            let points: Vec<SurfacePoint> = draft.iter().map(|p| m.viewport.to_surface(*p)).collect();
            paint_outline(&mut frame, &points, DRAFT_COLOR, false, 1);
        }
        Some(frame)
    }
}

impl SpatialOverlayRenderer for RasterOverlay {
    fn mount(&mut self, surface: SurfaceSize, plan: &FloorPlan) -> Result<MountId, RenderError> {
        if surface.is_empty() {
            return Err(RenderError::unavailable("Render surface has zero size"));
        }
        let image = self.resolve(plan)?;
        if image.width() == 0 || image.height() == 0 {
            return Err(RenderError::unavailable("Decoded image is empty"));
        }

        self.unmount();

        self.next_mount += 1;
        let id = MountId(self.next_mount);
        self.mounted = Some(Mounted {
            id,
            plan_size: plan.size,
            image,
            viewport: Viewport::fit(surface, plan.size),
            layers: HashMap::new(),
            order: Vec::new(),
            draft: None,
        });
        tracing::info!(
            mount = %id,
            width = plan.size.width(),
            height = plan.size.height(),
            "Floor plan mounted"
        );
        Ok(id)
    }

    fn unmount(&mut self) {
        if let Some(m) = self.mounted.take() {
            tracing::debug!(mount = %m.id, layers = m.layers.len(), "Floor plan unmounted");
        }
    }

    fn mount_id(&self) -> Option<MountId> {
        self.mounted.as_ref().map(|m| m.id)
    }

    fn draw_zone(&mut self, zone: DrawnZone) {
        let Some(m) = self.mounted.as_mut() else {
            tracing::warn!(zone_id = %zone.id, "draw_zone ignored: nothing mounted");
            return;
        };
        let id = zone.id.clone();
        let selected = m.layers.get(&id).is_some_and(|l| l.selected);
        if m.layers.insert(id.clone(), Layer { zone, selected }).is_none() {
            m.order.push(id);
        }
    }

    fn remove_zone(&mut self, zone_id: &str) {
        if let Some(m) = self.mounted.as_mut()
            && m.layers.remove(zone_id).is_some()
        {
            m.order.retain(|id| id != zone_id);
        }
    }

    fn restyle_zone(&mut self, zone_id: &str, is_selected: bool) {
        if let Some(layer) = self
            .mounted
            .as_mut()
            .and_then(|m| m.layers.get_mut(zone_id))
        {
            layer.selected = is_selected;
        }
    }
}

fn paint_image(frame: &mut RgbaImage, m: &Mounted) {
    let (iw, ih) = m.image.dimensions();
    let plan_w = m.plan_size.width() as f64;
    let plan_h = m.plan_size.height() as f64;
    // The decoded image may differ in resolution from the plan's native size
    let sx = iw as f64 / plan_w;
    let sy = ih as f64 / plan_h;

    for (x, y, pixel) in frame.enumerate_pixels_mut() {
        let p = m
            .viewport
            .to_image(SurfacePoint::new(x as f64 + 0.5, y as f64 + 0.5));
        if p.x < 0.0 || p.y < 0.0 || p.x >= plan_w || p.y >= plan_h {
            continue;
        }
        let ix = ((p.x * sx) as u32).min(iw - 1);
        let iy = ((p.y * sy) as u32).min(ih - 1);
        *pixel = *m.image.get_pixel(ix, iy);
    }
}

fn paint_layer(frame: &mut RgbaImage, viewport: &Viewport, layer: &Layer) {
    let zone = &layer.zone;
    let points: Vec<SurfacePoint> = zone.polygon.iter().map(|p| viewport.to_surface(*p)).collect();
    let (color, alpha) = match zone.style {
        LayerStyle::Muted => (MUTED_COLOR, MUTED_FILL_ALPHA),
        LayerStyle::Normal => (
            parse_hex(&zone.color).unwrap_or(MUTED_COLOR),
            if layer.selected {
                SELECTED_FILL_ALPHA
            } else {
                FILL_ALPHA
            },
        ),
    };

    if let Some(bounds) = polygon_bounds(&points) {
        let (w, h) = frame.dimensions();
        let x0 = bounds.min_x.floor().max(0.0) as u32;
        let y0 = bounds.min_y.floor().max(0.0) as u32;
        let x1 = bounds.max_x.ceil().min(w as f64 - 1.0);
        let y1 = bounds.max_y.ceil().min(h as f64 - 1.0);
        if x1 >= 0.0 && y1 >= 0.0 {
            for y in y0..=y1 as u32 {
                for x in x0..=x1 as u32 {
                    let center = SurfacePoint::new(x as f64 + 0.5, y as f64 + 0.5);
                    if polygon_contains(&points, center) {
                        blend(frame.get_pixel_mut(x, y), color, alpha);
                    }
                }
            }
        }
    }

    let (outline, thickness) = if layer.selected {
        (SELECTED_OUTLINE, 2)
    } else {
        (color, 1)
    };
    paint_outline(frame, &points, outline, true, thickness);
}

fn paint_outline(frame: &mut RgbaImage, points: &[SurfacePoint], color: Rgba<u8>, closed: bool, thickness: i64) {
    if points.len() < 2 {
        return;
    }
    let edges = if closed { points.len() } else { points.len() - 1 };
    for i in 0..edges {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        let steps = (b.x - a.x).abs().max((b.y - a.y).abs()).ceil().max(1.0) as i64;
        for s in 0..=steps {
            let t = s as f64 / steps as f64;
            let x = (a.x + (b.x - a.x) * t).floor() as i64;
            let y = (a.y + (b.y - a.y) * t).floor() as i64;
            for d in 0..thickness {
                put(frame, x + d, y, color);
                put(frame, x, y + d, color);
            }
        }
    }
}

fn put(frame: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < frame.width() && (y as u32) < frame.height() {
        frame.put_pixel(x as u32, y as u32, color);
    }
}

fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>, alpha: f64) {
    for c in 0..3 {
        let mixed = src.0[c] as f64 * alpha + dst.0[c] as f64 * (1.0 - alpha);
        dst.0[c] = mixed.round().clamp(0.0, 255.0) as u8;
    }
    dst.0[3] = 255;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::encode_png;
    use shared::models::inline_image_url;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn plan(w: u32, h: u32) -> FloorPlan {
        let png = encode_png(&RgbaImage::from_pixel(w, h, WHITE)).unwrap();
        FloorPlan::new(inline_image_url("image/png", &png), ImageSize::new(w, h).unwrap())
    }

    fn square(id: &str, x: f64, y: f64, side: f64) -> DrawnZone {
        DrawnZone::new(
            id,
            vec![
                PixelPoint::new(x, y),
                PixelPoint::new(x + side, y),
                PixelPoint::new(x + side, y + side),
                PixelPoint::new(x, y + side),
            ],
        )
        .with_color("#FF0000")
    }

    fn mounted() -> (RasterOverlay, OverlayEvents, MountId) {
        let (mut overlay, events) = RasterOverlay::new();
        let id = overlay.mount(SurfaceSize::new(100, 100), &plan(100, 100)).unwrap();
        (overlay, events, id)
    }

    #[test]
    fn test_mount_rejects_empty_surface() {
        let (mut overlay, _events) = RasterOverlay::new();
        let err = overlay.mount(SurfaceSize::new(0, 10), &plan(10, 10)).unwrap_err();
        assert!(matches!(err, RenderError::RenderSurfaceUnavailable(_)));
        assert!(overlay.mount_id().is_none());
    }

    #[test]
    fn test_mount_rejects_undecodable_image() {
        let (mut overlay, _events) = RasterOverlay::new();
        let bad = FloorPlan::new("data:image/png;base64,AAAA", ImageSize::new(10, 10).unwrap());
        assert!(overlay.mount(SurfaceSize::new(10, 10), &bad).is_err());

        let unknown = FloorPlan::new("https://cdn.example.com/x.png", ImageSize::new(10, 10).unwrap());
        assert!(overlay.mount(SurfaceSize::new(10, 10), &unknown).is_err());
    }

    #[test]
    fn test_failed_mount_keeps_previous() {
        let (mut overlay, _events, id) = mounted();
        overlay.draw_zone(square("z1", 10.0, 10.0, 20.0));
        let bad = FloorPlan::new("https://nowhere/x.png", ImageSize::new(10, 10).unwrap());
        assert!(overlay.mount(SurfaceSize::new(10, 10), &bad).is_err());
        assert_eq!(overlay.mount_id(), Some(id));
        assert_eq!(overlay.layer_count(), 1);
    }

    #[test]
    fn test_registered_external_image() {
        let (mut overlay, _events) = RasterOverlay::new();
        let png = encode_png(&RgbaImage::from_pixel(8, 8, WHITE)).unwrap();
        overlay.register_image("https://cdn.example.com/p.png", &png).unwrap();
        let plan = FloorPlan::new("https://cdn.example.com/p.png", ImageSize::new(8, 8).unwrap());
        assert!(overlay.mount(SurfaceSize::new(16, 16), &plan).is_ok());
    }

    #[test]
    fn test_remount_tears_down_layers() {
        let (mut overlay, _events, first) = mounted();
        overlay.draw_zone(square("z1", 10.0, 10.0, 20.0));
        overlay.begin_draft();
        let second = overlay.mount(SurfaceSize::new(100, 100), &plan(50, 50)).unwrap();
        assert_ne!(first, second);
        assert_eq!(overlay.layer_count(), 0);
        assert!(overlay.draft().is_none());
    }

    #[test]
    fn test_draft_emits_zone_drawn() {
        let (mut overlay, mut events, id) = mounted();
        assert!(overlay.begin_draft());
        overlay.add_vertex(SurfacePoint::new(10.0, 10.0));
        overlay.add_vertex(SurfacePoint::new(20.0, 10.0));
        assert!(!overlay.finish_draft(), "two vertices are not a polygon");
        overlay.click(SurfacePoint::new(15.0, 20.0));
        assert!(overlay.finish_draft());

        let event = events.try_recv().unwrap();
        assert_eq!(event.mount, id);
        match event.kind {
            OverlayEventKind::ZoneDrawn { polygon } => {
                assert_eq!(polygon.len(), 3);
                assert_eq!(polygon[2], PixelPoint::new(15.0, 20.0));
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert!(overlay.draft().is_none());
    }

    #[test]
    fn test_discard_draft_emits_nothing() {
        let (mut overlay, mut events, _) = mounted();
        overlay.begin_draft();
        overlay.add_vertex(SurfacePoint::new(1.0, 1.0));
        overlay.discard_draft();
        assert!(!overlay.finish_draft());
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_click_hits_topmost_clickable() {
        let (mut overlay, mut events, _) = mounted();
        overlay.draw_zone(square("below", 0.0, 0.0, 50.0));
        overlay.draw_zone(square("above", 20.0, 20.0, 50.0));
        overlay.draw_zone(square("inert", 60.0, 60.0, 30.0).clickable(false));

        assert_eq!(overlay.click(SurfacePoint::new(30.0, 30.0)).as_deref(), Some("above"));
        assert_eq!(overlay.click(SurfacePoint::new(5.0, 5.0)).as_deref(), Some("below"));
        assert_eq!(overlay.click(SurfacePoint::new(80.0, 80.0)), None);
        assert_eq!(overlay.zone_at(SurfacePoint::new(80.0, 80.0)), Some("inert"));

        let kinds: Vec<_> = std::iter::from_fn(|| events.try_recv().ok()).map(|e| e.kind).collect();
        assert_eq!(kinds.len(), 2);
    }

    #[test]
    fn test_drag_requires_editable() {
        let (mut overlay, mut events, _) = mounted();
        overlay.draw_zone(square("ro", 0.0, 0.0, 10.0));
        overlay.draw_zone(square("rw", 50.0, 50.0, 10.0).editable(true));

        assert!(!overlay.drag_vertex("ro", 0, SurfacePoint::new(1.0, 1.0)));
        assert!(overlay.drag_vertex("rw", 0, SurfacePoint::new(40.0, 45.0)));
        assert!(overlay.drag_zone("rw", 5.0, 0.0));
        assert!(!overlay.drag_vertex("rw", 9, SurfacePoint::new(0.0, 0.0)));

        let first = events.try_recv().unwrap();
        match first.kind {
            OverlayEventKind::ZoneEdited { zone_id, polygon } => {
                assert_eq!(zone_id, "rw");
                assert_eq!(polygon[0], PixelPoint::new(40.0, 45.0));
            }
            other => panic!("unexpected event {:?}", other),
        }
        let second = events.try_recv().unwrap();
        match second.kind {
            OverlayEventKind::ZoneEdited { polygon, .. } => {
                assert_eq!(polygon[0], PixelPoint::new(45.0, 45.0));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_zoom_does_not_touch_geometry() {
        let (mut overlay, _events, _) = mounted();
        overlay.draw_zone(square("z1", 10.0, 10.0, 20.0));
        let before = overlay.layer("z1").unwrap().polygon.clone();
        overlay.zoom_by(2.0, SurfacePoint::new(50.0, 50.0));
        overlay.pan_by(10.0, -5.0);
        assert_eq!(overlay.layer("z1").unwrap().polygon, before);
        // Same image point now sits elsewhere on screen
        assert_eq!(overlay.zone_at(SurfacePoint::new(15.0, 15.0)), None);
    }

    #[test]
    fn test_restyle_and_remove() {
        let (mut overlay, _events, _) = mounted();
        overlay.draw_zone(square("z1", 10.0, 10.0, 20.0));
        overlay.restyle_zone("z1", true);
        assert!(overlay.is_selected("z1"));
        // redraw keeps the selection emphasis
        overlay.draw_zone(square("z1", 12.0, 12.0, 20.0));
        assert!(overlay.is_selected("z1"));
        overlay.remove_zone("z1");
        overlay.remove_zone("z1");
        assert_eq!(overlay.layer_count(), 0);
        assert!(overlay.layer_ids().is_empty());
    }

    #[test]
    fn test_render_fills_zone() {
        let (mut overlay, _events, _) = mounted();
        overlay.draw_zone(square("red", 10.0, 10.0, 30.0));
        overlay.draw_zone(square("grey", 60.0, 60.0, 30.0).with_style(LayerStyle::Muted));
        let frame = overlay.render().unwrap();

        let inside = frame.get_pixel(25, 25);
        assert_eq!(inside.0[0], 255);
        assert!(inside.0[1] < 200, "red tint expected, got {:?}", inside);

        let muted = frame.get_pixel(75, 75);
        assert_eq!(muted.0[0], muted.0[1]);

        assert_eq!(*frame.get_pixel(50, 5), WHITE);
    }

    #[test]
    fn test_render_letterbox_background() {
        let (mut overlay, _events) = RasterOverlay::new();
        overlay.mount(SurfaceSize::new(100, 100), &plan(100, 50)).unwrap();
        let frame = overlay.render().unwrap();
        assert_eq!(*frame.get_pixel(50, 5), BACKGROUND);
        assert_eq!(*frame.get_pixel(50, 50), WHITE);
    }
}
