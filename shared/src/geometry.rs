//! Coordinate model for venue maps
//!
//! Two coordinate spaces live here:
//! - [`PixelPoint`]: native image pixels, origin at the top-left corner
//! - [`NormalizedPoint`]: fractions of image width/height in `[0, 1]`
//!
//! Only normalized points are persisted. Renderer coordinates (zoom, pan,
//! axis order) never appear in this module; renderers convert to pixel space
//! at their own boundary.

use serde::{Deserialize, Serialize};

/// Native pixel dimensions of a floor-plan image.
///
/// Both sides are guaranteed positive, so normalizing against an `ImageSize`
/// never divides by zero. Deserialization enforces the same rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawImageSize")]
pub struct ImageSize {
    width: u32,
    height: u32,
}

#[derive(Deserialize)]
struct RawImageSize {
    width: u32,
    height: u32,
}

impl TryFrom<RawImageSize> for ImageSize {
    type Error = String;

    fn try_from(raw: RawImageSize) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height)
            .ok_or_else(|| format!("image size {}x{} must be positive", raw.width, raw.height))
    }
}

impl ImageSize {
    /// Returns `None` when either side is zero
    pub fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether a pixel point lies inside the image rectangle (edges included)
    pub fn contains(&self, point: PixelPoint) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x <= self.width as f64
            && point.y <= self.height as f64
    }
}

/// A position in native image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another pixel point
    pub fn distance_to(&self, other: &PixelPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Translate by a pixel delta
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A position expressed as a fraction of image width/height.
///
/// Coordinates are clamped to `[0, 1]` on every write, including
/// deserialization, so a stored point can never fall outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawNormalizedPoint")]
pub struct NormalizedPoint {
    x: f64,
    y: f64,
}

#[derive(Deserialize)]
struct RawNormalizedPoint {
    x: f64,
    y: f64,
}

impl From<RawNormalizedPoint> for NormalizedPoint {
    fn from(raw: RawNormalizedPoint) -> Self {
        Self::new(raw.x, raw.y)
    }
}

impl NormalizedPoint {
    /// Create a point, clamping each coordinate to `[0, 1]`.
    /// Non-finite values collapse to `0`.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: clamp_unit(x),
            y: clamp_unit(y),
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Convert a pixel point into normalized space.
pub fn normalize(point: PixelPoint, size: ImageSize) -> NormalizedPoint {
    NormalizedPoint::new(
        point.x / size.width as f64,
        point.y / size.height as f64,
    )
}

/// Convert a normalized point back into pixel space.
pub fn denormalize(point: NormalizedPoint, size: ImageSize) -> PixelPoint {
    PixelPoint::new(
        point.x * size.width as f64,
        point.y * size.height as f64,
    )
}

pub fn normalize_polygon(polygon: &[PixelPoint], size: ImageSize) -> Vec<NormalizedPoint> {
    polygon.iter().map(|p| normalize(*p, size)).collect()
}

pub fn denormalize_polygon(polygon: &[NormalizedPoint], size: ImageSize) -> Vec<PixelPoint> {
    polygon.iter().map(|p| denormalize(*p, size)).collect()
}

// ============================================================================
// Polygon math
// ============================================================================

/// Planar coordinate accessor shared by pixel and normalized points.
pub trait Coordinate: Copy {
    fn xy(&self) -> (f64, f64);
    fn from_xy(x: f64, y: f64) -> Self;
}

impl Coordinate for PixelPoint {
    fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    fn from_xy(x: f64, y: f64) -> Self {
        Self::new(x, y)
    }
}

impl Coordinate for NormalizedPoint {
    fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    fn from_xy(x: f64, y: f64) -> Self {
        Self::new(x, y)
    }
}

/// Axis-aligned bounding box of a polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Even-odd point-in-polygon test (ray casting).
///
/// The polygon is implicitly closed. Fewer than 3 vertices never contain
/// anything.
pub fn polygon_contains<P: Coordinate>(polygon: &[P], point: P) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let (px, py) = point.xy();
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (xi, yi) = polygon[i].xy();
        let (xj, yj) = polygon[j].xy();
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Unsigned area (shoelace formula)
pub fn polygon_area<P: Coordinate>(polygon: &[P]) -> f64 {
    signed_area(polygon).abs()
}

fn signed_area<P: Coordinate>(polygon: &[P]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for (i, p) in polygon.iter().enumerate() {
        let (x0, y0) = p.xy();
        let (x1, y1) = polygon[(i + 1) % polygon.len()].xy();
        sum += x0 * y1 - x1 * y0;
    }
    sum / 2.0
}

pub fn polygon_bounds<P: Coordinate>(polygon: &[P]) -> Option<Bounds> {
    let (first, rest) = polygon.split_first()?;
    let (x, y) = first.xy();
    let mut bounds = Bounds {
        min_x: x,
        min_y: y,
        max_x: x,
        max_y: y,
    };
    for p in rest {
        let (x, y) = p.xy();
        bounds.min_x = bounds.min_x.min(x);
        bounds.min_y = bounds.min_y.min(y);
        bounds.max_x = bounds.max_x.max(x);
        bounds.max_y = bounds.max_y.max(y);
    }
    Some(bounds)
}

/// Area centroid, used as the label anchor of a zone.
///
/// Degenerate polygons (zero area) fall back to the vertex average.
pub fn polygon_centroid<P: Coordinate>(polygon: &[P]) -> Option<P> {
    if polygon.is_empty() {
        return None;
    }
    let area = signed_area(polygon);
    if area.abs() < f64::EPSILON {
        let n = polygon.len() as f64;
        let (sx, sy) = polygon
            .iter()
            .map(Coordinate::xy)
            .fold((0.0, 0.0), |(ax, ay), (x, y)| (ax + x, ay + y));
        return Some(P::from_xy(sx / n, sy / n));
    }
    let mut cx = 0.0;
    let mut cy = 0.0;
    for (i, p) in polygon.iter().enumerate() {
        let (x0, y0) = p.xy();
        let (x1, y1) = polygon[(i + 1) % polygon.len()].xy();
        let cross = x0 * y1 - x1 * y0;
        cx += (x0 + x1) * cross;
        cy += (y0 + y1) * cross;
    }
    Some(P::from_xy(cx / (6.0 * area), cy / (6.0 * area)))
}
