//! Surface ↔ image pixel mapping
//!
//! The viewport is the single place where the renderer's screen convention
//! (zoom, pan, letterboxing) is applied. Zoom and pan only change how the
//! image is shown; zone geometry is untouched.

use serde::{Deserialize, Serialize};
use shared::geometry::Coordinate;
use shared::{ImageSize, PixelPoint};

use super::SurfaceSize;

/// Minimum zoom relative to the fitted scale
const MIN_ZOOM: f64 = 0.25;
/// Maximum zoom relative to the fitted scale
const MAX_ZOOM: f64 = 16.0;

/// A position on the render surface, in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfacePoint {
    pub x: f64,
    pub y: f64,
}

impl SurfacePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Coordinate for SurfacePoint {
    fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    fn from_xy(x: f64, y: f64) -> Self {
        Self::new(x, y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Surface pixels per image pixel
    scale: f64,
    /// Surface position of the image origin
    offset_x: f64,
    offset_y: f64,
    /// Scale that fits the whole image on the surface
    fit_scale: f64,
    surface: SurfaceSize,
    image: ImageSize,
}

impl Viewport {
    /// Fit the whole image on the surface, centered (letterboxed)
    pub fn fit(surface: SurfaceSize, image: ImageSize) -> Self {
        let sx = surface.width as f64 / image.width() as f64;
        let sy = surface.height as f64 / image.height() as f64;
        let scale = sx.min(sy);
        Self {
            scale,
            offset_x: (surface.width as f64 - image.width() as f64 * scale) / 2.0,
            offset_y: (surface.height as f64 - image.height() as f64 * scale) / 2.0,
            fit_scale: scale,
            surface,
            image,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Zoom relative to the fitted view (1.0 = fitted)
    pub fn zoom(&self) -> f64 {
        self.scale / self.fit_scale
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    pub fn image(&self) -> ImageSize {
        self.image
    }

    pub fn to_image(&self, point: SurfacePoint) -> PixelPoint {
        PixelPoint::new(
            (point.x - self.offset_x) / self.scale,
            (point.y - self.offset_y) / self.scale,
        )
    }

    pub fn to_surface(&self, point: PixelPoint) -> SurfacePoint {
        SurfacePoint::new(
            point.x * self.scale + self.offset_x,
            point.y * self.scale + self.offset_y,
        )
    }

    /// Convert a surface-space distance into image pixels
    pub fn delta_to_image(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx / self.scale, dy / self.scale)
    }

    /// Zoom by `factor`, keeping the image point under `anchor` fixed
    pub fn zoom_by(&mut self, factor: f64, anchor: SurfacePoint) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let target = (self.scale * factor)
            .clamp(self.fit_scale * MIN_ZOOM, self.fit_scale * MAX_ZOOM);
        let ratio = target / self.scale;
        self.offset_x = anchor.x - (anchor.x - self.offset_x) * ratio;
        self.offset_y = anchor.y - (anchor.y - self.offset_y) * ratio;
        self.scale = target;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if dx.is_finite() && dy.is_finite() {
            self.offset_x += dx;
            self.offset_y += dy;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::fit(self.surface, self.image);
    }
}
