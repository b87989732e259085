//! Floor-plan image upload
//!
//! The only place the core looks inside image bytes: once at upload time to
//! learn the native pixel dimensions, and in the raster overlay to paint.

use image::{ImageFormat, ImageReader, RgbaImage};
use shared::ImageSize;
use shared::models::inline_image_url;
use std::io::Cursor;

use crate::error::RenderError;

/// Maximum accepted upload size (10MB)
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Supported floor-plan formats
const SUPPORTED_FORMATS: &[ImageFormat] = &[ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::WebP];

/// A floor-plan image handed to the editor
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub file_name: Option<String>,
    /// Reference assigned by the image-storage collaborator.
    /// When absent the image is embedded as an inline `data:` reference.
    pub reference: Option<String>,
}

impl ImageUpload {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            file_name: None,
            reference: None,
        }
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

/// Header-level facts about an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub size: ImageSize,
    pub format: ImageFormat,
}

impl ImageInfo {
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }
}

/// Read the format and native dimensions without decoding pixel data
pub fn inspect(bytes: &[u8]) -> Result<ImageInfo, RenderError> {
    if bytes.is_empty() {
        return Err(RenderError::unavailable("Empty image file"));
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(RenderError::unavailable(format!(
            "Image too large ({} bytes, max {}MB)",
            bytes.len(),
            MAX_UPLOAD_BYTES / 1024 / 1024
        )));
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| RenderError::unavailable(format!("Unreadable image: {}", e)))?;
    let format = reader
        .format()
        .ok_or_else(|| RenderError::unavailable("Unrecognized image format"))?;
    if !SUPPORTED_FORMATS.contains(&format) {
        return Err(RenderError::unavailable(format!(
            "Unsupported image format {:?}",
            format
        )));
    }

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| RenderError::unavailable(format!("Invalid image: {}", e)))?;
    let size = ImageSize::new(width, height)
        .ok_or_else(|| RenderError::unavailable("Image has zero width or height"))?;

    Ok(ImageInfo { size, format })
}

/// Fully decode to RGBA pixels
pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaImage, RenderError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| RenderError::unavailable(format!("Invalid image: {}", e)))?;
    Ok(img.to_rgba8())
}

/// The reference to persist for an upload
pub(crate) fn reference_for(upload: &ImageUpload, info: &ImageInfo) -> String {
    match &upload.reference {
        Some(reference) if !reference.trim().is_empty() => reference.clone(),
        _ => inline_image_url(info.mime_type(), &upload.bytes),
    }
}

/// Encode an RGBA image as PNG bytes
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|e| RenderError::unavailable(format!("Failed to encode image: {}", e)))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 200, 200, 255]));
        encode_png(&img).unwrap()
    }

    #[test]
    fn test_inspect_png() {
        let info = inspect(&png(40, 20)).unwrap();
        assert_eq!(info.size.width(), 40);
        assert_eq!(info.size.height(), 20);
        assert_eq!(info.format, ImageFormat::Png);
        assert_eq!(info.mime_type(), "image/png");
    }

    #[test]
    fn test_inspect_rejects_garbage() {
        assert!(inspect(b"").is_err());
        assert!(inspect(b"definitely not an image").is_err());
    }

    #[test]
    fn test_reference_defaults_to_inline() {
        let bytes = png(4, 4);
        let info = inspect(&bytes).unwrap();
        let upload = ImageUpload::new(bytes);
        assert!(reference_for(&upload, &info).starts_with("data:image/png;base64,"));

        let upload = upload.with_reference("https://cdn.example.com/plan.png");
        assert_eq!(
            reference_for(&upload, &info),
            "https://cdn.example.com/plan.png"
        );
    }

    #[test]
    fn test_decode_rgba() {
        let img = decode_rgba(&png(3, 2)).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
    }
}
