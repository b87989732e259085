//! Image Reference Model
//!
//! `VenueMap::image_url` is opaque to everything except the code that first
//! reads the image. It is either an external URL owned by the image-storage
//! collaborator or an inline `data:<mime>;base64,<payload>` token.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64";

/// Classified image reference, borrowing from the original string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRef<'a> {
    /// Inline base64 image payload
    Inline { mime: &'a str, payload: &'a str },
    /// Anything else: URL, storage key, hash
    External(&'a str),
}

impl<'a> ImageRef<'a> {
    /// Classify a reference string. Non-base64 `data:` URLs are treated as
    /// external references.
    pub fn parse(reference: &'a str) -> Self {
        let trimmed = reference.trim();
        if let Some(rest) = trimmed.strip_prefix(DATA_PREFIX)
            && let Some((meta, payload)) = rest.split_once(',')
            && let Some(mime) = meta.strip_suffix(BASE64_MARKER)
        {
            return ImageRef::Inline { mime, payload };
        }
        ImageRef::External(trimmed)
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, ImageRef::Inline { .. })
    }

    /// Decode an inline payload. Returns `None` for external references.
    pub fn decode_inline(&self) -> Option<Result<Vec<u8>, base64::DecodeError>> {
        match self {
            ImageRef::Inline { payload, .. } => Some(STANDARD.decode(payload.trim())),
            ImageRef::External(_) => None,
        }
    }
}

/// Build an inline `data:` reference for raw image bytes
pub fn inline_image_url(mime: &str, bytes: &[u8]) -> String {
    format!("{DATA_PREFIX}{mime}{BASE64_MARKER},{}", STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inline() {
        let url = inline_image_url("image/png", b"\x89PNG");
        let parsed = ImageRef::parse(&url);
        assert!(parsed.is_inline());
        match parsed {
            ImageRef::Inline { mime, .. } => assert_eq!(mime, "image/png"),
            ImageRef::External(_) => panic!("expected inline"),
        }
        assert_eq!(parsed.decode_inline().unwrap().unwrap(), b"\x89PNG");
    }

    #[test]
    fn test_parse_external() {
        let parsed = ImageRef::parse("https://cdn.example.com/plan.png");
        assert_eq!(parsed, ImageRef::External("https://cdn.example.com/plan.png"));
        assert!(parsed.decode_inline().is_none());
    }

    #[test]
    fn test_non_base64_data_url_is_external() {
        let parsed = ImageRef::parse("data:image/svg+xml,<svg/>");
        assert!(!parsed.is_inline());
    }

    #[test]
    fn test_invalid_payload_reports_error() {
        let parsed = ImageRef::parse("data:image/png;base64,@@@");
        assert!(parsed.decode_inline().unwrap().is_err());
    }
}
