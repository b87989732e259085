//! Zone colors

use image::Rgba;

/// Default zone colors, assigned round-robin to newly drawn zones
pub const DEFAULT_PALETTE: &[&str] = &[
    "#E74C3C", "#3498DB", "#2ECC71", "#F39C12", "#9B59B6", "#1ABC9C", "#E67E22", "#34495E",
];

/// Fill used for muted (unavailable) zones
pub const MUTED_COLOR: Rgba<u8> = Rgba([150, 150, 150, 255]);

/// Parse `#RRGGBB` (or `#RGB`) into an opaque RGBA color
pub fn parse_hex(color: &str) -> Option<Rgba<u8>> {
    let hex = color.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Rgba([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            255,
        ])),
        3 => {
            let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Some(Rgba([short(0)?, short(1)?, short(2)?, 255]))
        }
        _ => None,
    }
}

pub fn is_valid_color(color: &str) -> bool {
    parse_hex(color).is_some()
}

/// Palette entry for the n-th zone
pub fn pick(palette: &[String], n: usize) -> String {
    if palette.is_empty() {
        return DEFAULT_PALETTE[n % DEFAULT_PALETTE.len()].to_string();
    }
    palette[n % palette.len()].clone()
}
