//! Per-pixel helpers shared across crates.

use crate::{CoreError, CoreResult};

/// Rec.709 red luma weight.
pub const REC709_LUMA_R: f64 = 0.2126;
/// Rec.709 green luma weight.
pub const REC709_LUMA_G: f64 = 0.7152;
/// Rec.709 blue luma weight.
pub const REC709_LUMA_B: f64 = 0.0722;

/// Rec.709 luma of 8-bit RGB, in the 0..=255 range (not rounded).
#[inline]
pub fn luminance_rec709(r: u8, g: u8, b: u8) -> f64 {
    REC709_LUMA_R * r as f64 + REC709_LUMA_G * g as f64 + REC709_LUMA_B * b as f64
}

/// Parses `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
///
/// ```rust
/// use grayedit_core::parse_hex_color;
///
/// assert_eq!(parse_hex_color("#ff8000").unwrap(), [255, 128, 0, 255]);
/// assert_eq!(parse_hex_color("00000080").unwrap(), [0, 0, 0, 128]);
/// ```
pub fn parse_hex_color(s: &str) -> CoreResult<[u8; 4]> {
    let hex = s.trim().trim_start_matches('#');
    if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
        return Err(CoreError::InvalidColor(s.to_string()));
    }
    let mut out = [0, 0, 0, 255];
    for (i, slot) in out.iter_mut().enumerate().take(hex.len() / 2) {
        *slot = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
            .map_err(|_| CoreError::InvalidColor(s.to_string()))?;
    }
    Ok(out)
}
