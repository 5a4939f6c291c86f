//! WCAG relative luminance and contrast ratio.

use crate::space::srgb_eotf;
use grayedit_core::{REC709_LUMA_B, REC709_LUMA_G, REC709_LUMA_R};

/// Minimum ratio considered accessible for normal text.
pub const WCAG_AA_NORMAL: f64 = 4.5;

/// Relative luminance of an 8-bit sRGB colour, in `[0, 1]`.
pub fn luminance(rgb: [u8; 3]) -> f64 {
    REC709_LUMA_R * srgb_eotf(rgb[0])
        + REC709_LUMA_G * srgb_eotf(rgb[1])
        + REC709_LUMA_B * srgb_eotf(rgb[2])
}

/// `(lighter + 0.05) / (darker + 0.05)`. Symmetric in its arguments.
pub fn contrast_ratio(a: [u8; 3], b: [u8; 3]) -> f64 {
    let la = luminance(a);
    let lb = luminance(b);
    (la.max(lb) + 0.05) / (la.min(lb) + 0.05)
}

/// True when `ratio` meets the WCAG AA threshold for normal text.
#[inline]
pub fn is_accessible(ratio: f64) -> bool {
    ratio >= WCAG_AA_NORMAL
}

/// Contrast ratio of two colours with its accessibility verdict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastReport {
    /// Ratio in `[1, 21]`.
    pub ratio: f64,
    /// `ratio >= 4.5`.
    pub accessible: bool,
}

impl ContrastReport {
    /// Measures `a` against `b`.
    pub fn between(a: [u8; 3], b: [u8; 3]) -> Self {
        let ratio = contrast_ratio(a, b);
        Self {
            ratio,
            accessible: is_accessible(ratio),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_luminance_range() {
        assert_eq!(luminance([0, 0, 0]), 0.0);
        assert_abs_diff_eq!(luminance([255, 255, 255]), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_black_white() {
        let report = ContrastReport::between([255, 255, 255], [0, 0, 0]);
        assert_abs_diff_eq!(report.ratio, 21.0, epsilon = 1e-9);
        assert!(report.accessible);
    }

    #[test]
    fn test_symmetric() {
        let pairs = [
            ([12, 200, 40], [250, 3, 77]),
            ([0, 0, 0], [128, 128, 128]),
            ([255, 255, 0], [0, 0, 255]),
        ];
        for (a, b) in pairs {
            assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
        }
    }

    #[test]
    fn test_threshold() {
        // mid grays either side of 4.5:1 against white
        assert!(is_accessible(contrast_ratio([255, 255, 255], [118, 118, 118])));
        assert!(!is_accessible(contrast_ratio([255, 255, 255], [119, 119, 119])));
        assert!(is_accessible(4.5));
        assert!(!is_accessible(4.49));
    }
}
