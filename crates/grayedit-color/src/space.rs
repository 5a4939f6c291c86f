//! Colour space conversions for 8-bit sRGB samples.
//!
//! The chain is sRGB -> linear -> CIE XYZ (D65, scaled x100) -> CIE Lab -> LCH.
//! OKLCh is present only as a placeholder that carries Lab lightness.
//!
//! # Example
//!
//! ```rust
//! use grayedit_color::space::{lab_to_lch, rgb_to_xyz, xyz_to_lab};
//!
//! let xyz = rgb_to_xyz([255, 255, 255]);
//! assert!((xyz.y - 100.0).abs() < 1e-9);
//!
//! let lab = xyz_to_lab(xyz);
//! assert!((lab.l - 100.0).abs() < 1e-6);
//!
//! let lch = lab_to_lch(lab);
//! assert!(lch.c < 0.05);
//! ```

use glam::{DMat3, DVec3};

/// D65 reference white, X component (x100 scale).
pub const D65_XN: f64 = 95.047;
/// D65 reference white, Y component (x100 scale).
pub const D65_YN: f64 = 100.0;
/// D65 reference white, Z component (x100 scale).
pub const D65_ZN: f64 = 108.883;

const LAB_EPSILON: f64 = 0.008856;
const LAB_KAPPA_SLOPE: f64 = 7.787;
const LAB_OFFSET: f64 = 16.0 / 116.0;

/// Linear sRGB to XYZ (D65), rows X, Y, Z.
fn srgb_to_xyz_matrix() -> DMat3 {
    // glam is column-major; columns are the R, G, B contributions.
    DMat3::from_cols(
        DVec3::new(0.4124, 0.2126, 0.0193),
        DVec3::new(0.3576, 0.7152, 0.1192),
        DVec3::new(0.1805, 0.0722, 0.9505),
    )
}

/// CIE XYZ tristimulus values, scaled so that Y of white is 100.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Xyz {
    /// X
    pub x: f64,
    /// Y (luminance)
    pub y: f64,
    /// Z
    pub z: f64,
}

/// CIE L*a*b* relative to D65.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    /// Lightness, 0..=100 for in-gamut input.
    pub l: f64,
    /// Green-red axis.
    pub a: f64,
    /// Blue-yellow axis.
    pub b: f64,
}

/// Cylindrical Lab.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lch {
    /// Lightness.
    pub l: f64,
    /// Chroma.
    pub c: f64,
    /// Hue in degrees, `[0, 360)`.
    pub h: f64,
}

/// OKLCh placeholder. Only `l` is populated.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Oklch {
    /// Lightness, copied from Lab.
    pub l: f64,
    /// Always 0.
    pub c: f64,
    /// Always 0.
    pub h: f64,
}

/// sRGB electro-optical transfer: 8-bit code value to linear `[0, 1]`.
#[inline]
pub fn srgb_eotf(code: u8) -> f64 {
    let c = code as f64 / 255.0;
    if c > 0.04045 {
        ((c + 0.055) / 1.055).powf(2.4)
    } else {
        c / 12.92
    }
}

/// Converts 8-bit sRGB to XYZ (D65, x100).
pub fn rgb_to_xyz(rgb: [u8; 3]) -> Xyz {
    let linear = DVec3::new(srgb_eotf(rgb[0]), srgb_eotf(rgb[1]), srgb_eotf(rgb[2]));
    let v = srgb_to_xyz_matrix() * linear * 100.0;
    Xyz {
        x: v.x,
        y: v.y,
        z: v.z,
    }
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        LAB_KAPPA_SLOPE * t + LAB_OFFSET
    }
}

/// Converts XYZ to CIE Lab against the D65 white.
pub fn xyz_to_lab(xyz: Xyz) -> Lab {
    let fx = lab_f(xyz.x / D65_XN);
    let fy = lab_f(xyz.y / D65_YN);
    let fz = lab_f(xyz.z / D65_ZN);
    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// Converts Lab to LCH. Hue is normalized to `[0, 360)`.
pub fn lab_to_lch(lab: Lab) -> Lch {
    let c = lab.a.hypot(lab.b);
    let mut h = lab.b.atan2(lab.a).to_degrees();
    if h < 0.0 {
        h += 360.0;
    }
    if h >= 360.0 {
        h -= 360.0;
    }
    Lch { l: lab.l, c, h }
}

/// OKLCh placeholder: returns Lab lightness with zero chroma and hue.
///
/// This is not an OKLab transform.
pub fn lab_to_oklch(lab: Lab) -> Oklch {
    Oklch {
        l: lab.l,
        c: 0.0,
        h: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_eotf_segments() {
        assert_eq!(srgb_eotf(0), 0.0);
        assert_abs_diff_eq!(srgb_eotf(255), 1.0, epsilon = 1e-12);
        // 10/255 = 0.0392 sits on the linear segment
        assert_abs_diff_eq!(srgb_eotf(10), 10.0 / 255.0 / 12.92, epsilon = 1e-12);
    }

    #[test]
    fn test_white_xyz() {
        let xyz = rgb_to_xyz([255, 255, 255]);
        assert_abs_diff_eq!(xyz.x, 95.05, epsilon = 1e-9);
        assert_abs_diff_eq!(xyz.y, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(xyz.z, 108.9, epsilon = 1e-9);
    }

    #[test]
    fn test_black_lab() {
        let lab = xyz_to_lab(rgb_to_xyz([0, 0, 0]));
        assert_abs_diff_eq!(lab.l, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(lab.a, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(lab.b, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_red_lab_lch() {
        let lab = xyz_to_lab(rgb_to_xyz([255, 0, 0]));
        assert_abs_diff_eq!(lab.l, 53.2329, epsilon = 1e-3);
        assert_abs_diff_eq!(lab.a, 80.1093, epsilon = 1e-3);
        assert_abs_diff_eq!(lab.b, 67.2201, epsilon = 1e-3);

        let lch = lab_to_lch(lab);
        assert_abs_diff_eq!(lch.c, 104.5755, epsilon = 1e-3);
        assert_abs_diff_eq!(lch.h, 40.0002, epsilon = 1e-3);
    }

    #[test]
    fn test_negative_hue_wraps() {
        let lch = lab_to_lch(xyz_to_lab(rgb_to_xyz([0, 0, 255])));
        assert_abs_diff_eq!(lch.h, 306.2872, epsilon = 1e-3);
        assert!((0.0..360.0).contains(&lch.h));
    }

    #[test]
    fn test_oklch_is_placeholder() {
        let lab = Lab {
            l: 42.0,
            a: 10.0,
            b: -5.0,
        };
        let ok = lab_to_oklch(lab);
        assert_eq!(ok.l, 42.0);
        assert_eq!(ok.c, 0.0);
        assert_eq!(ok.h, 0.0);
    }
}
