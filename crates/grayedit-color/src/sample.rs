//! Eyedropper samples.

use crate::contrast::{luminance, ContrastReport};
use crate::space::{lab_to_lch, lab_to_oklch, rgb_to_xyz, xyz_to_lab, Lab, Lch, Oklch, Xyz};
use crate::{ColorError, ColorResult};
use grayedit_core::PixelBuffer;

/// A pixel's colour in every supported representation.
///
/// Built once, never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorSample {
    /// Pixel column.
    pub x: u32,
    /// Pixel row.
    pub y: u32,
    /// 8-bit sRGB.
    pub rgb: [u8; 3],
    /// CIE XYZ (D65, x100).
    pub xyz: Xyz,
    /// CIE Lab.
    pub lab: Lab,
    /// CIE LCH.
    pub lch: Lch,
    /// OKLCh placeholder.
    pub oklch: Oklch,
}

impl ColorSample {
    /// Samples `(x, y)` of `buffer`. Alpha is ignored.
    pub fn at(buffer: &PixelBuffer, x: u32, y: u32) -> ColorResult<Self> {
        let px = buffer.pixel(x, y).ok_or(ColorError::OutOfBounds {
            x,
            y,
            width: buffer.width(),
            height: buffer.height(),
        })?;
        Ok(Self::from_rgb(x, y, [px[0], px[1], px[2]]))
    }

    /// Derives every representation from an RGB triple.
    pub fn from_rgb(x: u32, y: u32, rgb: [u8; 3]) -> Self {
        let xyz = rgb_to_xyz(rgb);
        let lab = xyz_to_lab(xyz);
        Self {
            x,
            y,
            rgb,
            xyz,
            lab,
            lch: lab_to_lch(lab),
            oklch: lab_to_oklch(lab),
        }
    }

    /// WCAG relative luminance of this sample.
    pub fn luminance(&self) -> f64 {
        luminance(self.rgb)
    }

    /// Contrast against another sample.
    pub fn contrast_with(&self, other: &ColorSample) -> ContrastReport {
        ContrastReport::between(self.rgb, other.rgb)
    }
}
