//! # grayedit-color
//!
//! Colour conversion for eyedropper samples and contrast checks.
//!
//! - [`space`] - sRGB -> XYZ -> Lab -> LCH, plus the OKLCh placeholder
//! - [`contrast`] - WCAG relative luminance and contrast ratio
//! - [`ColorSample`] - every representation of one sampled pixel
//!
//! All functions are pure and operate on 8-bit sRGB input.
//!
//! ```rust
//! use grayedit_color::{contrast_ratio, is_accessible};
//!
//! let ratio = contrast_ratio([255, 255, 255], [0, 0, 0]);
//! assert!(is_accessible(ratio));
//! ```

#![warn(missing_docs)]

pub mod contrast;
mod error;
pub mod sample;
pub mod space;

pub use contrast::{contrast_ratio, is_accessible, luminance, ContrastReport, WCAG_AA_NORMAL};
pub use error::{ColorError, ColorResult};
pub use sample::ColorSample;
pub use space::{lab_to_lch, lab_to_oklch, rgb_to_xyz, srgb_eotf, xyz_to_lab, Lab, Lch, Oklch, Xyz};
