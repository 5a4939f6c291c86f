//! Image resize and resampling operations.
//!
//! # Filters
//!
//! - [`Filter::Nearest`] - copies the covering source pixel (blocky)
//! - [`Filter::Bilinear`] - blends the four surrounding source pixels
//!
//! Bilinear maps destination corners onto source corners:
//! `fx = x * (srcW - 1) / (dstW - 1)`, or 0 when `dstW` is 1.
//!
//! # Example
//!
//! ```rust
//! use grayedit_core::PixelBuffer;
//! use grayedit_ops::resize::{resize, Filter};
//!
//! let src = PixelBuffer::filled(2, 2, [10, 20, 30, 255]);
//! let dst = resize(&src, 5, 3, Filter::Bilinear).unwrap();
//! assert_eq!(dst.dimensions(), (5, 3));
//! assert_eq!(dst.pixel(4, 2), Some([10, 20, 30, 255]));
//! ```

use crate::quantize::to_u8;
use crate::{OpsError, OpsResult};
use grayedit_core::{PixelBuffer, CHANNELS};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// Resampling filter for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Nearest-neighbor (fastest, no interpolation).
    Nearest,
    /// Bilinear interpolation.
    #[default]
    Bilinear,
}

impl FromStr for Filter {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" | "nn" => Ok(Filter::Nearest),
            "bilinear" | "linear" => Ok(Filter::Bilinear),
            other => Err(OpsError::InvalidParameter(format!("unknown filter: {other}"))),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Filter::Nearest => "nearest",
            Filter::Bilinear => "bilinear",
        })
    }
}

fn check_source(src: &PixelBuffer, dst_w: u32, dst_h: u32) -> OpsResult<()> {
    if src.is_empty() && dst_w > 0 && dst_h > 0 {
        return Err(OpsError::InvalidDimensions(format!(
            "cannot resample empty {}x{} source to {}x{}",
            src.width(),
            src.height(),
            dst_w,
            dst_h
        )));
    }
    Ok(())
}

/// Nearest-neighbour resampling.
///
/// Destination `(x, y)` reads source
/// `(floor(x * srcW / dstW), floor(y * srcH / dstH))`.
pub fn nearest_neighbor(src: &PixelBuffer, dst_w: u32, dst_h: u32) -> OpsResult<PixelBuffer> {
    check_source(src, dst_w, dst_h)?;
    let (src_w, src_h) = src.dimensions();
    trace!(src_w, src_h, dst_w, dst_h, "resize::nearest_neighbor");

    let bytes = src.as_bytes();
    let mut out = PixelBuffer::new(dst_w, dst_h);
    let data = out.as_bytes_mut();
    let row = dst_w as usize * CHANNELS;

    for y in 0..dst_h as u64 {
        let sy = y * src_h as u64 / dst_h as u64;
        for x in 0..dst_w as u64 {
            let sx = x * src_w as u64 / dst_w as u64;
            let s = (sy as usize * src_w as usize + sx as usize) * CHANNELS;
            let d = y as usize * row + x as usize * CHANNELS;
            data[d..d + CHANNELS].copy_from_slice(&bytes[s..s + CHANNELS]);
        }
    }
    Ok(out)
}

/// Maps a destination index to a continuous source coordinate.
#[inline]
fn source_coord(i: u32, src: u32, dst: u32) -> f64 {
    if dst <= 1 {
        0.0
    } else {
        i as f64 * (src as f64 - 1.0) / (dst as f64 - 1.0)
    }
}

/// Bilinear resampling with edge-clamped neighbours.
///
/// Results are stored with clamped-array rounding (half to even).
pub fn bilinear(src: &PixelBuffer, dst_w: u32, dst_h: u32) -> OpsResult<PixelBuffer> {
    check_source(src, dst_w, dst_h)?;
    let (src_w, src_h) = src.dimensions();
    trace!(src_w, src_h, dst_w, dst_h, "resize::bilinear");

    let bytes = src.as_bytes();
    let max_x = src_w.saturating_sub(1) as i64;
    let max_y = src_h.saturating_sub(1) as i64;
    let sample = |x: i64, y: i64, c: usize| -> f64 {
        let x = x.clamp(0, max_x) as usize;
        let y = y.clamp(0, max_y) as usize;
        bytes[(y * src_w as usize + x) * CHANNELS + c] as f64
    };

    let mut out = PixelBuffer::new(dst_w, dst_h);
    let data = out.as_bytes_mut();
    let mut d = 0;

    for y in 0..dst_h {
        let fy = source_coord(y, src_h, dst_h);
        let sy = fy.floor();
        let dy = fy - sy;
        let sy = sy as i64;
        for x in 0..dst_w {
            let fx = source_coord(x, src_w, dst_w);
            let sx = fx.floor();
            let dx = fx - sx;
            let sx = sx as i64;
            for c in 0..CHANNELS {
                let top = sample(sx, sy, c) * (1.0 - dx) + sample(sx + 1, sy, c) * dx;
                let bottom = sample(sx, sy + 1, c) * (1.0 - dx) + sample(sx + 1, sy + 1, c) * dx;
                data[d] = to_u8(top * (1.0 - dy) + bottom * dy);
                d += 1;
            }
        }
    }
    Ok(out)
}

/// Resizes with the chosen filter.
pub fn resize(src: &PixelBuffer, dst_w: u32, dst_h: u32, filter: Filter) -> OpsResult<PixelBuffer> {
    match filter {
        Filter::Nearest => nearest_neighbor(src, dst_w, dst_h),
        Filter::Bilinear => bilinear(src, dst_w, dst_h),
    }
}

/// Target size for a percentage scale with locked aspect ratio.
///
/// Width is `round(w * percent / 100)`; height follows the aspect ratio
/// from the rounded width.
///
/// ```rust
/// use grayedit_ops::resize::scale_dimensions;
///
/// assert_eq!(scale_dimensions(800, 600, 50.0), (400, 300));
/// assert_eq!(scale_dimensions(3, 2, 150.0), (5, 3));
/// ```
pub fn scale_dimensions(width: u32, height: u32, percent: f64) -> (u32, u32) {
    let new_w = (width as f64 * percent / 100.0).round().max(0.0) as u32;
    (new_w, fit_to_width(width, height, new_w).1)
}

/// Height matching `new_width` at the source aspect ratio.
pub fn fit_to_width(width: u32, height: u32, new_width: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (new_width, height);
    }
    let aspect = width as f64 / height as f64;
    (new_width, (new_width as f64 / aspect).round() as u32)
}

/// Width matching `new_height` at the source aspect ratio.
pub fn fit_to_height(width: u32, height: u32, new_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width, new_height);
    }
    let aspect = width as f64 / height as f64;
    ((new_height as f64 * aspect).round() as u32, new_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> PixelBuffer {
        let mut src = PixelBuffer::new(2, 2);
        src.set_pixel(0, 0, [1, 1, 1, 255]);
        src.set_pixel(1, 0, [2, 2, 2, 255]);
        src.set_pixel(0, 1, [3, 3, 3, 255]);
        src.set_pixel(1, 1, [4, 4, 4, 255]);
        src
    }

    #[test]
    fn test_nearest_block_replication() {
        let dst = nearest_neighbor(&two_by_two(), 4, 4).unwrap();
        assert_eq!(dst.dimensions(), (4, 4));
        for y in 0..4 {
            for x in 0..4 {
                let expected = 1 + (x / 2) + 2 * (y / 2);
                assert_eq!(dst.pixel(x, y).unwrap()[0], expected as u8);
            }
        }
    }

    #[test]
    fn test_nearest_exact_size_for_any_target() {
        let src = two_by_two();
        for (w, h) in [(1, 1), (3, 7), (5, 2), (0, 4)] {
            let dst = nearest_neighbor(&src, w, h).unwrap();
            assert_eq!(dst.as_bytes().len(), (w * h * 4) as usize);
        }
    }

    #[test]
    fn test_bilinear_gradient_midpoint() {
        let mut src = PixelBuffer::new(2, 1);
        src.set_pixel(0, 0, [0, 0, 0, 255]);
        src.set_pixel(1, 0, [255, 255, 255, 255]);
        let dst = bilinear(&src, 3, 1).unwrap();
        assert_eq!(dst.pixel(0, 0).unwrap()[0], 0);
        // 127.5 is stored half-to-even
        assert_eq!(dst.pixel(1, 0).unwrap()[0], 128);
        assert_eq!(dst.pixel(2, 0).unwrap()[0], 255);
    }

    #[test]
    fn test_bilinear_single_pixel_source() {
        let src = PixelBuffer::filled(1, 1, [9, 80, 200, 17]);
        let dst = bilinear(&src, 6, 4).unwrap();
        assert!(dst.pixels().all(|p| p == [9, 80, 200, 17]));
    }

    #[test]
    fn test_bilinear_corners_preserved() {
        let src = two_by_two();
        let dst = bilinear(&src, 7, 5).unwrap();
        assert_eq!(dst.pixel(0, 0).unwrap()[0], 1);
        assert_eq!(dst.pixel(6, 0).unwrap()[0], 2);
        assert_eq!(dst.pixel(0, 4).unwrap()[0], 3);
        assert_eq!(dst.pixel(6, 4).unwrap()[0], 4);
    }

    #[test]
    fn test_bilinear_to_one_pixel_reads_origin() {
        let dst = bilinear(&two_by_two(), 1, 1).unwrap();
        assert_eq!(dst.pixel(0, 0).unwrap()[0], 1);
    }

    #[test]
    fn test_empty_source_rejected() {
        let src = PixelBuffer::new(0, 0);
        assert!(resize(&src, 2, 2, Filter::Nearest).is_err());
        assert!(resize(&src, 2, 2, Filter::Bilinear).is_err());
        assert!(resize(&src, 0, 0, Filter::Bilinear).unwrap().is_empty());
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("Nearest".parse::<Filter>().unwrap(), Filter::Nearest);
        assert_eq!("bilinear".parse::<Filter>().unwrap(), Filter::Bilinear);
        assert!("lanczos".parse::<Filter>().is_err());
        assert_eq!(Filter::default(), Filter::Bilinear);
    }

    #[test]
    fn test_fit_dimensions() {
        assert_eq!(fit_to_width(1920, 1080, 960), (960, 540));
        assert_eq!(fit_to_height(1920, 1080, 540), (960, 540));
        assert_eq!(scale_dimensions(0, 0, 50.0), (0, 0));
    }
}
