//! RGBA8 pixel buffer.
//!
//! [`PixelBuffer`] is the single currency passed between the codec, the
//! colour engine and every pixel operation. Samples are stored row-major,
//! top-to-bottom, four interleaved 8-bit channels per pixel:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A ...]  <- Row 1
//! ```
//!
//! # Usage
//!
//! ```rust
//! use grayedit_core::PixelBuffer;
//!
//! let mut buf = PixelBuffer::new(4, 4);
//! buf.set_pixel(1, 2, [255, 0, 0, 255]);
//! assert_eq!(buf.pixel(1, 2), Some([255, 0, 0, 255]));
//! assert_eq!(buf.pixel(0, 0), Some([0, 0, 0, 0]));
//! ```

use crate::{CoreError, CoreResult};

/// Number of interleaved channels per pixel.
pub const CHANNELS: usize = 4;

/// Owned RGBA8 image buffer.
///
/// Invariant: `data.len() == width * height * 4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Creates a fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; byte_len(width, height)],
        }
    }

    /// Creates a buffer with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let area = width as usize * height as usize;
        let mut data = Vec::with_capacity(area * CHANNELS);
        for _ in 0..area {
            data.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wraps existing RGBA samples.
    ///
    /// Fails with [`CoreError::LengthMismatch`] when `data` is not exactly
    /// `width * height * 4` bytes long.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> CoreResult<Self> {
        let expected = byte_len(width, height);
        if data.len() != expected {
            return Err(CoreError::LengthMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Buffer width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` pair.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True when the buffer has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw interleaved samples.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw samples.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer, returning its samples.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Returns the pixel at `(x, y)`, failing with [`CoreError::OutOfBounds`].
    pub fn try_pixel(&self, x: u32, y: u32) -> CoreResult<[u8; 4]> {
        self.pixel(x, y)
            .ok_or_else(|| CoreError::out_of_bounds(x, y, self.width, self.height))
    }

    /// Writes a pixel. Out-of-range coordinates are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.offset(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&rgba);
    }

    /// Iterates pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }
}

#[inline]
fn byte_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * CHANNELS
}

/// Builds a grayscale visualisation of a buffer's alpha channel.
///
/// Each output pixel is `(a, a, a, 255)`. Used as a layer's alpha preview.
pub fn extract_alpha(src: &PixelBuffer) -> PixelBuffer {
    let mut data = Vec::with_capacity(src.as_bytes().len());
    for px in src.pixels() {
        data.extend_from_slice(&[px[3], px[3], px[3], 255]);
    }
    PixelBuffer {
        width: src.width,
        height: src.height,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transparent() {
        let buf = PixelBuffer::new(3, 2);
        assert_eq!(buf.as_bytes().len(), 24);
        assert!(buf.as_bytes().iter().all(|&v| v == 0));
        assert!(!buf.is_empty());
    }

    #[test]
    fn test_from_raw_length_check() {
        assert!(PixelBuffer::from_raw(2, 2, vec![0; 16]).is_ok());
        let err = PixelBuffer::from_raw(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::LengthMismatch {
                expected: 16,
                actual: 15,
                ..
            }
        ));
    }

    #[test]
    fn test_pixel_bounds() {
        let mut buf = PixelBuffer::filled(2, 2, [1, 2, 3, 4]);
        assert_eq!(buf.pixel(1, 1), Some([1, 2, 3, 4]));
        assert_eq!(buf.pixel(2, 0), None);
        assert!(buf.try_pixel(0, 5).unwrap_err().is_bounds_error());

        buf.set_pixel(5, 5, [9, 9, 9, 9]);
        assert!(buf.pixels().all(|p| p == [1, 2, 3, 4]));
    }

    #[test]
    fn test_zero_area() {
        assert!(PixelBuffer::new(0, 10).is_empty());
        assert!(PixelBuffer::new(10, 0).as_bytes().is_empty());
    }

    #[test]
    fn test_extract_alpha() {
        let mut src = PixelBuffer::filled(2, 1, [10, 20, 30, 200]);
        src.set_pixel(1, 0, [0, 0, 0, 0]);
        let alpha = extract_alpha(&src);
        assert_eq!(alpha.pixel(0, 0), Some([200, 200, 200, 255]));
        assert_eq!(alpha.pixel(1, 0), Some([0, 0, 0, 255]));
    }
}
