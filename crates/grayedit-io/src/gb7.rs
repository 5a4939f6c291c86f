//! GrayBit-7 (GB7) format support.
//!
//! A 12-byte big-endian header followed by one byte per pixel: seven bits
//! of gray and, when the header flag is set, a one-bit mask in bit 7.
//!
//! # Layout
//!
//! | Offset | Size | Field | Value |
//! |--------|------|-------|-------|
//! | 0 | 4 | Magic | `47 42 37 1D` |
//! | 4 | 1 | Version | 1 |
//! | 5 | 1 | Flags | bit 0 = has mask |
//! | 6 | 2 | Width | u16 |
//! | 8 | 2 | Height | u16 |
//! | 10 | 2 | Reserved | 0 |
//! | 12 | W*H | Pixels | bit 7 mask, bits 0-6 gray |
//!
//! # Quick Start
//!
//! ```rust
//! use grayedit_core::PixelBuffer;
//! use grayedit_io::gb7;
//!
//! let red = PixelBuffer::filled(1, 1, [255, 0, 0, 255]);
//! let bytes = gb7::encode(&red).unwrap();
//! assert_eq!(bytes[12], 27);
//!
//! let gray = gb7::decode(&bytes).unwrap();
//! assert_eq!(gray.pixel(0, 0), Some([54, 54, 54, 255]));
//! ```
//!
//! The encoder never emits a mask: transparency does not survive a round
//! trip through GB7.

use crate::{FormatReader, FormatWriter, IoResult};
use byteorder::{BigEndian, ByteOrder};
use grayedit_core::{luminance_rec709, PixelBuffer};
use thiserror::Error;
use tracing::{debug, trace};

// === Constants ===

/// File signature.
pub const MAGIC: [u8; 4] = [0x47, 0x42, 0x37, 0x1D];
/// Version written by the encoder.
pub const VERSION: u8 = 1;
/// Header length in bytes.
pub const HEADER_SIZE: usize = 12;
/// Bits of gray per pixel.
pub const BIT_DEPTH: u8 = 7;

const FLAG_HAS_MASK: u8 = 0x01;
const GRAY_MASK: u8 = 0x7F;
const GRAY_MAX: f64 = 127.0;

// === Errors ===

/// GB7 format error. No partial buffer accompanies any of these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Gb7Error {
    /// Fewer bytes than the fixed header needs.
    #[error("header too short: {0} bytes")]
    HeaderTooShort(usize),

    /// Signature mismatch.
    #[error("bad magic {0:02X?}")]
    BadMagic([u8; 4]),

    /// Bytes 10-11 are not zero.
    #[error("reserved field is {0:#06X}, expected 0")]
    ReservedNotZero(u16),

    /// Pixel payload shorter than `width * height`.
    #[error("truncated pixel data: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Bytes required by the header dimensions.
        expected: usize,
        /// Bytes present after the header.
        actual: usize,
    },

    /// Buffer side does not fit the 16-bit header field.
    #[error("image {width}x{height} does not fit 16-bit GB7 dimensions")]
    TooLarge {
        /// Buffer width.
        width: u32,
        /// Buffer height.
        height: u32,
    },
}

// === Header ===

/// Parsed GB7 header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gb7Header {
    /// Format version byte, not validated.
    pub version: u8,
    /// Whether bit 7 of each pixel is a mask bit.
    pub has_mask: bool,
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
}

impl Gb7Header {
    /// Validates and parses the first 12 bytes.
    ///
    /// Checks the magic first, then the reserved field.
    pub fn parse(bytes: &[u8]) -> Result<Self, Gb7Error> {
        if bytes.len() < MAGIC.len() {
            return Err(Gb7Error::HeaderTooShort(bytes.len()));
        }
        let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
        if magic != MAGIC {
            return Err(Gb7Error::BadMagic(magic));
        }
        if bytes.len() < HEADER_SIZE {
            return Err(Gb7Error::HeaderTooShort(bytes.len()));
        }
        let reserved = BigEndian::read_u16(&bytes[10..12]);
        if reserved != 0 {
            return Err(Gb7Error::ReservedNotZero(reserved));
        }
        Ok(Self {
            version: bytes[4],
            has_mask: bytes[5] & FLAG_HAS_MASK != 0,
            width: BigEndian::read_u16(&bytes[6..8]),
            height: BigEndian::read_u16(&bytes[8..10]),
        })
    }

    /// Pixel count declared by the header.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Serialises the header. The reserved field is written as zero.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[..4].copy_from_slice(&MAGIC);
        bytes[4] = self.version;
        bytes[5] = if self.has_mask { FLAG_HAS_MASK } else { 0 };
        BigEndian::write_u16(&mut bytes[6..8], self.width);
        BigEndian::write_u16(&mut bytes[8..10], self.height);
        bytes
    }
}

// === Codec ===

/// Expands a 7-bit gray value to 8 bits.
#[inline]
fn expand_gray(gray7: u8) -> u8 {
    (gray7 as f64 / GRAY_MAX * 255.0).round() as u8
}

/// Reduces an RGB triple to a 7-bit gray value.
#[inline]
fn quantize_gray(r: u8, g: u8, b: u8) -> u8 {
    let luma = luminance_rec709(r, g, b);
    (luma / 255.0 * GRAY_MAX).round().clamp(0.0, GRAY_MAX) as u8
}

/// Decodes a GB7 byte stream into an RGBA buffer.
///
/// Bytes past `width * height` are ignored.
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer, Gb7Error> {
    let header = Gb7Header::parse(bytes)?;
    let count = header.pixel_count();
    let payload = &bytes[HEADER_SIZE..];
    trace!(
        width = header.width,
        height = header.height,
        has_mask = header.has_mask,
        "gb7::decode"
    );
    if payload.len() < count {
        return Err(Gb7Error::Truncated {
            expected: count,
            actual: payload.len(),
        });
    }

    let mut data = Vec::with_capacity(count * 4);
    for &byte in &payload[..count] {
        let gray = expand_gray(byte & GRAY_MASK);
        let visible = !header.has_mask || (byte >> 7) & 1 == 1;
        data.extend_from_slice(&[gray, gray, gray, if visible { 255 } else { 0 }]);
    }

    PixelBuffer::from_raw(header.width as u32, header.height as u32, data).map_err(|_| {
        Gb7Error::Truncated {
            expected: count,
            actual: payload.len(),
        }
    })
}

/// Encodes a buffer as GB7 with no mask. Alpha is discarded.
pub fn encode(image: &PixelBuffer) -> Result<Vec<u8>, Gb7Error> {
    let (width, height) = image.dimensions();
    let (Ok(w16), Ok(h16)) = (u16::try_from(width), u16::try_from(height)) else {
        return Err(Gb7Error::TooLarge { width, height });
    };
    trace!(width, height, "gb7::encode");

    let header = Gb7Header {
        version: VERSION,
        has_mask: false,
        width: w16,
        height: h16,
    };
    let mut out = Vec::with_capacity(HEADER_SIZE + header.pixel_count());
    out.extend_from_slice(&header.to_bytes());
    out.extend(image.pixels().map(|p| quantize_gray(p[0], p[1], p[2])));
    debug!(bytes = out.len(), "GB7 encoded");
    Ok(out)
}

// === Gb7Reader / Gb7Writer ===

/// GB7 format reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gb7Reader;

impl FormatReader for Gb7Reader {
    fn format_name(&self) -> &'static str {
        "GB7"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["gb7"]
    }

    fn can_read(&self, header: &[u8]) -> bool {
        header.len() >= MAGIC.len() && header[..MAGIC.len()] == MAGIC
    }

    fn read_from_memory(&self, data: &[u8]) -> IoResult<PixelBuffer> {
        Ok(decode(data)?)
    }

    fn with_options(_options: ()) -> Self {
        Self
    }
}

/// GB7 format writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gb7Writer;

impl FormatWriter for Gb7Writer {
    fn format_name(&self) -> &'static str {
        "GB7"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["gb7"]
    }

    fn write_to_memory(&self, image: &PixelBuffer) -> IoResult<Vec<u8>> {
        Ok(encode(image)?)
    }

    fn with_options(_options: ()) -> Self {
        Self
    }
}

/// Reads a GB7 file.
pub fn read<P: AsRef<std::path::Path>>(path: P) -> IoResult<PixelBuffer> {
    Gb7Reader.read(path)
}

/// Writes a GB7 file.
pub fn write<P: AsRef<std::path::Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    Gb7Writer.write(path, image)
}
