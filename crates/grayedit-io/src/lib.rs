//! # grayedit-io
//!
//! Image I/O for the grayedit editor.
//!
//! - **GB7** - GrayBit-7, implemented here ([`gb7`])
//! - **PNG** - delegated to the `png` crate
//! - **JPEG** - delegated to `jpeg-decoder` / `jpeg-encoder`
//!
//! Every reader produces an RGBA [`PixelBuffer`]; decoding always runs to
//! completion before a buffer is handed out.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use grayedit_io::{read, write};
//!
//! let loaded = read("scan.gb7")?;
//! println!("{} {}x{} @ {} bits", loaded.format, loaded.buffer.width(),
//!     loaded.buffer.height(), loaded.bit_depth);
//! write("scan.png", &loaded.buffer)?;
//! ```
//!
//! | Format | Read | Write | Depth |
//! |--------|------|-------|-------|
//! | GB7 | Yes | Yes (no mask) | 7 |
//! | PNG | Yes | Yes | 8 |
//! | JPEG | Yes | Yes | 8 |

#![warn(missing_docs)]

pub mod detect;
mod error;
pub mod gb7;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png")]
pub mod png;
mod traits;

pub use detect::Format;
pub use error::{IoError, IoResult};
pub use gb7::{Gb7Error, Gb7Reader, Gb7Writer};
pub use traits::{FormatReader, FormatWriter};

use grayedit_core::PixelBuffer;
use std::path::Path;
use tracing::debug;

/// A decoded image with the facts shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    /// Decoded pixels.
    pub buffer: PixelBuffer,
    /// Source format.
    pub format: Format,
    /// Bits per sample of the source (7 for GB7, 8 otherwise).
    pub bit_depth: u8,
}

/// Reads an image file, detecting the format from content then extension.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<LoadedImage> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    let bytes = std::fs::read(path)?;
    decode_as(format, &bytes).map_err(|e| match e {
        IoError::UnsupportedFormat(_) => IoError::UnsupportedFormat(extension_of(path)),
        other => other,
    })
}

/// Reads an image held in memory. Detection uses magic bytes only.
pub fn read_from_memory(bytes: &[u8]) -> IoResult<LoadedImage> {
    decode_as(Format::from_bytes(bytes), bytes)
}

fn decode_as(format: Format, bytes: &[u8]) -> IoResult<LoadedImage> {
    let buffer = match format {
        Format::Gb7 => gb7::decode(bytes)?,
        #[cfg(feature = "png")]
        Format::Png => png::PngReader.read_from_memory(bytes)?,
        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::JpegReader.read_from_memory(bytes)?,
        #[allow(unreachable_patterns)]
        other => return Err(IoError::UnsupportedFormat(other.to_string())),
    };
    debug!(%format, width = buffer.width(), height = buffer.height(), "decoded");
    Ok(LoadedImage {
        buffer,
        format,
        bit_depth: format.bit_depth(),
    })
}

/// Encodes an image in the given format.
pub fn encode(format: Format, image: &PixelBuffer) -> IoResult<Vec<u8>> {
    match format {
        Format::Gb7 => Ok(gb7::encode(image)?),
        #[cfg(feature = "png")]
        Format::Png => png::PngWriter.write_to_memory(image),
        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::JpegWriter::default().write_to_memory(image),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(other.to_string())),
    }
}

/// Writes an image to a file, choosing the format from the extension.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    let path = path.as_ref();
    match Format::from_extension(path) {
        Format::Unknown => Err(IoError::UnsupportedFormat(extension_of(path))),
        format => save_bytes(path, &encode(format, image)?),
    }
}

/// Saves an already-encoded byte buffer.
pub fn save_bytes<P: AsRef<Path>>(path: P, bytes: &[u8]) -> IoResult<()> {
    let path = path.as_ref();
    std::fs::write(path, bytes)?;
    debug!(path = %path.display(), bytes = bytes.len(), "saved");
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("unknown")
        .to_string()
}
