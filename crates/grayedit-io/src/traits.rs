//! Format reader and writer traits.
//!
//! Every codec exposes a reader and a writer carrying their own options.

use crate::IoResult;
use grayedit_core::PixelBuffer;
use std::path::Path;

/// Reads one image format into an RGBA [`PixelBuffer`].
pub trait FormatReader<O: Default = ()>: Sized {
    /// Human-readable format name.
    fn format_name(&self) -> &'static str;

    /// Lowercase file extensions handled by this reader.
    fn extensions(&self) -> &'static [&'static str];

    /// True when `header` carries this format's signature.
    fn can_read(&self, header: &[u8]) -> bool;

    /// Reads an image from a file path.
    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<PixelBuffer> {
        let bytes = std::fs::read(path.as_ref())?;
        self.read_from_memory(&bytes)
    }

    /// Reads an image from memory.
    fn read_from_memory(&self, data: &[u8]) -> IoResult<PixelBuffer>;

    /// Builds a reader with explicit options.
    fn with_options(options: O) -> Self;
}

/// Writes an RGBA [`PixelBuffer`] in one image format.
pub trait FormatWriter<O: Default = ()>: Sized {
    /// Human-readable format name.
    fn format_name(&self) -> &'static str;

    /// Lowercase file extensions handled by this writer.
    fn extensions(&self) -> &'static [&'static str];

    /// Writes an image to a file path.
    fn write<P: AsRef<Path>>(&self, path: P, image: &PixelBuffer) -> IoResult<()> {
        let bytes = self.write_to_memory(image)?;
        crate::save_bytes(path, &bytes)
    }

    /// Encodes an image to memory.
    fn write_to_memory(&self, image: &PixelBuffer) -> IoResult<Vec<u8>>;

    /// Builds a writer with explicit options.
    fn with_options(options: O) -> Self;
}
