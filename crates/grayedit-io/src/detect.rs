//! Format detection utilities.
//!
//! Detects image formats from magic bytes and file extensions.

use crate::IoResult;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// GrayBit-7.
    Gb7,
    /// PNG.
    Png,
    /// JPEG.
    Jpeg,
    /// Unknown/unsupported format.
    Unknown,
}

impl Format {
    /// Detects format from a file: magic bytes first, extension second.
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        let mut header = [0u8; 8];
        let mut file = File::open(path)?;
        let n = file.read(&mut header)?;

        match Self::from_bytes(&header[..n]) {
            Format::Unknown => Ok(Self::from_extension(path)),
            format => Ok(format),
        }
    }

    /// Detects format from file extension only.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("gb7") => Format::Gb7,
            Some("png") => Format::Png,
            Some("jpg") | Some("jpeg") => Format::Jpeg,
            _ => Format::Unknown,
        }
    }

    /// Detects format from leading bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.len() >= 4 && bytes[..4] == crate::gb7::MAGIC {
            return Format::Gb7;
        }
        if bytes.len() >= 8 && bytes[..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
            return Format::Png;
        }
        if bytes.len() >= 3 && bytes[..3] == [0xFF, 0xD8, 0xFF] {
            return Format::Jpeg;
        }
        Format::Unknown
    }

    /// MIME type for downloads.
    pub fn mime_type(self) -> &'static str {
        match self {
            Format::Gb7 => "image/x-gb7",
            Format::Png => "image/png",
            Format::Jpeg => "image/jpeg",
            Format::Unknown => "application/octet-stream",
        }
    }

    /// Canonical file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Gb7 => "gb7",
            Format::Png => "png",
            Format::Jpeg => "jpg",
            Format::Unknown => "bin",
        }
    }

    /// Bits per sample reported for images in this format.
    pub fn bit_depth(self) -> u8 {
        match self {
            Format::Gb7 => crate::gb7::BIT_DEPTH,
            _ => 8,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Format::Gb7 => "GB7",
            Format::Png => "PNG",
            Format::Jpeg => "JPEG",
            Format::Unknown => "unknown",
        };
        f.write_str(name)
    }
}
