//! CLI command implementations

pub mod composite;
pub mod convert;
pub mod curves;
pub mod filter;
pub mod info;
pub mod pick;
pub mod resize;

use anyhow::{Context, Result};
use grayedit_core::{Limits, PixelBuffer};
use grayedit_io::{Format, FormatWriter, LoadedImage};
use std::path::Path;

/// Load image from path, enforcing the size limit.
pub fn load_image(path: &Path, limits: &Limits) -> Result<LoadedImage> {
    let loaded = grayedit_io::read(path)
        .with_context(|| format!("Failed to load: {}", path.display()))?;
    let (w, h) = loaded.buffer.dimensions();
    limits
        .check_dimensions(w, h)
        .with_context(|| format!("Rejected: {}", path.display()))?;
    Ok(loaded)
}

/// Save image to path. `quality` applies to JPEG output only.
pub fn save_image(path: &Path, image: &PixelBuffer, quality: Option<u8>) -> Result<()> {
    let result = match (Format::from_extension(path), quality) {
        (Format::Jpeg, Some(q)) => grayedit_io::jpeg::JpegWriter::with_quality(q).write(path, image),
        _ => grayedit_io::write(path, image),
    };
    result.with_context(|| format!("Failed to save: {}", path.display()))
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(12), "12 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn test_load_enforces_limits() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wide.gb7");
        save_image(&path, &PixelBuffer::filled(40, 2, [9, 9, 9, 255]), None).unwrap();

        let tight = Limits {
            max_dimension: 32,
            ..Limits::default()
        };
        assert!(load_image(&path, &tight).is_err());
        let loaded = load_image(&path, &Limits::default()).unwrap();
        assert_eq!(loaded.buffer.dimensions(), (40, 2));
    }
}
