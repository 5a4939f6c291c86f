//! JPEG format support, delegated to `jpeg-decoder` and `jpeg-encoder`.
//!
//! Decoded images are opaque RGBA. The writer drops alpha.

use crate::{FormatReader, FormatWriter, IoError, IoResult};
use grayedit_core::PixelBuffer;
use std::io::Cursor;
use tracing::trace;

/// Default encoder quality.
pub const DEFAULT_QUALITY: u8 = 90;

/// JPEG writer options.
#[derive(Debug, Clone, Copy)]
pub struct JpegWriterOptions {
    /// Quality, 1-100.
    pub quality: u8,
}

impl Default for JpegWriterOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
        }
    }
}

/// JPEG format reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegReader;

impl FormatReader for JpegReader {
    fn format_name(&self) -> &'static str {
        "JPEG"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["jpg", "jpeg"]
    }

    fn can_read(&self, header: &[u8]) -> bool {
        header.len() >= 3 && header[..3] == [0xFF, 0xD8, 0xFF]
    }

    fn read_from_memory(&self, data: &[u8]) -> IoResult<PixelBuffer> {
        let mut decoder = jpeg_decoder::Decoder::new(Cursor::new(data));
        let pixels = decoder
            .decode()
            .map_err(|e| IoError::DecodeError(e.to_string()))?;
        let info = decoder
            .info()
            .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;
        trace!(width = info.width, height = info.height, format = ?info.pixel_format, "jpeg::read");

        let rgba: Vec<u8> = match info.pixel_format {
            jpeg_decoder::PixelFormat::RGB24 => pixels
                .chunks_exact(3)
                .flat_map(|p| [p[0], p[1], p[2], 255])
                .collect(),
            jpeg_decoder::PixelFormat::L8 => pixels.iter().flat_map(|&g| [g, g, g, 255]).collect(),
            // High byte of big-endian 16-bit luma.
            jpeg_decoder::PixelFormat::L16 => pixels
                .chunks_exact(2)
                .flat_map(|l| [l[0], l[0], l[0], 255])
                .collect(),
            jpeg_decoder::PixelFormat::CMYK32 => pixels
                .chunks_exact(4)
                .flat_map(|cmyk| {
                    let k = 1.0 - cmyk[3] as f32 / 255.0;
                    let ch = |v: u8| ((1.0 - v as f32 / 255.0) * k * 255.0) as u8;
                    [ch(cmyk[0]), ch(cmyk[1]), ch(cmyk[2]), 255]
                })
                .collect(),
        };

        Ok(PixelBuffer::from_raw(info.width as u32, info.height as u32, rgba)?)
    }

    fn with_options(_options: ()) -> Self {
        Self
    }
}

/// JPEG format writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegWriter {
    options: JpegWriterOptions,
}

impl JpegWriter {
    /// Writer with the given quality.
    pub fn with_quality(quality: u8) -> Self {
        Self::with_options(JpegWriterOptions { quality })
    }
}

impl FormatWriter<JpegWriterOptions> for JpegWriter {
    fn format_name(&self) -> &'static str {
        "JPEG"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["jpg", "jpeg"]
    }

    fn write_to_memory(&self, image: &PixelBuffer) -> IoResult<Vec<u8>> {
        use jpeg_encoder::{ColorType, Encoder};

        let (Ok(width), Ok(height)) = (u16::try_from(image.width()), u16::try_from(image.height()))
        else {
            return Err(IoError::EncodeError(format!(
                "{}x{} exceeds JPEG limits",
                image.width(),
                image.height()
            )));
        };
        let rgb: Vec<u8> = image
            .pixels()
            .flat_map(|p| [p[0], p[1], p[2]])
            .collect();

        let mut buffer = Vec::new();
        let encoder = Encoder::new(&mut buffer, self.options.quality.clamp(1, 100));
        encoder
            .encode(&rgb, width, height, ColorType::Rgb)
            .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;
        Ok(buffer)
    }

    fn with_options(options: JpegWriterOptions) -> Self {
        Self { options }
    }
}

/// Reads a JPEG file.
pub fn read<P: AsRef<std::path::Path>>(path: P) -> IoResult<PixelBuffer> {
    JpegReader.read(path)
}

/// Writes a JPEG file at [`DEFAULT_QUALITY`].
pub fn write<P: AsRef<std::path::Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    JpegWriter::default().write(path, image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_flat_color() {
        let image = PixelBuffer::filled(16, 16, [200, 100, 50, 128]);
        let bytes = JpegWriter::with_quality(95).write_to_memory(&image).unwrap();
        assert!(JpegReader.can_read(&bytes));

        let loaded = JpegReader.read_from_memory(&bytes).unwrap();
        assert_eq!(loaded.dimensions(), (16, 16));
        let px = loaded.pixel(8, 8).unwrap();
        assert!((px[0] as i32 - 200).abs() <= 4);
        assert!((px[1] as i32 - 100).abs() <= 4);
        assert!((px[2] as i32 - 50).abs() <= 4);
        assert_eq!(px[3], 255);
    }
}
