//! PNG format support, delegated to the `png` crate.
//!
//! Every decoded image is normalized to 8-bit RGBA: palettes and low bit
//! depths are expanded, 16-bit samples are stripped to their high byte and
//! opaque formats gain an alpha of 255.

use crate::{FormatReader, FormatWriter, IoError, IoResult};
use grayedit_core::PixelBuffer;
use std::io::Cursor;
use tracing::trace;

const SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// PNG format reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngReader;

impl FormatReader for PngReader {
    fn format_name(&self) -> &'static str {
        "PNG"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["png"]
    }

    fn can_read(&self, header: &[u8]) -> bool {
        header.len() >= SIGNATURE.len() && header[..SIGNATURE.len()] == SIGNATURE
    }

    fn read_from_memory(&self, data: &[u8]) -> IoResult<PixelBuffer> {
        let mut decoder = png::Decoder::new(Cursor::new(data));
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
        let mut reader = decoder
            .read_info()
            .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

        let buf_size = reader
            .output_buffer_size()
            .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
        let mut buf = vec![0u8; buf_size];
        let info = reader
            .next_frame(&mut buf)
            .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
        let samples = &buf[..info.buffer_size()];
        trace!(width = info.width, height = info.height, color = ?info.color_type, "png::read");

        let rgba: Vec<u8> = match (info.color_type, info.bit_depth) {
            (png::ColorType::Rgba, png::BitDepth::Eight) => samples.to_vec(),
            (png::ColorType::Rgb, png::BitDepth::Eight) => samples
                .chunks_exact(3)
                .flat_map(|p| [p[0], p[1], p[2], 255])
                .collect(),
            (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => samples
                .chunks_exact(2)
                .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
                .collect(),
            (png::ColorType::Grayscale, png::BitDepth::Eight) => {
                samples.iter().flat_map(|&g| [g, g, g, 255]).collect()
            }
            (color_type, bit_depth) => {
                return Err(IoError::UnsupportedBitDepth(format!(
                    "{:?} {:?}",
                    color_type, bit_depth
                )));
            }
        };

        Ok(PixelBuffer::from_raw(info.width, info.height, rgba)?)
    }

    fn with_options(_options: ()) -> Self {
        Self
    }
}

/// PNG format writer. Always writes 8-bit RGBA.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngWriter;

impl FormatWriter for PngWriter {
    fn format_name(&self) -> &'static str {
        "PNG"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["png"]
    }

    fn write_to_memory(&self, image: &PixelBuffer) -> IoResult<Vec<u8>> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, image.width(), image.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

            let mut writer = encoder
                .write_header()
                .map_err(|e| IoError::EncodeError(e.to_string()))?;
            writer
                .write_image_data(image.as_bytes())
                .map_err(|e| IoError::EncodeError(e.to_string()))?;
            writer
                .finish()
                .map_err(|e| IoError::EncodeError(e.to_string()))?;
        }
        Ok(out)
    }

    fn with_options(_options: ()) -> Self {
        Self
    }
}

/// Reads a PNG file.
pub fn read<P: AsRef<std::path::Path>>(path: P) -> IoResult<PixelBuffer> {
    PngReader.read(path)
}

/// Writes a PNG file.
pub fn write<P: AsRef<std::path::Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    PngWriter.write(path, image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_rgba_memory() {
        let mut image = PixelBuffer::new(8, 4);
        for y in 0..4 {
            for x in 0..8 {
                image.set_pixel(x, y, [(x * 30) as u8, (y * 60) as u8, 7, (x * y * 10) as u8]);
            }
        }
        let bytes = PngWriter.write_to_memory(&image).unwrap();
        assert!(PngReader.can_read(&bytes));

        let loaded = PngReader.read_from_memory(&bytes).unwrap();
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_rejects_garbage() {
        let err = PngReader.read_from_memory(&[0x89, b'P', b'N', b'G', 0, 0]).unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));
    }
}
