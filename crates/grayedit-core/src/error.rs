//! Error types for grayedit-core operations.
//!
//! # Usage
//!
//! ```rust
//! use grayedit_core::{CoreError, CoreResult};
//!
//! fn check(x: u32, y: u32, width: u32, height: u32) -> CoreResult<()> {
//!     if x >= width || y >= height {
//!         return Err(CoreError::out_of_bounds(x, y, width, height));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Result type alias using [`CoreError`].
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Errors raised by the foundation types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Pixel coordinates are outside the buffer.
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Buffer width
        width: u32,
        /// Buffer height
        height: u32,
    },

    /// Raw sample data does not match `width * height * 4`.
    #[error("buffer length {actual} does not match {width}x{height} RGBA ({expected} bytes)")]
    LengthMismatch {
        /// Buffer width
        width: u32,
        /// Buffer height
        height: u32,
        /// Required byte count
        expected: usize,
        /// Supplied byte count
        actual: usize,
    },

    /// Dimensions exceed the configured maximum.
    #[error("image {width}x{height} exceeds maximum dimension {max}")]
    DimensionsTooLarge {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Configured limit
        max: u32,
    },

    /// A channel name could not be parsed.
    #[error("unknown channel: {0}")]
    UnknownChannel(String),

    /// A color literal could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),
}

impl CoreError {
    /// Creates a [`CoreError::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds() {
        let err = CoreError::out_of_bounds(100, 50, 80, 60);
        let msg = err.to_string();
        assert!(msg.contains("100"));
        assert!(msg.contains("80x60"));
        assert!(err.is_bounds_error());
    }

    #[test]
    fn test_length_mismatch_message() {
        let err = CoreError::LengthMismatch {
            width: 2,
            height: 2,
            expected: 16,
            actual: 12,
        };
        assert!(err.to_string().contains("16 bytes"));
        assert!(!err.is_bounds_error());
    }
}
