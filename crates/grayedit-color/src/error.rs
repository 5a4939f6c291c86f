//! Error types for color operations.

use thiserror::Error;

/// Color operation error.
#[derive(Debug, Error)]
pub enum ColorError {
    /// Sample coordinates fall outside the buffer.
    #[error("sample ({x}, {y}) outside image {width}x{height}")]
    OutOfBounds {
        /// Requested X.
        x: u32,
        /// Requested Y.
        y: u32,
        /// Buffer width.
        width: u32,
        /// Buffer height.
        height: u32,
    },
}

/// Result type for color operations.
pub type ColorResult<T> = Result<T, ColorError>;
