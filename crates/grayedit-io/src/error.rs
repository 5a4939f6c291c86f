//! Error types for I/O operations.

use crate::gb7::Gb7Error;
use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// GrayBit-7 format error.
    #[error("GB7: {0}")]
    Gb7(#[from] Gb7Error),

    /// Unsupported format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoding error from a delegated codec.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error from a delegated codec.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Unsupported bit depth or colour type.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(String),

    /// Core type error.
    #[error(transparent)]
    Core(#[from] grayedit_core::CoreError),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
