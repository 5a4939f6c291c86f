//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// No layer carries the given identifier.
    #[error("no layer with id {0}")]
    LayerNotFound(u64),

    /// The base layer cannot be removed or displaced.
    #[error("base layer cannot be {0}")]
    BaseLayerProtected(&'static str),

    /// Adding a layer would exceed the configured maximum.
    #[error("layer limit reached ({0})")]
    LayerLimit(usize),

    /// Operation needs pixel content the layer does not have.
    #[error("layer {0} has no image")]
    NoImage(u64),
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;
