//! Resource limits enforced by callers of the pixel core.
//!
//! The transforms themselves accept any size; the CLI and document layer
//! consult [`Limits`] before loading or resizing.

use crate::{CoreError, CoreResult};
use serde::Deserialize;

/// Default maximum side length in pixels.
pub const DEFAULT_MAX_DIMENSION: u32 = 4096;
/// Default maximum number of layers, base included.
pub const DEFAULT_MAX_LAYERS: usize = 6;

/// Size and count limits.
///
/// Deserializes from a config section; missing fields take their defaults.
///
/// ```rust
/// use grayedit_core::Limits;
///
/// let limits = Limits::default();
/// assert!(limits.check_dimensions(4096, 4096).is_ok());
/// assert!(limits.check_dimensions(4097, 1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Largest accepted width or height.
    pub max_dimension: u32,
    /// Largest accepted layer count.
    pub max_layers: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            max_layers: DEFAULT_MAX_LAYERS,
        }
    }
}

impl Limits {
    /// Rejects dimensions with either side above `max_dimension`.
    pub fn check_dimensions(&self, width: u32, height: u32) -> CoreResult<()> {
        if width > self.max_dimension || height > self.max_dimension {
            return Err(CoreError::DimensionsTooLarge {
                width,
                height,
                max: self.max_dimension,
            });
        }
        Ok(())
    }
}
