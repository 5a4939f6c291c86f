//! # grayedit-core
//!
//! Foundation types for the grayedit raster editor.
//!
//! - [`PixelBuffer`] - RGBA8 image buffer passed between every stage
//! - [`Channel`] - channel selector for histograms and tone curves
//! - [`Limits`] - size and layer-count limits consulted by callers
//! - [`parse_hex_color`], [`luminance_rec709`] - per-pixel helpers
//!
//! ## Crate Structure
//!
//! ```text
//! grayedit-core (this crate)
//!    ^
//!    +-- grayedit-color (colour conversion, contrast)
//!    +-- grayedit-io (GB7 codec, PNG/JPEG)
//!    +-- grayedit-ops (resample, filter, curves, layers)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod channel;
pub mod error;
pub mod limits;
pub mod pixel;

pub use buffer::{extract_alpha, PixelBuffer, CHANNELS};
pub use channel::Channel;
pub use error::{CoreError, CoreResult};
pub use limits::{Limits, DEFAULT_MAX_DIMENSION, DEFAULT_MAX_LAYERS};
pub use pixel::{
    luminance_rec709, parse_hex_color, REC709_LUMA_B, REC709_LUMA_G, REC709_LUMA_R,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::buffer::PixelBuffer;
    pub use crate::channel::Channel;
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::limits::Limits;
}
