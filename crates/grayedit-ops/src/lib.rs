//! # grayedit-ops
//!
//! Pixel operations for the grayedit raster editor.
//!
//! Every transform takes a borrowed [`PixelBuffer`](grayedit_core::PixelBuffer)
//! and returns a freshly allocated one; inputs are never mutated, so callers
//! may keep them for history.
//!
//! # Modules
//!
//! - [`resize`] - nearest-neighbour and bilinear resampling
//! - [`filter`] - 2D convolution with edge padding and kernel presets
//! - [`curves`] - histograms and two-point tone curves
//! - [`layers`] - layer model with persistent edits
//! - [`composite`] - blend modes and stack flattening
//! - [`document`] - layer stack with undo/redo and cached composite
//!
//! # Example
//!
//! ```rust
//! use grayedit_core::PixelBuffer;
//! use grayedit_ops::{Document, KernelPreset, Layer};
//!
//! let mut doc = Document::default();
//! doc.load_image(PixelBuffer::filled(8, 8, [40, 40, 40, 255]));
//!
//! let base = doc.stack().base().unwrap().id();
//! let blurred = doc.stack().apply_kernel(base, &KernelPreset::GaussianBlur.kernel()).unwrap();
//! doc.commit(blurred);
//!
//! let (with_fill, _) = doc.stack().push(Layer::fill("tint", [255, 0, 0, 64])).unwrap();
//! doc.commit(with_fill);
//! assert!(doc.composite().is_some());
//! assert!(doc.undo());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod quantize;
pub mod composite;
pub mod curves;
pub mod document;
pub mod filter;
pub mod layers;
pub mod resize;

pub use composite::{composite, BlendMode};
pub use curves::{Histogram, Lut, ToneCurve};
pub use document::Document;
pub use error::{OpsError, OpsResult};
pub use filter::{apply_kernel, Kernel, KernelPreset};
pub use layers::{CurveAdjustment, Direction, Layer, LayerId, LayerStack};
pub use resize::{resize, Filter};
