//! Layer compositing and blend modes.
//!
//! Layers are drawn bottom to top onto a transparent canvas. Each draw first
//! mixes the layer colour with the backdrop through the blend function, then
//! composites the result source-over, with the layer opacity acting as a
//! global alpha multiplier.
//!
//! # Blend Modes
//!
//! - [`BlendMode::Normal`] - source-over
//! - [`BlendMode::Multiply`] - `Cb * Cs`
//! - [`BlendMode::Screen`] - `Cb + Cs - Cb * Cs`
//! - [`BlendMode::Overlay`] - multiply below mid-grey backdrop, screen above
//!
//! # Example
//!
//! ```rust
//! use grayedit_ops::composite::{blend_pixel, BlendMode};
//!
//! let backdrop = [0, 0, 0, 255];
//! let red = [255, 0, 0, 255];
//! assert_eq!(blend_pixel(backdrop, red, 0.5, BlendMode::Normal), [128, 0, 0, 255]);
//! ```

use crate::layers::{Layer, LayerStack};
use crate::quantize::to_u8;
use crate::resize::bilinear;
use crate::OpsError;
use grayedit_core::{PixelBuffer, CHANNELS};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Canvas size used when the bottom layer has no image.
pub const FALLBACK_SIZE: (u32, u32) = (800, 600);

/// Opacity factor applied to alpha previews.
pub const ALPHA_PREVIEW_OPACITY: f64 = 0.5;

/// Blend mode for compositing a layer onto the layers beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// Source-over.
    #[default]
    Normal,
    /// Darken by multiplication.
    Multiply,
    /// Lighten (inverse multiply).
    Screen,
    /// Contrast, keyed on the backdrop.
    Overlay,
}

impl BlendMode {
    /// All modes, in menu order.
    pub const ALL: [BlendMode; 4] = [
        BlendMode::Normal,
        BlendMode::Multiply,
        BlendMode::Screen,
        BlendMode::Overlay,
    ];

    /// Lower-case name.
    pub fn name(self) -> &'static str {
        match self {
            BlendMode::Normal => "normal",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
            BlendMode::Overlay => "overlay",
        }
    }

    /// Blend function on normalised samples: backdrop `cb`, source `cs`.
    #[inline]
    pub fn blend(self, cb: f64, cs: f64) -> f64 {
        match self {
            BlendMode::Normal => cs,
            BlendMode::Multiply => cb * cs,
            BlendMode::Screen => cb + cs - cb * cs,
            BlendMode::Overlay => {
                if cb <= 0.5 {
                    2.0 * cs * cb
                } else {
                    1.0 - 2.0 * (1.0 - cb) * (1.0 - cs)
                }
            }
        }
    }
}

impl FromStr for BlendMode {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlendMode::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| OpsError::InvalidParameter(format!("unknown blend mode: {s}")))
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Draws `src` onto `dst` with the given global opacity and blend mode.
///
/// Where both inputs are fully transparent the source colour is kept with
/// zero alpha.
#[inline]
pub fn blend_pixel(dst: [u8; 4], src: [u8; 4], opacity: f64, mode: BlendMode) -> [u8; 4] {
    let ab = dst[3] as f64 / 255.0;
    let as_ = src[3] as f64 / 255.0 * opacity;
    let ao = as_ + ab * (1.0 - as_);
    if ao <= 0.0 {
        return [src[0], src[1], src[2], 0];
    }

    let mut out = [0u8; 4];
    for c in 0..3 {
        let cb = dst[c] as f64 / 255.0;
        let cs = src[c] as f64 / 255.0;
        let mixed = (1.0 - ab) * cs + ab * mode.blend(cb, cs);
        let co = as_ * mixed + ab * cb * (1.0 - as_);
        out[c] = to_u8(co / ao * 255.0);
    }
    out[3] = to_u8(ao * 255.0);
    out
}

/// Draws a whole buffer of the canvas size.
fn draw_buffer(canvas: &mut PixelBuffer, src: &PixelBuffer, opacity: f64, mode: BlendMode) {
    for (d, s) in canvas
        .as_bytes_mut()
        .chunks_exact_mut(CHANNELS)
        .zip(src.as_bytes().chunks_exact(CHANNELS))
    {
        let out = blend_pixel([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity, mode);
        d.copy_from_slice(&out);
    }
}

fn draw_fill(canvas: &mut PixelBuffer, rgba: [u8; 4], opacity: f64, mode: BlendMode) {
    for d in canvas.as_bytes_mut().chunks_exact_mut(CHANNELS) {
        let out = blend_pixel([d[0], d[1], d[2], d[3]], rgba, opacity, mode);
        d.copy_from_slice(&out);
    }
}

/// Returns `buffer` at the canvas size, stretching it when it differs.
fn fit_to_canvas(buffer: &PixelBuffer, width: u32, height: u32) -> Option<Cow<'_, PixelBuffer>> {
    if buffer.dimensions() == (width, height) {
        return Some(Cow::Borrowed(buffer));
    }
    debug!(
        from_w = buffer.width(),
        from_h = buffer.height(),
        width,
        height,
        "stretching layer to canvas"
    );
    bilinear(buffer, width, height).ok().map(Cow::Owned)
}

/// Canvas size: the bottom layer's image, else [`FALLBACK_SIZE`].
pub fn canvas_size(stack: &LayerStack) -> Option<(u32, u32)> {
    let first = stack.layers().first()?;
    Some(
        first
            .image
            .as_ref()
            .map(|img| img.dimensions())
            .unwrap_or(FALLBACK_SIZE),
    )
}

/// Layer opacity limited to `[0, 1]`; NaN draws nothing.
fn layer_opacity(layer: &Layer) -> f64 {
    if layer.opacity.is_nan() {
        0.0
    } else {
        layer.opacity.clamp(0.0, 1.0)
    }
}

fn draw_layer(canvas: &mut PixelBuffer, layer: &Layer) {
    let (width, height) = canvas.dimensions();
    let opacity = layer_opacity(layer);
    if let Some(image) = &layer.image {
        match fit_to_canvas(image, width, height) {
            Some(src) => draw_buffer(canvas, &src, opacity, layer.blend_mode),
            None => debug!(id = %layer.id(), "skipping layer with empty image"),
        }
    } else if let Some(rgba) = layer.fill {
        draw_fill(canvas, rgba, opacity, layer.blend_mode);
    }

    if !layer.alpha_visible {
        return;
    }
    if let Some(src) = layer
        .alpha_preview
        .as_ref()
        .and_then(|preview| fit_to_canvas(preview, width, height))
    {
        draw_buffer(
            canvas,
            &src,
            opacity * ALPHA_PREVIEW_OPACITY,
            BlendMode::Normal,
        );
    }
}

/// Flattens the stack into one buffer.
///
/// Returns `None` for an empty stack or a zero-area canvas.
///
/// ```rust
/// use grayedit_core::PixelBuffer;
/// use grayedit_ops::composite::composite;
/// use grayedit_ops::layers::LayerStack;
///
/// let base = PixelBuffer::filled(3, 2, [10, 20, 30, 255]);
/// let stack = LayerStack::with_base(base.clone(), 6);
/// assert_eq!(composite(&stack), Some(base));
/// assert_eq!(composite(&LayerStack::new(6)), None);
/// ```
pub fn composite(stack: &LayerStack) -> Option<PixelBuffer> {
    let (width, height) = canvas_size(stack)?;
    trace!(width, height, layers = stack.len(), "composite");
    if width == 0 || height == 0 {
        debug!("composite skipped: empty canvas");
        return None;
    }

    let mut canvas = PixelBuffer::new(width, height);
    for layer in stack.layers() {
        if !layer.visible || !layer.is_drawable() {
            trace!(id = %layer.id(), "layer skipped");
            continue;
        }
        draw_layer(&mut canvas, layer);
    }
    Some(canvas)
}
