//! Histogram and two-point tone curves.
//!
//! A [`ToneCurve`] holds two control points `(x0, y0)` and `(x1, y1)`. The
//! curve is three linear segments: `(0, 0) -> (x0, y0) -> (x1, y1) -> (255, 255)`.
//! It is baked into a 256-entry [`Lut`] and applied to one channel or to
//! R, G and B together.
//!
//! # Example
//!
//! ```rust
//! use grayedit_core::{Channel, PixelBuffer};
//! use grayedit_ops::curves::{Histogram, ToneCurve};
//!
//! let img = PixelBuffer::filled(4, 4, [64, 128, 192, 255]);
//! let hist = Histogram::of(&img, Channel::Rgb);
//! assert_eq!(hist.bins[64], 16);
//!
//! let lut = ToneCurve::new(64, 32, 192, 224).build_lut();
//! let out = lut.apply(&img, Channel::Red);
//! assert_eq!(out.pixel(0, 0), Some([32, 128, 192, 255]));
//! ```

use grayedit_core::{Channel, PixelBuffer, CHANNELS};
use tracing::trace;

/// 256-bin sample histogram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    /// Occurrence count per sample value.
    pub bins: [u32; 256],
}

impl Histogram {
    /// Counts samples of `channel`. [`Channel::Rgb`] pools all three colour
    /// channels into one histogram.
    pub fn of(buffer: &PixelBuffer, channel: Channel) -> Self {
        let mut bins = [0u32; 256];
        let offsets = channel.offsets();
        for px in buffer.as_bytes().chunks_exact(CHANNELS) {
            for &o in offsets {
                bins[px[o] as usize] += 1;
            }
        }
        Self { bins }
    }

    /// Largest bin count.
    pub fn peak(&self) -> u32 {
        self.bins.iter().copied().max().unwrap_or(0)
    }

    /// Total number of counted samples.
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|&b| b as u64).sum()
    }
}

/// Two control points of a piecewise-linear tone curve.
///
/// Expected, not enforced: `x0 <= x1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToneCurve {
    /// First control point, input.
    pub x0: u8,
    /// First control point, output.
    pub y0: u8,
    /// Second control point, input.
    pub x1: u8,
    /// Second control point, output.
    pub y1: u8,
}

impl Default for ToneCurve {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// `Math.round` semantics: halves go up.
#[inline]
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

impl ToneCurve {
    /// `(0, 0)` and `(255, 255)`: maps every value to itself.
    pub const IDENTITY: ToneCurve = ToneCurve {
        x0: 0,
        y0: 0,
        x1: 255,
        y1: 255,
    };

    /// Creates a curve from its control points.
    pub const fn new(x0: u8, y0: u8, x1: u8, y1: u8) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Output for input `i` before clamping.
    ///
    /// With `x0 == 0`, input 0 maps to 0 whatever `y0` is.
    fn eval(&self, i: f64) -> f64 {
        let (x0, y0) = (self.x0 as f64, self.y0 as f64);
        let (x1, y1) = (self.x1 as f64, self.y1 as f64);
        if i <= x0 {
            if x0 == 0.0 {
                return 0.0;
            }
            round_half_up(i / x0 * y0)
        } else if i <= x1 {
            round_half_up(y0 + (i - x0) * (y1 - y0) / (x1 - x0))
        } else {
            round_half_up(y1 + (i - x1) * (255.0 - y1) / (255.0 - x1))
        }
    }

    /// Bakes the curve into a lookup table. Outputs are clamped to `[0, 255]`.
    pub fn build_lut(&self) -> Lut {
        trace!(x0 = self.x0, y0 = self.y0, x1 = self.x1, y1 = self.y1, "build_lut");
        let mut table = [0u8; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = self.eval(i as f64).clamp(0.0, 255.0) as u8;
        }
        Lut(table)
    }
}

/// 256-entry sample remapping table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lut(pub [u8; 256]);

impl Lut {
    /// Output for input `v`.
    #[inline]
    pub fn get(&self, v: u8) -> u8 {
        self.0[v as usize]
    }

    /// Returns a copy of `buffer` with `channel` remapped. [`Channel::Rgb`]
    /// remaps R, G and B with the same table; alpha is only touched when
    /// [`Channel::Alpha`] is selected.
    pub fn apply(&self, buffer: &PixelBuffer, channel: Channel) -> PixelBuffer {
        let mut out = buffer.clone();
        let offsets = channel.offsets();
        for px in out.as_bytes_mut().chunks_exact_mut(CHANNELS) {
            for &o in offsets {
                px[o] = self.0[px[o] as usize];
            }
        }
        out
    }
}
