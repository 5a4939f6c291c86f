//! Image filtering and convolution operations.
//!
//! Convolution runs over an edge-replicated copy of the source so every
//! output pixel sees a full kernel footprint.
//!
//! # Presets
//!
//! - [`KernelPreset::Identity`]
//! - [`KernelPreset::Sharpen`]
//! - [`KernelPreset::GaussianBlur`] - 3x3, weights sum to 1
//! - [`KernelPreset::BoxBlur`] - 3x3, uniform 1/9
//! - [`KernelPreset::PrewittX`], [`KernelPreset::PrewittY`] - edge operators
//!
//! # Example
//!
//! ```rust
//! use grayedit_core::PixelBuffer;
//! use grayedit_ops::filter::{apply_kernel, KernelPreset};
//!
//! let src = PixelBuffer::filled(8, 8, [100, 150, 200, 255]);
//! let blurred = apply_kernel(&src, &KernelPreset::BoxBlur.kernel());
//! assert_eq!(blurred.pixel(3, 3), Some([100, 150, 200, 255]));
//! ```
//!
//! Alpha is not convolved: each output pixel takes the alpha of the last
//! kernel tap visited, the bottom-right sample of its footprint.

use crate::quantize::to_u8;
use crate::{OpsError, OpsResult};
use grayedit_core::{PixelBuffer, CHANNELS};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Square convolution kernel with an odd side length.
///
/// Weights are used as given; callers normalize them.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    data: Vec<f64>,
    size: usize,
}

impl Kernel {
    /// Builds a kernel from rows.
    ///
    /// The matrix must be non-empty, square and odd-sided.
    pub fn new(rows: Vec<Vec<f64>>) -> OpsResult<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(OpsError::InvalidParameter("kernel is empty".into()));
        }
        if size % 2 == 0 {
            return Err(OpsError::InvalidParameter(format!(
                "kernel side {size} must be odd"
            )));
        }
        if let Some(row) = rows.iter().find(|r| r.len() != size) {
            return Err(OpsError::InvalidParameter(format!(
                "kernel is not square: row of {} in {size}x{size}",
                row.len()
            )));
        }
        Ok(Self {
            data: rows.into_iter().flatten().collect(),
            size,
        })
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Padding needed on each side, `size / 2`.
    #[inline]
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// Weight at row `ky`, column `kx`.
    #[inline]
    pub fn weight(&self, kx: usize, ky: usize) -> f64 {
        self.data[ky * self.size + kx]
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}

/// Parses `"a,b,c;d,e,f;g,h,i"`: rows separated by `;`, weights by `,`.
///
/// ```rust
/// use grayedit_ops::filter::Kernel;
///
/// let k: Kernel = "0,0,0; 0,1,0; 0,0,0".parse().unwrap();
/// assert_eq!(k.size(), 3);
/// assert_eq!(k.weight(1, 1), 1.0);
/// ```
impl FromStr for Kernel {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .split(';')
            .filter(|r| !r.trim().is_empty())
            .map(|row| {
                row.split(',')
                    .map(|w| {
                        w.trim().parse::<f64>().map_err(|_| {
                            OpsError::InvalidParameter(format!("bad kernel weight: {:?}", w.trim()))
                        })
                    })
                    .collect::<OpsResult<Vec<f64>>>()
            })
            .collect::<OpsResult<Vec<_>>>()?;
        Kernel::new(rows)
    }
}

/// Built-in 3x3 kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KernelPreset {
    /// Leaves RGB unchanged.
    #[default]
    Identity,
    /// Centre-weighted sharpen.
    Sharpen,
    /// Binomial 1-2-1 blur.
    GaussianBlur,
    /// Uniform average.
    BoxBlur,
    /// Horizontal gradient.
    PrewittX,
    /// Vertical gradient.
    PrewittY,
}

impl KernelPreset {
    /// All presets, in menu order.
    pub const ALL: [KernelPreset; 6] = [
        KernelPreset::Identity,
        KernelPreset::Sharpen,
        KernelPreset::GaussianBlur,
        KernelPreset::BoxBlur,
        KernelPreset::PrewittX,
        KernelPreset::PrewittY,
    ];

    /// Kernel weights for this preset.
    pub fn kernel(self) -> Kernel {
        let rows: [[f64; 3]; 3] = match self {
            KernelPreset::Identity => [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]],
            KernelPreset::Sharpen => [[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]],
            KernelPreset::GaussianBlur => {
                let g = 1.0 / 16.0;
                [[g, 2.0 * g, g], [2.0 * g, 4.0 * g, 2.0 * g], [g, 2.0 * g, g]]
            }
            KernelPreset::BoxBlur => [[1.0 / 9.0; 3]; 3],
            KernelPreset::PrewittX => [[-1.0, 0.0, 1.0]; 3],
            KernelPreset::PrewittY => [[-1.0, -1.0, -1.0], [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]],
        };
        Kernel {
            data: rows.iter().flatten().copied().collect(),
            size: 3,
        }
    }

    /// Name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            KernelPreset::Identity => "identity",
            KernelPreset::Sharpen => "sharpen",
            KernelPreset::GaussianBlur => "gaussian",
            KernelPreset::BoxBlur => "box",
            KernelPreset::PrewittX => "prewitt-x",
            KernelPreset::PrewittY => "prewitt-y",
        }
    }
}

impl fmt::Display for KernelPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KernelPreset {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.to_ascii_lowercase().replace('_', "-");
        match key.as_str() {
            "identity" => Ok(KernelPreset::Identity),
            "sharpen" => Ok(KernelPreset::Sharpen),
            "gaussian" | "gaussian-blur" => Ok(KernelPreset::GaussianBlur),
            "box" | "box-blur" => Ok(KernelPreset::BoxBlur),
            "prewitt-x" | "prewittx" => Ok(KernelPreset::PrewittX),
            "prewitt-y" | "prewitty" => Ok(KernelPreset::PrewittY),
            _ => Err(OpsError::InvalidParameter(format!("unknown kernel preset: {s}"))),
        }
    }
}

/// Extends each edge by `pad` pixels, replicating the nearest edge pixel.
///
/// An empty source yields a transparent buffer of the padded size.
pub fn edge_padding(src: &PixelBuffer, pad: u32) -> PixelBuffer {
    let (w, h) = src.dimensions();
    let (pw, ph) = (w + 2 * pad, h + 2 * pad);
    let mut out = PixelBuffer::new(pw, ph);
    if src.is_empty() {
        return out;
    }

    let bytes = src.as_bytes();
    let data = out.as_bytes_mut();
    let mut d = 0;
    for y in 0..ph {
        let sy = y.saturating_sub(pad).min(h - 1) as usize;
        for x in 0..pw {
            let sx = x.saturating_sub(pad).min(w - 1) as usize;
            let s = (sy * w as usize + sx) * CHANNELS;
            data[d..d + CHANNELS].copy_from_slice(&bytes[s..s + CHANNELS]);
            d += CHANNELS;
        }
    }
    out
}

/// Convolves R, G and B with `kernel`; output has the input's dimensions.
///
/// Sums are clamped to `[0, 255]` and rounded half to even. Alpha comes
/// from the last tap of the footprint.
pub fn apply_kernel(src: &PixelBuffer, kernel: &Kernel) -> PixelBuffer {
    let (width, height) = src.dimensions();
    let size = kernel.size();
    trace!(width, height, kernel = size, "apply_kernel");
    if src.is_empty() {
        return src.clone();
    }

    let padded = edge_padding(src, kernel.radius() as u32);
    let pw = padded.width() as usize;
    let pdata = padded.as_bytes();

    let mut out = PixelBuffer::new(width, height);
    let data = out.as_bytes_mut();
    let mut d = 0;

    for y in 0..height as usize {
        for x in 0..width as usize {
            let (mut r, mut g, mut b) = (0.0f64, 0.0f64, 0.0f64);
            let mut a = 0u8;
            for ky in 0..size {
                let row = (y + ky) * pw;
                for kx in 0..size {
                    let s = (row + x + kx) * CHANNELS;
                    let w = kernel.weight(kx, ky);
                    r += pdata[s] as f64 * w;
                    g += pdata[s + 1] as f64 * w;
                    b += pdata[s + 2] as f64 * w;
                    a = pdata[s + 3];
                }
            }
            data[d] = to_u8(r);
            data[d + 1] = to_u8(g);
            data[d + 2] = to_u8(b);
            data[d + 3] = a;
            d += CHANNELS;
        }
    }
    debug!(width, height, kernel = size, "kernel applied");
    out
}
