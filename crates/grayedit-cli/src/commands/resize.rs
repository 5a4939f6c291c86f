//! Resize command
//!
//! Scales images with nearest-neighbour or bilinear resampling. A single
//! dimension or a percentage keeps the aspect ratio.

use crate::config::Config;
use crate::ResizeArgs;
use anyhow::{bail, Context, Result};
use grayedit_ops::resize::{fit_to_height, fit_to_width, resize, scale_dimensions};
use tracing::debug;

/// Target size from the size flags.
fn target_size(args: &ResizeArgs, src_w: u32, src_h: u32) -> Result<(u32, u32)> {
    let size = match (args.width, args.height, args.scale) {
        (Some(w), Some(h), _) => (w, h),
        (Some(w), None, _) => fit_to_width(src_w, src_h, w),
        (None, Some(h), _) => fit_to_height(src_w, src_h, h),
        (None, None, Some(percent)) if percent > 0.0 => scale_dimensions(src_w, src_h, percent),
        (None, None, Some(percent)) => bail!("Scale must be positive, got {percent}"),
        _ => bail!("Specify --width, --height, or --scale"),
    };
    if size.0 == 0 || size.1 == 0 {
        bail!("Target size {}x{} is empty", size.0, size.1);
    }
    Ok(size)
}

pub fn run(args: ResizeArgs, config: &Config, verbose: u8) -> Result<()> {
    let loaded = super::load_image(&args.input, &config.limits)?;
    let (src_w, src_h) = loaded.buffer.dimensions();
    let (dst_w, dst_h) = target_size(&args, src_w, src_h)?;
    config
        .limits
        .check_dimensions(dst_w, dst_h)
        .context("Resize target rejected")?;

    let filter = config.filter(args.filter.as_deref())?;
    debug!(src_w, src_h, dst_w, dst_h, %filter, "resize");
    if verbose > 0 {
        println!("Resizing {}x{} -> {}x{} ({})", src_w, src_h, dst_w, dst_h, filter);
    }

    let resized = resize(&loaded.buffer, dst_w, dst_h, filter)?;
    super::save_image(&args.output, &resized, config.quality)?;

    if verbose > 0 {
        println!("Done.");
    }
    Ok(())
}
