//! Tone curve command.
//!
//! Applies a two-point curve to one channel or to RGB, or prints the
//! histogram the curves editor shows.

use crate::config::Config;
use crate::CurvesArgs;
use anyhow::{Context, Result};
use grayedit_core::Channel;
use grayedit_ops::curves::{Histogram, ToneCurve};
use tracing::{debug, warn};

/// Bars wide for the histogram printout.
const BAR_WIDTH: u32 = 50;

fn print_histogram(hist: &Histogram, channel: Channel) {
    let peak = hist.peak().max(1) as u64;
    println!("Histogram ({channel}), {} samples, peak {}", hist.total(), hist.peak());
    for (value, &count) in hist.bins.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let bar = (count as u64 * BAR_WIDTH as u64).div_ceil(peak) as usize;
        println!("{value:>3} {count:>8} {}", "#".repeat(bar));
    }
}

pub fn run(args: CurvesArgs, config: &Config, verbose: u8) -> Result<()> {
    let channel: Channel = args
        .channel
        .parse()
        .with_context(|| format!("Bad channel: {}", args.channel))?;
    let loaded = super::load_image(&args.input, &config.limits)?;

    if args.histogram {
        print_histogram(&Histogram::of(&loaded.buffer, channel), channel);
    }

    let Some(output) = &args.output else {
        return Ok(());
    };

    if args.x0 > args.x1 {
        warn!(x0 = args.x0, x1 = args.x1, "control points out of order");
    }
    let curve = ToneCurve::new(args.x0, args.y0, args.x1, args.y1);
    debug!(?curve, %channel, "curves");
    if verbose > 0 {
        println!(
            "Curve ({},{}) ({},{}) on {}",
            args.x0, args.y0, args.x1, args.y1, channel
        );
    }

    let corrected = curve.build_lut().apply(&loaded.buffer, channel);
    super::save_image(output, &corrected, config.quality)?;

    if verbose > 0 {
        println!("Done.");
    }
    Ok(())
}
