//! Format conversion command.
//!
//! Decodes any supported input and re-encodes it in the format named by the
//! output extension. Exporting to `.gb7` quantises to 7-bit grayscale.

use crate::config::Config;
use crate::ConvertArgs;
use anyhow::Result;
use grayedit_io::Format;
use tracing::{info, trace};

/// Runs the convert command.
pub fn run(args: ConvertArgs, config: &Config, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "convert::run");

    let loaded = super::load_image(&args.input, &config.limits)?;
    let output_format = Format::from_extension(&args.output);

    info!(
        input_format = %loaded.format,
        output_format = %output_format,
        "Converting image"
    );
    if verbose > 0 {
        println!(
            "Converting {} ({}) -> {} ({})",
            args.input.display(),
            loaded.format,
            args.output.display(),
            output_format
        );
    }

    super::save_image(&args.output, &loaded.buffer, config.quality(args.quality))?;

    if verbose > 0 {
        println!("Done.");
    }
    Ok(())
}
