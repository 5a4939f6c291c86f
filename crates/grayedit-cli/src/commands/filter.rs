//! Convolution filter command.

use crate::config::Config;
use crate::FilterArgs;
use anyhow::{bail, Context, Result};
use grayedit_ops::filter::{apply_kernel, Kernel, KernelPreset};
use tracing::info;

/// Kernel from the preset name or the custom matrix.
fn select_kernel(args: &FilterArgs) -> Result<Kernel> {
    match (&args.preset, &args.kernel) {
        (Some(name), _) => Ok(name.parse::<KernelPreset>()?.kernel()),
        (None, Some(text)) => text
            .parse::<Kernel>()
            .with_context(|| format!("Bad kernel: {text}")),
        (None, None) => bail!("Specify --preset or --kernel"),
    }
}

pub fn run(args: FilterArgs, config: &Config, verbose: u8) -> Result<()> {
    let kernel = select_kernel(&args)?;
    let loaded = super::load_image(&args.input, &config.limits)?;

    info!(size = kernel.size(), sum = kernel.sum(), "Applying kernel");
    if verbose > 0 {
        println!(
            "Filtering {} with {}x{} kernel",
            args.input.display(),
            kernel.size(),
            kernel.size()
        );
    }

    let filtered = apply_kernel(&loaded.buffer, &kernel);
    super::save_image(&args.output, &filtered, config.quality)?;

    if verbose > 0 {
        println!("Done.");
    }
    Ok(())
}
