//! Image info command.
//!
//! Prints format, resolution and source bit depth, as shown in the editor's
//! status bar.

use crate::config::Config;
use crate::InfoArgs;
use anyhow::{Context, Result};
use std::fs;

/// Runs the info command.
pub fn run(args: InfoArgs, config: &Config, verbose: u8) -> Result<()> {
    for path in &args.input {
        let file_size = fs::metadata(path)
            .with_context(|| format!("Failed to stat: {}", path.display()))?
            .len();
        let loaded = super::load_image(path, &config.limits)?;
        let (w, h) = loaded.buffer.dimensions();

        println!("{}", path.display());
        println!("  Format:     {} ({})", loaded.format, loaded.format.mime_type());
        println!("  Resolution: {}x{}", w, h);
        println!("  Bit depth:  {}", loaded.bit_depth);
        println!("  File size:  {}", super::format_size(file_size));

        if verbose > 0 {
            let opaque = loaded.buffer.pixels().all(|p| p[3] == 255);
            println!("  Pixels:     {}", w as u64 * h as u64);
            println!("  Opaque:     {}", if opaque { "yes" } else { "no" });
        }

        if args.input.len() > 1 {
            println!();
        }
    }

    Ok(())
}
