//! Eyedropper command.
//!
//! Prints one pixel in every supported colour representation and, with
//! `--against`, the WCAG contrast ratio between two pixels.

use crate::config::Config;
use crate::PickArgs;
use anyhow::{anyhow, Context, Result};
use grayedit_color::{ColorSample, WCAG_AA_NORMAL};

/// Parses `X,Y`.
fn parse_point(text: &str) -> Result<(u32, u32)> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| anyhow!("Expected X,Y, got {text:?}"))?;
    Ok((
        x.trim().parse().with_context(|| format!("Bad x in {text:?}"))?,
        y.trim().parse().with_context(|| format!("Bad y in {text:?}"))?,
    ))
}

fn print_sample(label: &str, s: &ColorSample) {
    println!("{label} ({}, {})", s.x, s.y);
    println!("  RGB:   {}, {}, {}", s.rgb[0], s.rgb[1], s.rgb[2]);
    println!("  XYZ:   {:.3}, {:.3}, {:.3}", s.xyz.x, s.xyz.y, s.xyz.z);
    println!("  Lab:   {:.3}, {:.3}, {:.3}", s.lab.l, s.lab.a, s.lab.b);
    println!("  LCH:   {:.3}, {:.3}, {:.3}", s.lch.l, s.lch.c, s.lch.h);
    println!("  OKLCh: {:.3}, {:.3}, {:.3}", s.oklch.l, s.oklch.c, s.oklch.h);
}

pub fn run(args: PickArgs, config: &Config, verbose: u8) -> Result<()> {
    let loaded = super::load_image(&args.input, &config.limits)?;
    let first = ColorSample::at(&loaded.buffer, args.x, args.y)?;
    print_sample("Color 1", &first);
    if verbose > 0 {
        println!("  Luminance: {:.5}", first.luminance());
    }

    if let Some(text) = &args.against {
        let (x, y) = parse_point(text)?;
        let second = ColorSample::at(&loaded.buffer, x, y)?;
        print_sample("Color 2", &second);

        let report = first.contrast_with(&second);
        println!(
            "Contrast: {:.2}:1 ({} for normal text, needs {:.1}:1)",
            report.ratio,
            if report.accessible { "passes" } else { "fails" },
            WCAG_AA_NORMAL
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("3,4").unwrap(), (3, 4));
        assert_eq!(parse_point(" 10 , 0 ").unwrap(), (10, 0));
        assert!(parse_point("3;4").is_err());
        assert!(parse_point("-1,4").is_err());
    }
}
