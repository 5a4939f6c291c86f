//! grayedit - command-line raster editor
//!
//! Scripting front end for the grayedit core: GrayBit-7 conversion,
//! resampling, convolution, tone curves, layer compositing and colour picking.

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "grayedit")]
#[command(author, version, about = "Command-line raster editor with GrayBit-7 support")]
#[command(long_about = "
Loads PNG, JPEG and GrayBit-7 (GB7) images, edits them, and exports to any
of the three formats. Output format follows the output file extension.

Examples:
  grayedit info scan.gb7                      # Format, size, bit depth
  grayedit convert photo.png photo.gb7        # Export as 7-bit grayscale
  grayedit resize in.png -o out.png -s 50     # Half size, bilinear
  grayedit filter in.png -o out.png -k sharpen
  grayedit filter in.png -o out.png --kernel \"0,0,0;0,1,0;0,0,0\"
  grayedit curves in.png -o out.png --x0 64 --y0 32 --x1 192 --y1 224
  grayedit curves in.png --histogram -c red
  grayedit composite base.png --layer top.png:0.5:multiply -o out.png
  grayedit pick in.png -x 10 -y 20 --against 0,0
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// YAML config file (limits, default filter, JPEG quality)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display image information
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Convert between formats
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Resize/scale image
    #[command(visible_alias = "r")]
    Resize(ResizeArgs),

    /// Apply a convolution kernel
    Filter(FilterArgs),

    /// Apply a two-point tone curve or print a histogram
    Curves(CurvesArgs),

    /// Flatten a stack of image and fill layers
    #[command(visible_alias = "comp")]
    Composite(CompositeArgs),

    /// Sample a pixel in every colour space
    Pick(PickArgs),
}

/// Arguments for the `info` command.
#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

/// Arguments for the `convert` command.
#[derive(Args)]
struct ConvertArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    output: PathBuf,

    /// Quality (1-100, for JPEG)
    #[arg(short = 'q', long)]
    quality: Option<u8>,
}

/// Arguments for the `resize` command.
#[derive(Args)]
struct ResizeArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Target width (height follows the aspect ratio unless given)
    #[arg(short, long)]
    width: Option<u32>,

    /// Target height
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Scale in percent, aspect ratio locked
    #[arg(short, long, conflicts_with_all = ["width", "height"])]
    scale: Option<f64>,

    /// Filter: nearest, bilinear
    #[arg(short, long)]
    filter: Option<String>,
}

/// Arguments for the `filter` command.
#[derive(Args)]
struct FilterArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Preset: identity, sharpen, gaussian, box, prewitt-x, prewitt-y
    #[arg(short = 'k', long, required_unless_present = "kernel")]
    preset: Option<String>,

    /// Custom kernel, rows separated by ';' (e.g. "0,-1,0;-1,5,-1;0,-1,0")
    #[arg(long, conflicts_with = "preset")]
    kernel: Option<String>,
}

/// Arguments for the `curves` command.
#[derive(Args)]
struct CurvesArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long, required_unless_present = "histogram")]
    output: Option<PathBuf>,

    /// First control point, input
    #[arg(long, default_value = "0")]
    x0: u8,

    /// First control point, output
    #[arg(long, default_value = "0")]
    y0: u8,

    /// Second control point, input
    #[arg(long, default_value = "255")]
    x1: u8,

    /// Second control point, output
    #[arg(long, default_value = "255")]
    y1: u8,

    /// Channel: rgb, red, green, blue, alpha
    #[arg(short, long, default_value = "rgb")]
    channel: String,

    /// Print the channel histogram
    #[arg(long)]
    histogram: bool,
}

/// Arguments for the `composite` command.
#[derive(Args)]
struct CompositeArgs {
    /// Base image (bottom of the stack, sets the output size)
    base: PathBuf,

    /// Image layer as PATH[:OPACITY[:MODE]], bottom to top
    #[arg(short, long = "layer")]
    layers: Vec<String>,

    /// Fill layer as #RRGGBB[AA][:OPACITY[:MODE]], drawn above image layers
    #[arg(long = "fill")]
    fills: Vec<String>,

    /// Draw each layer's alpha preview on top of it
    #[arg(long)]
    alpha_preview: bool,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,
}

/// Arguments for the `pick` command.
#[derive(Args)]
struct PickArgs {
    /// Input image
    input: PathBuf,

    /// Pixel column
    #[arg(short)]
    x: u32,

    /// Pixel row
    #[arg(short)]
    y: u32,

    /// Second pixel as X,Y for a contrast check
    #[arg(long)]
    against: Option<String>,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = config::Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Info(args) => commands::info::run(args, &config, cli.verbose),
        Commands::Convert(args) => commands::convert::run(args, &config, cli.verbose),
        Commands::Resize(args) => commands::resize::run(args, &config, cli.verbose),
        Commands::Filter(args) => commands::filter::run(args, &config, cli.verbose),
        Commands::Curves(args) => commands::curves::run(args, &config, cli.verbose),
        Commands::Composite(args) => commands::composite::run(args, &config, cli.verbose),
        Commands::Pick(args) => commands::pick::run(args, &config, cli.verbose),
    }
}
