//! mage - command line front end for mage images
//!
//! Reads and writes PNG through mage-io and works on mage-core images.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use mage_core::Rgba;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "mage")]
#[command(author, version, about = "Images you can index with mathematics")]
#[command(long_about = "
Inspect and manipulate RGBA images by pixel or by mathematical coordinate.

Examples:
  mage info a.png b.png                     # Dimensions and channel stats
  mage negate in.png -o out.png             # Invert the color channels
  mage and mask1.png mask2.png -o both.png  # Combine two masks
  mage draw -W 256 -H 256 -o disc.png --radius 0.5 --color '#ff0000'
  mage crop in.png -o out.png --x-range=-0.5..0.5 --y-range=0..1
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Display image dimensions and channel statistics
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Invert the color channels, keeping alpha
    #[command(visible_alias = "n")]
    Negate(NegateArgs),

    /// Combine two same-sized images by saturating addition
    And(AndArgs),

    /// Render a disc on the square [-1, 1] x [-1, 1]
    Draw(DrawArgs),

    /// Crop by mathematical coordinates
    Crop(CropArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

#[derive(Args)]
struct NegateArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Args)]
struct AndArgs {
    /// First image
    a: PathBuf,

    /// Second image
    b: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Args)]
struct DrawArgs {
    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Width
    #[arg(short = 'W', long, default_value = "256")]
    width: usize,

    /// Height
    #[arg(short = 'H', long, default_value = "256")]
    height: usize,

    /// Disc radius in domain units
    #[arg(short, long, default_value = "0.5")]
    radius: f64,

    /// Center as x,y
    #[arg(long, value_parser = parse_pair, default_value = "0,0", allow_hyphen_values = true)]
    center: (f64, f64),

    /// Axis scales as a,b; anything but 1,1 draws an ellipse
    #[arg(long, value_parser = parse_pair, default_value = "1,1")]
    scale: (f64, f64),

    /// Fill color (#rgb, #rrggbb or #rrggbbaa)
    #[arg(short, long, default_value = "#000000")]
    color: Rgba,

    /// Background color
    #[arg(short, long, default_value = "#ffffff")]
    background: Rgba,
}

#[derive(Args)]
struct CropArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Horizontal extent as a..b
    #[arg(long, value_parser = parse_range, allow_hyphen_values = true)]
    x_range: (f64, f64),

    /// Vertical extent as c..d
    #[arg(long, value_parser = parse_range, allow_hyphen_values = true)]
    y_range: (f64, f64),

    /// Horizontal extent of the whole image
    #[arg(long, value_parser = parse_range, default_value = "-1..1", allow_hyphen_values = true)]
    domain_x: (f64, f64),

    /// Vertical extent of the whole image
    #[arg(long, value_parser = parse_range, default_value = "-1..1", allow_hyphen_values = true)]
    domain_y: (f64, f64),
}

/// Parses `a..b` into a pair of floats.
fn parse_range(s: &str) -> Result<(f64, f64), String> {
    let (a, b) = s
        .split_once("..")
        .ok_or_else(|| format!("expected a..b, got '{s}'"))?;
    Ok((parse_f64(a)?, parse_f64(b)?))
}

/// Parses `a,b` into a pair of floats.
fn parse_pair(s: &str) -> Result<(f64, f64), String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected a,b, got '{s}'"))?;
    Ok((parse_f64(a)?, parse_f64(b)?))
}

fn parse_f64(s: &str) -> Result<f64, String> {
    s.trim()
        .parse()
        .map_err(|e| format!("invalid number '{s}': {e}"))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = if verbose > 0 {
        EnvFilter::new(level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let verbose = cli.verbose > 0;

    match cli.command {
        Commands::Info(args) => commands::info::run(args, verbose),
        Commands::Negate(args) => commands::negate::run(args, verbose),
        Commands::And(args) => commands::and::run(args, verbose),
        Commands::Draw(args) => commands::draw::run(args, verbose),
        Commands::Crop(args) => commands::crop::run(args, verbose),
    }
}
