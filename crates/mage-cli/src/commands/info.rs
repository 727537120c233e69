//! Image info command.
//!
//! Prints dimensions and per-channel statistics for each input.

use crate::InfoArgs;
use anyhow::Result;
use mage_core::{Image, CHANNELS};

const CHANNEL_NAMES: [&str; CHANNELS] = ["R", "G", "B", "A"];

/// Runs the info command.
pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    for path in &args.input {
        let image = super::load_image(path)?;

        println!("{}", path.display());
        println!("  {}", image);
        if verbose {
            println!("  Pixels: {}", image.width() * image.height());
        }

        if !image.is_empty() {
            for (c, name) in CHANNEL_NAMES.iter().enumerate() {
                let (min, max, mean) = channel_stats(&image, c)?;
                println!("  {name}: min {min:3}  max {max:3}  mean {mean:7.2}");
            }
        }

        if args.input.len() > 1 {
            println!();
        }
    }

    Ok(())
}

/// Min, max and mean of one channel.
fn channel_stats(image: &Image, channel: usize) -> Result<(u8, u8, f64)> {
    let plane = image.get((.., .., channel))?.into_array();
    let (mut min, mut max, mut sum) = (u8::MAX, u8::MIN, 0u64);
    for &v in plane.iter() {
        min = min.min(v);
        max = max.max(v);
        sum += u64::from(v);
    }
    let mean = if plane.is_empty() {
        0.0
    } else {
        sum as f64 / plane.len() as f64
    };
    Ok((min, max, mean))
}
