//! Crop command: cut out a region given in mathematical coordinates

use crate::CropArgs;
use anyhow::{Context, Result};
use mage_core::Domain;
use tracing::info;

pub fn run(args: CropArgs, verbose: bool) -> Result<()> {
    let (dx0, dx1) = args.domain_x;
    let (dy0, dy1) = args.domain_y;
    let image = super::load_image(&args.input)?.with_domain(Domain::cartesian([dx0, dx1], [dy0, dy1]));

    let (x0, x1) = args.x_range;
    let (y0, y1) = args.y_range;
    let region = image
        .get((x0..x1, y0..y1))
        .with_context(|| format!("Failed to crop {}", args.input.display()))?
        .into_image()
        .context("Crop did not produce an image")?;

    if verbose {
        println!(
            "Cropping [{x0}, {x1}] x [{y0}, {y1}] -> {}x{} from {}",
            region.width(),
            region.height(),
            image
        );
    }

    let cropped = region.to_image();
    super::save_image(&args.output, &cropped)?;
    info!(output = %args.output.display(), "cropped");

    Ok(())
}
