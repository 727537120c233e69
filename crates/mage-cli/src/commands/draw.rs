//! Draw command: a filled disc or ellipse on the unit square

use crate::DrawArgs;
use anyhow::{Context, Result};
use mage_core::prims::ellipse;
use mage_core::{ApplyOptions, Domain, Image, Shape};
use tracing::debug;

pub fn run(args: DrawArgs, verbose: bool) -> Result<()> {
    let mut image = Image::builder()
        .width(args.width)
        .height(args.height)
        .background(args.background)
        .build()?;

    let (cx, cy) = args.center;
    let (a, b) = args.scale;
    let r2 = args.radius * args.radius;
    let lhs = ellipse(cx, cy, a, b);
    let shape = Shape::new(
        Domain::cartesian([-1.0, 1.0], [-1.0, 1.0]),
        move |x, y| lhs(x, y) <= r2,
        args.color,
    );
    debug!(?shape, "drawing");

    image
        .apply(&shape, ApplyOptions::default())
        .context("Failed to draw shape")?;

    if verbose {
        println!(
            "Drew {} radius {} at ({}, {}) on {}",
            args.color, args.radius, cx, cy, image
        );
    }

    super::save_image(&args.output, &image)
}
