//! Negate command

use crate::NegateArgs;
use anyhow::Result;
use tracing::info;

pub fn run(args: NegateArgs, verbose: bool) -> Result<()> {
    let image = super::load_image(&args.input)?;

    if verbose {
        println!("Negating {} from {}", image, args.input.display());
    }

    let negated = -&image;
    super::save_image(&args.output, &negated)?;
    info!(output = %args.output.display(), "negated");

    if verbose {
        println!("Done.");
    }

    Ok(())
}
