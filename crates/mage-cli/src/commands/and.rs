//! And command: saturating sum of two masks

use crate::AndArgs;
use anyhow::{Context, Result};
use tracing::info;

pub fn run(args: AndArgs, verbose: bool) -> Result<()> {
    let a = super::load_image(&args.a)?;
    let b = super::load_image(&args.b)?;

    if verbose {
        println!("Combining {} and {}", args.a.display(), args.b.display());
    }

    let combined = (&a & &b).with_context(|| {
        format!(
            "Cannot combine {} ({}) with {} ({})",
            args.a.display(),
            a,
            args.b.display(),
            b
        )
    })?;

    super::save_image(&args.output, &combined)?;
    info!(output = %args.output.display(), "combined");

    Ok(())
}
