//! CLI command implementations

pub mod and;
pub mod crop;
pub mod draw;
pub mod info;
pub mod negate;

use anyhow::{Context, Result};
use mage_core::Image;
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<Image> {
    mage_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &Image) -> Result<()> {
    mage_io::write(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}
