//! Stacks of same-sized images.

use crate::{Error, Image, Result, Rgba};
use std::fmt;
use std::ops::{Index, IndexMut};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Ordered stack of images sharing one width and height.
///
/// ```rust
/// use mage_core::{LayeredImage, Rgba};
///
/// let mut stack = LayeredImage::new(8, 8, 3);
/// stack[1].set_pixel(0, 0, Rgba::WHITE).unwrap();
/// assert_eq!(stack.to_string(), "8x8 Layered Image with 3 layers");
/// assert_eq!(stack[0].pixel(0, 0), Some(Rgba::TRANSPARENT));
/// ```
#[derive(Debug, Clone)]
pub struct LayeredImage {
    layers: Vec<Image>,
    width: usize,
    height: usize,
}

impl LayeredImage {
    /// Number of layers used when none is requested.
    pub const DEFAULT_LAYERS: usize = 4;

    /// Creates `num_layers` fully transparent layers.
    pub fn new(width: usize, height: usize, num_layers: usize) -> Self {
        debug!(width, height, num_layers, "new layered image");
        Self {
            layers: (0..num_layers)
                .map(|_| Image::new(width, height, Rgba::TRANSPARENT))
                .collect(),
            width,
            height,
        }
    }

    /// Adopts existing images as layers; the first one sets the size.
    ///
    /// # Errors
    ///
    /// [`Error::MissingDimensions`] for an empty list,
    /// [`Error::DimensionMismatch`] if a layer differs in size from the first.
    pub fn from_images(images: Vec<Image>) -> Result<Self> {
        let (width, height) = images
            .first()
            .map(Image::dimensions)
            .ok_or(Error::MissingDimensions)?;
        if let Some(odd) = images.iter().find(|img| img.dimensions() != (width, height)) {
            return Err(Error::dimension_mismatch((width, height), odd.dimensions()));
        }
        Ok(Self {
            layers: images,
            width,
            height,
        })
    }

    /// Layer width.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Layer height.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of layers.
    #[inline]
    pub fn nlayers(&self) -> usize {
        self.layers.len()
    }

    /// Layer at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&Image> {
        self.layers.get(index)
    }

    /// Mutable layer at `index`, if present.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Image> {
        self.layers.get_mut(index)
    }

    /// Layers from bottom to top.
    pub fn iter(&self) -> std::slice::Iter<'_, Image> {
        self.layers.iter()
    }

    /// Mutable layers from bottom to top.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Image> {
        self.layers.iter_mut()
    }

    /// Parallel iterator over mutable layers.
    #[cfg(feature = "parallel")]
    pub fn par_iter_mut(&mut self) -> rayon::slice::IterMut<'_, Image> {
        self.layers.par_iter_mut()
    }

    /// Consumes the stack, returning its layers.
    pub fn into_layers(self) -> Vec<Image> {
        self.layers
    }
}

impl Default for LayeredImage {
    fn default() -> Self {
        Self::new(0, 0, Self::DEFAULT_LAYERS)
    }
}

impl Index<usize> for LayeredImage {
    type Output = Image;

    fn index(&self, index: usize) -> &Image {
        &self.layers[index]
    }
}

impl IndexMut<usize> for LayeredImage {
    fn index_mut(&mut self, index: usize) -> &mut Image {
        &mut self.layers[index]
    }
}

impl<'a> IntoIterator for &'a LayeredImage {
    type Item = &'a Image;
    type IntoIter = std::slice::Iter<'a, Image>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for LayeredImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} Layered Image with {} layers",
            self.width,
            self.height,
            self.nlayers()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let stack = LayeredImage::new(8, 8, 3);
        assert_eq!(stack.nlayers(), 3);
        assert_eq!((stack.width(), stack.height()), (8, 8));
        for layer in &stack {
            assert_eq!(layer.dimensions(), (8, 8));
            assert!(layer.as_array().iter().all(|&v| v == 0));
        }
        assert_eq!(stack.to_string(), "8x8 Layered Image with 3 layers");
    }

    #[test]
    fn test_default_layer_count() {
        assert_eq!(LayeredImage::default().nlayers(), LayeredImage::DEFAULT_LAYERS);
    }

    #[test]
    fn test_index_mut_reaches_layer() {
        let mut stack = LayeredImage::new(2, 2, 2);
        stack[1].set_pixel(1, 1, Rgba::WHITE).unwrap();
        assert_eq!(stack[1].pixel(1, 1), Some(Rgba::WHITE));
        assert_eq!(stack[0].pixel(1, 1), Some(Rgba::TRANSPARENT));
        assert!(stack.get(2).is_none());
    }

    #[test]
    fn test_from_images() {
        let stack = LayeredImage::from_images(vec![
            Image::new(3, 2, Rgba::BLACK),
            Image::new(3, 2, Rgba::WHITE),
        ])
        .unwrap();
        assert_eq!(stack.nlayers(), 2);
        assert_eq!(stack[1].pixel(0, 0), Some(Rgba::WHITE));
        assert_eq!(stack.to_string(), "3x2 Layered Image with 2 layers");

        let layers = stack.into_layers();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].pixel(2, 1), Some(Rgba::BLACK));
        assert_eq!(layers[1].dimensions(), (3, 2));
    }

    #[test]
    fn test_from_images_rejects_bad_input() {
        assert!(matches!(
            LayeredImage::from_images(Vec::new()),
            Err(Error::MissingDimensions)
        ));
        let err = LayeredImage::from_images(vec![
            Image::new(3, 2, Rgba::BLACK),
            Image::new(2, 3, Rgba::BLACK),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                a_width: 3,
                a_height: 2,
                b_width: 2,
                b_height: 3
            }
        ));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_par_iter_mut() {
        let mut stack = LayeredImage::new(4, 4, 4);
        stack.par_iter_mut().for_each(|layer| layer.set_alpha(255));
        assert!(stack.iter().all(|l| l.alpha().iter().all(|&a| a == 255)));
    }
}
