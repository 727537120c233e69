//! Image algebra: negation and the AND combine.
//!
//! - [`Image::negate`] / `-image` inverts the color channels, keeping alpha
//! - [`Image::and`] / `&a & &b` adds two same-sized images, saturating at 255
//!
//! Addition saturates rather than wraps so that black/white masks combine as
//! expected: `0 + 0 = 0`, `0 + 255 = 255`, `255 + 255 = 255`.
//!
//! # Example
//!
//! ```rust
//! use mage_core::{Image, Rgba};
//!
//! let mut img = Image::new(4, 4, Rgba::BLACK);
//! img.set_pixel(2, 1, [10, 20, 30]).unwrap();
//! let neg = -&img;
//! assert_eq!(neg.pixel(2, 1), Some(Rgba::new(245, 235, 225, 255)));
//!
//! let white = Image::new(4, 4, Rgba::WHITE);
//! let both = (&white & &white).unwrap();
//! assert_eq!(both.pixel(0, 0), Some(Rgba::WHITE));
//! ```
//!
//! With the `parallel` feature the elementwise loops run on rayon.

use crate::{Error, Image, Result};
use ndarray::{s, Zip};
use std::ops::{BitAnd, Neg};
use tracing::debug;

impl Image {
    /// Returns a new image with every color channel `v` replaced by `|v - 255|`.
    ///
    /// Alpha is carried over unchanged. The result has no domain.
    pub fn negate(&self) -> Image {
        let mut pixels = self.as_array().clone();
        let mut color = pixels.slice_mut(s![.., .., 0..3]);

        #[cfg(feature = "parallel")]
        color.par_map_inplace(|v| *v = v.abs_diff(255));
        #[cfg(not(feature = "parallel"))]
        color.map_inplace(|v| *v = v.abs_diff(255));

        debug!(width = self.width(), height = self.height(), "negated image");
        Image::from_parts(pixels)
    }

    /// Combines two images of identical size by saturating addition.
    ///
    /// Intended for black and white masks. The result has no domain.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if the images differ in size.
    pub fn and(&self, other: &Image) -> Result<Image> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::dimension_mismatch(
                self.dimensions(),
                other.dimensions(),
            ));
        }

        let zip = Zip::from(self.as_array()).and(other.as_array());
        #[cfg(feature = "parallel")]
        let pixels = zip.par_map_collect(|&a, &b| a.saturating_add(b));
        #[cfg(not(feature = "parallel"))]
        let pixels = zip.map_collect(|&a, &b| a.saturating_add(b));

        Ok(Image::from_parts(pixels))
    }
}

impl Neg for &Image {
    type Output = Image;

    fn neg(self) -> Image {
        self.negate()
    }
}

impl Neg for Image {
    type Output = Image;

    fn neg(self) -> Image {
        self.negate()
    }
}

impl BitAnd<&Image> for &Image {
    type Output = Result<Image>;

    fn bitand(self, rhs: &Image) -> Result<Image> {
        self.and(rhs)
    }
}
