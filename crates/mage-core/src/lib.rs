//! # mage-core
//!
//! RGBA raster images that can be addressed both by pixel and by mathematical
//! coordinate.
//!
//! This crate provides:
//!
//! - [`Image`] - Owned `(height, width, 4)` byte buffer with an optional [`Domain`]
//! - [`Address`] - Pixel or mathematical index, classified at read time
//! - [`Domain`], [`Grids`] - Mappings from pixel positions to coordinates
//! - [`Drawable`], [`Shape`] - Things that can be composited onto an image
//! - [`LayeredImage`] - A stack of same-sized images
//! - [`Rgba`] - 8-bit color value
//! - [`Sampler`] - Functions on `[0, 1]` sampled for animation, with easing curves
//! - [`Projectile`] - Frame-by-frame constant-acceleration motion
//!
//! ## Dual indexing
//!
//! Integer indices address storage. As soon as one bound is a float the
//! whole index is mathematical: the image's domain is evaluated and every
//! bound snaps to the nearest pixel.
//!
//! ```rust
//! use mage_core::{Domain, Image, Rgba};
//!
//! let img = Image::new(5, 5, Rgba::BLACK)
//!     .with_domain(Domain::cartesian([-1.0, 1.0], [-1.0, 1.0]));
//!
//! // the same 3x3 block, by pixel and by coordinate
//! let by_pixel = img.get((1..4, 1..4)).unwrap().into_image().unwrap();
//! let by_math = img.get((-0.5..1.0, -1.0..0.5)).unwrap().into_image().unwrap();
//! assert_eq!(by_pixel.as_array(), by_math.as_array());
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//! mage-core (this crate)
//!    ^
//!    +-- mage-io (PNG read/write)
//!    +-- mage-cli (command line tool)
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` - Run elementwise operations on rayon (enabled by default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod domain;
pub mod draw;
pub mod error;
pub mod image;
pub mod index;
pub mod interpolate;
pub mod layers;
pub mod motion;
pub mod ops;
pub mod pixel;
pub mod prims;

pub use domain::{Domain, Grids};
pub use draw::{ApplyOptions, Drawable, Fill, Paint, Shape};
pub use error::{Error, Result};
pub use image::{Image, ImageBuilder, ImageView, ImageViewMut, Selection, CHANNELS};
pub use index::{Address, Bound, Component};
pub use interpolate::Sampler;
pub use layers::LayeredImage;
pub use motion::Projectile;
pub use pixel::{ParseColorError, Rgba};

/// Prelude module for convenient imports.
///
/// ```
/// use mage_core::prelude::*;
///
/// let img = Image::new(2, 2, Rgba::WHITE);
/// assert_eq!(img.dimensions(), (2, 2));
/// ```
pub mod prelude {
    pub use crate::domain::{Domain, Grids};
    pub use crate::draw::{ApplyOptions, Drawable, Fill, Paint, Shape};
    pub use crate::error::{Error, Result};
    pub use crate::image::{Image, ImageView, ImageViewMut, Selection};
    pub use crate::index::Address;
    pub use crate::layers::LayeredImage;
    pub use crate::pixel::Rgba;
}
