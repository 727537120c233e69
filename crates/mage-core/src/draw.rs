//! Drawables and compositing them onto images.
//!
//! A [`Drawable`] describes *what* to draw without owning any pixels: a
//! [`Domain`] to evaluate on, a boolean mask over the resulting grids, and a
//! [`Fill`] that is either a constant color or a shader evaluated only at the
//! selected points. [`Image::apply`] composites one onto an image.
//!
//! [`Shape`] is a ready-made drawable built from a point predicate:
//!
//! ```rust
//! use mage_core::{ApplyOptions, Domain, Image, Rgba, Shape};
//! use mage_core::prims::circle;
//!
//! let disc = Shape::new(
//!     Domain::cartesian([-1.0, 1.0], [-1.0, 1.0]),
//!     |x, y| circle(0.0, 0.0)(x, y) <= 0.25,
//!     Rgba::opaque(255, 0, 0),
//! );
//!
//! let mut img = Image::new(64, 64, Rgba::WHITE);
//! img.apply(&disc, ApplyOptions::default()).unwrap();
//! assert_eq!(img.pixel(32, 32), Some(Rgba::opaque(255, 0, 0)));
//! assert_eq!(img.pixel(0, 0), Some(Rgba::WHITE));
//! // the image now carries the disc's domain
//! assert_eq!(img.resolve(-1.0, 1.0).unwrap(), (0, 0));
//! ```

use crate::domain::Grids;
use crate::{Domain, Error, Image, Result, Rgba};
use ndarray::{aview1, s, Array2, Zip};
use std::fmt;
use tracing::debug;

/// How selected pixels are colored.
pub enum Fill<'a> {
    /// Every selected pixel gets this color.
    Solid(Rgba),
    /// Evaluated at the `(x, y)` of each selected pixel only.
    Shader(&'a dyn Fn(f64, f64) -> Rgba),
}

/// Something that can be composited onto an [`Image`].
pub trait Drawable {
    /// Domain the mask and shader are defined on.
    fn domain(&self) -> Domain;

    /// Pixels to paint, given the coordinate grids. Must have shape `(height, width)`.
    fn mask(&self, grids: &Grids) -> Array2<bool>;

    /// Color of the painted pixels.
    fn fill(&self) -> Fill<'_>;
}

/// Options for [`Image::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Adopt the drawable's domain afterwards. Ignored with `use_host_domain`.
    pub overwrite_domain: bool,
    /// Evaluate on the image's own domain instead of the drawable's.
    pub use_host_domain: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            overwrite_domain: true,
            use_host_domain: false,
        }
    }
}

impl ApplyOptions {
    /// Evaluate on the image's own domain.
    pub fn host_domain() -> Self {
        Self {
            overwrite_domain: false,
            use_host_domain: true,
        }
    }

    /// Keep the image's current domain.
    pub fn keep_domain(mut self) -> Self {
        self.overwrite_domain = false;
        self
    }
}

impl Image {
    /// Composites `drawable` onto this image.
    ///
    /// The grids come from the drawable's domain, or with
    /// [`use_host_domain`](ApplyOptions::use_host_domain) from the image's
    /// own. Pixels selected by the mask are set to the fill. The drawable's
    /// domain is adopted last, so a failure leaves the domain untouched.
    ///
    /// # Errors
    ///
    /// - [`Error::NoDomain`] with `use_host_domain` and no domain attached
    /// - [`Error::DimensionMismatch`] if the grids or the mask have the wrong shape
    pub fn apply<D>(&mut self, drawable: &D, options: ApplyOptions) -> Result<()>
    where
        D: Drawable + ?Sized,
    {
        let (width, height) = self.dimensions();
        let grids = if options.use_host_domain {
            self.domain()
                .ok_or(Error::NoDomain)?
                .evaluate(width, height)?
        } else {
            drawable.domain().evaluate(width, height)?
        };

        let mask = drawable.mask(&grids);
        if mask.dim() != (height, width) {
            return Err(Error::dimension_mismatch(
                (width, height),
                (mask.ncols(), mask.nrows()),
            ));
        }

        let fill = drawable.fill();
        let pixels = self.as_array_mut();
        let mut painted = 0usize;
        for ((j, i), _) in mask.indexed_iter().filter(|(_, selected)| **selected) {
            let color = match &fill {
                Fill::Solid(color) => *color,
                Fill::Shader(shade) => shade(grids.x[[j, i]], grids.y[[j, i]]),
            };
            pixels
                .slice_mut(s![j, i, ..])
                .assign(&aview1(&color.to_array()));
            painted += 1;
        }
        debug!(painted, width, height, ?options, "applied drawable");

        if options.overwrite_domain && !options.use_host_domain {
            self.set_domain(Some(drawable.domain()));
        }
        Ok(())
    }
}

/// Owned paint for a [`Shape`].
pub enum Paint {
    /// Constant color.
    Solid(Rgba),
    /// Color as a function of the mathematical point.
    Shader(Box<dyn Fn(f64, f64) -> Rgba + Send + Sync>),
}

impl Paint {
    /// Wraps a shader function.
    pub fn shader<F>(f: F) -> Self
    where
        F: Fn(f64, f64) -> Rgba + Send + Sync + 'static,
    {
        Self::Shader(Box::new(f))
    }
}

impl From<Rgba> for Paint {
    fn from(color: Rgba) -> Self {
        Self::Solid(color)
    }
}

impl fmt::Debug for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solid(c) => f.debug_tuple("Solid").field(c).finish(),
            Self::Shader(_) => f.write_str("Shader(..)"),
        }
    }
}

type Predicate = dyn Fn(f64, f64) -> bool + Send + Sync;

/// Drawable made of a domain, a point predicate and a paint.
pub struct Shape {
    domain: Domain,
    inside: Box<Predicate>,
    paint: Paint,
}

impl Shape {
    /// Creates a shape selecting every point where `inside(x, y)` holds.
    pub fn new<F>(domain: Domain, inside: F, paint: impl Into<Paint>) -> Self
    where
        F: Fn(f64, f64) -> bool + Send + Sync + 'static,
    {
        Self {
            domain,
            inside: Box::new(inside),
            paint: paint.into(),
        }
    }
}

impl Drawable for Shape {
    fn domain(&self) -> Domain {
        self.domain.clone()
    }

    fn mask(&self, grids: &Grids) -> Array2<bool> {
        Zip::from(&grids.x)
            .and(&grids.y)
            .map_collect(|&x, &y| (self.inside)(x, y))
    }

    fn fill(&self) -> Fill<'_> {
        match &self.paint {
            Paint::Solid(color) => Fill::Solid(*color),
            Paint::Shader(shade) => Fill::Shader(shade.as_ref()),
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("domain", &self.domain)
            .field("paint", &self.paint)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn unit_square() -> Domain {
        Domain::cartesian([-1.0, 1.0], [-1.0, 1.0])
    }

    fn center_dot(color: Rgba) -> Shape {
        Shape::new(
            unit_square(),
            |x, y| x.abs() < 0.25 && y.abs() < 0.25,
            color,
        )
    }

    #[test]
    fn test_center_pixel_only() {
        let mut img = Image::new(5, 5, Rgba::BLACK);
        img.apply(&center_dot(Rgba::opaque(9, 9, 9)), ApplyOptions::default())
            .unwrap();

        for y in 0..5 {
            for x in 0..5 {
                let expected = if (x, y) == (2, 2) {
                    Rgba::opaque(9, 9, 9)
                } else {
                    Rgba::BLACK
                };
                assert_eq!(img.pixel(x, y), Some(expected), "pixel ({x}, {y})");
            }
        }
        assert_eq!(img.resolve(0.0, 0.0).unwrap(), (2, 2));
    }

    #[test]
    fn test_keep_domain() {
        let mut img = Image::new(5, 5, Rgba::BLACK);
        img.apply(&center_dot(Rgba::WHITE), ApplyOptions::default().keep_domain())
            .unwrap();
        assert!(img.domain().is_none());
        assert_eq!(img.pixel(2, 2), Some(Rgba::WHITE));
    }

    #[test]
    fn test_host_domain_required() {
        let mut img = Image::new(5, 5, Rgba::BLACK);
        let err = img
            .apply(&center_dot(Rgba::WHITE), ApplyOptions::host_domain())
            .unwrap_err();
        assert!(matches!(err, Error::NoDomain));
        assert_eq!(img.pixel(2, 2), Some(Rgba::BLACK));
    }

    #[test]
    fn test_host_domain_used_and_kept() {
        // host domain spans [0, 4] so only column 0 satisfies |x| < 0.25
        let host = Domain::cartesian([0.0, 4.0], [-1.0, 1.0]);
        let mut img = Image::new(5, 5, Rgba::BLACK).with_domain(host);
        let options = ApplyOptions {
            overwrite_domain: true,
            use_host_domain: true,
        };
        img.apply(&center_dot(Rgba::WHITE), options).unwrap();

        assert_eq!(img.pixel(0, 2), Some(Rgba::WHITE));
        assert_eq!(img.pixel(2, 2), Some(Rgba::BLACK));
        // the host domain survives: x = 4.0 is the last column
        assert_eq!(img.resolve(4.0, 0.0).unwrap(), (4, 2));
    }

    #[test]
    fn test_shader_only_sees_selected_points() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let shape = Shape::new(
            unit_square(),
            |_, y| y > 0.6,
            Paint::shader(move |x, _| {
                counter.fetch_add(1, Ordering::Relaxed);
                if x < 0.0 { Rgba::opaque(255, 0, 0) } else { Rgba::opaque(0, 0, 255) }
            }),
        );

        let mut img = Image::new(5, 5, Rgba::BLACK);
        img.apply(&shape, ApplyOptions::default()).unwrap();

        // only the top row (y = 1.0) is selected
        assert_eq!(calls.load(Ordering::Relaxed), 5);
        assert_eq!(img.pixel(0, 0), Some(Rgba::opaque(255, 0, 0)));
        assert_eq!(img.pixel(4, 0), Some(Rgba::opaque(0, 0, 255)));
        assert_eq!(img.pixel(0, 1), Some(Rgba::BLACK));
    }

    struct BadMask;

    impl Drawable for BadMask {
        fn domain(&self) -> Domain {
            Domain::centered()
        }

        fn mask(&self, _grids: &Grids) -> Array2<bool> {
            Array2::from_elem((1, 1), true)
        }

        fn fill(&self) -> Fill<'_> {
            Fill::Solid(Rgba::WHITE)
        }
    }

    #[test]
    fn test_bad_mask_leaves_image_untouched() {
        let mut img = Image::new(3, 3, Rgba::BLACK);
        let err = img.apply(&BadMask, ApplyOptions::default()).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { .. }));
        assert!(img.domain().is_none());
        assert_eq!(img.pixel(0, 0), Some(Rgba::BLACK));
    }

    #[test]
    fn test_dyn_drawable() {
        let drawables: Vec<Box<dyn Drawable>> = vec![
            Box::new(center_dot(Rgba::WHITE)),
            Box::new(Shape::new(unit_square(), |x, _| x < -0.9, Rgba::opaque(1, 1, 1))),
        ];
        let mut img = Image::new(5, 5, Rgba::BLACK);
        for d in &drawables {
            img.apply(d.as_ref(), ApplyOptions::default()).unwrap();
        }
        assert_eq!(img.pixel(2, 2), Some(Rgba::WHITE));
        assert_eq!(img.pixel(0, 4), Some(Rgba::opaque(1, 1, 1)));
    }
}
