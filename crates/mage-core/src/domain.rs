//! Mappings from the pixel grid to mathematical coordinates.
//!
//! A [`Domain`] turns image dimensions into a pair of coordinate [`Grids`],
//! giving the mathematical `(x, y)` of every pixel. Images carry an optional
//! domain so they can be indexed by mathematical points, and drawables bring
//! their own domain to evaluate masks and shaders on.
//!
//! # Conventions
//!
//! Grids are stored like images, `(height, width)`. The first row of
//! [`Grids::x`] holds the coordinate of each column, the first column of
//! [`Grids::y`] the coordinate of each row. Mathematical `y` usually grows
//! upward while rows grow downward, so [`Domain::cartesian`] puts `ymax` on
//! the top row.
//!
//! ```
//! use mage_core::Domain;
//!
//! let domain = Domain::cartesian([-1.0, 1.0], [-1.0, 1.0]);
//! let grids = domain.evaluate(3, 3).unwrap();
//! assert_eq!(grids.columns().to_vec(), vec![-1.0, 0.0, 1.0]);
//! assert_eq!(grids.rows().to_vec(), vec![1.0, 0.0, -1.0]);
//! ```

use crate::{Error, Result};
use ndarray::{Array1, Array2, ArrayView1};
use std::fmt;
use std::sync::Arc;

/// Coordinate grids of shape `(height, width)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grids {
    /// Mathematical x of every pixel.
    pub x: Array2<f64>,
    /// Mathematical y of every pixel.
    pub y: Array2<f64>,
}

impl Grids {
    /// Builds grids from per-column and per-row coordinates (a meshgrid).
    pub fn from_axes(columns: &Array1<f64>, rows: &Array1<f64>) -> Self {
        let dim = (rows.len(), columns.len());
        Self {
            x: Array2::from_shape_fn(dim, |(_, i)| columns[i]),
            y: Array2::from_shape_fn(dim, |(j, _)| rows[j]),
        }
    }

    /// Returns `(width, height)` of the x grid.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.x.ncols(), self.x.nrows())
    }

    /// Coordinate of each column: the first row of the x grid.
    pub fn columns(&self) -> ArrayView1<'_, f64> {
        self.x.row(0)
    }

    /// Coordinate of each row: the first column of the y grid.
    pub fn rows(&self) -> ArrayView1<'_, f64> {
        self.y.column(0)
    }
}

/// Index of the value closest to `target`.
///
/// Ties go to the lowest index. Returns `None` for an empty axis.
pub fn nearest(values: ArrayView1<'_, f64>, target: f64) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (*a - target).abs().total_cmp(&(*b - target).abs()))
        .map(|(i, _)| i)
}

type DomainFn = dyn Fn(usize, usize) -> Grids + Send + Sync;

/// Shared handle to a `(width, height) -> Grids` function.
///
/// Cloning is cheap; clones evaluate the same function.
#[derive(Clone)]
pub struct Domain {
    func: Arc<DomainFn>,
}

impl Domain {
    /// Wraps an arbitrary domain function.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(usize, usize) -> Grids + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    /// Builds a domain from per-axis functions `column -> x` and `row -> y`.
    ///
    /// Both functions also receive the axis length.
    pub fn from_axes<FX, FY>(fx: FX, fy: FY) -> Self
    where
        FX: Fn(usize, usize) -> f64 + Send + Sync + 'static,
        FY: Fn(usize, usize) -> f64 + Send + Sync + 'static,
    {
        Self::new(move |width, height| {
            let columns = Array1::from_shape_fn(width, |i| fx(i, width));
            let rows = Array1::from_shape_fn(height, |j| fy(j, height));
            Grids::from_axes(&columns, &rows)
        })
    }

    /// Linear mapping of the image onto `[xmin, xmax] x [ymin, ymax]`.
    ///
    /// The left column maps to `xmin`, the top row to `ymax`.
    pub fn cartesian(x: [f64; 2], y: [f64; 2]) -> Self {
        let [xmin, xmax] = x;
        let [ymin, ymax] = y;
        Self::from_axes(
            move |i, n| lerp(xmin, xmax, fraction(i, n)),
            move |j, n| lerp(ymax, ymin, fraction(j, n)),
        )
    }

    /// Pixel-sized units with the origin in the middle of the image.
    ///
    /// Column `i` maps to `i - width / 2`, row `j` to `height / 2 - j`.
    pub fn centered() -> Self {
        Self::from_axes(
            |i, n| i as f64 - n as f64 / 2.0,
            |j, n| n as f64 / 2.0 - j as f64,
        )
    }

    /// Cartesian mapping followed by conversion to polar `(r, theta)`.
    pub fn polar(x: [f64; 2], y: [f64; 2]) -> Self {
        let cartesian = Self::cartesian(x, y);
        Self::new(move |width, height| {
            let g = (cartesian.func)(width, height);
            Grids {
                x: ndarray::Zip::from(&g.x)
                    .and(&g.y)
                    .map_collect(|&x, &y| x.hypot(y)),
                y: ndarray::Zip::from(&g.x)
                    .and(&g.y)
                    .map_collect(|&x, &y| y.atan2(x)),
            }
        })
    }

    /// Evaluates the domain for an image of the given size.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if the function returns grids of the wrong shape.
    pub fn evaluate(&self, width: usize, height: usize) -> Result<Grids> {
        let grids = (self.func)(width, height);
        let x = (grids.x.ncols(), grids.x.nrows());
        let y = (grids.y.ncols(), grids.y.nrows());
        if x != (width, height) {
            return Err(Error::dimension_mismatch((width, height), x));
        }
        if y != (width, height) {
            return Err(Error::dimension_mismatch((width, height), y));
        }
        Ok(grids)
    }
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Domain").finish_non_exhaustive()
    }
}

#[inline]
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (1.0 - t) * a + t * b
}

#[inline]
pub(crate) fn fraction(i: usize, n: usize) -> f64 {
    if n > 1 {
        i as f64 / (n - 1) as f64
    } else {
        0.0
    }
}
