//! Error types for mage-core operations.
//!
//! Every failure in this crate is immediate and terminal for the operation
//! that raised it. Failures are detected before any pixel is touched, so no
//! rollback is ever needed.
//!
//! # Categories
//!
//! - **Validation**: [`InvalidShape`](Error::InvalidShape),
//!   [`MissingDimensions`](Error::MissingDimensions),
//!   [`UnsupportedIndex`](Error::UnsupportedIndex),
//!   [`OutOfBounds`](Error::OutOfBounds),
//!   [`InvalidArgument`](Error::InvalidArgument)
//! - **Runtime precondition**: [`NoDomain`](Error::NoDomain)
//! - **Shape**: [`DimensionMismatch`](Error::DimensionMismatch)
//!
//! Mixing an [`Image`](crate::Image) with something that is not an image is
//! rejected by the compiler, so there is no runtime type error.
//!
//! # Usage
//!
//! ```rust
//! use mage_core::{Error, Image, Rgba};
//!
//! let a = Image::new(4, 4, Rgba::BLACK);
//! let b = Image::new(8, 8, Rgba::BLACK);
//! let err = a.and(&b).unwrap_err();
//! assert!(matches!(err, Error::DimensionMismatch { .. }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, indexing or combining images.
#[derive(Debug, Error)]
pub enum Error {
    /// Pixel array does not have the shape `(height, width, 4)`.
    #[error("pixels array must have shape: (height, width, 4), got {shape:?}")]
    InvalidShape {
        /// Shape that was supplied
        shape: Vec<usize>,
    },

    /// Neither a pixel array nor both dimensions were supplied.
    #[error("if no pixels array is given you must specify a width and height")]
    MissingDimensions,

    /// Index shape is not supported by the requested operation.
    #[error("unsupported index: {0}")]
    UnsupportedIndex(String),

    /// Scalar index outside the length of its axis.
    #[error("index {index} is out of bounds for {axis} axis of length {len}")]
    OutOfBounds {
        /// Axis name (`x`, `y` or `channel`)
        axis: &'static str,
        /// Index that was requested
        index: isize,
        /// Length of the axis
        len: usize,
    },

    /// A sampling or simulation parameter is outside its allowed range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A domain is required but none is attached to the image.
    #[error("in order to index pixels by mathematical points the image must be associated with a domain")]
    NoDomain,

    /// Two images (or an image and a grid) differ in size.
    #[error("dimension mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        /// First width
        a_width: usize,
        /// First height
        a_height: usize,
        /// Second width
        b_width: usize,
        /// Second height
        b_height: usize,
    },
}

impl Error {
    /// Creates an [`Error::InvalidShape`] error.
    #[inline]
    pub fn invalid_shape(shape: &[usize]) -> Self {
        Self::InvalidShape {
            shape: shape.to_vec(),
        }
    }

    /// Creates an [`Error::UnsupportedIndex`] error.
    #[inline]
    pub fn unsupported_index(msg: impl Into<String>) -> Self {
        Self::UnsupportedIndex(msg.into())
    }

    /// Creates an [`Error::InvalidArgument`] error.
    #[inline]
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(axis: &'static str, index: isize, len: usize) -> Self {
        Self::OutOfBounds { axis, index, len }
    }

    /// Creates an [`Error::DimensionMismatch`] error from `(width, height)` pairs.
    #[inline]
    pub fn dimension_mismatch(a: (usize, usize), b: (usize, usize)) -> Self {
        Self::DimensionMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }

    /// Returns `true` for malformed construction or index arguments.
    #[inline]
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidShape { .. }
                | Self::MissingDimensions
                | Self::UnsupportedIndex(_)
                | Self::OutOfBounds { .. }
                | Self::InvalidArgument(_)
        )
    }

    /// Returns `true` if the operation needed a domain that was not attached.
    #[inline]
    pub fn is_precondition_error(&self) -> bool {
        matches!(self, Self::NoDomain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_shape_message() {
        let err = Error::invalid_shape(&[4, 4, 5]);
        assert!(err.to_string().contains("must have shape:"));
        assert!(err.to_string().contains("[4, 4, 5]"));
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_missing_dimensions_message() {
        let err = Error::MissingDimensions;
        assert!(err.to_string().contains("specify a width and height"));
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_out_of_bounds_message() {
        let err = Error::out_of_bounds("x", 12, 4);
        assert_eq!(
            err.to_string(),
            "index 12 is out of bounds for x axis of length 4"
        );
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_invalid_argument_message() {
        let err = Error::invalid_argument("num_points must be at least 2, got 1");
        assert_eq!(err.to_string(), "invalid argument: num_points must be at least 2, got 1");
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = Error::dimension_mismatch((100, 100), (200, 50));
        let msg = err.to_string();
        assert!(msg.contains("100x100"));
        assert!(msg.contains("200x50"));
        assert!(!err.is_validation_error());
    }

    #[test]
    fn test_no_domain_is_precondition() {
        assert!(Error::NoDomain.is_precondition_error());
        assert!(!Error::NoDomain.is_validation_error());
    }
}
