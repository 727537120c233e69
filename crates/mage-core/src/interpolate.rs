//! Functions on `[0, 1]` sampled at evenly spaced times.
//!
//! A [`Sampler`] wraps an `f64 -> f64` function together with its values at
//! `num_points` times from `0` to `1`, both ends included. The samples are
//! recomputed whenever the function or the point count changes.
//!
//! [`linear`], [`quadratic_ease_in`] and [`quadratic_ease_out`] build
//! samplers that move from `x0` at `t = 0` to `x1` at `t = 1`.
//!
//! ```
//! use mage_core::interpolate::linear;
//!
//! let s = linear(0.0, 10.0, 5).unwrap();
//! assert_eq!(s.samples().to_vec(), vec![0.0, 2.5, 5.0, 7.5, 10.0]);
//! assert_eq!(s.call(0.5), 5.0);
//! ```

use crate::domain::{fraction, lerp};
use crate::{Error, Result};
use ndarray::{Array1, ArrayView1};
use std::fmt;
use std::ops::Index;
use std::sync::Arc;
use tracing::trace;

type SampleFn = dyn Fn(f64) -> f64 + Send + Sync;

/// A function on `[0, 1]` and its values at evenly spaced times.
#[derive(Clone)]
pub struct Sampler {
    f: Option<Arc<SampleFn>>,
    num_points: usize,
    name: Option<String>,
    data: Array1<f64>,
}

impl Sampler {
    /// Point count used by the stock constructors.
    pub const DEFAULT_POINTS: usize = 25;

    /// Samples `f` at `num_points` times. At least two points are required.
    pub fn new<F>(f: F, num_points: usize) -> Result<Self>
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::build(Some(Arc::new(f)), num_points)
    }

    /// Samples the identity, so the samples are the times themselves.
    pub fn identity(num_points: usize) -> Result<Self> {
        Self::build(None, num_points)
    }

    fn build(f: Option<Arc<SampleFn>>, num_points: usize) -> Result<Self> {
        check_points(num_points)?;
        let mut sampler = Self {
            f,
            num_points,
            name: None,
            data: Array1::zeros(0),
        };
        sampler.sample();
        Ok(sampler)
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn sample(&mut self) {
        let n = self.num_points;
        self.data = Array1::from_shape_fn(n, |i| self.call(fraction(i, n)));
        trace!(num_points = n, "resampled");
    }

    /// Evaluates the function at `x`, which need not be a sample time.
    #[inline]
    pub fn call(&self, x: f64) -> f64 {
        match &self.f {
            Some(f) => f(x),
            None => x,
        }
    }

    /// Replaces the function and resamples.
    pub fn set_function<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        self.f = Some(Arc::new(f));
        self.sample();
    }

    /// Number of sample points.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Changes the point count and resamples.
    ///
    /// Fewer than two points is rejected and leaves the sampler untouched.
    pub fn set_num_points(&mut self, num_points: usize) -> Result<()> {
        check_points(num_points)?;
        self.num_points = num_points;
        self.sample();
        Ok(())
    }

    /// Display name, `"Sampled function:"` unless one was given.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("Sampled function:")
    }

    /// Sets the display name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// The sampled values, first at `t = 0`.
    pub fn samples(&self) -> ArrayView1<'_, f64> {
        self.data.view()
    }

    /// Sample at `index`, if any.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.data.get(index).copied()
    }

    /// Number of samples. Always equal to [`num_points`](Self::num_points).
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`, a sampler holds at least two points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn check_points(num_points: usize) -> Result<()> {
    if num_points < 2 {
        return Err(Error::invalid_argument(format!(
            "num_points must be at least 2, got {num_points}"
        )));
    }
    Ok(())
}

impl Default for Sampler {
    fn default() -> Self {
        let n = Self::DEFAULT_POINTS;
        Self {
            f: None,
            num_points: n,
            name: None,
            data: Array1::from_shape_fn(n, |i| fraction(i, n)),
        }
    }
}

impl Index<usize> for Sampler {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.data[index]
    }
}

impl fmt::Display for Sampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\nNum Points: {}", self.name(), self.num_points)
    }
}

impl fmt::Debug for Sampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sampler")
            .field("name", &self.name())
            .field("num_points", &self.num_points)
            .finish_non_exhaustive()
    }
}

/// Samples `f` under the given name.
pub fn sampled<F>(name: &str, num_points: usize, f: F) -> Result<Sampler>
where
    F: Fn(f64) -> f64 + Send + Sync + 'static,
{
    Ok(Sampler::new(f, num_points)?.with_name(name))
}

/// Straight line from `x0` to `x1`.
pub fn linear(x0: f64, x1: f64, num_points: usize) -> Result<Sampler> {
    let name = format!("Linear Interpolation\nFrom:\t{x0}\nTo:\t{x1}\n");
    Ok(Sampler::new(move |t| lerp(x0, x1, t), num_points)?.with_name(name))
}

/// Parabola from `x0` to `x1` that starts slow. `a` sets the curvature; its sign is ignored.
pub fn quadratic_ease_in(x0: f64, x1: f64, a: f64) -> Sampler {
    quadratic(x0, x1, a.abs())
}

/// Parabola from `x0` to `x1` that finishes slow. `a` sets the curvature; its sign is ignored.
pub fn quadratic_ease_out(x0: f64, x1: f64, a: f64) -> Sampler {
    quadratic(x0, x1, -a.abs())
}

fn quadratic(x0: f64, x1: f64, a: f64) -> Sampler {
    let f: Arc<SampleFn> = Arc::new(move |t: f64| a * t * t + t * (x1 - x0 - a) + x0);
    let n = Sampler::DEFAULT_POINTS;
    let data = Array1::from_shape_fn(n, |i| f(fraction(i, n)));
    Sampler {
        f: Some(f),
        num_points: n,
        name: None,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::s;

    #[test]
    fn test_defaults() {
        let s = Sampler::default();
        assert_eq!(s.num_points(), 25);
        assert_eq!(s.len(), 25);
        assert_eq!(s.name(), "Sampled function:");
        assert_eq!(s.call(0.7), 0.7);
        assert_eq!(s.to_string(), "Sampled function:\nNum Points: 25");
    }

    #[test]
    fn test_num_points() {
        for n in [2, 3, 25, 100, 1000] {
            let mut s = Sampler::identity(n).unwrap();
            assert_eq!(s.num_points(), n);
            assert_eq!(s.len(), n);

            let err = s.set_num_points(1).unwrap_err();
            assert!(err.to_string().contains("at least 2"));
            assert_eq!(s.num_points(), n);
            assert_eq!(s.len(), n);
        }
        assert!(Sampler::identity(0).is_err());
        assert!(Sampler::new(|t| t, 1).is_err());
    }

    #[test]
    fn test_set_num_points_resamples() {
        let mut s = Sampler::new(|t| 2.0 * t, 3).unwrap();
        assert_eq!(s.samples().to_vec(), vec![0.0, 1.0, 2.0]);
        s.set_num_points(5).unwrap();
        assert_eq!(s.samples().to_vec(), vec![0.0, 0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_endpoints_are_exact() {
        let values = [-1e6, -3.7, 0.0, 1.0 / 3.0, 12.5, 999_999.9];
        for &x in &values {
            for &y in &values {
                let s = Sampler::new(move |t| (1.0 - t) * x + t * y, Sampler::DEFAULT_POINTS).unwrap();
                assert_eq!(s[0], x);
                assert_eq!(s[s.len() - 1], y);
            }
        }
    }

    #[test]
    fn test_set_function() {
        let mut s = Sampler::default();
        for x in [-2.5, 0.0, 3.0, 1e6] {
            assert_eq!(s.call(x), x);
        }
        s.set_function(|y| y * y);
        for x in [-2.5, 0.0, 3.0, 1e6] {
            assert_eq!(s.call(x), x * x);
        }
        assert_eq!(s[12], 0.25);
    }

    #[test]
    fn test_indexing() {
        for n in [2, 10, 57] {
            let s = Sampler::identity(n + 10).unwrap();
            assert_eq!(s[0], 0.0);
            assert_eq!(s[s.len() - 1], 1.0);
            assert_eq!(s.samples().slice(s![..-10]).len(), n);
            assert_eq!(s.get(n + 10), None);
        }
    }

    #[test]
    fn test_sampled_carries_name() {
        let s = sampled("cube", 4, |t| t * t * t).unwrap();
        assert_eq!(s.name(), "cube");
        assert_relative_eq!(s[1], 1.0 / 27.0);
        assert_eq!(s.to_string(), "cube\nNum Points: 4");
    }

    #[test]
    fn test_linear() {
        let s = linear(2.0, -2.0, 5).unwrap();
        assert_eq!(s.samples().to_vec(), vec![2.0, 1.0, 0.0, -1.0, -2.0]);
        assert!(s.name().starts_with("Linear Interpolation"));
        assert!(s.name().contains("From:\t2"));
        assert!(linear(0.0, 1.0, 1).is_err());
    }

    #[test]
    fn test_quadratic_easing() {
        let ease_in = quadratic_ease_in(0.0, 1.0, -2.0);
        let ease_out = quadratic_ease_out(0.0, 1.0, 2.0);
        for s in [&ease_in, &ease_out] {
            assert_eq!(s.len(), Sampler::DEFAULT_POINTS);
            assert_relative_eq!(s[0], 0.0);
            assert_relative_eq!(s[s.len() - 1], 1.0);
        }
        // a = 2: 2t^2 - t, a = -2: -2t^2 + 3t
        assert_relative_eq!(ease_in.call(0.5), 0.0);
        assert_relative_eq!(ease_out.call(0.5), 1.0);
        assert!(ease_in.call(0.25) < 0.25);
        assert!(ease_out.call(0.25) > 0.25);
    }
}
