//! Implicit-equation primitives for building [`Shape`](crate::Shape) predicates.
//!
//! [`ellipse`] and [`circle`] return the left-hand side of their implicit
//! equation, so a disc of radius `r` is `circle(x0, y0)(x, y) <= r * r`.
//! [`thicken`] turns a curve `y = f(x)` into a band, and
//! [`extend_periodically`] tiles a function over the whole plane.

/// `(x - x0)^2 / a + (y - y0)^2 / b`.
pub fn ellipse(x0: f64, y0: f64, a: f64, b: f64) -> impl Fn(f64, f64) -> f64 + Copy + Send + Sync {
    move |x, y| (x - x0).powi(2) / a + (y - y0).powi(2) / b
}

/// `(x - x0)^2 + (y - y0)^2`.
pub fn circle(x0: f64, y0: f64) -> impl Fn(f64, f64) -> f64 + Copy + Send + Sync {
    ellipse(x0, y0, 1.0, 1.0)
}

/// Points whose `y` lies within `thickness` of `f(x)`, bounds included.
pub fn thicken<F>(f: F, thickness: f64) -> impl Fn(f64, f64) -> bool + Send + Sync
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    move |x, y| {
        let fx = f(x);
        (fx - thickness..=fx + thickness).contains(&y)
    }
}

/// Repeats `f`, defined on `x_range x y_range`, across the plane.
///
/// Points inside the rectangle (edges included) are passed through unchanged.
/// Points above a range land in `(min, max]`, points below it in `[min, max)`.
pub fn extend_periodically<F, T>(
    x_range: [f64; 2],
    y_range: [f64; 2],
    f: F,
) -> impl Fn(f64, f64) -> T + Send + Sync
where
    F: Fn(f64, f64) -> T + Send + Sync,
{
    move |x, y| f(wrap(x, x_range), wrap(y, y_range))
}

fn wrap(v: f64, [min, max]: [f64; 2]) -> f64 {
    let len = max - min;
    if len <= 0.0 {
        v
    } else if v > max {
        v - ((v - max) / len).ceil() * len
    } else if v < min {
        v + ((min - v) / len).ceil() * len
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_circle() {
        let c = circle(1.0, -1.0);
        assert_relative_eq!(c(1.0, -1.0), 0.0);
        assert_relative_eq!(c(4.0, 3.0), 25.0);
    }

    #[test]
    fn test_ellipse_scales_axes() {
        let e = ellipse(0.0, 0.0, 4.0, 0.25);
        assert_relative_eq!(e(2.0, 0.0), 1.0);
        assert_relative_eq!(e(0.0, 0.5), 1.0);
        assert_relative_eq!(e(2.0, 0.5), 2.0);
    }

    #[test]
    fn test_thicken() {
        let band = thicken(|x| 2.0 * x, 0.5);
        assert!(band(1.0, 2.0));
        assert!(band(1.0, 2.5));
        assert!(band(1.0, 1.5));
        assert!(!band(1.0, 2.6));
        assert!(!band(0.0, 2.0));
    }

    #[test]
    fn test_extend_periodically() {
        let f = extend_periodically([-1.0, 1.0], [0.0, 1.0], |x, y| (x, y));
        assert_eq!(f(0.5, 0.5), (0.5, 0.5));
        assert_eq!(f(1.0, 1.0), (1.0, 1.0));
        let (x, y) = f(2.5, -0.25);
        assert_relative_eq!(x, 0.5);
        assert_relative_eq!(y, 0.75);
        let (x, _) = f(-3.5, 0.0);
        assert_relative_eq!(x, 0.5);
    }

    #[test]
    fn test_extend_periodically_period_boundaries() {
        let f = extend_periodically([-1.0, 1.0], [-1.0, 1.0], |x, y| (x, y));
        // whole periods above max land on max, below min land on min
        for k in 1..4 {
            let shift = 2.0 * k as f64;
            let (x, y) = f(1.0 + shift, -1.0 - shift);
            assert_relative_eq!(x, 1.0);
            assert_relative_eq!(y, -1.0);
        }
        assert_relative_eq!(f(3.0, 0.0).0, 1.0);
        assert_relative_eq!(f(-3.0, 0.0).0, -1.0);
    }
}
