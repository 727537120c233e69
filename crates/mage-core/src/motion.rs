//! Constant-acceleration particle motion, sampled per animation frame.
//!
//! [`Projectile`] integrates the constant-acceleration equations
//! `s = s0 + u t + a t^2 / 2` and `v = u + a t` for a particle under vertical
//! acceleration, producing one [`State`] per frame. Changing any parameter
//! re-runs the simulation.
//!
//! ```
//! use mage_core::motion::Projectile;
//!
//! let p = Projectile::new(0.0, 0.0, 3.0, 4.0);
//! assert_eq!(p.len(), 125);
//! assert_eq!(p[0].vy, 4.0);
//! ```

use crate::domain::{fraction, lerp};
use crate::{Error, Result};
use std::fmt;
use std::ops::Index;
use tracing::debug;

/// Gravitational acceleration at the Earth's surface, pointing down.
pub const GRAVITY: f64 = -9.8;

/// Position and velocity of the particle at one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    /// Horizontal position
    pub sx: f64,
    /// Vertical position
    pub sy: f64,
    /// Horizontal velocity
    pub vx: f64,
    /// Vertical velocity
    pub vy: f64,
}

/// A particle launched from `(x0, y0)` with velocity `(ux, uy)`.
///
/// The simulation runs from `start` to `end` seconds with `end * fps` frames
/// spread evenly over that interval, both ends included.
#[derive(Debug, Clone)]
pub struct Projectile {
    x0: f64,
    y0: f64,
    ux: f64,
    uy: f64,
    start: f64,
    end: f64,
    accel: f64,
    fps: u32,
    states: Vec<State>,
}

impl Projectile {
    /// Simulates five seconds at 25 fps under [`GRAVITY`], starting at time zero.
    pub fn new(x0: f64, y0: f64, ux: f64, uy: f64) -> Self {
        let mut p = Self {
            x0,
            y0,
            ux,
            uy,
            start: 0.0,
            end: 5.0,
            accel: GRAVITY,
            fps: 25,
            states: Vec::new(),
        };
        p.simulate();
        p
    }

    fn simulate(&mut self) {
        let n = (self.end * f64::from(self.fps)).round().max(0.0) as usize;
        self.states = (0..n)
            .map(|i| self.state_at(lerp(self.start, self.end, fraction(i, n))))
            .collect();
        debug!(frames = n, start = self.start, end = self.end, "simulated projectile");
    }

    /// State at time `t`, which need not fall on a frame.
    pub fn state_at(&self, t: f64) -> State {
        State {
            sx: self.x0 + t * self.ux,
            sy: self.y0 + t * self.uy + t * t * self.accel / 2.0,
            vx: self.ux,
            vy: self.uy + t * self.accel,
        }
    }

    /// Initial horizontal position.
    pub fn x0(&self) -> f64 {
        self.x0
    }

    /// Sets the initial horizontal position.
    pub fn set_x0(&mut self, x0: f64) {
        self.x0 = x0;
        self.simulate();
    }

    /// Initial vertical position.
    pub fn y0(&self) -> f64 {
        self.y0
    }

    /// Sets the initial vertical position.
    pub fn set_y0(&mut self, y0: f64) {
        self.y0 = y0;
        self.simulate();
    }

    /// Initial horizontal velocity.
    pub fn ux(&self) -> f64 {
        self.ux
    }

    /// Sets the initial horizontal velocity.
    pub fn set_ux(&mut self, ux: f64) {
        self.ux = ux;
        self.simulate();
    }

    /// Initial vertical velocity.
    pub fn uy(&self) -> f64 {
        self.uy
    }

    /// Sets the initial vertical velocity.
    pub fn set_uy(&mut self, uy: f64) {
        self.uy = uy;
        self.simulate();
    }

    /// Start time in seconds.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Sets the start time, which must be positive and before the end time.
    pub fn set_start(&mut self, start: f64) -> Result<()> {
        if start <= 0.0 {
            return Err(Error::invalid_argument("start time must be positive"));
        }
        if start >= self.end {
            return Err(Error::invalid_argument("start time cannot be after end time"));
        }
        self.start = start;
        self.simulate();
        Ok(())
    }

    /// End time in seconds.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Sets the end time, which must be positive.
    pub fn set_end(&mut self, end: f64) -> Result<()> {
        if end <= 0.0 {
            return Err(Error::invalid_argument("end time must be positive"));
        }
        self.end = end;
        self.simulate();
        Ok(())
    }

    /// Vertical acceleration.
    pub fn accel(&self) -> f64 {
        self.accel
    }

    /// Sets the vertical acceleration.
    pub fn set_accel(&mut self, accel: f64) {
        self.accel = accel;
        self.simulate();
    }

    /// Frames per second.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Sets the frame rate, which must be non-zero.
    pub fn set_fps(&mut self, fps: u32) -> Result<()> {
        if fps == 0 {
            return Err(Error::invalid_argument("fps must be a positive integer"));
        }
        self.fps = fps;
        self.simulate();
        Ok(())
    }

    /// Every simulated frame, in time order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// `true` when the simulation produced no frames.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Horizontal positions.
    pub fn xs(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.sx).collect()
    }

    /// Vertical positions.
    pub fn ys(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.sy).collect()
    }

    /// Horizontal velocities.
    pub fn vx(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.vx).collect()
    }

    /// Vertical velocities.
    pub fn vy(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.vy).collect()
    }
}

impl Index<usize> for Projectile {
    type Output = State;

    fn index(&self, index: usize) -> &State {
        &self.states[index]
    }
}

impl fmt::Display for Projectile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Projectile Motion:")?;
        writeln!(f, "    x0:\t{:.2}m", self.x0)?;
        writeln!(f, "    y0:\t{:.2}m", self.y0)?;
        writeln!(f, "    ux:\t{:.2}m/s", self.ux)?;
        writeln!(f, "    uy:\t{:.2}m/s", self.uy)?;
        writeln!(f, "     T:\t{}s", self.end)?;
        writeln!(f, "     a:\t{:.2}m/s", self.accel)?;
        writeln!(f)?;
        write!(f, "FPS: {}", self.fps)
    }
}

/// Positions of a particle thrown from height `h` under Earth's gravity.
///
/// Returns `frames` positions sampled at 25 fps from time zero, as
/// separate x and y lists.
pub fn projectile(ux: f64, uy: f64, h: f64, frames: usize) -> (Vec<f64>, Vec<f64>) {
    (0..frames)
        .map(|i| {
            let t = i as f64 / 25.0;
            (ux * t, uy * t + GRAVITY / 2.0 * t * t + h)
        })
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let p = Projectile::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(p.len(), 125);
        assert_eq!((p.start(), p.end(), p.fps()), (0.0, 5.0, 25));
        assert_eq!(p.accel(), GRAVITY);
        assert_eq!(p[0], State { sx: 1.0, sy: 2.0, vx: 3.0, vy: 4.0 });

        let last = p[p.len() - 1];
        assert_relative_eq!(last.sx, 16.0);
        assert_relative_eq!(last.sy, 2.0 + 20.0 - 122.5);
        assert_relative_eq!(last.vx, 3.0);
        assert_relative_eq!(last.vy, 4.0 - 49.0);
    }

    #[test]
    fn test_component_lists() {
        let p = Projectile::new(0.0, 0.0, 2.0, 0.0);
        assert_eq!(p.xs().len(), p.len());
        assert!(p.vx().iter().all(|&v| v == 2.0));
        assert!(p.ys().windows(2).all(|w| w[1] < w[0]));
        assert!(p.vy().windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_setters_resimulate() {
        let mut p = Projectile::new(0.0, 0.0, 1.0, 0.0);
        p.set_ux(2.0);
        assert_relative_eq!(p[p.len() - 1].sx, 10.0);

        p.set_accel(0.0);
        assert!(p.ys().iter().all(|&y| y == 0.0));

        p.set_fps(10).unwrap();
        assert_eq!(p.len(), 50);

        p.set_end(2.0).unwrap();
        assert_eq!(p.len(), 20);

        p.set_start(1.0).unwrap();
        assert_relative_eq!(p[0].sx, 2.0);
        assert_relative_eq!(p[p.len() - 1].sx, 4.0);
    }

    #[test]
    fn test_invalid_parameters_are_rejected() {
        let mut p = Projectile::new(0.0, 0.0, 1.0, 1.0);
        assert!(p.set_start(0.0).is_err());
        assert!(p.set_start(5.0).is_err());
        assert!(p.set_end(0.0).is_err());
        let err = p.set_fps(0).unwrap_err();
        assert!(err.is_validation_error());
        assert_eq!((p.start(), p.end(), p.fps(), p.len()), (0.0, 5.0, 25, 125));
    }

    #[test]
    fn test_display() {
        let p = Projectile::new(0.0, 1.5, 2.0, 3.0);
        let text = p.to_string();
        assert!(text.starts_with("Projectile Motion:\n"));
        assert!(text.contains("    y0:\t1.50m\n"));
        assert!(text.contains("     a:\t-9.80m/s\n"));
        assert!(text.ends_with("\n\nFPS: 25"));
    }

    #[test]
    fn test_projectile_path() {
        let (xs, ys) = projectile(1.0, 2.0, 10.0, 3);
        assert_eq!(xs.len(), 3);
        assert_relative_eq!(xs[2], 0.08);
        assert_eq!(ys[0], 10.0);
        assert_relative_eq!(ys[1], 10.0 + 0.08 - 4.9 * 0.0016);
        assert!(projectile(1.0, 1.0, 0.0, 0).0.is_empty());
    }
}
