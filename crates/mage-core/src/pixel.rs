//! 8-bit RGBA color value.
//!
//! [`Rgba`] is what images are filled and painted with. Anything that looks
//! like RGB is widened to RGBA by appending full opacity (255):
//!
//! ```
//! use mage_core::Rgba;
//!
//! let red: Rgba = [255, 0, 0].into();
//! assert_eq!(red, Rgba::new(255, 0, 0, 255));
//!
//! let orange: Rgba = "#ff8000".parse().unwrap();
//! assert_eq!(orange.to_array(), [255, 128, 0, 255]);
//! ```

use std::fmt;
use std::str::FromStr;

/// Fully opaque alpha value.
pub const OPAQUE: u8 = 255;

/// An RGBA pixel with 8 bits per channel, alpha not premultiplied.
#[repr(C)]
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Debug)]
pub struct Rgba {
    /// Red channel value.
    pub r: u8,
    /// Green channel value.
    pub g: u8,
    /// Blue channel value.
    pub b: u8,
    /// Alpha channel value.
    pub a: u8,
}

impl Rgba {
    /// Transparent black, the fill of fresh layers.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, OPAQUE);
    /// Opaque white, the default image background.
    pub const WHITE: Self = Self::new(255, 255, 255, OPAQUE);

    /// Create a new RGBA pixel.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque pixel from RGB.
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, OPAQUE)
    }

    /// Returns the channels as `[r, g, b, a]`.
    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Returns the color channels as `[r, g, b]`.
    #[inline]
    pub const fn rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 4]> for Rgba {
    #[inline]
    fn from(v: [u8; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<[u8; 3]> for Rgba {
    #[inline]
    fn from(v: [u8; 3]) -> Self {
        Self::opaque(v[0], v[1], v[2])
    }
}

impl From<(u8, u8, u8, u8)> for Rgba {
    #[inline]
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<(u8, u8, u8)> for Rgba {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::opaque(r, g, b)
    }
}

impl From<Rgba> for [u8; 4] {
    #[inline]
    fn from(c: Rgba) -> Self {
        c.to_array()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid hex color: {0:?}")]
pub struct ParseColorError(String);

impl FromStr for Rgba {
    type Err = ParseColorError;

    /// Parses `rgb`, `rrggbb` or `rrggbbaa`, with an optional leading `#`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(err());
        }

        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        match hex.len() {
            3 => {
                let mut v = [0u8; 3];
                for (i, c) in hex.chars().enumerate() {
                    let d = c.to_digit(16).ok_or_else(err)? as u8;
                    v[i] = d * 17;
                }
                Ok(v.into())
            }
            6 => Ok(Self::opaque(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(err()),
        }
    }
}
