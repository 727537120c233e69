//! Image addresses and their classification.
//!
//! Images are indexed in `(x, y)` or `(x, y, channel)` order, while storage is
//! `(y, x, channel)`. An [`Address`] carries one [`Component`] per axis, each
//! either a scalar or a half-open span. A component is a *pixel* component
//! when it only holds integer bounds, and a *mathematical* component when it
//! holds at least one float ([`Bound::Coord`]). A single mathematical
//! component makes the whole address mathematical:
//!
//! ```
//! use mage_core::index::{Address, Classified};
//!
//! let px = Address::from((1..3, 2));
//! assert!(matches!(px.classify(), Classified::Pixel(_)));
//!
//! let math = Address::from((-0.5..0.5, 2));
//! assert!(matches!(math.classify(), Classified::Math(_)));
//! ```
//!
//! Negative pixel indices count from the end of their axis.

use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

/// One end of an index component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// Integer storage position.
    Pixel(isize),
    /// Point in the coordinate system of a domain.
    Coord(f64),
}

impl Bound {
    /// Returns the bound as a coordinate value.
    #[inline]
    pub fn value(self) -> f64 {
        match self {
            Self::Pixel(i) => i as f64,
            Self::Coord(v) => v,
        }
    }

    /// Returns `true` for [`Bound::Coord`].
    #[inline]
    pub fn is_coord(self) -> bool {
        matches!(self, Self::Coord(_))
    }
}

/// Index along a single axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Component {
    /// A single position; the axis is dropped from the result.
    Scalar(Bound),
    /// A half-open run `start..stop`; absent bounds extend to the axis ends.
    Span {
        /// Inclusive start.
        start: Option<Bound>,
        /// Exclusive stop.
        stop: Option<Bound>,
    },
}

impl Component {
    /// The whole axis (`..`).
    pub const FULL: Self = Self::Span {
        start: None,
        stop: None,
    };

    /// Returns `true` when this component addresses storage directly.
    pub fn is_pixel(&self) -> bool {
        match *self {
            Self::Scalar(b) => !b.is_coord(),
            Self::Span { start, stop } => {
                !start.is_some_and(Bound::is_coord) && !stop.is_some_and(Bound::is_coord)
            }
        }
    }

    /// Converts to a pixel component, treating any coordinate as its integer part.
    ///
    /// Only called on components that passed [`is_pixel`](Self::is_pixel).
    fn to_pixel(self) -> PixelComponent {
        let pixel = |b: Bound| match b {
            Bound::Pixel(i) => i,
            Bound::Coord(v) => v as isize,
        };
        match self {
            Self::Scalar(b) => PixelComponent::Index(pixel(b)),
            Self::Span { start, stop } => PixelComponent::Span(start.map(pixel), stop.map(pixel)),
        }
    }
}

/// Values past `isize::MAX` saturate, so they stay out of range instead of wrapping negative.
#[inline]
fn to_isize<T: TryInto<isize>>(i: T) -> isize {
    i.try_into().unwrap_or(isize::MAX)
}

macro_rules! component_from_int {
    ($($t:ty),*) => {$(
        impl From<$t> for Component {
            #[inline]
            fn from(i: $t) -> Self {
                Self::Scalar(Bound::Pixel(to_isize(i)))
            }
        }

        impl From<Range<$t>> for Component {
            #[inline]
            fn from(r: Range<$t>) -> Self {
                Self::Span {
                    start: Some(Bound::Pixel(to_isize(r.start))),
                    stop: Some(Bound::Pixel(to_isize(r.end))),
                }
            }
        }

        impl From<RangeFrom<$t>> for Component {
            #[inline]
            fn from(r: RangeFrom<$t>) -> Self {
                Self::Span {
                    start: Some(Bound::Pixel(to_isize(r.start))),
                    stop: None,
                }
            }
        }

        impl From<RangeTo<$t>> for Component {
            #[inline]
            fn from(r: RangeTo<$t>) -> Self {
                Self::Span {
                    start: None,
                    stop: Some(Bound::Pixel(to_isize(r.end))),
                }
            }
        }
    )*};
}

component_from_int!(i32, isize, usize);

impl From<f64> for Component {
    #[inline]
    fn from(v: f64) -> Self {
        Self::Scalar(Bound::Coord(v))
    }
}

impl From<Range<f64>> for Component {
    #[inline]
    fn from(r: Range<f64>) -> Self {
        Self::Span {
            start: Some(Bound::Coord(r.start)),
            stop: Some(Bound::Coord(r.end)),
        }
    }
}

impl From<RangeFrom<f64>> for Component {
    #[inline]
    fn from(r: RangeFrom<f64>) -> Self {
        Self::Span {
            start: Some(Bound::Coord(r.start)),
            stop: None,
        }
    }
}

impl From<RangeTo<f64>> for Component {
    #[inline]
    fn from(r: RangeTo<f64>) -> Self {
        Self::Span {
            start: None,
            stop: Some(Bound::Coord(r.end)),
        }
    }
}

impl From<RangeFull> for Component {
    #[inline]
    fn from(_: RangeFull) -> Self {
        Self::FULL
    }
}

/// A full image index in public `(x, y, channel)` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Address {
    /// Column component.
    pub x: Component,
    /// Row component.
    pub y: Component,
    /// Optional channel component; `None` keeps all four channels.
    pub channel: Option<Component>,
}

impl Address {
    /// Creates an address from explicit components.
    pub fn new(x: impl Into<Component>, y: impl Into<Component>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            channel: None,
        }
    }

    /// A bare x index: every row of the given column(s), i.e. `[:, x]` in storage terms.
    pub fn column(x: impl Into<Component>) -> Self {
        Self::new(x, Component::FULL)
    }

    /// Adds a channel component.
    pub fn with_channel(mut self, channel: impl Into<Component>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Decides whether this address refers to pixels or to mathematical points.
    pub fn classify(self) -> Classified {
        let all_pixel = self.x.is_pixel()
            && self.y.is_pixel()
            && self.channel.as_ref().is_none_or(Component::is_pixel);

        if all_pixel {
            Classified::Pixel(PixelAddress {
                x: self.x.to_pixel(),
                y: self.y.to_pixel(),
                channel: self.channel.map(Component::to_pixel),
            })
        } else {
            Classified::Math(MathAddress {
                x: self.x,
                y: self.y,
                channel: self.channel,
            })
        }
    }
}

impl<X, Y> From<(X, Y)> for Address
where
    X: Into<Component>,
    Y: Into<Component>,
{
    fn from((x, y): (X, Y)) -> Self {
        Self::new(x, y)
    }
}

impl<X, Y, C> From<(X, Y, C)> for Address
where
    X: Into<Component>,
    Y: Into<Component>,
    C: Into<Component>,
{
    fn from((x, y, c): (X, Y, C)) -> Self {
        Self::new(x, y).with_channel(c)
    }
}

/// Result of [`Address::classify`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classified {
    /// Every component addresses storage directly.
    Pixel(PixelAddress),
    /// At least one component is a mathematical coordinate.
    Math(MathAddress),
}

/// Pixel-space component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelComponent {
    /// Single position.
    Index(isize),
    /// Half-open run.
    Span(Option<isize>, Option<isize>),
}

impl PixelComponent {
    /// Resolves a scalar against an axis of length `len`.
    ///
    /// Negative values count from the end. Returns `None` when out of range.
    pub fn resolve_index(i: isize, len: usize) -> Option<usize> {
        let idx = if i < 0 { len as isize + i } else { i };
        (0..len as isize).contains(&idx).then_some(idx as usize)
    }

    /// Resolves span bounds against an axis of length `len`, clamping like slicing does.
    pub fn resolve_span(start: Option<isize>, stop: Option<isize>, len: usize) -> (usize, usize) {
        let clamp = |b: isize| {
            let b = if b < 0 { len as isize + b } else { b };
            b.clamp(0, len as isize) as usize
        };
        let start = start.map_or(0, clamp);
        let stop = stop.map_or(len, clamp);
        (start, stop.max(start))
    }
}

/// Address whose components all refer to storage positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelAddress {
    /// Column component.
    pub x: PixelComponent,
    /// Row component.
    pub y: PixelComponent,
    /// Optional channel component.
    pub channel: Option<PixelComponent>,
}

impl PixelAddress {
    /// Components in storage order `(y, x, channel)`, paired with axis names.
    pub(crate) fn storage_axes(&self) -> [(&'static str, Option<PixelComponent>); 3] {
        [("y", Some(self.y)), ("x", Some(self.x)), ("channel", self.channel)]
    }
}

/// Address with at least one mathematical component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MathAddress {
    /// Column component.
    pub x: Component,
    /// Row component.
    pub y: Component,
    /// Optional channel component.
    pub channel: Option<Component>,
}
