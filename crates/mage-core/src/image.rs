//! The RGBA image buffer.
//!
//! This module provides:
//! - [`Image`] - Owned `(height, width, 4)` byte buffer with an optional [`Domain`]
//! - [`ImageBuilder`] - Construction from dimensions or an existing array
//! - [`ImageView`] / [`ImageViewMut`] - Borrowed sub-images
//! - [`Selection`] - Result of a read: a sub-image or a raw array
//!
//! # Coordinates
//!
//! All public indexing is `(x, y, ...)`. Storage is row-major `(y, x, channel)`,
//! so the first two components are swapped at the boundary:
//!
//! ```rust
//! use mage_core::{Image, Rgba};
//!
//! let mut img = Image::new(4, 4, Rgba::BLACK);
//! img.set((2, 1), [10, 20, 30]).unwrap();
//! assert_eq!(img.pixel(2, 1), Some(Rgba::new(10, 20, 30, 255)));
//! assert_eq!(img.as_array()[[1, 2, 0]], 10);
//! ```
//!
//! # Mathematical indexing
//!
//! With a domain attached, float bounds are snapped to the nearest pixel:
//!
//! ```rust
//! use mage_core::{Domain, Image, Rgba};
//!
//! let img = Image::new(8, 6, Rgba::WHITE).with_domain(Domain::centered());
//! let sub = img.get((-2.2..1.6, -0.9..2.1)).unwrap().into_image().unwrap();
//! assert_eq!(sub.dimensions(), (4, 3));
//! ```
//!
//! # Views
//!
//! Pixel-space reads that keep all three dimensions return an [`ImageView`]
//! borrowing the parent. [`Image::view_mut`] hands out a mutable one; writes
//! through it land in the parent.

use crate::domain::{nearest, Grids};
use crate::index::{Address, Bound, Classified, Component, MathAddress, PixelAddress, PixelComponent};
use crate::{Domain, Error, Result, Rgba};
use ndarray::{
    aview1, s, Array, Array3, ArrayBase, ArrayView1, ArrayView2, ArrayView3, ArrayViewD, ArrayViewMut2,
    ArrayViewMut3, Axis, Dimension, IxDyn, RawData, Slice,
};
use std::fmt;
use tracing::{debug, trace};

/// Number of channels in every image.
pub const CHANNELS: usize = 4;

/// Owned RGBA image.
///
/// Pixels live in an [`Array3<u8>`] of shape `(height, width, 4)` owned
/// exclusively by the image. The attached [`Domain`], if any, is only needed
/// for mathematical indexing.
#[derive(Clone)]
pub struct Image {
    pixels: Array3<u8>,
    domain: Option<Domain>,
}

impl Image {
    /// Creates an image filled with `background`.
    ///
    /// RGB backgrounds are widened to opaque RGBA.
    ///
    /// ```rust
    /// use mage_core::Image;
    ///
    /// let img = Image::new(3, 2, [0, 0, 255]);
    /// assert_eq!(img.dimensions(), (3, 2));
    /// assert_eq!(img.as_array().shape(), &[2, 3, 4]);
    /// ```
    pub fn new(width: usize, height: usize, background: impl Into<Rgba>) -> Self {
        let bg = background.into().to_array();
        debug!(width, height, background = ?bg, "new image");
        Self {
            pixels: Array3::from_shape_fn((height, width, CHANNELS), |(_, _, c)| bg[c]),
            domain: None,
        }
    }

    /// Adopts an existing array of shape `(height, width, 4)`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidShape`] if the array is not three-dimensional with 4 channels.
    pub fn from_array<D: Dimension>(pixels: Array<u8, D>) -> Result<Self> {
        let shape = pixels.shape().to_vec();
        let pixels = pixels
            .into_dimensionality::<ndarray::Ix3>()
            .map_err(|_| Error::invalid_shape(&shape))?;
        if pixels.dim().2 != CHANNELS {
            return Err(Error::invalid_shape(&shape));
        }
        Ok(Self {
            pixels,
            domain: None,
        })
    }

    /// Wraps an array already known to have 4 channels.
    pub(crate) fn from_parts(pixels: Array3<u8>) -> Self {
        debug_assert_eq!(pixels.dim().2, CHANNELS);
        Self {
            pixels,
            domain: None,
        }
    }

    /// Starts building an image; see [`ImageBuilder`].
    pub fn builder() -> ImageBuilder {
        ImageBuilder::default()
    }

    /// Attaches a domain, consuming and returning the image.
    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = Some(domain);
        self
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Returns `true` if the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// The raw `(height, width, 4)` array.
    #[inline]
    pub fn as_array(&self) -> &Array3<u8> {
        &self.pixels
    }

    /// The raw array, mutably.
    #[inline]
    pub fn as_array_mut(&mut self) -> &mut Array3<u8> {
        &mut self.pixels
    }

    /// Consumes the image, returning its pixel array.
    pub fn into_array(self) -> Array3<u8> {
        self.pixels
    }

    /// Color channels `[0, 3)` as a `(height, width, 3)` view.
    pub fn color(&self) -> ArrayView3<'_, u8> {
        self.pixels.slice(s![.., .., 0..3])
    }

    /// Mutable color channels.
    pub fn color_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        self.pixels.slice_mut(s![.., .., 0..3])
    }

    /// Alpha channel as a `(height, width)` view.
    pub fn alpha(&self) -> ArrayView2<'_, u8> {
        self.pixels.index_axis(Axis(2), 3)
    }

    /// Mutable alpha channel.
    pub fn alpha_mut(&mut self) -> ArrayViewMut2<'_, u8> {
        self.pixels.index_axis_mut(Axis(2), 3)
    }

    /// Sets the color channels of every pixel, leaving alpha alone.
    pub fn set_color(&mut self, rgb: [u8; 3]) {
        for mut lane in self.color_mut().lanes_mut(Axis(2)) {
            lane.assign(&aview1(&rgb));
        }
    }

    /// Sets the alpha of every pixel.
    pub fn set_alpha(&mut self, alpha: u8) {
        self.alpha_mut().fill(alpha);
    }

    /// The attached domain, if any.
    #[inline]
    pub fn domain(&self) -> Option<&Domain> {
        self.domain.as_ref()
    }

    /// Attaches, replaces or (with `None`) removes the domain.
    pub fn set_domain(&mut self, domain: Option<Domain>) {
        self.domain = domain;
    }

    /// Returns the pixel at `(x, y)`, or `None` if out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        (x < self.width() && y < self.height()).then(|| read_rgba(self.pixels.slice(s![y, x, ..])))
    }

    /// Sets the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if `(x, y)` lies outside the image.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: impl Into<Rgba>) -> Result<()> {
        if x >= self.width() {
            return Err(Error::out_of_bounds("x", x as isize, self.width()));
        }
        if y >= self.height() {
            return Err(Error::out_of_bounds("y", y as isize, self.height()));
        }
        self.pixels
            .slice_mut(s![y, x, ..])
            .assign(&aview1(&color.into().to_array()));
        Ok(())
    }

    /// Reads by pixel or mathematical address.
    ///
    /// Pixel addresses index storage directly. Mathematical addresses need a
    /// domain and must be a pair of spans; their bounds are snapped to the
    /// nearest pixels, with the y bounds swapped because rows grow downward.
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfBounds`] for a scalar outside its axis
    /// - [`Error::NoDomain`] for a mathematical address without a domain
    /// - [`Error::UnsupportedIndex`] for a mathematical address that is not two spans
    /// - [`Error::InvalidShape`] when a 3-D result does not keep 4 channels
    pub fn get(&self, index: impl Into<Address>) -> Result<Selection<'_>> {
        let address = index.into();
        match address.classify() {
            Classified::Pixel(px) => {
                trace!(?px, "pixel address");
                read_pixels(self.pixels.view(), &px)
            }
            Classified::Math(math) => {
                trace!(?math, "mathematical address");
                self.get_by_math(&math)
            }
        }
    }

    /// Writes `color` to every pixel selected by a pixel address.
    ///
    /// RGB colors are widened to opaque RGBA.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedIndex`] for mathematical addresses and addresses with a
    /// channel component; [`Error::OutOfBounds`] for scalars outside their axis.
    pub fn set(&mut self, index: impl Into<Address>, color: impl Into<Rgba>) -> Result<()> {
        let px = writable(index.into())?;
        let rgba = color.into().to_array();
        let mut region = select(self.pixels.view_mut().into_dyn(), &px)?;
        let channels = Axis(region.ndim() - 1);
        for mut lane in region.lanes_mut(channels) {
            lane.assign(&aview1(&rgba));
        }
        Ok(())
    }

    /// Mutable sub-image for a pixel address that keeps both spatial axes.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedIndex`] for mathematical addresses, channel components,
    /// or addresses collapsing x or y to a scalar.
    pub fn view_mut(&mut self, index: impl Into<Address>) -> Result<ImageViewMut<'_>> {
        let px = writable(index.into())?;
        let region = select(self.pixels.view_mut().into_dyn(), &px)?;
        let region = region
            .into_dimensionality::<ndarray::Ix3>()
            .map_err(|_| Error::unsupported_index("address does not select a rectangular region"))?;
        Ok(ImageViewMut { pixels: region })
    }

    /// Snaps the mathematical point `(x, y)` to its nearest pixel address.
    ///
    /// # Errors
    ///
    /// [`Error::NoDomain`] without a domain, [`Error::OutOfBounds`] on an empty image.
    pub fn resolve(&self, x: f64, y: f64) -> Result<(usize, usize)> {
        let grids = self.grids()?;
        let i = nearest(grids.columns(), x).ok_or(Error::out_of_bounds("x", 0, 0))?;
        let j = nearest(grids.rows(), y).ok_or(Error::out_of_bounds("y", 0, 0))?;
        trace!(x, y, i, j, "resolved point");
        Ok((i, j))
    }

    /// Evaluates the attached domain over this image.
    fn grids(&self) -> Result<Grids> {
        let domain = self.domain.as_ref().ok_or(Error::NoDomain)?;
        if self.is_empty() {
            return Err(Error::out_of_bounds("x", 0, self.width()));
        }
        domain.evaluate(self.width(), self.height())
    }

    fn get_by_math(&self, math: &MathAddress) -> Result<Selection<'_>> {
        if self.domain.is_none() {
            return Err(Error::NoDomain);
        }

        let (
            Component::Span { start: x0, stop: x1 },
            Component::Span { start: y0, stop: y1 },
            None,
        ) = (math.x, math.y, math.channel)
        else {
            return Err(Error::unsupported_index(
                "mathematical indexing is currently only supported for slices",
            ));
        };

        let grids = self.grids()?;
        let (columns, rows) = (grids.columns(), grids.rows());

        let px = PixelAddress {
            x: PixelComponent::Span(snap(columns, x0), snap(columns, x1)),
            y: PixelComponent::Span(snap(rows, y1), snap(rows, y0)),
            channel: None,
        };
        trace!(?px, "snapped mathematical address");
        read_pixels(self.pixels.view(), &px)
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} Image", self.width(), self.height())
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("domain", &self.domain.is_some())
            .finish()
    }
}

/// Builder mirroring the keyword-style construction interface.
///
/// Supplying `pixels` overrides `width`, `height` and `background`.
///
/// ```rust
/// use mage_core::{Error, Image};
///
/// let img = Image::builder().width(4).height(2).background([0, 0, 0]).build().unwrap();
/// assert_eq!(img.dimensions(), (4, 2));
///
/// let err = Image::builder().width(12).build().unwrap_err();
/// assert!(matches!(err, Error::MissingDimensions));
/// ```
#[derive(Debug, Clone)]
pub struct ImageBuilder {
    width: Option<usize>,
    height: Option<usize>,
    background: Rgba,
    domain: Option<Domain>,
    pixels: Option<ndarray::ArrayD<u8>>,
}

impl Default for ImageBuilder {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            background: Rgba::WHITE,
            domain: None,
            pixels: None,
        }
    }
}

impl ImageBuilder {
    /// Width in pixels.
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Height in pixels.
    pub fn height(mut self, height: usize) -> Self {
        self.height = Some(height);
        self
    }

    /// Fill color. Defaults to opaque white.
    pub fn background(mut self, color: impl Into<Rgba>) -> Self {
        self.background = color.into();
        self
    }

    /// Domain to attach.
    pub fn domain(mut self, domain: Domain) -> Self {
        self.domain = Some(domain);
        self
    }

    /// Existing pixel array of shape `(height, width, 4)`.
    pub fn pixels<D: Dimension>(mut self, pixels: Array<u8, D>) -> Self {
        self.pixels = Some(pixels.into_dyn());
        self
    }

    /// Builds the image.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidShape`] for a malformed pixel array,
    /// [`Error::MissingDimensions`] when neither pixels nor both dimensions are given.
    pub fn build(self) -> Result<Image> {
        let image = match (self.pixels, self.width, self.height) {
            (Some(pixels), _, _) => Image::from_array(pixels)?,
            (None, Some(width), Some(height)) => Image::new(width, height, self.background),
            _ => return Err(Error::MissingDimensions),
        };
        Ok(Image {
            domain: self.domain,
            ..image
        })
    }
}

/// Borrowed, read-only sub-image.
///
/// Produced by pixel-space reads; aliases the parent's storage.
#[derive(Debug, Clone)]
pub struct ImageView<'a> {
    pixels: ArrayView3<'a, u8>,
}

impl<'a> ImageView<'a> {
    /// View width.
    #[inline]
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    /// View height.
    #[inline]
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Pixel at `(x, y)` relative to the view origin.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        (x < self.width() && y < self.height()).then(|| read_rgba(self.pixels.slice(s![y, x, ..])))
    }

    /// Color channels of the view.
    pub fn color(&self) -> ArrayView3<'_, u8> {
        self.pixels.slice(s![.., .., 0..3])
    }

    /// Alpha channel of the view.
    pub fn alpha(&self) -> ArrayView2<'_, u8> {
        self.pixels.index_axis(Axis(2), 3)
    }

    /// Further pixel-space indexing relative to this view.
    ///
    /// Views carry no domain, so mathematical addresses fail with [`Error::NoDomain`].
    pub fn get(&self, index: impl Into<Address>) -> Result<Selection<'a>> {
        match index.into().classify() {
            Classified::Pixel(px) => read_pixels(self.pixels.clone(), &px),
            Classified::Math(_) => Err(Error::NoDomain),
        }
    }

    /// The underlying array view.
    pub fn as_array(&self) -> &ArrayView3<'a, u8> {
        &self.pixels
    }

    /// Copies the view into a new owned image without a domain.
    pub fn to_image(&self) -> Image {
        Image {
            pixels: self.pixels.to_owned(),
            domain: None,
        }
    }
}

/// Borrowed, mutable sub-image.
#[derive(Debug)]
pub struct ImageViewMut<'a> {
    pixels: ArrayViewMut3<'a, u8>,
}

impl<'a> ImageViewMut<'a> {
    /// View width.
    #[inline]
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    /// View height.
    #[inline]
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Pixel at `(x, y)` relative to the view origin.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        (x < self.width() && y < self.height()).then(|| read_rgba(self.pixels.slice(s![y, x, ..])))
    }

    /// Sets the pixel at `(x, y)` relative to the view origin.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] outside the view.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: impl Into<Rgba>) -> Result<()> {
        if x >= self.width() {
            return Err(Error::out_of_bounds("x", x as isize, self.width()));
        }
        if y >= self.height() {
            return Err(Error::out_of_bounds("y", y as isize, self.height()));
        }
        self.pixels
            .slice_mut(s![y, x, ..])
            .assign(&aview1(&color.into().to_array()));
        Ok(())
    }

    /// Fills the whole view.
    pub fn fill(&mut self, color: impl Into<Rgba>) {
        let rgba = color.into().to_array();
        for mut lane in self.pixels.lanes_mut(Axis(2)) {
            lane.assign(&aview1(&rgba));
        }
    }

    /// Applies `f` to every pixel of the view.
    pub fn map_pixels<F>(&mut self, f: F)
    where
        F: Fn(Rgba) -> Rgba,
    {
        for mut lane in self.pixels.lanes_mut(Axis(2)) {
            let px = f(read_rgba(lane.view()));
            lane.assign(&aview1(&px.to_array()));
        }
    }

    /// The underlying mutable array view.
    pub fn as_array_mut(&mut self) -> &mut ArrayViewMut3<'a, u8> {
        &mut self.pixels
    }
}

/// Result of reading an image.
#[derive(Debug, Clone)]
pub enum Selection<'a> {
    /// Three-dimensional result: a sub-image.
    Image(ImageView<'a>),
    /// Anything else: a row, column, pixel, channel plane or single value.
    Array(ArrayViewD<'a, u8>),
}

impl<'a> Selection<'a> {
    /// Returns the sub-image, if the read kept all three dimensions.
    pub fn into_image(self) -> Option<ImageView<'a>> {
        match self {
            Self::Image(view) => Some(view),
            Self::Array(_) => None,
        }
    }

    /// Returns the raw array behind the selection.
    pub fn into_array(self) -> ArrayViewD<'a, u8> {
        match self {
            Self::Image(view) => view.pixels.into_dyn(),
            Self::Array(arr) => arr,
        }
    }

    /// Returns the color if the selection is a single RGBA pixel.
    pub fn as_pixel(&self) -> Option<Rgba> {
        match self {
            Self::Array(arr) if arr.shape() == [CHANNELS] => {
                Some(Rgba::new(arr[[0]], arr[[1]], arr[[2]], arr[[3]]))
            }
            _ => None,
        }
    }
}

/// Nearest pixel to a bound along one axis; absent bounds stay absent.
fn snap(axis: ArrayView1<'_, f64>, bound: Option<Bound>) -> Option<isize> {
    bound
        .and_then(|b| nearest(axis, b.value()))
        .map(|i| i as isize)
}

fn read_rgba(px: ArrayView1<'_, u8>) -> Rgba {
    Rgba::new(px[0], px[1], px[2], px[3])
}

/// Checks an address can be written to and returns its pixel form.
fn writable(address: Address) -> Result<PixelAddress> {
    match address.classify() {
        Classified::Math(_) => Err(Error::unsupported_index(
            "mathematical addresses cannot be written to",
        )),
        Classified::Pixel(px) if px.channel.is_some() => Err(Error::unsupported_index(
            "addresses with a channel component cannot be written to",
        )),
        Classified::Pixel(px) => Ok(px),
    }
}

/// Pixel-space read shared by images and views.
fn read_pixels<'a>(pixels: ArrayView3<'a, u8>, px: &PixelAddress) -> Result<Selection<'a>> {
    let region = select(pixels.into_dyn(), px)?;
    if region.ndim() != 3 {
        return Ok(Selection::Array(region));
    }
    if region.shape()[2] != CHANNELS {
        return Err(Error::invalid_shape(region.shape()));
    }
    let pixels = region
        .into_dimensionality::<ndarray::Ix3>()
        .map_err(|_| Error::unsupported_index("region lost its spatial axes"))?;
    Ok(Selection::Image(ImageView { pixels }))
}

/// Applies a pixel address to a `(y, x, channel)` array.
///
/// Axes are visited from the last to the first so that dropping an axis for
/// a scalar never shifts an axis still to be visited.
fn select<S>(mut arr: ArrayBase<S, IxDyn>, px: &PixelAddress) -> Result<ArrayBase<S, IxDyn>>
where
    S: RawData<Elem = u8>,
{
    for (axis, (name, comp)) in px.storage_axes().into_iter().enumerate().rev() {
        let Some(comp) = comp else { continue };
        let len = arr.len_of(Axis(axis));
        match comp {
            PixelComponent::Index(i) => {
                let idx = PixelComponent::resolve_index(i, len)
                    .ok_or(Error::out_of_bounds(name, i, len))?;
                arr = arr.index_axis_move(Axis(axis), idx);
            }
            PixelComponent::Span(start, stop) => {
                let (start, stop) = PixelComponent::resolve_span(start, stop, len);
                arr.slice_axis_inplace(Axis(axis), Slice::from(start..stop));
            }
        }
    }
    Ok(arr)
}
