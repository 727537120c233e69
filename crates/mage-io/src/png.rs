//! PNG format support.
//!
//! Every PNG is decoded to 8-bit RGBA: palettes and low bit depths are
//! expanded, 16-bit samples are stripped to their high byte, gray is copied
//! into the three color channels, and missing alpha becomes fully opaque.
//! Writing always produces 8-bit RGBA with an sRGB chunk.
//!
//! # Example
//!
//! ```rust,no_run
//! use mage_io::png;
//!
//! let image = png::read("input.png")?;
//! png::write("output.png", &image.negate())?;
//! # Ok::<(), mage_io::IoError>(())
//! ```

use crate::{IoError, IoResult};
use mage_core::{Image, CHANNELS};
use ndarray::Array3;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Seek, Write};
use std::path::Path;
use tracing::debug;

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let image = decode(BufReader::new(file))?;
    debug!(path = %path.display(), width = image.width(), height = image.height(), "read png");
    Ok(image)
}

/// Decodes a PNG stream into an RGBA image.
pub fn decode<R: BufRead + Seek>(reader: R) -> IoResult<Image> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    buf.truncate(info.buffer_size());

    let rgba: Vec<u8> = match (info.color_type, info.bit_depth) {
        (png::ColorType::Rgba, png::BitDepth::Eight) => buf,
        (png::ColorType::Rgb, png::BitDepth::Eight) => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], u8::MAX])
            .collect(),
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => buf
            .chunks_exact(2)
            .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
            .collect(),
        (png::ColorType::Grayscale, png::BitDepth::Eight) => {
            buf.iter().flat_map(|&g| [g, g, g, u8::MAX]).collect()
        }
        (color_type, bit_depth) => {
            return Err(IoError::DecodeError(format!(
                "unexpected output layout {color_type:?} {bit_depth:?}"
            )));
        }
    };

    let shape = (info.height as usize, info.width as usize, CHANNELS);
    let pixels = Array3::from_shape_vec(shape, rgba).map_err(|e| IoError::DecodeError(e.to_string()))?;
    Ok(Image::from_array(pixels)?)
}

/// Writes an image to a PNG file.
///
/// The path must carry a `.png` extension (any case).
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    let path = path.as_ref();
    let is_png = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));
    if !is_png {
        return Err(IoError::UnsupportedFormat(path.display().to_string()));
    }

    let file = File::create(path)?;
    encode(BufWriter::new(file), image)?;
    debug!(path = %path.display(), width = image.width(), height = image.height(), "wrote png");
    Ok(())
}

/// Encodes an image as 8-bit RGBA PNG.
pub fn encode<W: Write>(writer: W, image: &Image) -> IoResult<()> {
    let width = u32::try_from(image.width()).map_err(|e| IoError::EncodeError(e.to_string()))?;
    let height = u32::try_from(image.height()).map_err(|e| IoError::EncodeError(e.to_string()))?;

    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    // storage may be non-contiguous after slicing
    let data: Vec<u8> = image.as_array().iter().copied().collect();
    png_writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    Ok(())
}
