//! # mage-io
//!
//! File I/O for [`mage_core::Image`].
//!
//! PNG is the only format. Any PNG decodes to 8-bit RGBA and images are
//! always written as 8-bit RGBA:
//!
//! ```rust,no_run
//! use mage_io::{read, write};
//!
//! let image = read("input.png")?;
//! write("output.png", &image)?;
//! # Ok::<(), mage_io::IoError>(())
//! ```
//!
//! # Dependencies
//!
//! - [`mage-core`] - Image type
//! - [`png`] - PNG codec

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod png;

pub use error::{IoError, IoResult};
pub use self::png::{decode, encode, read, write};
