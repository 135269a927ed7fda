//! Turn a plain hex byte listing into a zero-padded flash image.
//!
//! The input is a flat sequence of whitespace-separated two-digit hex tokens
//! (no addresses, no checksums). The output is the raw bytes, zero-extended to
//! the flash size.

pub mod convert;
pub mod error;
pub mod image;
pub mod report;
pub mod token;

pub use convert::{
    ConvertOptions, convert, convert_into, convert_into_with_progress, convert_with_progress,
};
pub use error::{Error, Result};
pub use image::{FINAL_SIZE, FileImage, ImageSink};
pub use report::{ByteCounts, ConversionReport};
pub use token::{
    ByteStream, decode_listing, decode_stream, decode_token, strip_carriage_returns, tokenize,
};
