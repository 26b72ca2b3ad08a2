//! Image decoding for picked and captured photos.
//!
//! This module provides:
//! - Decoding JPEG and PNG bytes with EXIF orientation applied
//! - Screen-sized preview generation
//!
//! All operations are synchronous and return RGB8 [`DecodedImage`]s.
//!
//! # Examples
//!
//! ```ignore
//! use cropkit_core::decode::{decode_image, generate_preview};
//!
//! let bytes = std::fs::read("photo.jpg")?;
//! let image = decode_image(&bytes)?;
//! let preview = generate_preview(&image, 2048)?;
//! ```

mod reader;
mod resize;
mod types;

pub use reader::{
    decode_file, decode_image, decode_jpeg, decode_jpeg_no_orientation, get_orientation,
};
pub use resize::{generate_preview, resize, resize_to_fit};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
