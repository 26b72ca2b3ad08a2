//! Encoding of edited images for export.
//!
//! All operations are synchronous and allocate a fresh output buffer.
//!
//! # Examples
//!
//! ```ignore
//! use cropkit_core::encode::{encode_image, DEFAULT_JPEG_QUALITY};
//!
//! let jpeg_bytes = encode_image(&edited, DEFAULT_JPEG_QUALITY)?;
//! ```

mod jpeg;

pub use jpeg::{encode_image, encode_jpeg, EncodeError, DEFAULT_JPEG_QUALITY};
