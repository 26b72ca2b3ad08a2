//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Cropkit
//! types, handling the conversion between Rust and JavaScript data.

use cropkit_core::decode::{DecodedImage, FilterType};
use cropkit_core::transform::InterpolationFilter;
use wasm_bindgen::prelude::*;

/// A decoded RGB image for JavaScript.
///
/// # Memory Management
///
/// The pixel data lives in WASM memory. `pixels()` copies it out as a
/// `Uint8Array`, so keep images on the WASM side between operations and
/// only extract pixels for drawing.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create an image from dimensions and RGB pixel data (3 bytes per pixel).
    ///
    /// # Errors
    ///
    /// Throws if `pixels` is not exactly `width * height * 3` bytes.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsDecodedImage, JsValue> {
        let expected = width as usize * height as usize * 3;
        if pixels.len() != expected {
            return Err(JsValue::from_str(&format!(
                "pixel buffer of {} bytes does not match {}x{} (expected {})",
                pixels.len(),
                width,
                height,
                expected
            )));
        }
        Ok(JsDecodedImage {
            width,
            height,
            pixels,
        })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer.
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// RGB pixel data as a `Uint8Array` copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// RGBA pixel data with opaque alpha, ready for `ImageData`.
    pub fn rgba_pixels(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() / 3 * 4);
        for rgb in self.pixels.chunks_exact(3) {
            out.extend_from_slice(rgb);
            out.push(255);
        }
        out
    }

    /// Release WASM memory now instead of waiting for the finalizer.
    pub fn free(self) {}
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Copy into a core image for passing to core functions.
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage::new(self.width, self.height, self.pixels.clone())
    }
}

/// Convert a u8 resize filter value to the core `FilterType`.
///
/// 0 = Nearest, 1 = Bilinear, 2 = Lanczos3. Anything else is Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

/// Bilinear for previews, Lanczos3 for export.
pub(crate) fn interpolation(use_lanczos: bool) -> InterpolationFilter {
    if use_lanczos {
        InterpolationFilter::Lanczos3
    } else {
        InterpolationFilter::Bilinear
    }
}

/// Map any displayable error into a JS exception value.
pub(crate) fn js_error<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_mismatched_buffer_is_rejected() {
        assert!(JsDecodedImage::new(10, 10, vec![0; 30]).is_err());
        assert!(JsDecodedImage::new(0, 0, vec![1, 2, 3]).is_err());
        assert!(JsDecodedImage::new(1, 1, vec![1, 2, 3]).is_ok());
    }
}
