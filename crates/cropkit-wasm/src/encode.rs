//! Image encoding WASM bindings for the save flow.
//!
//! ```typescript
//! import { encode_jpeg_from_image, capture_file_name } from '@cropkit/wasm';
//!
//! const jpeg = encode_jpeg_from_image(edited, 95);
//! await saveToGallery(new Blob([jpeg], { type: 'image/jpeg' }), capture_file_name());
//! ```

use crate::types::{js_error, JsDecodedImage};
use cropkit_core::encode::{self, DEFAULT_JPEG_QUALITY};
use wasm_bindgen::prelude::*;

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `quality` - JPEG quality 1-100; 0 selects the default
///
/// # Errors
///
/// Throws if the dimensions are zero or the pixel buffer does not match them.
#[wasm_bindgen]
pub fn encode_jpeg(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, effective_quality(quality)).map_err(js_error)
}

/// Encode a `JsDecodedImage` to JPEG bytes.
#[wasm_bindgen]
pub fn encode_jpeg_from_image(image: &JsDecodedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_image(&image.to_decoded(), effective_quality(quality)).map_err(js_error)
}

/// Default export quality, for UI sliders.
#[wasm_bindgen]
pub fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

fn effective_quality(quality: u8) -> u8 {
    if quality == 0 {
        DEFAULT_JPEG_QUALITY
    } else {
        quality
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_jpeg_from_image_creates_valid_jpeg() {
        let img = JsDecodedImage::new(10, 10, vec![128u8; 10 * 10 * 3]).unwrap();
        let jpeg = encode_jpeg_from_image(&img, 90).ok().unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_zero_quality_uses_default() {
        assert_eq!(effective_quality(0), DEFAULT_JPEG_QUALITY);
        assert_eq!(effective_quality(40), 40);
        assert_eq!(default_jpeg_quality(), 95);
    }
}
