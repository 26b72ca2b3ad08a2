//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode JPEG or PNG bytes with EXIF orientation applied
//! - [`decode_jpeg`] - Decode JPEG bytes only
//! - [`resize`] - Resize an image to exact dimensions
//! - [`resize_to_fit`] - Shrink an image to fit within a max edge
//! - [`generate_preview`] - Screen-sized preview for the editor
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, generate_preview } from '@cropkit/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const preview = generate_preview(image, 2048);
//! ```

use crate::types::{filter_from_u8, js_error, JsDecodedImage};
use cropkit_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a picked or captured photo (JPEG or PNG).
///
/// EXIF orientation is applied, so the result is upright.
///
/// # Errors
///
/// Throws if the bytes are not a supported image or are corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}

/// Decode JPEG bytes, rejecting anything without a JPEG SOI marker.
#[wasm_bindgen]
pub fn decode_jpeg(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_jpeg(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `filter` - 0 = Nearest, 1 = Bilinear, 2 = Lanczos3
#[wasm_bindgen]
pub fn resize(
    image: &JsDecodedImage,
    width: u32,
    height: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::resize(&image.to_decoded(), width, height, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}

/// Shrink an image so its longest edge is at most `max_edge`. Never upscales.
#[wasm_bindgen]
pub fn resize_to_fit(
    image: &JsDecodedImage,
    max_edge: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::resize_to_fit(&image.to_decoded(), max_edge, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}

#[wasm_bindgen]
pub fn generate_preview(image: &JsDecodedImage, max_edge: u32) -> Result<JsDecodedImage, JsValue> {
    decode::generate_preview(&image.to_decoded(), max_edge)
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}
