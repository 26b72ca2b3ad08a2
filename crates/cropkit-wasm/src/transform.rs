//! WASM bindings for rotate, flip, straighten and crop.
//!
//! Angles are in degrees, positive = clockwise. Pass `use_lanczos = false`
//! while the user is interacting and `true` when rendering for export.

use crate::types::{interpolation, JsDecodedImage};
use cropkit_core::transform::{self, EditParams};
use wasm_bindgen::prelude::*;

/// Rotate an image about its centre onto an expanded canvas (no clipping).
///
/// # Example (TypeScript)
///
/// ```typescript
/// const preview = apply_rotation(image, 12.5, false);
/// const exported = apply_rotation(image, 12.5, true);
/// ```
#[wasm_bindgen]
pub fn apply_rotation(
    image: &JsDecodedImage,
    angle_degrees: f32,
    use_lanczos: bool,
) -> JsDecodedImage {
    let src = image.to_decoded();
    let result = transform::apply_rotation(&src, angle_degrees, interpolation(use_lanczos));
    JsDecodedImage::from_decoded(result)
}

/// Canvas size `[width, height]` after rotating by `angle_degrees`.
#[wasm_bindgen]
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f32) -> Vec<u32> {
    let (w, h) = transform::compute_rotated_bounds(width, height, angle_degrees);
    vec![w, h]
}

/// Lossless rotation by `turns` quarter turns clockwise (negative = counter-clockwise).
#[wasm_bindgen]
pub fn rotate_quarter(image: &JsDecodedImage, turns: i32) -> JsDecodedImage {
    JsDecodedImage::from_decoded(transform::rotate_quarter(&image.to_decoded(), turns))
}

#[wasm_bindgen]
pub fn flip_horizontal(image: &JsDecodedImage) -> JsDecodedImage {
    JsDecodedImage::from_decoded(transform::flip_horizontal(&image.to_decoded()))
}

#[wasm_bindgen]
pub fn flip_vertical(image: &JsDecodedImage) -> JsDecodedImage {
    JsDecodedImage::from_decoded(transform::flip_vertical(&image.to_decoded()))
}

/// Render the combined orientation edits: rotation and straighten, then
/// horizontal flip, then vertical flip.
///
/// # Arguments
///
/// * `rotation` - Quarter-turn rotation in degrees (multiples of 90)
/// * `straighten` - Fine rotation in degrees
#[wasm_bindgen]
pub fn apply_transformations(
    image: &JsDecodedImage,
    rotation: i32,
    flip_horizontal: bool,
    flip_vertical: bool,
    straighten: f32,
    use_lanczos: bool,
) -> JsDecodedImage {
    let params = EditParams {
        rotation,
        flip_horizontal,
        flip_vertical,
        straighten,
    };
    let result =
        transform::apply_transformations(&image.to_decoded(), &params, interpolation(use_lanczos));
    JsDecodedImage::from_decoded(result)
}

/// Crop using normalized coordinates in `[0, 1]`.
///
/// ```typescript
/// // Centre 50% of the image
/// const cropped = apply_crop(image, 0.25, 0.25, 0.5, 0.5);
/// ```
#[wasm_bindgen]
pub fn apply_crop(
    image: &JsDecodedImage,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
) -> JsDecodedImage {
    let result = transform::apply_crop(&image.to_decoded(), left, top, width, height);
    JsDecodedImage::from_decoded(result)
}
