//! Lossless orientation changes: mirror flips and quarter turns.

use crate::decode::DecodedImage;
use image::{imageops, RgbImage};

/// Mirror left-to-right.
pub fn flip_horizontal(image: &DecodedImage) -> DecodedImage {
    with_rgb(image, |img| imageops::flip_horizontal(img))
}

/// Mirror top-to-bottom.
pub fn flip_vertical(image: &DecodedImage) -> DecodedImage {
    with_rgb(image, |img| imageops::flip_vertical(img))
}

/// Rotate by `turns` quarter turns, positive = clockwise.
///
/// Any integer is accepted; it is reduced modulo 4.
pub fn rotate_quarter(image: &DecodedImage, turns: i32) -> DecodedImage {
    match turns.rem_euclid(4) {
        1 => with_rgb(image, |img| imageops::rotate90(img)),
        2 => with_rgb(image, |img| imageops::rotate180(img)),
        3 => with_rgb(image, |img| imageops::rotate270(img)),
        _ => image.clone(),
    }
}

fn with_rgb(image: &DecodedImage, op: impl FnOnce(&RgbImage) -> RgbImage) -> DecodedImage {
    match image.to_rgb_image() {
        Some(rgb) => DecodedImage::from_rgb_image(op(&rgb)),
        None => {
            log::warn!(
                "pixel buffer does not match {}x{}; skipping orientation change",
                image.width,
                image.height
            );
            image.clone()
        }
    }
}
