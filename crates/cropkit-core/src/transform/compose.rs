//! The rotate/straighten/flip stage of the editing pipeline.
//!
//! # Order
//!
//! 1. Rotate by `rotation + straighten` about the image centre, expanding the canvas
//! 2. Mirror the rotated result horizontally, then vertically
//!
//! Flips act on the rotated output, so a horizontal flip always mirrors what
//! the user currently sees.

use super::orient::{flip_horizontal, flip_vertical, rotate_quarter};
use super::rotation::{apply_rotation, InterpolationFilter};
use crate::decode::DecodedImage;
use serde::{Deserialize, Serialize};

/// Non-destructive orientation state applied on top of the loaded image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditParams {
    /// Coarse rotation in degrees, kept in `0..360`, positive = clockwise.
    pub rotation: i32,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    /// Fine rotation in degrees from the straighten slider.
    pub straighten: f32,
}

impl EditParams {
    pub fn is_identity(&self) -> bool {
        self.total_rotation().abs() < 0.001 && !self.flip_horizontal && !self.flip_vertical
    }

    pub fn rotate_left(&mut self) {
        self.rotation = (self.rotation - 90).rem_euclid(360);
    }

    pub fn rotate_right(&mut self) {
        self.rotation = (self.rotation + 90).rem_euclid(360);
    }

    /// Rotation actually applied to the pixels.
    pub fn total_rotation(&self) -> f32 {
        self.rotation as f32 + self.straighten
    }
}

/// Apply rotation, straighten and flips to `image`.
///
/// Exact multiples of 90 degrees take the lossless quarter-turn path; any
/// other angle is resampled with `filter`.
pub fn apply_transformations(
    image: &DecodedImage,
    params: &EditParams,
    filter: InterpolationFilter,
) -> DecodedImage {
    if params.is_identity() {
        return image.clone();
    }

    let mut out = if params.straighten.abs() < 0.001 && params.rotation % 90 == 0 {
        rotate_quarter(image, params.rotation / 90)
    } else {
        apply_rotation(image, params.total_rotation(), filter)
    };

    if params.flip_horizontal {
        out = flip_horizontal(&out);
    }
    if params.flip_vertical {
        out = flip_vertical(&out);
    }

    out
}
