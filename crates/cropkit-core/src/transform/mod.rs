//! Pixel-level transforms: rotation, flips and cropping.
//!
//! # Transform Order
//!
//! When rendering an edit, transforms are applied in this order:
//! 1. Rotation (coarse quarter turns + straighten)
//! 2. Flips
//! 3. Crop
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise on screen
//! - Pixel crops are integer rectangles; normalized crops are 0.0 to 1.0
//! - Origin is the top-left corner, y grows downward

mod compose;
mod crop;
mod mapping;
mod orient;
mod rotation;

pub use compose::{apply_transformations, EditParams};
pub use crop::{apply_crop, crop_image, crop_region};
pub use mapping::{map_crop_to_source, PixelRect, ViewParams};
pub use orient::{flip_horizontal, flip_vertical, rotate_quarter};
pub use rotation::{apply_rotation, compute_rotated_bounds, rotation_transform, InterpolationFilter};
