//! Cropkit Core - photo crop and transform library
//!
//! This crate provides the geometry and pixel work behind a mobile photo
//! editor: decoding picked or captured photos, rotate/flip/straighten,
//! an interactive crop overlay with aspect presets and guides, mapping the
//! on-screen crop back onto source pixels, and saving the result.

pub mod config;
pub mod crop;
pub mod decode;
pub mod editor;
pub mod encode;
pub mod export;
pub mod geometry;
pub mod transform;

pub use config::{ConfigError, EditorSettings};
pub use crop::{AspectRatio, CropHandle, CropSession, GuideKind, GuideLine, GuideOptions};
pub use decode::{decode_image, DecodeError, DecodedImage};
pub use editor::{Editor, EditorError, Tool};
pub use encode::{encode_jpeg, EncodeError, DEFAULT_JPEG_QUALITY};
pub use export::{save_to_gallery, ExportError, ExportTarget};
pub use geometry::{Affine, Point, Rect, Size};
pub use transform::{
    apply_transformations, crop_image, map_crop_to_source, EditParams, InterpolationFilter,
    PixelRect,
};
