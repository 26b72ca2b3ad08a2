//! Resizing for on-screen previews.
//!
//! Full-resolution camera images are far larger than any phone screen, and
//! every rotate/flip/straighten re-renders the preview, so the editor works
//! on a copy capped at `preview_max_edge` and only touches full resolution
//! on export.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` for a zero target side and
/// `DecodeError::CorruptedFile` if the pixel buffer does not match the size.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image.to_rgb_image().ok_or_else(|| {
        DecodeError::CorruptedFile(format!(
            "pixel buffer of {} bytes does not match {}x{}",
            image.pixels.len(),
            image.width,
            image.height
        ))
    })?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());
    Ok(DecodedImage::from_rgb_image(resized))
}

/// Shrink an image so its longest edge is at most `max_edge`.
///
/// Images that already fit are returned unchanged; nothing is upscaled.
pub fn resize_to_fit(
    image: &DecodedImage,
    max_edge: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: max_edge,
            height: max_edge,
        });
    }

    if image.width <= max_edge && image.height <= max_edge {
        return Ok(image.clone());
    }

    let (width, height) = fit_dimensions(image.width, image.height, max_edge);
    resize(image, width, height, filter)
}

/// Screen-sized preview for the editor, using bilinear filtering.
pub fn generate_preview(image: &DecodedImage, max_edge: u32) -> Result<DecodedImage, DecodeError> {
    let preview = resize_to_fit(image, max_edge, FilterType::Bilinear)?;
    if preview.dimensions() != image.dimensions() {
        log::debug!(
            "preview {}x{} from {}x{}",
            preview.width,
            preview.height,
            image.width,
            image.height
        );
    }
    Ok(preview)
}

/// Dimensions with the longest edge equal to `max_edge`, aspect preserved.
fn fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;
    if width >= height {
        let h = (max_edge as f64 / ratio).round() as u32;
        (max_edge, h.max(1))
    } else {
        let w = (max_edge as f64 * ratio).round() as u32;
        (w.max(1), max_edge)
    }
}
