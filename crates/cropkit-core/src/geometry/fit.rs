//! Content-scale "fit" layout: scale an image into a container while
//! preserving its aspect ratio, centered on both axes.

use super::{Affine, Point, Rect, Size};

/// Displayed size of `image` when fitted inside `container`.
///
/// Returns `Size::ZERO` if either size is degenerate.
pub fn fit_size(image: Size, container: Size) -> Size {
    if image.is_degenerate() || container.is_degenerate() {
        return Size::ZERO;
    }

    let image_ratio = image.aspect_ratio();
    let container_ratio = container.aspect_ratio();

    if image_ratio > container_ratio {
        let width = container.width;
        Size::new(width, width / image_ratio)
    } else {
        let height = container.height;
        Size::new(height * image_ratio, height)
    }
}

/// Fitted display rectangle, centered in the container.
pub fn fit_rect(image: Size, container: Size) -> Rect {
    let fitted = fit_size(image, container);
    if fitted.is_degenerate() {
        return Rect::ZERO;
    }
    let origin = Point::new(
        (container.width - fitted.width) / 2.0,
        (container.height - fitted.height) / 2.0,
    );
    Rect::from_min_size(origin, fitted)
}

/// Transform from source-pixel coordinates to the fitted display rectangle.
pub fn fit_transform(image: Size, container: Size) -> Affine {
    let rect = fit_rect(image, container);
    if rect.is_empty() {
        return Affine::IDENTITY;
    }
    let scale = rect.width() / image.width;
    Affine::scale(scale, scale).post_translate(rect.left, rect.top)
}
