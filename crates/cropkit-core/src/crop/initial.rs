//! Initial placement of the crop rectangle.

use super::AspectRatio;
use crate::geometry::{fit_size, Point, Rect, Size};

/// Default fraction of the displayed image covered by a free crop.
pub const DEFAULT_FREE_CROP_FRACTION: f32 = 0.8;

/// Crop rectangle shown when the crop tool opens or the aspect changes.
///
/// A constrained aspect takes the largest rectangle of that ratio that fits
/// the displayed image; `Free` covers `fraction` of it. The rectangle is
/// centered in the container.
pub fn initial_crop_rect(
    image: Size,
    container: Size,
    aspect: AspectRatio,
    fraction: f32,
) -> Rect {
    let display = fit_size(image, container);
    if display.is_degenerate() {
        return default_crop_rect(container, fraction);
    }

    let crop = match aspect.ratio() {
        Some(ratio) => {
            if display.width / ratio <= display.height {
                Size::new(display.width, display.width / ratio)
            } else {
                Size::new(display.height * ratio, display.height)
            }
        }
        None => Size::new(display.width * fraction, display.height * fraction),
    };

    centered(crop, container)
}

/// `fraction` of the container, centered.
pub fn default_crop_rect(container: Size, fraction: f32) -> Rect {
    if container.is_degenerate() {
        return Rect::ZERO;
    }
    let crop = Size::new(container.width * fraction, container.height * fraction);
    centered(crop, container)
}

fn centered(size: Size, container: Size) -> Rect {
    let origin = Point::new(
        (container.width - size.width) / 2.0,
        (container.height - size.height) / 2.0,
    );
    Rect::from_min_size(origin, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: Size = Size::new(1000.0, 1000.0);

    #[test]
    fn test_free_covers_fraction_of_display() {
        // 2:1 image displays as 1000x500
        let r = initial_crop_rect(Size::new(2000.0, 1000.0), CONTAINER, AspectRatio::Free, 0.8);
        assert_eq!(r, Rect::new(100.0, 300.0, 900.0, 700.0));
    }

    #[test]
    fn test_square_on_wide_display_uses_height() {
        let r = initial_crop_rect(Size::new(2000.0, 1000.0), CONTAINER, AspectRatio::Square, 0.8);
        assert_eq!(r, Rect::new(250.0, 250.0, 750.0, 750.0));
    }

    #[test]
    fn test_wide_ratio_on_square_display_uses_width() {
        let r = initial_crop_rect(
            Size::new(500.0, 500.0),
            CONTAINER,
            AspectRatio::SixteenNine,
            0.8,
        );
        assert!((r.width() - 1000.0).abs() < 1e-3);
        assert!((r.height() - 562.5).abs() < 1e-3);
        assert!((r.center().y - 500.0).abs() < 1e-3);
    }

    #[test]
    fn test_crop_fits_within_display() {
        for aspect in AspectRatio::ALL {
            let image = Size::new(3000.0, 4000.0);
            let container = Size::new(1080.0, 1600.0);
            let r = initial_crop_rect(image, container, aspect, 0.8);
            let display = fit_size(image, container);
            assert!(r.width() <= display.width + 1e-3, "{:?}", aspect);
            assert!(r.height() <= display.height + 1e-3, "{:?}", aspect);
        }
    }

    #[test]
    fn test_free_uses_given_fraction() {
        let r = initial_crop_rect(Size::new(2000.0, 1000.0), CONTAINER, AspectRatio::Free, 0.5);
        assert_eq!(r, Rect::new(250.0, 375.0, 750.0, 625.0));
        assert_eq!(default_crop_rect(CONTAINER, 0.5), Rect::new(250.0, 250.0, 750.0, 750.0));
    }

    #[test]
    fn test_degenerate_image_falls_back_to_container() {
        let r = initial_crop_rect(Size::ZERO, CONTAINER, AspectRatio::Square, 0.8);
        assert_eq!(r, Rect::new(100.0, 100.0, 900.0, 900.0));
    }

    #[test]
    fn test_degenerate_container() {
        assert_eq!(default_crop_rect(Size::ZERO, 0.8), Rect::ZERO);
        assert_eq!(
            initial_crop_rect(Size::new(10.0, 10.0), Size::ZERO, AspectRatio::Free, 0.8),
            Rect::ZERO
        );
    }
}
