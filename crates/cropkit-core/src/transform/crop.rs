//! Pixel extraction for crop operations.
//!
//! Three entry points share one row-copy routine:
//! - [`crop_region`]: crop an explicit pixel rectangle
//! - [`apply_crop`]: crop with normalized (0.0 to 1.0) coordinates
//! - [`crop_image`]: crop whatever lies under an on-screen crop rectangle,
//!   given the view transform that placed the bitmap on screen

use super::mapping::{map_crop_to_source, PixelRect};
use crate::decode::DecodedImage;
use crate::geometry::{Affine, Rect};

/// Copy a pixel region out of `image`.
///
/// The region is clamped to the image bounds, and the output is at least 1x1.
pub fn crop_region(image: &DecodedImage, region: PixelRect) -> DecodedImage {
    if image.is_empty() {
        return image.clone();
    }
    if !image.has_valid_buffer() {
        log::warn!(
            "pixel buffer does not match {}x{}; skipping crop",
            image.width,
            image.height
        );
        return image.clone();
    }

    let left = region.x.min(image.width.saturating_sub(1));
    let top = region.y.min(image.height.saturating_sub(1));
    let right = left.saturating_add(region.width).min(image.width);
    let bottom = top.saturating_add(region.height).min(image.height);

    let out_width = right.saturating_sub(left).max(1);
    let out_height = bottom.saturating_sub(top).max(1);

    // Fast path: the region covers the whole image
    if left == 0 && top == 0 && out_width == image.width && out_height == image.height {
        return image.clone();
    }

    let src_stride = image.width as usize * 3;
    let row_bytes = out_width as usize * 3;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    for y in top..top + out_height {
        let start = y as usize * src_stride + left as usize * 3;
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    DecodedImage::new(out_width, out_height, output)
}

/// Crop using normalized coordinates relative to the image dimensions.
///
/// Values outside 0.0..=1.0 are clamped. A full crop `(0, 0, 1, 1)` returns
/// a copy of the image.
pub fn apply_crop(
    image: &DecodedImage,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
) -> DecodedImage {
    let src_w = image.width as f64;
    let src_h = image.height as f64;

    let region = PixelRect::new(
        (left.clamp(0.0, 1.0) * src_w).round() as u32,
        (top.clamp(0.0, 1.0) * src_h).round() as u32,
        (width.clamp(0.0, 1.0) * src_w).round() as u32,
        (height.clamp(0.0, 1.0) * src_h).round() as u32,
    );

    crop_region(image, region)
}

/// Crop the source pixels that lie under `crop` on screen.
///
/// `view` maps source-pixel coordinates to container coordinates. If the
/// crop cannot be mapped (singular view, or no overlap with the bitmap) the
/// original image is returned unchanged.
pub fn crop_image(image: &DecodedImage, crop: &Rect, view: &Affine) -> DecodedImage {
    match map_crop_to_source(crop, view, (image.width, image.height)) {
        Some(region) => {
            log::debug!(
                "cropping {}x{} source to region {:?}",
                image.width,
                image.height,
                region
            );
            crop_region(image, region)
        }
        None => {
            log::warn!("crop rectangle {:?} does not map onto the source; keeping original", crop);
            image.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::transform::ViewParams;

    /// Each pixel holds its position so copies can be traced back.
    fn test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_region_copies_expected_pixels() {
        let img = test_image(10, 10);
        let result = crop_region(&img, PixelRect::new(2, 3, 4, 5));

        assert_eq!(result.width, 4);
        assert_eq!(result.height, 5);
        // (2, 3) -> 3 * 10 + 2
        assert_eq!(result.pixels[0], 32);
        // Last pixel is (5, 7) -> 75
        assert_eq!(*result.pixels.last().unwrap(), 75);
    }

    #[test]
    fn test_region_clamped_to_bounds() {
        let img = test_image(10, 10);
        let result = crop_region(&img, PixelRect::new(8, 8, 50, 50));
        assert_eq!((result.width, result.height), (2, 2));
    }

    #[test]
    fn test_region_minimum_one_pixel() {
        let img = test_image(10, 10);
        let result = crop_region(&img, PixelRect::new(3, 3, 0, 0));
        assert_eq!((result.width, result.height), (1, 1));
        assert_eq!(result.pixels.len(), 3);
    }

    #[test]
    fn test_region_full_image_is_identical() {
        let img = test_image(7, 5);
        let result = crop_region(&img, PixelRect::new(0, 0, 7, 5));
        assert_eq!(result.pixels, img.pixels);
    }

    #[test]
    fn test_normalized_center_crop() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, 0.2, 0.2, 0.6, 0.6);
        assert_eq!((result.width, result.height), (6, 6));
        assert_eq!(result.pixels[0], 22);
    }

    #[test]
    fn test_normalized_negative_and_oversized() {
        let img = test_image(100, 100);
        let result = apply_crop(&img, -0.1, -0.1, 0.5, 0.5);
        assert_eq!((result.width, result.height), (50, 50));
        assert_eq!(result.pixels[0], 0);

        let result = apply_crop(&img, 0.0, 0.0, 1.5, 1.5);
        assert_eq!((result.width, result.height), (100, 100));
    }

    #[test]
    fn test_crop_image_through_view() {
        let img = test_image(100, 100);
        let view = ViewParams {
            scale: 2.0,
            offset: Point::new(-20.0, -20.0),
            ..Default::default()
        }
        .to_affine();
        // Container (0,0)-(40,40) -> source (10,10)-(30,30)
        let result = crop_image(&img, &Rect::new(0.0, 0.0, 40.0, 40.0), &view);
        assert_eq!((result.width, result.height), (20, 20));
        assert_eq!(result.pixels[0], ((10 * 100 + 10) % 256) as u8);
    }

    #[test]
    fn test_crop_image_invalid_returns_original() {
        let img = test_image(20, 20);
        let result = crop_image(&img, &Rect::new(500.0, 500.0, 600.0, 600.0), &Affine::IDENTITY);
        assert_eq!(result.pixels, img.pixels);

        let singular = Affine::scale(0.0, 1.0);
        let result = crop_image(&img, &Rect::new(0.0, 0.0, 10.0, 10.0), &singular);
        assert_eq!((result.width, result.height), (20, 20));
    }

    #[test]
    fn test_mismatched_buffer_is_returned_unchanged() {
        let bad = DecodedImage {
            width: 10,
            height: 10,
            pixels: vec![0; 30],
        };
        assert_eq!(crop_region(&bad, PixelRect::new(2, 2, 4, 4)), bad);
        assert_eq!(apply_crop(&bad, 0.5, 0.5, 0.5, 0.5), bad);
    }

    #[test]
    fn test_empty_image_passthrough() {
        let img = DecodedImage::new(0, 0, vec![]);
        let result = crop_region(&img, PixelRect::new(0, 0, 5, 5));
        assert!(result.is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn create_test_image(width: u32, height: u32) -> DecodedImage {
        let pixels = (0..width * height)
            .flat_map(|i| {
                let v = (i % 256) as u8;
                [v, v, v]
            })
            .collect();
        DecodedImage::new(width, height, pixels)
    }

    proptest! {
        /// Property: output is non-empty, bounded by the input, and its buffer matches its size.
        #[test]
        fn prop_output_well_formed(
            (width, height) in (1u32..=60, 1u32..=60),
            (x, y, w, h) in (0u32..=80, 0u32..=80, 0u32..=80, 0u32..=80),
        ) {
            let img = create_test_image(width, height);
            let result = crop_region(&img, PixelRect::new(x, y, w, h));

            prop_assert!(result.width >= 1 && result.height >= 1);
            prop_assert!(result.width <= width && result.height <= height);
            prop_assert_eq!(result.pixels.len(), (result.width * result.height * 3) as usize);
        }

        /// Property: nested normalized crops compose approximately.
        #[test]
        fn prop_sequential_crops(
            (width, height) in (20u32..=50, 20u32..=50),
        ) {
            let img = create_test_image(width, height);
            let once = apply_crop(&img, 0.25, 0.25, 0.5, 0.5);
            let twice = apply_crop(&once, 0.25, 0.25, 0.5, 0.5);

            let expected_w = (width as f64 * 0.25).round() as i32;
            let expected_h = (height as f64 * 0.25).round() as i32;
            prop_assert!((twice.width as i32 - expected_w).abs() <= 2);
            prop_assert!((twice.height as i32 - expected_h).abs() <= 2);
        }
    }
}
