//! Arbitrary-angle rotation with bilinear and Lanczos3 interpolation.
//!
//! Used for the straighten slider and for any total rotation that is not a
//! multiple of 90 degrees (quarter turns go through [`super::rotate_quarter`],
//! which is lossless).
//!
//! # Algorithm
//!
//! The forward transform moves the source centre to the origin, rotates, and
//! moves the origin to the centre of the expanded canvas:
//!
//! ```text
//! F = translate(-src_c) · rotate(θ) · translate(dst_c)
//! ```
//!
//! Each output pixel is filled by pushing its coordinates through `F⁻¹` and
//! sampling the source there. Pixels that fall outside the source are black.
//!
//! # Coordinate System
//!
//! Angles are in degrees, positive = clockwise on screen (y axis down).

use crate::decode::DecodedImage;
use crate::geometry::{Affine, Point};
use serde::{Deserialize, Serialize};

/// Interpolation filter for rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationFilter {
    /// Fast, used for on-screen previews.
    #[default]
    Bilinear,
    /// Sharper, used for export.
    Lanczos3,
}

/// Size of the canvas that holds a `width x height` image rotated by `angle_degrees`.
///
/// Multiples of 90 degrees are exact; other angles round to the nearest pixel
/// and never return a zero dimension.
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f32) -> (u32, u32) {
    let normalized = (angle_degrees as f64).rem_euclid(360.0);
    let near = |target: f64| (normalized - target).abs() < 0.001;

    if near(0.0) || near(360.0) || near(180.0) {
        return (width, height);
    }
    if near(90.0) || near(270.0) {
        return (height, width);
    }

    let rad = normalized.to_radians();
    let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
    let (w, h) = (width as f64, height as f64);

    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Forward transform from source pixel coordinates to the rotated canvas.
///
/// Coordinates are continuous: pixel `(x, y)` covers `x..x + 1`, so the
/// centre of the image is `(width / 2, height / 2)`.
pub fn rotation_transform(width: u32, height: u32, angle_degrees: f32) -> Affine {
    let (dst_w, dst_h) = compute_rotated_bounds(width, height, angle_degrees);
    Affine::translate(-(width as f32) / 2.0, -(height as f32) / 2.0)
        .post_rotate(angle_degrees)
        .post_translate(dst_w as f32 / 2.0, dst_h as f32 / 2.0)
}

/// Rotate `image` about its centre onto an expanded canvas.
///
/// # Arguments
///
/// * `image` - Source image
/// * `angle_degrees` - Rotation angle, positive = clockwise
/// * `filter` - Bilinear for previews, Lanczos3 for export
///
/// # Returns
///
/// A new image large enough to hold every rotated source pixel. Angles that
/// are effectively zero return a copy of the input.
pub fn apply_rotation(
    image: &DecodedImage,
    angle_degrees: f32,
    filter: InterpolationFilter,
) -> DecodedImage {
    if angle_degrees.abs() < 0.001 || image.is_empty() {
        return image.clone();
    }
    if !image.has_valid_buffer() {
        log::warn!(
            "pixel buffer does not match {}x{}; skipping rotation",
            image.width,
            image.height
        );
        return image.clone();
    }

    let (dst_w, dst_h) = compute_rotated_bounds(image.width, image.height, angle_degrees);
    let inverse = match rotation_transform(image.width, image.height, angle_degrees).invert() {
        Some(inverse) => inverse,
        None => return image.clone(),
    };

    let mut output = vec![0u8; dst_w as usize * dst_h as usize * 3];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            // Sample at pixel centres, then back to source pixel indices
            let src = inverse.map_point(Point::new(dst_x as f32 + 0.5, dst_y as f32 + 0.5));
            let (sx, sy) = (src.x as f64 - 0.5, src.y as f64 - 0.5);

            let pixel = match filter {
                InterpolationFilter::Bilinear => sample_bilinear(image, sx, sy),
                InterpolationFilter::Lanczos3 => sample_lanczos3(image, sx, sy),
            };

            let idx = (dst_y as usize * dst_w as usize + dst_x as usize) * 3;
            output[idx..idx + 3].copy_from_slice(&pixel);
        }
    }

    DecodedImage::new(dst_w, dst_h, output)
}

#[inline]
fn get_pixel_f64(image: &DecodedImage, px: usize, py: usize) -> [f64; 3] {
    let idx = (py * image.width as usize + px) * 3;
    [
        image.pixels[idx] as f64,
        image.pixels[idx + 1] as f64,
        image.pixels[idx + 2] as f64,
    ]
}

/// Weighted blend of the 4 nearest pixels.
///
/// Samples inside the footprint of an edge pixel (up to half a pixel past
/// its centre) take the edge value; anything further out is black.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    let (w, h) = (image.width as f64, image.height as f64);

    if x < -0.5 || y < -0.5 || x > w - 0.5 || y > h - 0.5 {
        return [0, 0, 0];
    }
    let x = x.max(0.0).min(w - 1.0);
    let y = y.max(0.0).min(h - 1.0);

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    // Clamp so the last row/column samples itself instead of running off the edge
    let x1 = (x0 + 1).min(image.width as usize - 1);
    let y1 = (y0 + 1).min(image.height as usize - 1);

    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = get_pixel_f64(image, x0, y0);
    let p10 = get_pixel_f64(image, x1, y0);
    let p01 = get_pixel_f64(image, x0, y1);
    let p11 = get_pixel_f64(image, x1, y1);

    let mut result = [0u8; 3];
    for i in 0..3 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}

/// 6x6 Lanczos3 kernel. Falls back to bilinear within 3px of the border.
fn sample_lanczos3(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    let (w, h) = (image.width as i64, image.height as i64);

    if x < 2.0 || x >= (w - 3) as f64 || y < 2.0 || y >= (h - 3) as f64 {
        return sample_bilinear(image, x, y);
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let mut sum = [0.0f64; 3];
    let mut weight_sum = 0.0;

    for ky in -2..=3 {
        for kx in -2..=3 {
            let px = x0 + kx;
            let py = y0 + ky;
            let weight = lanczos_weight(x - px as f64, 3.0) * lanczos_weight(y - py as f64, 3.0);

            let pixel = get_pixel_f64(image, px as usize, py as usize);
            for i in 0..3 {
                sum[i] += pixel[i] * weight;
            }
            weight_sum += weight;
        }
    }

    let mut result = [0u8; 3];
    if weight_sum > 0.0 {
        for i in 0..3 {
            result[i] = (sum[i] / weight_sum).clamp(0.0, 255.0).round() as u8;
        }
    }

    result
}

/// `sinc(x) * sinc(x / a)` for `|x| < a`, zero outside.
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;
    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}
