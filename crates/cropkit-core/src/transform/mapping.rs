//! Mapping a crop rectangle from container space back into source pixels.
//!
//! The on-screen image is the source bitmap pushed through a view transform
//! `T` (fit, zoom, rotation, pan). To find which source pixels lie under the
//! crop rectangle we invert `T`, map the rectangle's four corners through
//! `T⁻¹`, take their axis-aligned bounding box and clamp it to the bitmap.

use crate::geometry::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};

/// An integer pixel region inside a bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Normalized `(left, top, width, height)` relative to a `width x height` bitmap.
    pub fn normalized(&self, width: u32, height: u32) -> (f64, f64, f64, f64) {
        let w = width.max(1) as f64;
        let h = height.max(1) as f64;
        (
            self.x as f64 / w,
            self.y as f64 / h,
            self.width as f64 / w,
            self.height as f64 / h,
        )
    }
}

/// Gesture state of the image under the crop overlay, without layout fit.
///
/// `to_affine` builds `scale ∘ rotate ∘ translate` about the origin, which is
/// the right transform when the bitmap is drawn at its natural size at the
/// container origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewParams {
    pub scale: f32,
    /// Degrees, clockwise on screen.
    pub rotation: f32,
    pub offset: Point,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation: 0.0,
            offset: Point::ZERO,
        }
    }
}

impl ViewParams {
    pub fn to_affine(&self) -> Affine {
        Affine::scale(self.scale, self.scale)
            .post_rotate(self.rotation)
            .post_translate(self.offset.x, self.offset.y)
    }
}

/// Source-pixel region under `crop`, or `None` if the view is singular or the
/// crop lies entirely outside the bitmap.
pub fn map_crop_to_source(crop: &Rect, view: &Affine, source: (u32, u32)) -> Option<PixelRect> {
    let (src_w, src_h) = source;
    if src_w == 0 || src_h == 0 {
        return None;
    }

    let inverse = view.invert()?;
    let bounds = inverse.map_rect_bounds(crop);

    let left = bounds.left.max(0.0);
    let top = bounds.top.max(0.0);
    let right = bounds.right.min(src_w as f32);
    let bottom = bounds.bottom.min(src_h as f32);

    if !(left.is_finite() && top.is_finite() && right.is_finite() && bottom.is_finite()) {
        return None;
    }

    // Truncate toward zero, matching integer pixel extraction
    let x = snap(left) as i64;
    let y = snap(top) as i64;
    let width = snap(right) as i64 - x;
    let height = snap(bottom) as i64 - y;

    if width <= 0 || height <= 0 {
        return None;
    }

    Some(PixelRect::new(x as u32, y as u32, width as u32, height as u32))
}

/// Round values that are within float noise of an integer, so a corner
/// landing at 19.99999 after a rotation still truncates to 20.
#[inline]
fn snap(v: f32) -> f32 {
    let rounded = v.round();
    if (v - rounded).abs() < 1e-3 {
        rounded
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_view_maps_directly() {
        let crop = Rect::new(10.0, 20.0, 60.0, 80.0);
        let region = map_crop_to_source(&crop, &Affine::IDENTITY, (100, 100)).unwrap();
        assert_eq!(region, PixelRect::new(10, 20, 50, 60));
    }

    #[test]
    fn test_scaled_view() {
        // Image drawn at 2x: container 100px = 50 source px
        let view = ViewParams {
            scale: 2.0,
            ..Default::default()
        }
        .to_affine();
        let crop = Rect::new(20.0, 20.0, 120.0, 100.0);
        let region = map_crop_to_source(&crop, &view, (200, 200)).unwrap();
        assert_eq!(region, PixelRect::new(10, 10, 50, 40));
    }

    #[test]
    fn test_panned_view() {
        let view = ViewParams {
            offset: Point::new(30.0, -10.0),
            ..Default::default()
        }
        .to_affine();
        let crop = Rect::new(30.0, 0.0, 80.0, 50.0);
        let region = map_crop_to_source(&crop, &view, (100, 100)).unwrap();
        assert_eq!(region, PixelRect::new(0, 10, 50, 50));
    }

    #[test]
    fn test_rotated_view_uses_bounding_box() {
        let view = ViewParams {
            rotation: 90.0,
            offset: Point::new(100.0, 0.0),
            ..Default::default()
        }
        .to_affine();
        // Source (x, y) lands at (100 - y, x); a container crop over
        // x in [60, 100], y in [0, 20] covers source x in [0, 20], y in [0, 40]
        let crop = Rect::new(60.0, 0.0, 100.0, 20.0);
        let region = map_crop_to_source(&crop, &view, (100, 100)).unwrap();
        assert_eq!(region, PixelRect::new(0, 0, 20, 40));
    }

    #[test]
    fn test_clamped_to_source_bounds() {
        let crop = Rect::new(-50.0, -50.0, 500.0, 500.0);
        let region = map_crop_to_source(&crop, &Affine::IDENTITY, (120, 80)).unwrap();
        assert_eq!(region, PixelRect::new(0, 0, 120, 80));
    }

    #[test]
    fn test_outside_source_is_none() {
        let crop = Rect::new(200.0, 200.0, 300.0, 300.0);
        assert!(map_crop_to_source(&crop, &Affine::IDENTITY, (100, 100)).is_none());
    }

    #[test]
    fn test_singular_view_is_none() {
        let crop = Rect::new(0.0, 0.0, 10.0, 10.0);
        let view = Affine::scale(0.0, 0.0);
        assert!(map_crop_to_source(&crop, &view, (100, 100)).is_none());
    }

    #[test]
    fn test_empty_source_is_none() {
        let crop = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(map_crop_to_source(&crop, &Affine::IDENTITY, (0, 10)).is_none());
    }

    #[test]
    fn test_normalized() {
        let r = PixelRect::new(25, 50, 50, 100);
        assert_eq!(r.normalized(100, 200), (0.25, 0.25, 0.5, 0.5));
        assert_eq!(r.right(), 75);
        assert_eq!(r.bottom(), 150);
    }
}
