//! Resizing the crop rectangle by dragging one of its handles.
//!
//! # Algorithm
//!
//! 1. Move the edges owned by the handle by the drag delta
//! 2. With a fixed aspect ratio, rebuild the rectangle from the point
//!    opposite the handle. Corners and the left/right edges derive height
//!    from width; the top/bottom edges derive width from height. Edge
//!    handles grow symmetrically about the opposite edge's midpoint.
//! 3. Clamp every edge to the container, keeping `min_size` of room
//! 4. If the result is smaller than `min_size` on either axis, keep the
//!    previous rectangle

use super::{AspectRatio, CropHandle};
use crate::geometry::{Point, Rect, Size};

/// Default smallest allowed crop side, in container pixels.
pub const DEFAULT_MIN_CROP_SIZE: f32 = 50.0;

/// Apply a drag of `drag` to `handle` of `rect`.
///
/// Returns `None` only if `rect` is `None`. An update that would shrink the
/// rectangle below `min_size` returns the original rectangle.
pub fn update_crop_rect(
    rect: Option<Rect>,
    drag: Point,
    handle: CropHandle,
    aspect: AspectRatio,
    container: Size,
    min_size: f32,
) -> Option<Rect> {
    let rect = rect?;

    let moved = move_edges(&rect, drag, handle);
    let shaped = match aspect.ratio() {
        Some(ratio) => constrain_to_ratio(&moved, handle, ratio),
        None => moved,
    };

    let constrained = clamp_to_container(&shaped, container, min_size);

    if constrained.width() >= min_size && constrained.height() >= min_size {
        Some(constrained)
    } else {
        Some(rect)
    }
}

fn move_edges(rect: &Rect, drag: Point, handle: CropHandle) -> Rect {
    let mut r = *rect;
    match handle {
        CropHandle::TopLeft => {
            r.left += drag.x;
            r.top += drag.y;
        }
        CropHandle::TopRight => {
            r.right += drag.x;
            r.top += drag.y;
        }
        CropHandle::BottomLeft => {
            r.left += drag.x;
            r.bottom += drag.y;
        }
        CropHandle::BottomRight => {
            r.right += drag.x;
            r.bottom += drag.y;
        }
        CropHandle::Left => r.left += drag.x,
        CropHandle::Top => r.top += drag.y,
        CropHandle::Right => r.right += drag.x,
        CropHandle::Bottom => r.bottom += drag.y,
    }
    r
}

/// Resize `rect` to `ratio`, anchored on the edge or corner opposite `handle`.
///
/// Edge handles re-centre the result on the midpoint of the opposite edge,
/// so both cross-axis edges move rather than one of them staying put.
fn constrain_to_ratio(rect: &Rect, handle: CropHandle, ratio: f32) -> Rect {
    let fixed = handle.fixed_point(rect);

    let (width, height) = match handle {
        CropHandle::Top | CropHandle::Bottom => (rect.height() * ratio, rect.height()),
        _ => (rect.width(), rect.width() / ratio),
    };

    match handle {
        CropHandle::TopLeft => Rect::new(fixed.x - width, fixed.y - height, fixed.x, fixed.y),
        CropHandle::TopRight => Rect::new(fixed.x, fixed.y - height, fixed.x + width, fixed.y),
        CropHandle::BottomLeft => Rect::new(fixed.x - width, fixed.y, fixed.x, fixed.y + height),
        CropHandle::BottomRight => Rect::new(fixed.x, fixed.y, fixed.x + width, fixed.y + height),
        CropHandle::Left => Rect::new(
            fixed.x - width,
            fixed.y - height / 2.0,
            fixed.x,
            fixed.y + height / 2.0,
        ),
        CropHandle::Top => Rect::new(
            fixed.x - width / 2.0,
            fixed.y - height,
            fixed.x + width / 2.0,
            fixed.y,
        ),
        CropHandle::Right => Rect::new(
            fixed.x,
            fixed.y - height / 2.0,
            fixed.x + width,
            fixed.y + height / 2.0,
        ),
        CropHandle::Bottom => Rect::new(
            fixed.x - width / 2.0,
            fixed.y,
            fixed.x + width / 2.0,
            fixed.y + height,
        ),
    }
}

/// Clamp each edge independently into the container.
///
/// Uses `max().min()` rather than `clamp()` so a container smaller than
/// `min_size` degrades instead of panicking.
fn clamp_to_container(rect: &Rect, container: Size, min_size: f32) -> Rect {
    let w = container.width;
    let h = container.height;
    Rect::new(
        rect.left.max(0.0).min(w - min_size),
        rect.top.max(0.0).min(h - min_size),
        rect.right.max(min_size).min(w),
        rect.bottom.max(min_size).min(h),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: Size = Size::new(1000.0, 800.0);

    fn start() -> Rect {
        Rect::new(200.0, 200.0, 600.0, 500.0)
    }

    fn drag(handle: CropHandle, dx: f32, dy: f32, aspect: AspectRatio) -> Rect {
        update_crop_rect(
            Some(start()),
            Point::new(dx, dy),
            handle,
            aspect,
            CONTAINER,
            DEFAULT_MIN_CROP_SIZE,
        )
        .expect("rect present")
    }

    #[test]
    fn test_none_rect() {
        let result = update_crop_rect(
            None,
            Point::new(1.0, 1.0),
            CropHandle::Top,
            AspectRatio::Free,
            CONTAINER,
            50.0,
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_free_corner_moves_two_edges() {
        let r = drag(CropHandle::TopLeft, -20.0, 30.0, AspectRatio::Free);
        assert_eq!(r, Rect::new(180.0, 230.0, 600.0, 500.0));

        let r = drag(CropHandle::BottomRight, 15.0, -10.0, AspectRatio::Free);
        assert_eq!(r, Rect::new(200.0, 200.0, 615.0, 490.0));
    }

    #[test]
    fn test_free_edge_moves_one_edge() {
        let r = drag(CropHandle::Left, 10.0, 99.0, AspectRatio::Free);
        assert_eq!(r, Rect::new(210.0, 200.0, 600.0, 500.0));

        let r = drag(CropHandle::Bottom, 99.0, 25.0, AspectRatio::Free);
        assert_eq!(r, Rect::new(200.0, 200.0, 600.0, 525.0));
    }

    #[test]
    fn test_square_corner_anchors_opposite_corner() {
        let r = drag(CropHandle::TopLeft, 0.0, 0.0, AspectRatio::Square);
        // Width 400 drives height 400, anchored at bottom-right (600, 500)
        assert_eq!(r, Rect::new(200.0, 100.0, 600.0, 500.0));
    }

    #[test]
    fn test_ratio_right_edge_derives_height() {
        let r = drag(CropHandle::Right, 0.0, 0.0, AspectRatio::FourThree);
        // Width 400 -> height 300, centered on the left edge midpoint (y = 350)
        assert!((r.width() - 400.0).abs() < 1e-3);
        assert!((r.top - 200.0).abs() < 1e-3);
        assert!((r.bottom - 500.0).abs() < 1e-3);
    }

    #[test]
    fn test_ratio_right_edge_grows_height() {
        let r = drag(CropHandle::Right, 80.0, 0.0, AspectRatio::Square);
        // Width 480 -> height 480 around y = 350
        assert_eq!(r.left, 200.0);
        assert_eq!(r.right, 680.0);
        assert!((r.top - 110.0).abs() < 1e-3);
        assert!((r.bottom - 590.0).abs() < 1e-3);
    }

    #[test]
    fn test_ratio_bottom_edge_derives_width() {
        let r = drag(CropHandle::Bottom, 0.0, 0.0, AspectRatio::Square);
        // Height 300 -> width 300, centered under the top edge midpoint (x = 400)
        assert_eq!(r.top, 200.0);
        assert_eq!(r.bottom, 500.0);
        assert_eq!(r.left, 250.0);
        assert_eq!(r.right, 550.0);
    }

    #[test]
    fn test_clamped_to_container() {
        let r = drag(CropHandle::TopLeft, -500.0, -500.0, AspectRatio::Free);
        assert_eq!(r.left, 0.0);
        assert_eq!(r.top, 0.0);

        let r = drag(CropHandle::BottomRight, 900.0, 900.0, AspectRatio::Free);
        assert_eq!(r.right, 1000.0);
        assert_eq!(r.bottom, 800.0);
    }

    #[test]
    fn test_too_small_reverts() {
        // Collapse width to 10px
        let r = drag(CropHandle::Right, -390.0, 0.0, AspectRatio::Free);
        assert_eq!(r, start());
    }

    #[test]
    fn test_inverted_drag_reverts() {
        // Dragging left edge past the right edge inverts the rect
        let r = drag(CropHandle::Left, 500.0, 0.0, AspectRatio::Free);
        assert_eq!(r, start());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn handle_strategy() -> impl Strategy<Value = CropHandle> {
        (0usize..8).prop_map(|i| CropHandle::ALL[i])
    }

    fn aspect_strategy() -> impl Strategy<Value = AspectRatio> {
        (0usize..6).prop_map(|i| AspectRatio::ALL[i])
    }

    proptest! {
        /// Property: result is either the original rect or a valid rect inside the container.
        #[test]
        fn prop_result_valid_or_unchanged(
            handle in handle_strategy(),
            aspect in aspect_strategy(),
            dx in -800.0f32..=800.0,
            dy in -800.0f32..=800.0,
        ) {
            let container = Size::new(1000.0, 800.0);
            let rect = Rect::new(200.0, 200.0, 600.0, 500.0);
            let result = update_crop_rect(Some(rect), Point::new(dx, dy), handle, aspect, container, 50.0).unwrap();

            if result != rect {
                prop_assert!(result.left >= 0.0 && result.top >= 0.0);
                prop_assert!(result.right <= container.width && result.bottom <= container.height);
                prop_assert!(result.width() >= 50.0, "width {}", result.width());
                prop_assert!(result.height() >= 50.0, "height {}", result.height());
            }
        }

        /// Property: zero drag with free aspect is a no-op.
        #[test]
        fn prop_zero_drag_free_is_identity(handle in handle_strategy()) {
            let rect = Rect::new(100.0, 120.0, 400.0, 380.0);
            let result = update_crop_rect(
                Some(rect), Point::ZERO, handle, AspectRatio::Free, Size::new(1000.0, 800.0), 50.0,
            );
            prop_assert_eq!(result, Some(rect));
        }
    }
}
