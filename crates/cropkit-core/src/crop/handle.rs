//! The eight crop-rectangle handles and pointer hit-testing.

use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A draggable control point on the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Left,
    Top,
    Right,
    Bottom,
}

impl CropHandle {
    /// Hit-test priority order: corners before edges.
    pub const ALL: [CropHandle; 8] = [
        CropHandle::TopLeft,
        CropHandle::TopRight,
        CropHandle::BottomLeft,
        CropHandle::BottomRight,
        CropHandle::Left,
        CropHandle::Top,
        CropHandle::Right,
        CropHandle::Bottom,
    ];

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            CropHandle::TopLeft
                | CropHandle::TopRight
                | CropHandle::BottomLeft
                | CropHandle::BottomRight
        )
    }

    /// Where this handle sits on `rect`.
    pub fn anchor(self, rect: &Rect) -> Point {
        match self {
            CropHandle::TopLeft => rect.top_left(),
            CropHandle::TopRight => rect.top_right(),
            CropHandle::BottomLeft => rect.bottom_left(),
            CropHandle::BottomRight => rect.bottom_right(),
            CropHandle::Left => rect.center_left(),
            CropHandle::Top => rect.top_center(),
            CropHandle::Right => rect.center_right(),
            CropHandle::Bottom => rect.bottom_center(),
        }
    }

    /// The point that stays put while this handle is dragged.
    pub fn fixed_point(self, rect: &Rect) -> Point {
        self.opposite().anchor(rect)
    }

    pub fn opposite(self) -> CropHandle {
        match self {
            CropHandle::TopLeft => CropHandle::BottomRight,
            CropHandle::TopRight => CropHandle::BottomLeft,
            CropHandle::BottomLeft => CropHandle::TopRight,
            CropHandle::BottomRight => CropHandle::TopLeft,
            CropHandle::Left => CropHandle::Right,
            CropHandle::Top => CropHandle::Bottom,
            CropHandle::Right => CropHandle::Left,
            CropHandle::Bottom => CropHandle::Top,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }
}

/// Find the handle under `point`, if any.
///
/// Each handle's hit area extends `handle_size` from its anchor in every
/// direction. Corners win over edges when areas overlap.
pub fn handle_at(point: Point, rect: Option<&Rect>, handle_size: f32) -> Option<CropHandle> {
    let rect = rect?;
    CropHandle::ALL
        .into_iter()
        .find(|handle| Rect::from_center_radius(handle.anchor(rect), handle_size).contains(point))
}

/// Drawn squares for every handle, each `handle_size` on a side.
pub fn handle_rects(rect: &Rect, handle_size: f32) -> [(CropHandle, Rect); 8] {
    CropHandle::ALL.map(|handle| (handle, Rect::from_center_size(handle.anchor(rect), handle_size)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crop() -> Rect {
        Rect::new(100.0, 100.0, 300.0, 200.0)
    }

    #[test]
    fn test_no_rect_no_handle() {
        assert_eq!(handle_at(Point::new(100.0, 100.0), None, 24.0), None);
    }

    #[test]
    fn test_corner_hits() {
        let r = crop();
        assert_eq!(handle_at(Point::new(101.0, 99.0), Some(&r), 24.0), Some(CropHandle::TopLeft));
        assert_eq!(handle_at(Point::new(299.0, 101.0), Some(&r), 24.0), Some(CropHandle::TopRight));
        assert_eq!(handle_at(Point::new(90.0, 210.0), Some(&r), 24.0), Some(CropHandle::BottomLeft));
        assert_eq!(handle_at(Point::new(310.0, 190.0), Some(&r), 24.0), Some(CropHandle::BottomRight));
    }

    #[test]
    fn test_edge_hits() {
        let r = crop();
        assert_eq!(handle_at(Point::new(100.0, 150.0), Some(&r), 24.0), Some(CropHandle::Left));
        assert_eq!(handle_at(Point::new(200.0, 100.0), Some(&r), 24.0), Some(CropHandle::Top));
        assert_eq!(handle_at(Point::new(300.0, 150.0), Some(&r), 24.0), Some(CropHandle::Right));
        assert_eq!(handle_at(Point::new(200.0, 200.0), Some(&r), 24.0), Some(CropHandle::Bottom));
    }

    #[test]
    fn test_miss_in_interior() {
        let r = Rect::new(0.0, 0.0, 400.0, 400.0);
        assert_eq!(handle_at(Point::new(100.0, 100.0), Some(&r), 24.0), None);
    }

    #[test]
    fn test_corners_take_priority() {
        // Small rect: top-left and left areas overlap, corner wins
        let r = Rect::new(0.0, 0.0, 60.0, 30.0);
        assert_eq!(handle_at(Point::new(2.0, 10.0), Some(&r), 24.0), Some(CropHandle::TopLeft));
    }

    #[test]
    fn test_fixed_points() {
        let r = crop();
        assert_eq!(CropHandle::TopLeft.fixed_point(&r), r.bottom_right());
        assert_eq!(CropHandle::BottomLeft.fixed_point(&r), r.top_right());
        assert_eq!(CropHandle::Left.fixed_point(&r), r.center_right());
        assert_eq!(CropHandle::Bottom.fixed_point(&r), r.top_center());
    }

    #[test]
    fn test_handle_rects_are_centered_on_anchors() {
        let r = crop();
        for (handle, rect) in handle_rects(&r, 24.0) {
            assert_eq!(rect.center(), handle.anchor(&r));
            assert_eq!(rect.width(), 24.0);
        }
    }

    #[test]
    fn test_corner_classification() {
        let corners = CropHandle::ALL.iter().filter(|h| h.is_corner()).count();
        assert_eq!(corners, 4);
        assert_eq!(CropHandle::Right.index(), 6);
    }
}
