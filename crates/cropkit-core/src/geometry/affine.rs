//! 2x3 affine matrices for mapping between display and bitmap space.
//!
//! A matrix `[a, b, c, d, tx, ty]` maps a point as:
//! ```text
//! x' = a * x + c * y + tx
//! y' = b * x + d * y + ty
//! ```
//!
//! The `post_*` builders append an operation that runs *after* the
//! existing matrix, so `Affine::scale(2.0).post_rotate(90.0)` first scales
//! and then rotates.

use super::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Determinants smaller than this are treated as singular.
const SINGULAR_EPSILON: f32 = 1e-10;

/// A 2D affine transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Affine {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn scale(sx: f32, sy: f32) -> Self {
        Affine {
            a: sx,
            d: sy,
            ..Self::IDENTITY
        }
    }

    /// Rotation about the origin, clockwise on screen for positive degrees.
    pub fn rotate(degrees: f32) -> Self {
        let rad = degrees.to_radians();
        let (sin, cos) = rad.sin_cos();
        Affine {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            tx: 0.0,
            ty: 0.0,
        }
    }

    pub fn translate(tx: f32, ty: f32) -> Self {
        Affine {
            tx,
            ty,
            ..Self::IDENTITY
        }
    }

    /// Compose so that `self` is applied first, then `next`.
    pub fn then(&self, next: &Affine) -> Affine {
        Affine {
            a: next.a * self.a + next.c * self.b,
            b: next.b * self.a + next.d * self.b,
            c: next.a * self.c + next.c * self.d,
            d: next.b * self.c + next.d * self.d,
            tx: next.a * self.tx + next.c * self.ty + next.tx,
            ty: next.b * self.tx + next.d * self.ty + next.ty,
        }
    }

    pub fn post_scale(&self, sx: f32, sy: f32) -> Affine {
        self.then(&Affine::scale(sx, sy))
    }

    /// Scale about a pivot point.
    pub fn post_scale_about(&self, sx: f32, sy: f32, pivot: Point) -> Affine {
        self.post_translate(-pivot.x, -pivot.y)
            .post_scale(sx, sy)
            .post_translate(pivot.x, pivot.y)
    }

    pub fn post_rotate(&self, degrees: f32) -> Affine {
        self.then(&Affine::rotate(degrees))
    }

    /// Rotate about a pivot point.
    pub fn post_rotate_about(&self, degrees: f32, pivot: Point) -> Affine {
        self.post_translate(-pivot.x, -pivot.y)
            .post_rotate(degrees)
            .post_translate(pivot.x, pivot.y)
    }

    pub fn post_translate(&self, tx: f32, ty: f32) -> Affine {
        self.then(&Affine::translate(tx, ty))
    }

    pub fn determinant(&self) -> f32 {
        self.a * self.d - self.b * self.c
    }

    /// Inverse transform, or `None` if the matrix is singular.
    pub fn invert(&self) -> Option<Affine> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        Some(Affine {
            a: self.d * inv_det,
            b: -self.b * inv_det,
            c: -self.c * inv_det,
            d: self.a * inv_det,
            tx: (self.c * self.ty - self.d * self.tx) * inv_det,
            ty: (self.b * self.tx - self.a * self.ty) * inv_det,
        })
    }

    #[inline]
    pub fn map_point(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }

    /// Map a slice of points in place.
    pub fn map_points(&self, points: &mut [Point]) {
        for p in points.iter_mut() {
            *p = self.map_point(*p);
        }
    }

    /// Axis-aligned bounding box of the four mapped corners of `rect`.
    pub fn map_rect_bounds(&self, rect: &Rect) -> Rect {
        let mut corners = rect.corners();
        self.map_points(&mut corners);
        // Four corners are always present
        Rect::bounding(&corners).unwrap_or(Rect::ZERO)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: mapping through T then T^-1 returns the original point.
        #[test]
        fn prop_inverse_round_trip(
            scale in 0.2f32..=5.0,
            degrees in -360.0f32..=360.0,
            tx in -500.0f32..=500.0,
            ty in -500.0f32..=500.0,
            x in -1000.0f32..=1000.0,
            y in -1000.0f32..=1000.0,
        ) {
            let m = Affine::scale(scale, scale).post_rotate(degrees).post_translate(tx, ty);
            let inv = m.invert();
            prop_assert!(inv.is_some());

            let back = inv.unwrap().map_point(m.map_point(Point::new(x, y)));
            prop_assert!((back.x - x).abs() < 1e-2, "x: {} vs {}", back.x, x);
            prop_assert!((back.y - y).abs() < 1e-2, "y: {} vs {}", back.y, y);
        }

        /// Property: mapped bounds always contain every mapped corner.
        #[test]
        fn prop_bounds_contain_corners(
            degrees in -180.0f32..=180.0,
            w in 1.0f32..=400.0,
            h in 1.0f32..=400.0,
        ) {
            let rect = Rect::new(0.0, 0.0, w, h);
            let m = Affine::rotate(degrees);
            let bounds = m.map_rect_bounds(&rect);
            for corner in rect.corners() {
                let p = m.map_point(corner);
                prop_assert!(p.x >= bounds.left - 1e-3 && p.x <= bounds.right + 1e-3);
                prop_assert!(p.y >= bounds.top - 1e-3 && p.y <= bounds.bottom + 1e-3);
            }
        }
    }
}
