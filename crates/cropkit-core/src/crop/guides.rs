//! Compositional guide lines drawn inside the crop rectangle.
//!
//! - Rule of thirds: always shown, two lines per axis at 1/3 and 2/3
//! - Golden ratio: optional, two lines per axis at `1/φ` from each edge
//! - Diagonals: optional, corner to corner

use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Golden ratio used for the golden-section guides.
pub const PHI: f32 = 1.618;

/// Which guide family a line belongs to (renderers pick colors from this).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuideKind {
    RuleOfThirds,
    GoldenRatio,
    Diagonal,
}

/// A guide line segment in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideLine {
    pub start: Point,
    pub end: Point,
    pub kind: GuideKind,
}

impl GuideLine {
    fn vertical(rect: &Rect, x: f32, kind: GuideKind) -> Self {
        GuideLine {
            start: Point::new(x, rect.top),
            end: Point::new(x, rect.bottom),
            kind,
        }
    }

    fn horizontal(rect: &Rect, y: f32, kind: GuideKind) -> Self {
        GuideLine {
            start: Point::new(rect.left, y),
            end: Point::new(rect.right, y),
            kind,
        }
    }
}

/// Optional guide overlays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideOptions {
    pub golden_ratio: bool,
    pub diagonal: bool,
}

pub fn rule_of_thirds(rect: &Rect) -> Vec<GuideLine> {
    const LINES: usize = 3;
    let h_step = rect.width() / LINES as f32;
    let v_step = rect.height() / LINES as f32;

    let mut lines = Vec::with_capacity(4);
    for i in 1..LINES {
        let i = i as f32;
        lines.push(GuideLine::vertical(rect, rect.left + i * h_step, GuideKind::RuleOfThirds));
        lines.push(GuideLine::horizontal(rect, rect.top + i * v_step, GuideKind::RuleOfThirds));
    }
    lines
}

pub fn golden_ratio(rect: &Rect) -> Vec<GuideLine> {
    let h1 = rect.width() / PHI;
    let h2 = rect.width() - h1;
    let v1 = rect.height() / PHI;
    let v2 = rect.height() - v1;

    vec![
        GuideLine::vertical(rect, rect.left + h1, GuideKind::GoldenRatio),
        GuideLine::vertical(rect, rect.left + h2, GuideKind::GoldenRatio),
        GuideLine::horizontal(rect, rect.top + v1, GuideKind::GoldenRatio),
        GuideLine::horizontal(rect, rect.top + v2, GuideKind::GoldenRatio),
    ]
}

pub fn diagonals(rect: &Rect) -> Vec<GuideLine> {
    vec![
        GuideLine {
            start: rect.top_left(),
            end: rect.bottom_right(),
            kind: GuideKind::Diagonal,
        },
        GuideLine {
            start: rect.top_right(),
            end: rect.bottom_left(),
            kind: GuideKind::Diagonal,
        },
    ]
}

/// Every guide line to draw for `rect` with the given options.
pub fn guide_lines(rect: &Rect, options: GuideOptions) -> Vec<GuideLine> {
    let mut lines = rule_of_thirds(rect);
    if options.golden_ratio {
        lines.extend(golden_ratio(rect));
    }
    if options.diagonal {
        lines.extend(diagonals(rect));
    }
    lines
}
