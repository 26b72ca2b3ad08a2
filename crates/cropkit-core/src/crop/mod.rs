//! Interactive crop overlay: aspect presets, handles, dragging, guides and
//! the session state that ties them together.
//!
//! Everything in this module works in container (on-screen) coordinates.
//! Mapping the final rectangle onto source pixels lives in
//! [`crate::transform`].

mod aspect;
mod drag;
mod guides;
mod handle;
mod initial;
mod session;

pub use aspect::AspectRatio;
pub use drag::{update_crop_rect, DEFAULT_MIN_CROP_SIZE};
pub use guides::{
    diagonals, golden_ratio, guide_lines, rule_of_thirds, GuideKind, GuideLine, GuideOptions, PHI,
};
pub use handle::{handle_at, handle_rects, CropHandle};
pub use initial::{default_crop_rect, initial_crop_rect, DEFAULT_FREE_CROP_FRACTION};
pub use session::CropSession;
