//! State behind the interactive crop screen.
//!
//! A [`CropSession`] owns everything the crop overlay needs between frames:
//! the gesture state of the image underneath (zoom, rotation, pan,
//! straighten), the crop rectangle in container coordinates, the aspect
//! constraint, guide toggles and the handle currently being dragged.
//!
//! # Coordinate System
//!
//! The source bitmap is drawn through [`CropSession::view_transform`]:
//!
//! ```text
//! fit · scale(about container centre) · rotate(about container centre) · translate(offset)
//! ```
//!
//! The crop rectangle lives in container space; [`CropSession::source_region`]
//! maps it back into source pixels.

use super::{
    default_crop_rect, guide_lines, handle_at, handle_rects, initial_crop_rect, update_crop_rect,
    AspectRatio, CropHandle, GuideLine, GuideOptions,
};
use crate::config::EditorSettings;
use crate::decode::DecodedImage;
use crate::geometry::{fit_transform, Affine, Point, Rect, Size};
use crate::transform::{crop_image, map_crop_to_source, PixelRect};

#[derive(Debug, Clone)]
pub struct CropSession {
    source: (u32, u32),
    container: Size,
    scale: f32,
    rotation: f32,
    offset: Point,
    straighten: f32,
    crop_rect: Rect,
    aspect: AspectRatio,
    guides: GuideOptions,
    active_handle: Option<CropHandle>,
    settings: EditorSettings,
}

impl CropSession {
    /// Start a session for a `width x height` source bitmap.
    ///
    /// The crop rectangle stays empty until the first
    /// [`set_container_size`](Self::set_container_size).
    pub fn new(source: (u32, u32), settings: EditorSettings) -> Self {
        Self {
            source,
            container: Size::ZERO,
            scale: 1.0,
            rotation: 0.0,
            offset: Point::ZERO,
            straighten: 0.0,
            crop_rect: Rect::ZERO,
            aspect: AspectRatio::Free,
            guides: GuideOptions::default(),
            active_handle: None,
            settings: settings.sanitized(),
        }
    }

    pub fn source_size(&self) -> (u32, u32) {
        self.source
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn straighten(&self) -> f32 {
        self.straighten
    }

    pub fn crop_rect(&self) -> Rect {
        self.crop_rect
    }

    pub fn aspect(&self) -> AspectRatio {
        self.aspect
    }

    pub fn guides(&self) -> GuideOptions {
        self.guides
    }

    pub fn active_handle(&self) -> Option<CropHandle> {
        self.active_handle
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    fn image_size(&self) -> Size {
        Size::from_pixels(self.source.0, self.source.1)
    }

    fn current_rect(&self) -> Option<Rect> {
        (!self.crop_rect.is_empty()).then_some(self.crop_rect)
    }

    /// Lay the session out in a container of `size`.
    ///
    /// The crop rectangle is recomputed when the size changes, or when no
    /// rectangle has been placed yet.
    pub fn set_container_size(&mut self, size: Size) {
        let changed = size != self.container;
        self.container = size;
        if changed || self.crop_rect.is_empty() {
            self.crop_rect = self.initial_rect();
            log::debug!(
                "container {}x{}: crop rect {:?}",
                size.width,
                size.height,
                self.crop_rect
            );
        }
    }

    pub fn set_aspect_ratio(&mut self, aspect: AspectRatio) {
        self.aspect = aspect;
        self.crop_rect = self.initial_rect();
        log::debug!("aspect {}: crop rect {:?}", aspect, self.crop_rect);
    }

    fn initial_rect(&self) -> Rect {
        initial_crop_rect(
            self.image_size(),
            self.container,
            self.aspect,
            self.settings.free_crop_fraction,
        )
    }

    /// Apply one frame of a pan/pinch/rotate gesture on the image.
    ///
    /// `zoom` multiplies the current scale, which is then clamped to the
    /// zoom range. `rotation` is added in degrees. Non-finite components
    /// are ignored.
    pub fn transform_gesture(&mut self, pan: Point, zoom: f32, rotation: f32) {
        if zoom.is_finite() {
            self.scale = self.clamp_zoom(self.scale * zoom);
        }
        if rotation.is_finite() {
            self.rotation += rotation;
        }
        if pan.is_finite() {
            self.offset += pan;
        }
    }

    /// Zoom slider.
    pub fn set_zoom(&mut self, scale: f32) {
        if scale.is_finite() {
            self.scale = self.clamp_zoom(scale);
        }
    }

    /// Straighten slider, clamped to `±straighten_limit` degrees.
    pub fn set_straighten(&mut self, angle: f32) {
        if angle.is_finite() {
            let limit = self.settings.straighten_limit;
            self.straighten = angle.max(-limit).min(limit);
        }
    }

    fn clamp_zoom(&self, scale: f32) -> f32 {
        scale.max(self.settings.min_zoom).min(self.settings.max_zoom)
    }

    /// Pointer down. Returns the grabbed handle, if any.
    pub fn begin_drag(&mut self, point: Point) -> Option<CropHandle> {
        self.active_handle = handle_at(
            point,
            self.current_rect().as_ref(),
            self.settings.handle_size,
        );
        self.active_handle
    }

    /// Pointer move by `delta`.
    ///
    /// Resizes the crop rectangle while a handle is held; otherwise pans the
    /// image underneath.
    pub fn drag(&mut self, delta: Point) {
        if !delta.is_finite() {
            return;
        }
        match self.active_handle {
            Some(handle) => {
                if let Some(rect) = update_crop_rect(
                    self.current_rect(),
                    delta,
                    handle,
                    self.aspect,
                    self.container,
                    self.settings.min_crop_size,
                ) {
                    self.crop_rect = rect;
                }
            }
            None => self.offset += delta,
        }
    }

    pub fn end_drag(&mut self) {
        self.active_handle = None;
    }

    pub fn toggle_golden_ratio(&mut self) {
        self.guides.golden_ratio = !self.guides.golden_ratio;
    }

    pub fn toggle_diagonal(&mut self) {
        self.guides.diagonal = !self.guides.diagonal;
    }

    /// Back to the state the crop screen opened with.
    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.rotation = 0.0;
        self.offset = Point::ZERO;
        self.straighten = 0.0;
        self.aspect = AspectRatio::Free;
        self.guides = GuideOptions::default();
        self.active_handle = None;
        self.crop_rect = default_crop_rect(self.container, self.settings.free_crop_fraction);
    }

    /// Source-pixel to container transform for the image as drawn.
    pub fn view_transform(&self) -> Affine {
        let center = self.container.center();
        fit_transform(self.image_size(), self.container)
            .post_scale_about(self.scale, self.scale, center)
            .post_rotate_about(self.rotation + self.straighten, center)
            .post_translate(self.offset.x, self.offset.y)
    }

    /// Source pixels under the crop rectangle, or `None` if it misses the image.
    pub fn source_region(&self) -> Option<PixelRect> {
        let rect = self.current_rect()?;
        map_crop_to_source(&rect, &self.view_transform(), self.source)
    }

    /// [`source_region`](Self::source_region) as `(left, top, width, height)`
    /// fractions of the source, for cropping a differently sized copy of
    /// the same bitmap.
    pub fn normalized_region(&self) -> Option<(f64, f64, f64, f64)> {
        self.source_region()
            .map(|region| region.normalized(self.source.0, self.source.1))
    }

    pub fn guide_lines(&self) -> Vec<GuideLine> {
        match self.current_rect() {
            Some(rect) => guide_lines(&rect, self.guides),
            None => Vec::new(),
        }
    }

    pub fn handle_rects(&self) -> [(CropHandle, Rect); 8] {
        handle_rects(&self.crop_rect, self.settings.handle_size)
    }

    /// Crop `image` to what lies under the crop rectangle.
    ///
    /// `image` should be the bitmap this session was created for.
    pub fn apply(&self, image: &DecodedImage) -> DecodedImage {
        if (image.width, image.height) != self.source {
            log::warn!(
                "applying crop built for {}x{} to a {}x{} image",
                self.source.0,
                self.source.1,
                image.width,
                image.height
            );
        }
        crop_image(image, &self.crop_rect, &self.view_transform())
    }
}
