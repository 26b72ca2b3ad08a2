//! Interactive crop screen bindings.
//!
//! [`JsCropSession`] keeps the crop overlay state on the WASM side. The host
//! forwards pointer and gesture events and reads back plain number arrays
//! for drawing, so a frame never crosses the boundary as structured data.
//!
//! ```typescript
//! const session = new JsCropSession(image.width, image.height);
//! session.set_container_size(canvas.width, canvas.height);
//! session.begin_drag(x, y);
//! session.drag(dx, dy);
//! session.end_drag();
//! const cropped = session.apply(image);
//! ```

use crate::types::{js_error, JsDecodedImage};
use cropkit_core::config::EditorSettings;
use cropkit_core::crop::{AspectRatio, CropSession, GuideKind};
use cropkit_core::geometry::{Point, Rect, Size};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct JsCropSession {
    inner: CropSession,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Start a crop session for a `width` x `height` source bitmap.
    ///
    /// `settings_json` is an optional `EditorSettings` JSON document; missing
    /// fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: u32,
        height: u32,
        settings_json: Option<String>,
    ) -> Result<JsCropSession, JsValue> {
        let settings = match settings_json {
            Some(json) => EditorSettings::from_json(&json).map_err(js_error)?,
            None => EditorSettings::default(),
        };
        Ok(Self::from_session(CropSession::new((width, height), settings)))
    }

    pub fn set_container_size(&mut self, width: f32, height: f32) {
        self.inner.set_container_size(Size::new(width, height));
    }

    /// Select an aspect preset by index: 0 Free, 1 1:1, 2 3:4, 3 4:3,
    /// 4 16:9, 5 9:16. Unknown indices fall back to Free.
    pub fn set_aspect_ratio(&mut self, index: u8) {
        let aspect = AspectRatio::from_index(index).unwrap_or_default();
        self.inner.set_aspect_ratio(aspect);
    }

    #[wasm_bindgen(getter)]
    pub fn aspect_ratio(&self) -> u8 {
        self.inner.aspect().index()
    }

    /// One frame of a pan/pinch/rotate gesture.
    pub fn transform_gesture(&mut self, pan_x: f32, pan_y: f32, zoom: f32, rotation: f32) {
        self.inner
            .transform_gesture(Point::new(pan_x, pan_y), zoom, rotation);
    }

    pub fn set_zoom(&mut self, scale: f32) {
        self.inner.set_zoom(scale);
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f32 {
        self.inner.scale()
    }

    pub fn set_straighten(&mut self, angle: f32) {
        self.inner.set_straighten(angle);
    }

    #[wasm_bindgen(getter)]
    pub fn straighten(&self) -> f32 {
        self.inner.straighten()
    }

    /// Pointer down. Returns the grabbed handle index (see `handle_rects`).
    pub fn begin_drag(&mut self, x: f32, y: f32) -> Option<u8> {
        self.inner.begin_drag(Point::new(x, y)).map(|h| h.index())
    }

    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.inner.drag(Point::new(dx, dy));
    }

    pub fn end_drag(&mut self) {
        self.inner.end_drag();
    }

    pub fn toggle_golden_ratio(&mut self) {
        self.inner.toggle_golden_ratio();
    }

    pub fn toggle_diagonal(&mut self) {
        self.inner.toggle_diagonal();
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Crop rectangle as `[left, top, right, bottom]` in container pixels.
    pub fn crop_rect(&self) -> Vec<f32> {
        rect_to_vec(&self.inner.crop_rect())
    }

    /// Source pixels under the crop as `[x, y, width, height]`, or empty
    /// when the crop misses the image.
    pub fn source_region(&self) -> Vec<u32> {
        self.inner
            .source_region()
            .map(|r| vec![r.x, r.y, r.width, r.height])
            .unwrap_or_default()
    }

    /// Source region as `[left, top, width, height]` fractions, for applying
    /// the crop to a full-resolution copy. Empty when the crop misses the image.
    pub fn normalized_region(&self) -> Vec<f64> {
        self.inner
            .normalized_region()
            .map(|(l, t, w, h)| vec![l, t, w, h])
            .unwrap_or_default()
    }

    /// Image-to-container matrix `[a, b, c, d, tx, ty]` for drawing the bitmap.
    pub fn view_transform(&self) -> Vec<f32> {
        let m = self.inner.view_transform();
        vec![m.a, m.b, m.c, m.d, m.tx, m.ty]
    }

    /// Guide segments flattened as `[x1, y1, x2, y2, kind, ...]`.
    ///
    /// `kind` is 0 for rule of thirds, 1 golden ratio, 2 diagonal.
    pub fn guide_lines(&self) -> Vec<f32> {
        self.inner
            .guide_lines()
            .iter()
            .flat_map(|line| {
                let kind = match line.kind {
                    GuideKind::RuleOfThirds => 0.0,
                    GuideKind::GoldenRatio => 1.0,
                    GuideKind::Diagonal => 2.0,
                };
                [line.start.x, line.start.y, line.end.x, line.end.y, kind]
            })
            .collect()
    }

    /// Guide segments as objects, `{ start, end, kind }`.
    pub fn guide_lines_js(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.guide_lines()).map_err(js_error)
    }

    /// Handle squares flattened as `[left, top, right, bottom]` per handle,
    /// in handle index order.
    pub fn handle_rects(&self) -> Vec<f32> {
        self.inner
            .handle_rects()
            .iter()
            .flat_map(|(_, rect)| rect_to_vec(rect))
            .collect()
    }

    /// Crop `image` to what lies under the crop rectangle.
    pub fn apply(&self, image: &JsDecodedImage) -> JsDecodedImage {
        JsDecodedImage::from_decoded(self.inner.apply(&image.to_decoded()))
    }
}

impl JsCropSession {
    pub(crate) fn from_session(inner: CropSession) -> Self {
        Self { inner }
    }

    pub(crate) fn session(&self) -> &CropSession {
        &self.inner
    }
}

fn rect_to_vec(rect: &Rect) -> Vec<f32> {
    vec![rect.left, rect.top, rect.right, rect.bottom]
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 200x100 source in a 400x400 container.
    fn session() -> JsCropSession {
        let mut s = JsCropSession::new(200, 100, None).ok().unwrap();
        s.set_container_size(400.0, 400.0);
        s
    }

    #[test]
    fn test_initial_layout() {
        let s = session();
        assert_eq!(s.crop_rect(), vec![40.0, 120.0, 360.0, 280.0]);
        assert_eq!(s.source_region(), vec![20, 10, 160, 80]);
        assert_eq!(s.normalized_region(), vec![0.1, 0.1, 0.8, 0.8]);
        assert_eq!(s.view_transform(), vec![2.0, 0.0, 0.0, 2.0, 0.0, 100.0]);
    }

    #[test]
    fn test_settings_json() {
        let settings = r#"{"max_zoom": 2.0}"#.to_string();
        let mut s = JsCropSession::new(200, 100, Some(settings)).ok().unwrap();
        s.set_zoom(10.0);
        assert_eq!(s.zoom(), 2.0);
    }

    #[test]
    fn test_aspect_ratio_index() {
        let mut s = session();
        s.set_aspect_ratio(1);
        assert_eq!(s.aspect_ratio(), 1);
        let r = s.crop_rect();
        assert!(((r[2] - r[0]) - (r[3] - r[1])).abs() < 1e-3);

        s.set_aspect_ratio(99);
        assert_eq!(s.aspect_ratio(), 0);
    }

    #[test]
    fn test_drag_corner_handle() {
        let mut s = session();
        assert_eq!(s.begin_drag(360.0, 280.0), Some(3));
        s.drag(-40.0, -20.0);
        s.end_drag();
        assert_eq!(s.crop_rect(), vec![40.0, 120.0, 320.0, 260.0]);
    }

    #[test]
    fn test_drag_outside_handles_pans() {
        let mut s = session();
        assert_eq!(s.begin_drag(200.0, 200.0), None);
        s.drag(20.0, 4.0);
        s.end_drag();
        assert_eq!(s.source_region(), vec![10, 8, 160, 80]);
    }

    #[test]
    fn test_guides_and_handles() {
        let mut s = session();
        assert_eq!(s.guide_lines().len(), 4 * 5);
        s.toggle_golden_ratio();
        s.toggle_diagonal();
        assert_eq!(s.guide_lines().len(), 10 * 5);
        assert_eq!(s.handle_rects().len(), 8 * 4);

        s.reset();
        assert_eq!(s.guide_lines().len(), 4 * 5);
    }

    #[test]
    fn test_straighten_and_gesture() {
        let mut s = session();
        s.set_straighten(90.0);
        assert_eq!(s.straighten(), 45.0);
        s.set_straighten(0.0);
        s.transform_gesture(0.0, 0.0, 2.0, 0.0);
        assert_eq!(s.zoom(), 2.0);
        assert_eq!(s.source_region(), vec![60, 30, 80, 40]);
    }

    #[test]
    fn test_apply() {
        let s = session();
        let image = JsDecodedImage::new(200, 100, vec![50; 200 * 100 * 3]).unwrap();
        let cropped = s.apply(&image);
        assert_eq!((cropped.width(), cropped.height()), (160, 80));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_invalid_settings_json() {
        assert!(JsCropSession::new(10, 10, Some("not json".to_string())).is_err());
    }

    #[wasm_bindgen_test]
    fn test_guide_lines_js() {
        let mut s = JsCropSession::new(200, 100, None).unwrap();
        s.set_container_size(400.0, 400.0);
        let lines = s.guide_lines_js().unwrap();
        assert!(js_sys::Array::is_array(&lines));
    }
}
