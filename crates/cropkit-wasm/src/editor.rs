//! Editor session bindings.
//!
//! [`JsEditor`] owns the working image, the live orientation edits and the
//! undo history. Edits are cheap; call `render_preview` after each one to
//! get a bitmap for the screen.

use crate::crop::JsCropSession;
use crate::types::{interpolation, js_error, JsDecodedImage};
use cropkit_core::config::EditorSettings;
use cropkit_core::editor::{Editor, Tool};
use cropkit_core::geometry::Size;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct JsEditor {
    inner: Editor,
}

#[wasm_bindgen]
impl JsEditor {
    /// Create an editor. `settings_json` is an optional `EditorSettings`
    /// JSON document.
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: Option<String>) -> Result<JsEditor, JsValue> {
        let settings = match settings_json {
            Some(json) => EditorSettings::from_json(&json).map_err(js_error)?,
            None => EditorSettings::default(),
        };
        Ok(JsEditor {
            inner: Editor::new(settings),
        })
    }

    /// Decode picked or captured bytes and start editing them.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner.load_bytes(bytes).map_err(js_error)
    }

    /// Start editing an already decoded image.
    pub fn load_image(&mut self, image: &JsDecodedImage) {
        self.inner.load(image.to_decoded());
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    /// Selected toolbar entry: 0 Auto, 1 Filters, 2 Crop, 3 Effects, 4 Text, 5 Rotate.
    #[wasm_bindgen(getter)]
    pub fn tool(&self) -> u8 {
        tool_index(self.inner.tool())
    }

    pub fn select_tool(&mut self, index: u8) {
        let tool = Tool::ALL.get(index as usize).copied().unwrap_or_default();
        self.inner.select_tool(tool);
    }

    pub fn rotate_left(&mut self) -> Result<(), JsValue> {
        self.inner.rotate_left().map_err(js_error)
    }

    pub fn rotate_right(&mut self) -> Result<(), JsValue> {
        self.inner.rotate_right().map_err(js_error)
    }

    pub fn toggle_flip_horizontal(&mut self) -> Result<(), JsValue> {
        self.inner.toggle_flip_horizontal().map_err(js_error)
    }

    pub fn toggle_flip_vertical(&mut self) -> Result<(), JsValue> {
        self.inner.toggle_flip_vertical().map_err(js_error)
    }

    pub fn set_straighten(&mut self, angle: f32) -> Result<(), JsValue> {
        self.inner.set_straighten(angle).map_err(js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> i32 {
        self.inner.params().rotation
    }

    #[wasm_bindgen(getter)]
    pub fn straighten(&self) -> f32 {
        self.inner.params().straighten
    }

    #[wasm_bindgen(getter)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(getter)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        self.inner.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.inner.redo()
    }

    /// `[width, height]` of the rendered image, or empty with no image.
    pub fn rendered_dimensions(&self) -> Vec<u32> {
        self.inner
            .rendered_dimensions()
            .map(|(w, h)| vec![w, h])
            .unwrap_or_default()
    }

    /// Screen-sized rendering with the live edits applied.
    pub fn render_preview(&self, use_lanczos: bool) -> Result<JsDecodedImage, JsValue> {
        self.inner
            .render_preview(interpolation(use_lanczos))
            .map(JsDecodedImage::from_decoded)
            .map_err(js_error)
    }

    /// The image as first loaded, for the before/after toggle.
    pub fn compare_original(&self) -> Option<JsDecodedImage> {
        self.inner
            .compare_original()
            .cloned()
            .map(JsDecodedImage::from_decoded)
    }

    /// Open the crop tool laid out in a `width` x `height` container.
    pub fn begin_crop(&mut self, width: f32, height: f32) -> Result<JsCropSession, JsValue> {
        self.inner
            .begin_crop(Size::new(width, height))
            .map(JsCropSession::from_session)
            .map_err(js_error)
    }

    pub fn apply_crop(&mut self, session: &JsCropSession) -> Result<(), JsValue> {
        self.inner.apply_crop(session.session()).map_err(js_error)
    }

    pub fn cancel_crop(&mut self) {
        self.inner.cancel_crop();
    }

    /// Full-resolution JPEG bytes of the edited image.
    pub fn export_jpeg(&self) -> Result<Vec<u8>, JsValue> {
        self.inner.export_jpeg().map_err(js_error)
    }
}

fn tool_index(tool: Tool) -> u8 {
    Tool::ALL.iter().position(|t| *t == tool).unwrap_or(0) as u8
}
