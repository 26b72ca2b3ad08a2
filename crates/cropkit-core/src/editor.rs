//! Photo editor session: the loaded image, live orientation edits, the
//! selected tool and undo/redo history.
//!
//! Orientation edits (rotate, flip, straighten) are non-destructive: they
//! live in [`EditParams`] and are rendered on demand. Applying a crop bakes
//! the current params into the pixels, stores the cropped result as the new
//! working image and starts again from identity params.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::EditorSettings;
use crate::crop::CropSession;
use crate::decode::{decode_image, generate_preview, DecodeError, DecodedImage};
use crate::encode::{encode_image, EncodeError};
use crate::export::{save_to_gallery, ExportError};
use crate::geometry::Size;
use crate::transform::{
    apply_transformations, compute_rotated_bounds, EditParams, InterpolationFilter,
};

/// Editor toolbar entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    #[default]
    Auto,
    Filters,
    Crop,
    Effects,
    Text,
    Rotate,
}

impl Tool {
    pub const ALL: [Tool; 6] = [
        Tool::Auto,
        Tool::Filters,
        Tool::Crop,
        Tool::Effects,
        Tool::Text,
        Tool::Rotate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tool::Auto => "Auto",
            Tool::Filters => "Filters",
            Tool::Crop => "Crop",
            Tool::Effects => "Effects",
            Tool::Text => "Text",
            Tool::Rotate => "Rotate",
        }
    }
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("no image loaded")]
    NoImage,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Kinds of edit, used to merge slider drags into one undo step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditKind {
    Rotate,
    Flip,
    Straighten,
    Crop,
}

#[derive(Debug, Clone)]
struct Snapshot {
    image: Arc<DecodedImage>,
    params: EditParams,
}

#[derive(Debug, Clone)]
pub struct Editor {
    settings: EditorSettings,
    original: Option<Arc<DecodedImage>>,
    current: Option<Arc<DecodedImage>>,
    params: EditParams,
    tool: Tool,
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    last_edit: Option<EditKind>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl Editor {
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            settings: settings.sanitized(),
            original: None,
            current: None,
            params: EditParams::default(),
            tool: Tool::Auto,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            last_edit: None,
        }
    }

    /// Start editing `image`, discarding any previous session.
    pub fn load(&mut self, image: DecodedImage) {
        log::info!("editing {}x{} image", image.width, image.height);
        let image = Arc::new(image);
        self.original = Some(Arc::clone(&image));
        self.current = Some(image);
        self.params = EditParams::default();
        self.tool = Tool::Auto;
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.last_edit = None;
    }

    /// Decode picked or captured bytes and start editing them.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), EditorError> {
        let image = decode_image(bytes)?;
        self.load(image);
        Ok(())
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn params(&self) -> &EditParams {
        &self.params
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn has_image(&self) -> bool {
        self.current.is_some()
    }

    /// Working image before the live params are applied.
    pub fn current_image(&self) -> Option<&DecodedImage> {
        self.current.as_deref()
    }

    /// The image as first loaded, for before/after comparison.
    pub fn compare_original(&self) -> Option<&DecodedImage> {
        self.original.as_deref()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn select_tool(&mut self, tool: Tool) {
        if tool != self.tool {
            log::debug!("tool {} -> {}", self.tool.label(), tool.label());
        }
        self.tool = tool;
    }

    pub fn rotate_left(&mut self) -> Result<(), EditorError> {
        self.edit(EditKind::Rotate, EditParams::rotate_left)
    }

    pub fn rotate_right(&mut self) -> Result<(), EditorError> {
        self.edit(EditKind::Rotate, EditParams::rotate_right)
    }

    pub fn toggle_flip_horizontal(&mut self) -> Result<(), EditorError> {
        self.edit(EditKind::Flip, |p| p.flip_horizontal = !p.flip_horizontal)
    }

    pub fn toggle_flip_vertical(&mut self) -> Result<(), EditorError> {
        self.edit(EditKind::Flip, |p| p.flip_vertical = !p.flip_vertical)
    }

    /// Straighten slider, clamped to `±straighten_limit` degrees.
    ///
    /// Consecutive calls merge into a single undo step.
    pub fn set_straighten(&mut self, angle: f32) -> Result<(), EditorError> {
        if !angle.is_finite() {
            return Ok(());
        }
        let limit = self.settings.straighten_limit;
        let angle = angle.max(-limit).min(limit);
        self.edit(EditKind::Straighten, |p| p.straighten = angle)
    }

    fn edit(
        &mut self,
        kind: EditKind,
        change: impl FnOnce(&mut EditParams),
    ) -> Result<(), EditorError> {
        let image = self.current.clone().ok_or(EditorError::NoImage)?;
        let mut params = self.params;
        change(&mut params);
        if params == self.params {
            return Ok(());
        }
        self.record(kind, image);
        self.params = params;
        Ok(())
    }

    fn record(&mut self, kind: EditKind, image: Arc<DecodedImage>) {
        let merge = kind == EditKind::Straighten && self.last_edit == Some(kind);
        if !merge {
            self.undo_stack.push(Snapshot {
                image,
                params: self.params,
            });
            let limit = self.settings.history_limit;
            if self.undo_stack.len() > limit {
                let excess = self.undo_stack.len() - limit;
                self.undo_stack.drain(..excess);
            }
        }
        self.redo_stack.clear();
        self.last_edit = Some(kind);
    }

    fn snapshot(&self) -> Option<Snapshot> {
        self.current.as_ref().map(|image| Snapshot {
            image: Arc::clone(image),
            params: self.params,
        })
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.current = Some(snapshot.image);
        self.params = snapshot.params;
        self.last_edit = None;
    }

    /// Step back one edit. Returns `false` if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let (Some(previous), Some(now)) = (self.undo_stack.last().cloned(), self.snapshot()) else {
            return false;
        };
        self.undo_stack.pop();
        self.redo_stack.push(now);
        self.restore(previous);
        true
    }

    /// Re-apply an undone edit. Returns `false` if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let (Some(next), Some(now)) = (self.redo_stack.last().cloned(), self.snapshot()) else {
            return false;
        };
        self.redo_stack.pop();
        self.undo_stack.push(now);
        self.restore(next);
        true
    }

    /// Size of the working image once the live params are applied.
    pub fn rendered_dimensions(&self) -> Option<(u32, u32)> {
        self.current.as_ref().map(|image| {
            compute_rotated_bounds(image.width, image.height, self.params.total_rotation())
        })
    }

    /// Full-resolution rendering of the working image with the live params.
    pub fn render(&self, filter: InterpolationFilter) -> Result<DecodedImage, EditorError> {
        let image = self.current.as_ref().ok_or(EditorError::NoImage)?;
        Ok(apply_transformations(image, &self.params, filter))
    }

    /// Screen-sized rendering, capped at `preview_max_edge`.
    pub fn render_preview(&self, filter: InterpolationFilter) -> Result<DecodedImage, EditorError> {
        let image = self.current.as_ref().ok_or(EditorError::NoImage)?;
        let preview = generate_preview(image, self.settings.preview_max_edge)?;
        Ok(apply_transformations(&preview, &self.params, filter))
    }

    /// Open the crop tool for a container of `container` size.
    pub fn begin_crop(&mut self, container: Size) -> Result<CropSession, EditorError> {
        let source = self.rendered_dimensions().ok_or(EditorError::NoImage)?;
        let mut session = CropSession::new(source, self.settings.clone());
        session.set_container_size(container);
        self.select_tool(Tool::Crop);
        Ok(session)
    }

    /// Bake the live params and `session`'s crop into a new working image.
    pub fn apply_crop(&mut self, session: &CropSession) -> Result<(), EditorError> {
        let rendered = self.render(InterpolationFilter::Lanczos3)?;
        let cropped = session.apply(&rendered);
        log::debug!(
            "crop applied: {}x{} -> {}x{}",
            rendered.width,
            rendered.height,
            cropped.width,
            cropped.height
        );

        let image = self.current.clone().ok_or(EditorError::NoImage)?;
        self.record(EditKind::Crop, image);
        self.current = Some(Arc::new(cropped));
        self.params = EditParams::default();
        self.select_tool(Tool::Auto);
        Ok(())
    }

    pub fn cancel_crop(&mut self) {
        self.select_tool(Tool::Auto);
    }

    /// Render at full quality and save into `directory` as `<name>.jpg`.
    pub fn export(&self, directory: &Path, name: &str) -> Result<PathBuf, EditorError> {
        let rendered = self.render(InterpolationFilter::Lanczos3)?;
        Ok(save_to_gallery(
            &rendered,
            directory,
            name,
            self.settings.jpeg_quality,
        )?)
    }

    /// Render at full quality and encode as JPEG, for hosts without a filesystem.
    pub fn export_jpeg(&self) -> Result<Vec<u8>, EditorError> {
        let rendered = self.render(InterpolationFilter::Lanczos3)?;
        Ok(encode_image(&rendered, self.settings.jpeg_quality)?)
    }
}
