//! Editor settings shared by the core pipeline and UI front-ends.
//!
//! Settings are serialized as JSON so a shell can persist user preferences
//! and reload them on the next launch. Unknown or missing fields fall back
//! to defaults, and out-of-range values are clamped by [`EditorSettings::sanitized`].

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::crop::{DEFAULT_FREE_CROP_FRACTION, DEFAULT_MIN_CROP_SIZE};
use crate::encode::DEFAULT_JPEG_QUALITY;

/// Errors raised while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables for crop interaction, preview rendering and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Side of a drawn crop handle, and radius of its hit area (container px).
    pub handle_size: f32,
    /// Smallest crop side allowed while dragging (container px).
    pub min_crop_size: f32,
    /// Fraction of the displayed image covered by a fresh free crop.
    pub free_crop_fraction: f32,
    /// Lower bound of the zoom slider.
    pub min_zoom: f32,
    /// Upper bound of the zoom slider.
    pub max_zoom: f32,
    /// Straighten slider range is `-limit..=limit` degrees.
    pub straighten_limit: f32,
    /// JPEG quality used for export (1-100).
    pub jpeg_quality: u8,
    /// Longest edge of the on-screen preview.
    pub preview_max_edge: u32,
    /// Maximum undo steps kept by the editor.
    pub history_limit: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            handle_size: 24.0,
            min_crop_size: DEFAULT_MIN_CROP_SIZE,
            free_crop_fraction: DEFAULT_FREE_CROP_FRACTION,
            min_zoom: 1.0,
            max_zoom: 5.0,
            straighten_limit: 45.0,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            preview_max_edge: 2048,
            history_limit: 50,
        }
    }
}

impl EditorSettings {
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&contents)?;
        log::debug!("loaded editor settings from {}", path.display());
        Ok(settings)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, json).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse settings from JSON, clamping out-of-range values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: EditorSettings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Copy with every field forced into its valid range.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let positive = |v: f32, fallback: f32| {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                fallback
            }
        };

        let min_zoom = positive(self.min_zoom, defaults.min_zoom);
        let max_zoom = positive(self.max_zoom, defaults.max_zoom).max(min_zoom);

        Self {
            handle_size: positive(self.handle_size, defaults.handle_size),
            min_crop_size: positive(self.min_crop_size, defaults.min_crop_size),
            free_crop_fraction: if self.free_crop_fraction.is_finite() {
                self.free_crop_fraction.clamp(0.1, 1.0)
            } else {
                defaults.free_crop_fraction
            },
            min_zoom,
            max_zoom,
            straighten_limit: if self.straighten_limit.is_finite() {
                self.straighten_limit.abs().min(180.0)
            } else {
                defaults.straighten_limit
            },
            jpeg_quality: self.jpeg_quality.clamp(1, 100),
            preview_max_edge: self.preview_max_edge.max(1),
            history_limit: self.history_limit.max(1),
        }
    }
}
