//! Saving edited photos into a gallery directory.
//!
//! A save never leaves a half-written photo behind: the JPEG is written to
//! `<name>.jpg.pending`, then renamed into place. If either step fails the
//! pending file is removed.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::decode::DecodedImage;
use crate::encode::{encode_image, EncodeError};

const EXTENSION: &str = "jpg";
const PENDING_SUFFIX: &str = ".pending";
const FALLBACK_NAME: &str = "image";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export: image is empty")]
    EmptyImage,

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A gallery directory that edited photos are saved into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    pub directory: PathBuf,
}

impl ExportTarget {
    pub fn new<P: Into<PathBuf>>(directory: P) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn save(
        &self,
        image: &DecodedImage,
        display_name: &str,
        quality: u8,
    ) -> Result<PathBuf, ExportError> {
        save_to_gallery(image, &self.directory, display_name, quality)
    }
}

/// Encode `image` as JPEG and save it as `<display_name>.jpg` in `directory`.
///
/// The directory is created if needed. An existing file with the same name
/// is never overwritten; a numbered suffix is added instead.
///
/// # Returns
///
/// The path of the saved file.
pub fn save_to_gallery(
    image: &DecodedImage,
    directory: &Path,
    display_name: &str,
    quality: u8,
) -> Result<PathBuf, ExportError> {
    if image.is_empty() {
        return Err(ExportError::EmptyImage);
    }

    let jpeg = encode_image(image, quality)?;

    fs::create_dir_all(directory).map_err(|source| ExportError::Io {
        path: directory.to_path_buf(),
        source,
    })?;

    let stem = sanitize_display_name(display_name);
    let target = unique_path(directory, &stem);
    write_atomically(&target, &jpeg)?;

    log::info!(
        "saved {}x{} image ({} bytes) to {}",
        image.width,
        image.height,
        jpeg.len(),
        target.display()
    );
    Ok(target)
}

/// Make a user-supplied name safe to use as a file stem.
///
/// Path separators and control characters become `_`, a trailing `.jpg` or
/// `.jpeg` is dropped, and an empty result becomes `"image"`.
pub fn sanitize_display_name(name: &str) -> String {
    let trimmed = name.trim();
    let lower = trimmed.to_ascii_lowercase();
    let stem = [".jpg", ".jpeg"]
        .iter()
        .find(|ext| lower.ends_with(**ext))
        .map_or(trimmed, |ext| &trimmed[..trimmed.len() - ext.len()]);

    let cleaned: String = stem
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let cleaned = cleaned.trim_matches('.').trim();
    if cleaned.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// File name for a fresh camera capture: `<unix millis>.jpg`.
pub fn capture_file_name(now: SystemTime) -> String {
    let millis = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    capture_file_name_from_millis(millis)
}

/// Same as [`capture_file_name`] for hosts without `SystemTime` (WASM).
pub fn capture_file_name_from_millis(millis: u128) -> String {
    format!("{}.{}", millis, EXTENSION)
}

/// Write `bytes` to `<target>.pending`, then rename onto `target`.
///
/// On failure the pending file is removed.
fn write_atomically(target: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let pending = pending_path(target);

    if let Err(source) = fs::write(&pending, bytes) {
        discard_pending(&pending);
        return Err(ExportError::Io {
            path: pending,
            source,
        });
    }

    if let Err(source) = fs::rename(&pending, target) {
        discard_pending(&pending);
        return Err(ExportError::Io {
            path: target.to_path_buf(),
            source,
        });
    }

    Ok(())
}

fn unique_path(directory: &Path, stem: &str) -> PathBuf {
    let first = directory.join(format!("{}.{}", stem, EXTENSION));
    if !first.exists() {
        return first;
    }
    (1u32..)
        .map(|n| directory.join(format!("{} ({}).{}", stem, n, EXTENSION)))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}

fn pending_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(PENDING_SUFFIX);
    PathBuf::from(name)
}

fn discard_pending(pending: &Path) {
    if pending.is_file() {
        match fs::remove_file(pending) {
            Ok(()) => log::warn!("removed incomplete export {}", pending.display()),
            Err(e) => log::warn!("could not remove {}: {}", pending.display(), e),
        }
    }
}
