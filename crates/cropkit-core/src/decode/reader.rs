//! Decoding picked or captured photos, with EXIF orientation handling.
//!
//! Camera captures are usually stored sensor-side up with an EXIF
//! orientation tag. The editor always works on upright pixels, so the tag is
//! applied at decode time and never carried further.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

/// Decode a JPEG or PNG from bytes, applying EXIF orientation.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format is not recognized and
/// `DecodeError::CorruptedFile` if decoding fails part way.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = decode_dynamic(bytes)?;
    if orientation != Orientation::Normal {
        let (w, h) = (img.width(), img.height());
        let (upright_w, upright_h) = if orientation.swaps_dimensions() {
            (h, w)
        } else {
            (w, h)
        };
        log::debug!(
            "applying EXIF orientation {:?}: {}x{} -> {}x{}",
            orientation,
            w,
            h,
            upright_w,
            upright_h
        );
    }
    Ok(DecodedImage::from_rgb_image(
        apply_orientation(img, orientation).into_rgb8(),
    ))
}

/// Read and decode an image file.
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<DecodedImage, DecodeError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| DecodeError::IoError(format!("{}: {}", path.display(), e)))?;
    decode_image(&bytes)
}

/// Decode JPEG bytes, applying EXIF orientation.
///
/// Unlike [`decode_image`] this rejects anything that does not start with a
/// JPEG start-of-image marker.
pub fn decode_jpeg(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if !bytes.starts_with(&JPEG_SOI) {
        return Err(DecodeError::InvalidFormat);
    }
    decode_image(bytes)
}

/// Decode JPEG bytes as stored, ignoring any EXIF orientation.
pub fn decode_jpeg_no_orientation(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if !bytes.starts_with(&JPEG_SOI) {
        return Err(DecodeError::InvalidFormat);
    }
    Ok(DecodedImage::from_rgb_image(decode_dynamic(bytes)?.into_rgb8()))
}

/// EXIF orientation of `bytes`, `Normal` when absent or unreadable.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
