//! Cropkit WASM - WebAssembly bindings for Cropkit
//!
//! This crate exposes the cropkit-core editor to a JavaScript/TypeScript
//! front end.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Decoding picked or captured photos, resizing, previews
//! - `encode` - JPEG encoding for the save flow
//! - `transform` - Rotate, flip, straighten and crop
//! - `crop` - Interactive crop screen state
//! - `editor` - Editor session with undo/redo
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditor } from '@cropkit/wasm';
//!
//! await init();
//!
//! const editor = new JsEditor();
//! editor.load_bytes(new Uint8Array(await file.arrayBuffer()));
//! editor.rotate_right();
//! const preview = editor.render_preview(false);
//! ```

use wasm_bindgen::prelude::*;

mod crop;
mod decode;
mod editor;
mod encode;
mod logging;
mod transform;
mod types;

pub use crop::JsCropSession;
pub use decode::{decode_image, decode_jpeg, generate_preview, resize, resize_to_fit};
pub use editor::JsEditor;
pub use encode::{default_jpeg_quality, encode_jpeg, encode_jpeg_from_image};
pub use transform::{
    apply_crop, apply_rotation, apply_transformations, compute_rotated_bounds, flip_horizontal,
    flip_vertical, rotate_quarter,
};
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load).
#[wasm_bindgen(start)]
pub fn init() {
    logging::install(log::LevelFilter::Info);
}

/// Change the console log level: "off", "error", "warn", "info", "debug" or "trace".
#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    logging::install(logging::parse_level(level));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// File name for a fresh camera capture, `<unix millis>.jpg`.
#[wasm_bindgen]
pub fn capture_file_name() -> String {
    let millis = js_sys::Date::now().max(0.0) as u128;
    cropkit_core::export::capture_file_name_from_millis(millis)
}

/// Make a user-supplied name safe to use as a file name stem.
#[wasm_bindgen]
pub fn sanitize_display_name(name: &str) -> String {
    cropkit_core::export::sanitize_display_name(name)
}
