//! YuvJpeg WASM - WebAssembly bindings for YUV to JPEG conversion
//!
//! This crate exposes the yuvjpeg-core `convert` operation to JavaScript hosts
//! that capture camera frames and need JPEG bytes back.
//!
//! # Module Structure
//!
//! - `convert` - The `convert` operation and the method-name dispatcher
//! - `types` - Configurable converter wrapper
//!
//! # Usage
//!
//! ```typescript
//! import init, { convert } from '@yuvjpeg/wasm';
//!
//! await init();
//!
//! const jpeg = convert({
//!   image: { width, height, yPlane, uPlane, vPlane,
//!            yRowStride, uRowStride, vRowStride, uPixelStride, vPixelStride },
//!   quality: 85,
//! });
//! ```

use wasm_bindgen::prelude::*;

mod convert;
mod types;

pub use convert::{convert, handle_method_call};
pub use types::JsConverter;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
