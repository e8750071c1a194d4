//! Conversion WASM bindings.
//!
//! # Functions
//!
//! - [`convert`] - Convert a YUV 4:2:0 frame to JPEG bytes
//! - [`handle_method_call`] - Dispatch a named method, rejecting unknown names
//!
//! Failures reject with a string of the form `CODE: message`, where `CODE` is
//! one of the yuvjpeg-core error codes or `NOT_IMPLEMENTED`.
//!
//! # Example
//!
//! ```typescript
//! import { handle_method_call } from '@yuvjpeg/wasm';
//!
//! try {
//!   const jpeg = handle_method_call('convert', { image, quality: 75 });
//! } catch (e) {
//!   console.error(e); // e.g. "INVALID_PLANE_SIZE: Y plane too small: 100 < 307200"
//! }
//! ```

use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use yuvjpeg_core::{ImageJpegEncoder, JpegEncoder, MethodResponse, YuvJpegConverter};

/// Code reported for method names the boundary does not implement.
pub(crate) const NOT_IMPLEMENTED: &str = "NOT_IMPLEMENTED";

/// Convert a YUV 4:2:0 frame to JPEG bytes with the default policies
/// (strict bounds, quality clamped to 50-100).
///
/// # Arguments
///
/// * `request` - `{ image: {...}, quality?: number }`; planes as `Uint8Array`
///
/// # Returns
///
/// A `Uint8Array` containing the JPEG bytes.
#[wasm_bindgen]
pub fn convert(request: JsValue) -> Result<Vec<u8>, JsValue> {
    convert_with(&YuvJpegConverter::new(ImageJpegEncoder::new()), request)
}

/// Dispatch a named method call with the default policies.
///
/// Only `"convert"` is implemented; any other name rejects with
/// `NOT_IMPLEMENTED` without inspecting `args`.
#[wasm_bindgen]
pub fn handle_method_call(method: &str, args: JsValue) -> Result<Vec<u8>, JsValue> {
    dispatch_with(&YuvJpegConverter::new(ImageJpegEncoder::new()), method, args)
}

pub(crate) fn convert_with<E: JpegEncoder>(
    converter: &YuvJpegConverter<E>,
    request: JsValue,
) -> Result<Vec<u8>, JsValue> {
    dispatch_with(converter, yuvjpeg_core::CONVERT_METHOD, request)
}

pub(crate) fn dispatch_with<E: JpegEncoder>(
    converter: &YuvJpegConverter<E>,
    method: &str,
    args: JsValue,
) -> Result<Vec<u8>, JsValue> {
    let deserializer = serde_wasm_bindgen::Deserializer::from(args);
    let response = yuvjpeg_core::handle_method_call(converter, method, deserializer);
    response_to_result(response, method).map_err(|e| JsValue::from_str(&e))
}

/// Flatten a method response into bytes or a `CODE: message` string.
pub(crate) fn response_to_result(
    response: MethodResponse,
    method: &str,
) -> Result<Vec<u8>, String> {
    match response {
        MethodResponse::Success(bytes) => Ok(bytes),
        MethodResponse::Error { code, message } => Err(format!("{}: {}", code, message)),
        MethodResponse::NotImplemented => Err(format!(
            "{}: method '{}' is not implemented",
            NOT_IMPLEMENTED, method
        )),
    }
}

/// Deserialize an optional JS value, treating `undefined` and `null` as absent.
pub(crate) fn from_optional<T: DeserializeOwned + Default>(
    value: JsValue,
) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}


/// WASM-specific tests that require JsValue.
///
/// These tests can only run on wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use serde::Serialize;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Image {
        width: u32,
        height: u32,
        y_plane: Vec<u8>,
        u_plane: Vec<u8>,
        v_plane: Vec<u8>,
        y_row_stride: u32,
        u_row_stride: u32,
        v_row_stride: u32,
        u_pixel_stride: u32,
        v_pixel_stride: u32,
    }

    #[derive(Serialize)]
    struct Request {
        image: Image,
        quality: i32,
    }

    fn gray_request(width: u32, height: u32, y_len: usize) -> JsValue {
        let chroma = (width / 2 * height / 2) as usize;
        let request = Request {
            image: Image {
                width,
                height,
                y_plane: vec![128; y_len],
                u_plane: vec![128; chroma],
                v_plane: vec![128; chroma],
                y_row_stride: width,
                u_row_stride: width / 2,
                v_row_stride: width / 2,
                u_pixel_stride: 1,
                v_pixel_stride: 1,
            },
            quality: 90,
        };
        serde_wasm_bindgen::to_value(&request).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_convert_basic() {
        let jpeg = convert(gray_request(16, 16, 256)).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[wasm_bindgen_test]
    fn test_convert_short_y_plane() {
        let err = convert(gray_request(16, 16, 255)).unwrap_err();
        assert!(err.as_string().unwrap().starts_with("INVALID_PLANE_SIZE"));
    }

    #[wasm_bindgen_test]
    fn test_convert_without_arguments() {
        let err = handle_method_call("convert", JsValue::UNDEFINED).unwrap_err();
        assert_eq!(
            err.as_string().unwrap(),
            "MISSING_ARGUMENT: Missing argument: image"
        );
    }

    #[wasm_bindgen_test]
    fn test_unknown_method() {
        let err = handle_method_call("flip", JsValue::UNDEFINED).unwrap_err();
        assert!(err.as_string().unwrap().starts_with(NOT_IMPLEMENTED));
    }
}
