//! Configurable converter wrapper for JavaScript.

use crate::convert::{convert_with, dispatch_with, from_optional};
use wasm_bindgen::prelude::*;
use yuvjpeg_core::{ConvertOptions, ImageJpegEncoder, YuvJpegConverter};

/// A converter with explicit policies.
///
/// ```typescript
/// const converter = new JsConverter({ bounds: 'clamped', quality: 'strict' });
/// const jpeg = converter.convert({ image, quality: 40 });
/// ```
#[wasm_bindgen]
pub struct JsConverter {
    inner: YuvJpegConverter<ImageJpegEncoder>,
}

#[wasm_bindgen]
impl JsConverter {
    /// Create a converter. `options` may be omitted for the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<JsConverter, JsValue> {
        let options: ConvertOptions = from_optional(options)?;
        Ok(Self::with_options(options))
    }

    /// Whether reads past a short plane are filled instead of rejected
    #[wasm_bindgen(getter)]
    pub fn clamped_bounds(&self) -> bool {
        self.inner.options().bounds == yuvjpeg_core::BoundsPolicy::Clamped
    }

    /// Convert a frame using this converter's policies.
    pub fn convert(&self, request: JsValue) -> Result<Vec<u8>, JsValue> {
        convert_with(&self.inner, request)
    }

    /// Dispatch a named method using this converter's policies.
    pub fn handle_method_call(&self, method: &str, args: JsValue) -> Result<Vec<u8>, JsValue> {
        dispatch_with(&self.inner, method, args)
    }
}

impl JsConverter {
    pub(crate) fn with_options(options: ConvertOptions) -> Self {
        Self {
            inner: YuvJpegConverter::with_options(ImageJpegEncoder::new(), options),
        }
    }
}
