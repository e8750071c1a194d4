//! Method-call boundary.
//!
//! Hosts talk to the converter through named methods with loosely typed
//! arguments. This module owns the argument schema and maps every outcome to a
//! [`MethodResponse`]; how the call is carried (wasm-bindgen, FFI, a message
//! channel) is left to the host. Arguments arrive through any serde
//! [`Deserializer`], so the same schema serves every transport.
//!
//! # Wire Format
//!
//! `convert` takes `{ image: {...}, quality?: int }` where `image` carries
//! `width`, `height`, `yPlane`, `uPlane`, `vPlane` and optionally
//! `yRowStride`, `uRowStride`, `vRowStride`, `uPixelStride`, `vPixelStride`.
//! Omitted strides describe a tightly packed I420 frame.

use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use crate::converter::YuvJpegConverter;
use crate::encode::JpegEncoder;
use crate::plane::{ImageDescriptor, PlaneBuffer, Yuv420Frame};
use crate::ConversionError;

/// The one method the boundary implements.
pub const CONVERT_METHOD: &str = "convert";

/// Arguments of a `convert` call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConvertRequest {
    pub image: Option<ImageArgs>,
    pub quality: Option<i32>,
}

/// Frame description as sent by the host.
///
/// Numeric fields are wide and signed so that nonsense values reach validation
/// and produce a precise error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageArgs {
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub y_plane: Option<Vec<u8>>,
    pub u_plane: Option<Vec<u8>>,
    pub v_plane: Option<Vec<u8>>,
    pub y_row_stride: Option<i64>,
    pub u_row_stride: Option<i64>,
    pub v_row_stride: Option<i64>,
    pub u_pixel_stride: Option<i64>,
    pub v_pixel_stride: Option<i64>,
}

impl ImageArgs {
    /// Validate the arguments and borrow them as a frame.
    pub fn to_frame(&self) -> Result<Yuv420Frame<'_>, ConversionError> {
        let width = required(self.width, "width")?;
        let height = required(self.height, "height")?;
        let (width, height) = match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => return Err(ConversionError::InvalidSize { width, height }),
        };
        let descriptor = ImageDescriptor::new(width, height)?;

        let y_plane = self.y_plane.as_deref().ok_or_else(|| missing("yPlane"))?;
        let u_plane = self.u_plane.as_deref().ok_or_else(|| missing("uPlane"))?;
        let v_plane = self.v_plane.as_deref().ok_or_else(|| missing("vPlane"))?;

        let chroma_width = descriptor.chroma_width();
        let y = PlaneBuffer::packed(y_plane, stride(self.y_row_stride, width, "yRowStride")?)?;
        let u = PlaneBuffer::new(
            u_plane,
            stride(self.u_row_stride, chroma_width, "uRowStride")?,
            stride(self.u_pixel_stride, 1, "uPixelStride")?,
        )?;
        let v = PlaneBuffer::new(
            v_plane,
            stride(self.v_row_stride, chroma_width, "vRowStride")?,
            stride(self.v_pixel_stride, 1, "vPixelStride")?,
        )?;

        Ok(Yuv420Frame::new(descriptor, y, u, v))
    }
}

fn missing(name: &str) -> ConversionError {
    ConversionError::MissingArgument(name.to_string())
}

fn required(value: Option<i64>, name: &str) -> Result<i64, ConversionError> {
    value.ok_or_else(|| missing(name))
}

fn stride(value: Option<i64>, default: u32, name: &str) -> Result<u32, ConversionError> {
    match value {
        None => Ok(default),
        Some(v) => u32::try_from(v)
            .ok()
            .filter(|&v| v >= 1)
            .ok_or_else(|| {
                ConversionError::InvalidArgument(format!(
                    "{} must be a positive 32-bit value, got {}",
                    name, v
                ))
            }),
    }
}

/// Outcome of one method call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodResponse {
    /// Encoded JPEG bytes.
    Success(Vec<u8>),
    /// A tagged failure; never accompanied by partial output.
    Error { code: &'static str, message: String },
    /// The method name is not one this boundary knows.
    NotImplemented,
}

impl From<ConversionError> for MethodResponse {
    fn from(err: ConversionError) -> Self {
        MethodResponse::Error {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl From<Result<Vec<u8>, ConversionError>> for MethodResponse {
    fn from(result: Result<Vec<u8>, ConversionError>) -> Self {
        match result {
            Ok(bytes) => MethodResponse::Success(bytes),
            Err(err) => err.into(),
        }
    }
}

/// Run a `convert` request through `converter`.
pub fn convert_request<E: JpegEncoder>(
    converter: &YuvJpegConverter<E>,
    request: &ConvertRequest,
) -> Result<Vec<u8>, ConversionError> {
    let image = request.image.as_ref().ok_or_else(|| missing("image"))?;
    let frame = image.to_frame()?;
    Ok(converter.convert(&frame, request.quality)?.into_bytes())
}

/// Dispatch a named method call.
///
/// Arguments are only deserialized for known methods. An absent or `null`
/// payload is an empty request, so it reports the first missing field. A
/// malformed payload is reported as `INVALID_ARGUMENT`.
///
/// # Example
/// ```ignore
/// let mut de = serde_json::Deserializer::from_str(json);
/// let response = handle_method_call(&converter, "convert", &mut de);
/// ```
pub fn handle_method_call<'de, E, D>(
    converter: &YuvJpegConverter<E>,
    method: &str,
    arguments: D,
) -> MethodResponse
where
    E: JpegEncoder,
    D: Deserializer<'de>,
{
    if method != CONVERT_METHOD {
        warn!(method, "Method not implemented");
        return MethodResponse::NotImplemented;
    }

    let request = match Option::<ConvertRequest>::deserialize(arguments) {
        Ok(request) => request.unwrap_or_default(),
        Err(e) => {
            debug!(error = %e, "Rejected convert arguments");
            return ConversionError::InvalidArgument(e.to_string()).into();
        }
    };

    let result = convert_request(converter, &request);
    if let Err(err) = &result {
        debug!(code = err.code(), error = %err, "Conversion failed");
    }
    result.into()
}
