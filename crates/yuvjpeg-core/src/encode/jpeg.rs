//! JPEG encoding through the `image` crate.

use image::codecs::jpeg::JpegEncoder as ImageCrateJpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

/// Pixel layouts a packed buffer can be handed to an encoder in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Y plane followed by interleaved V/U pairs, stride == width.
    Nv21,
    /// 3 bytes per pixel `(R, G, B)`, row-major.
    Rgb24,
}

impl PixelFormat {
    /// Exact buffer length for a `width x height` image in this format.
    pub fn buffer_len(self, width: u32, height: u32) -> Option<usize> {
        let pixels = (width as usize).checked_mul(height as usize)?;
        match self {
            PixelFormat::Nv21 => {
                let chroma = ((width / 2) as usize).checked_mul((height / 2) as usize)?;
                pixels.checked_add(chroma.checked_mul(2)?)
            }
            PixelFormat::Rgb24 => pixels.checked_mul(3),
        }
    }
}

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The encoder does not consume this pixel layout
    #[error("Unsupported pixel format: {0:?}")]
    UnsupportedFormat(PixelFormat),

    /// The encoder finished without producing any bytes
    #[error("Encoder returned no data")]
    EmptyOutput,

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// A JPEG encoder the converter can hand packed pixels to.
///
/// Implementations must be callable from whichever thread runs a conversion;
/// the converter adds no locking around them.
pub trait JpegEncoder {
    /// Whether `encode` accepts buffers in `format`.
    fn supports(&self, format: PixelFormat) -> bool;

    /// Encode a packed buffer of exactly `format.buffer_len(width, height)` bytes.
    fn encode(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        quality: u8,
        format: PixelFormat,
    ) -> Result<Vec<u8>, EncodeError>;
}

impl<E: JpegEncoder + ?Sized> JpegEncoder for &E {
    fn supports(&self, format: PixelFormat) -> bool {
        (**self).supports(format)
    }

    fn encode(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        quality: u8,
        format: PixelFormat,
    ) -> Result<Vec<u8>, EncodeError> {
        (**self).encode(pixels, width, height, quality, format)
    }
}

/// Baseline JPEG encoder backed by the `image` crate. Consumes RGB24 only.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageJpegEncoder;

impl ImageJpegEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl JpegEncoder for ImageJpegEncoder {
    fn supports(&self, format: PixelFormat) -> bool {
        format == PixelFormat::Rgb24
    }

    fn encode(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        quality: u8,
        format: PixelFormat,
    ) -> Result<Vec<u8>, EncodeError> {
        if format != PixelFormat::Rgb24 {
            return Err(EncodeError::UnsupportedFormat(format));
        }
        encode_jpeg(pixels, width, height, quality)
    }
}

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality; the `image` encoder treats 0 as 1 and caps at 100
///
/// # Returns
///
/// JPEG-encoded bytes on success, or an error if encoding fails.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = PixelFormat::Rgb24
        .buffer_len(width, height)
        .ok_or(EncodeError::InvalidDimensions { width, height })?;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = ImageCrateJpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    let bytes = buffer.into_inner();
    if bytes.is_empty() {
        return Err(EncodeError::EmptyOutput);
    }
    Ok(bytes)
}
