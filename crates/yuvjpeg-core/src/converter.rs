//! Conversion facade: validate, pack, encode.
//!
//! Each call runs `Validate -> Pack/Expand -> Encode` in a straight line and
//! stops at the first failing stage. The converter holds no per-call state, so
//! one instance can serve concurrent callers as long as the encoder allows it.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::convert::{expand_rgb24, pack_nv21, BoundsPolicy};
use crate::encode::{ImageJpegEncoder, JpegEncoder, PixelFormat};
use crate::plane::Yuv420Frame;
use crate::quality::{clamp_quality, QualityPolicy};
use crate::ConversionError;

/// Policies fixed when a converter is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Handling of reads past the end of a plane
    pub bounds: BoundsPolicy,
    /// Mapping of requested quality into the encoder's range
    pub quality: QualityPolicy,
}

/// Encoded JPEG bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Converts YUV 4:2:0 frames to JPEG through a [`JpegEncoder`].
#[derive(Debug, Clone)]
pub struct YuvJpegConverter<E> {
    encoder: E,
    options: ConvertOptions,
}

impl Default for YuvJpegConverter<ImageJpegEncoder> {
    fn default() -> Self {
        Self::new(ImageJpegEncoder::new())
    }
}

impl<E: JpegEncoder> YuvJpegConverter<E> {
    /// Create a converter with default options (strict bounds, quality 50..=100).
    pub fn new(encoder: E) -> Self {
        Self::with_options(encoder, ConvertOptions::default())
    }

    pub fn with_options(encoder: E, options: ConvertOptions) -> Self {
        Self { encoder, options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Packing the encoder will receive: NV21 when accepted, RGB24 otherwise.
    pub fn select_format(&self) -> Result<PixelFormat, ConversionError> {
        [PixelFormat::Nv21, PixelFormat::Rgb24]
            .into_iter()
            .find(|&format| self.encoder.supports(format))
            .ok_or_else(|| {
                ConversionError::EncodeFailure(
                    "encoder accepts neither NV21 nor RGB24".to_string(),
                )
            })
    }

    /// Convert one frame to JPEG.
    ///
    /// # Arguments
    ///
    /// * `frame` - Source planes; dimensions were validated when the
    ///   descriptor was built
    /// * `quality` - Requested quality, 75 when `None`
    ///
    /// # Errors
    ///
    /// * `InvalidPlaneSize` - a plane is too short under the strict policy
    /// * `InvalidArgument` - quality rejected by the strict quality policy
    /// * `EncodeFailure` - the encoder rejected the buffer or returned nothing
    pub fn convert(
        &self,
        frame: &Yuv420Frame<'_>,
        quality: Option<i32>,
    ) -> Result<EncodedImage, ConversionError> {
        let (width, height) = (frame.width(), frame.height());
        debug!(
            width,
            height,
            y_len = frame.y.data().len(),
            u_len = frame.u.data().len(),
            v_len = frame.v.data().len(),
            y_row_stride = frame.y.row_stride(),
            u_row_stride = frame.u.row_stride(),
            v_row_stride = frame.v.row_stride(),
            u_pixel_stride = frame.u.pixel_stride(),
            v_pixel_stride = frame.v.pixel_stride(),
            "Converting YUV420 frame"
        );

        // Validate. The packers repeat the capacity check for direct callers;
        // running it here reports a short plane ahead of a rejected quality.
        if self.options.bounds == BoundsPolicy::Strict {
            frame.check_capacity()?;
        }
        let quality = clamp_quality(quality, self.options.quality)?;
        let format = self.select_format()?;
        debug!(?format, quality, "Selected packing");

        // Pack / Expand
        let (pixels, substituted) = match format {
            PixelFormat::Nv21 => {
                let packed = pack_nv21(frame, self.options.bounds)?;
                let substituted = packed.substituted_samples();
                (packed.into_inner(), substituted)
            }
            PixelFormat::Rgb24 => {
                let packed = expand_rgb24(frame, self.options.bounds)?;
                let substituted = packed.substituted_samples();
                (packed.into_inner(), substituted)
            }
        };
        if substituted > 0 {
            warn!(
                substituted,
                width, height, "Planes were short; substituted neutral samples"
            );
        }

        // Encode
        let bytes = self
            .encoder
            .encode(&pixels, width, height, quality, format)?;
        if bytes.is_empty() {
            return Err(ConversionError::EncodeFailure(
                "encoder returned no data".to_string(),
            ));
        }

        debug!(bytes = bytes.len(), "Converted to JPEG");
        Ok(EncodedImage { bytes })
    }
}



// ============================================================================
// Property-Based Tests
// ============================================================================
