//! YuvJpeg Core - camera frame to JPEG conversion
//!
//! This crate converts planar YUV 4:2:0 frames, as delivered by mobile camera
//! APIs with arbitrary row and pixel strides, into JPEG images.
//!
//! # Module Structure
//!
//! - `plane` - Frame descriptor and strided plane views
//! - `quality` - JPEG quality normalization
//! - `convert` - NV21 packing, RGB24 expansion and the color transform
//! - `encode` - JPEG encoder capability and the bundled `image` encoder
//! - `converter` - Validate / pack / encode facade
//! - `channel` - Named method-call boundary for host bindings
//!
//! # Example
//!
//! ```ignore
//! use yuvjpeg_core::{ImageDescriptor, PlaneBuffer, Yuv420Frame, YuvJpegConverter};
//!
//! let frame = Yuv420Frame::new(
//!     ImageDescriptor::new(640, 480)?,
//!     PlaneBuffer::packed(&y, 640)?,
//!     PlaneBuffer::new(&u, 640, 2)?,
//!     PlaneBuffer::new(&v, 640, 2)?,
//! );
//! let jpeg = YuvJpegConverter::default().convert(&frame, Some(90))?;
//! ```

pub mod channel;
pub mod convert;
pub mod converter;
pub mod encode;
mod error;
pub mod plane;
pub mod quality;

pub use channel::{
    handle_method_call, ConvertRequest, ImageArgs, MethodResponse, CONVERT_METHOD,
};
pub use convert::{
    expand_rgb24, pack_nv21, BoundsPolicy, PackedNv21Buffer, PackedRgb24Buffer,
};
pub use converter::{ConvertOptions, EncodedImage, YuvJpegConverter};
pub use encode::{EncodeError, ImageJpegEncoder, JpegEncoder, PixelFormat};
pub use error::ConversionError;
pub use plane::{ImageDescriptor, PlaneBuffer, Yuv420Frame};
pub use quality::{clamp_quality, QualityPolicy, DEFAULT_QUALITY};
