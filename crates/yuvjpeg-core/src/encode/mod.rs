//! JPEG encoder capability.
//!
//! The converter never produces JPEG bits itself. It hands a fully packed
//! buffer to a [`JpegEncoder`], which may be a platform service or the bundled
//! [`ImageJpegEncoder`]. The trait is kept narrow so tests can substitute an
//! encoder that only records what it was given.
//!
//! # Examples
//!
//! ```ignore
//! use yuvjpeg_core::encode::{ImageJpegEncoder, JpegEncoder, PixelFormat};
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let jpeg = ImageJpegEncoder::new()
//!     .encode(&pixels, 100, 100, 90, PixelFormat::Rgb24)
//!     .unwrap();
//! println!("Encoded {} bytes", jpeg.len());
//! ```

mod jpeg;

pub use jpeg::{encode_jpeg, EncodeError, ImageJpegEncoder, JpegEncoder, PixelFormat};
