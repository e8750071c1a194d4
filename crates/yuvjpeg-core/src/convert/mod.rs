//! Plane-to-packed-buffer conversion.
//!
//! This module provides the two packings a JPEG encoder may consume:
//! - NV21: Y plane followed by interleaved V/U pairs
//! - RGB24: fully expanded pixels via the BT.601 transform
//!
//! # Bounds Policy
//!
//! Both packers walk caller-supplied strides over caller-supplied buffers, so
//! every read is checked. What happens when a read misses is chosen once per
//! conversion with [`BoundsPolicy`] and applied identically to luma and chroma:
//! - `Strict` validates plane capacity up front and fails before allocating.
//! - `Clamped` substitutes `0` for missing luma and `128` for missing chroma.
//!
//! Output always has stride equal to the image width, whatever the input
//! strides were.

mod color;
mod nv21;
mod rgb;

use serde::{Deserialize, Serialize};

use crate::plane::{ImageDescriptor, PlaneBuffer};
use crate::ConversionError;

pub use color::{yuv_to_rgb, NEUTRAL_CHROMA, U_TO_B, U_TO_G, V_TO_G, V_TO_R};
pub use nv21::{pack_nv21, PackedNv21Buffer};
pub use rgb::{expand_rgb24, PackedRgb24Buffer};

/// Fill value for a missing luma sample under [`BoundsPolicy::Clamped`].
pub const MISSING_LUMA: u8 = 0;

/// How out-of-range plane reads are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsPolicy {
    /// Reject undersized planes before any output is produced.
    #[default]
    Strict,
    /// Replace each missing sample with a neutral value and carry on.
    Clamped,
}

/// Reserve an output buffer of exactly `len` bytes.
///
/// Under the clamped policy the planes place no bound on the output size, so a
/// frame the allocator cannot satisfy is reported as `InvalidSize` instead of
/// aborting.
pub(crate) fn allocate_output(
    len: usize,
    descriptor: &ImageDescriptor,
) -> Result<Vec<u8>, ConversionError> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| ConversionError::InvalidSize {
            width: descriptor.width().into(),
            height: descriptor.height().into(),
        })?;
    Ok(data)
}

/// Append row `row` of a luma plane (`width` samples) to `out`.
///
/// Samples past the end of the plane are written as [`MISSING_LUMA`] so later
/// rows keep their position. Returns the number of substituted samples.
pub(crate) fn copy_luma_row(
    plane: &PlaneBuffer<'_>,
    row: u32,
    width: u32,
    out: &mut Vec<u8>,
) -> usize {
    if plane.pixel_stride() == 1 {
        let available = plane.row_prefix(row, width);
        out.extend_from_slice(available);
        let missing = width as usize - available.len();
        out.resize(out.len() + missing, MISSING_LUMA);
        return missing;
    }

    let mut missing = 0;
    for col in 0..width {
        let (sample, substituted) = plane.sample_or(row, col, MISSING_LUMA);
        out.push(sample);
        missing += substituted as usize;
    }
    missing
}

/// Read one row of a chroma plane into `out`, replacing its contents.
///
/// Returns the number of substituted samples.
pub(crate) fn read_chroma_row(
    plane: &PlaneBuffer<'_>,
    row: u32,
    width: u32,
    out: &mut Vec<u8>,
) -> usize {
    out.clear();
    let mut missing = 0;
    for col in 0..width {
        let (sample, substituted) = plane.sample_or(row, col, NEUTRAL_CHROMA);
        out.push(sample);
        missing += substituted as usize;
    }
    missing
}

#[cfg(test)]
pub(crate) mod test_frames {
    //! Frame builders shared by the packer tests.

    use crate::plane::{ImageDescriptor, PlaneBuffer, Yuv420Frame};

    /// Owned planes with explicit strides, borrowed into a frame on demand.
    #[derive(Debug, Clone)]
    pub struct OwnedFrame {
        pub width: u32,
        pub height: u32,
        pub y: Vec<u8>,
        pub u: Vec<u8>,
        pub v: Vec<u8>,
        pub y_row_stride: u32,
        pub u_row_stride: u32,
        pub v_row_stride: u32,
        pub u_pixel_stride: u32,
        pub v_pixel_stride: u32,
    }

    impl OwnedFrame {
        /// Tightly packed I420 planes filled by the given sample functions.
        pub fn packed(
            width: u32,
            height: u32,
            y_at: impl Fn(u32, u32) -> u8,
            u_at: impl Fn(u32, u32) -> u8,
            v_at: impl Fn(u32, u32) -> u8,
        ) -> Self {
            let (cw, ch) = (width / 2, height / 2);
            let y = (0..height)
                .flat_map(|r| (0..width).map(move |c| (r, c)))
                .map(|(r, c)| y_at(r, c))
                .collect();
            let u = (0..ch)
                .flat_map(|r| (0..cw).map(move |c| (r, c)))
                .map(|(r, c)| u_at(r, c))
                .collect();
            let v = (0..ch)
                .flat_map(|r| (0..cw).map(move |c| (r, c)))
                .map(|(r, c)| v_at(r, c))
                .collect();
            Self {
                width,
                height,
                y,
                u,
                v,
                y_row_stride: width,
                u_row_stride: cw,
                v_row_stride: cw,
                u_pixel_stride: 1,
                v_pixel_stride: 1,
            }
        }

        /// Uniform planes.
        pub fn uniform(width: u32, height: u32, y: u8, u: u8, v: u8) -> Self {
            Self::packed(width, height, |_, _| y, |_, _| u, |_, _| v)
        }

        /// Re-lay the planes with `pad` extra bytes at the end of every row.
        pub fn with_row_padding(&self, pad: u32) -> Self {
            let pad_rows = |data: &[u8], stride: u32| -> Vec<u8> {
                data.chunks(stride as usize)
                    .flat_map(|row| {
                        row.iter()
                            .copied()
                            .chain(std::iter::repeat(0xEE).take(pad as usize))
                    })
                    .collect()
            };
            Self {
                width: self.width,
                height: self.height,
                y: pad_rows(&self.y, self.y_row_stride),
                u: pad_rows(&self.u, self.u_row_stride),
                v: pad_rows(&self.v, self.v_row_stride),
                y_row_stride: self.y_row_stride + pad,
                u_row_stride: self.u_row_stride + pad,
                v_row_stride: self.v_row_stride + pad,
                u_pixel_stride: self.u_pixel_stride,
                v_pixel_stride: self.v_pixel_stride,
            }
        }

        /// Re-lay the chroma as a single interleaved VU buffer, the way Android
        /// hands out NV21-backed `YUV_420_888` images (pixel stride 2).
        pub fn interleaved_chroma(&self) -> Self {
            let (cw, ch) = (self.width / 2, self.height / 2);
            let mut vu = Vec::with_capacity((cw * ch * 2) as usize);
            for r in 0..ch {
                for c in 0..cw {
                    vu.push(self.v[(r * self.v_row_stride + c) as usize]);
                    vu.push(self.u[(r * self.u_row_stride + c) as usize]);
                }
            }
            // U starts one byte into the shared buffer
            let u = vu[1..].to_vec();
            Self {
                width: self.width,
                height: self.height,
                y: self.y.clone(),
                u,
                v: vu,
                y_row_stride: self.y_row_stride,
                u_row_stride: cw * 2,
                v_row_stride: cw * 2,
                u_pixel_stride: 2,
                v_pixel_stride: 2,
            }
        }

        pub fn frame(&self) -> Yuv420Frame<'_> {
            Yuv420Frame::new(
                ImageDescriptor::new(self.width, self.height).unwrap(),
                PlaneBuffer::packed(&self.y, self.y_row_stride).unwrap(),
                PlaneBuffer::new(&self.u, self.u_row_stride, self.u_pixel_stride).unwrap(),
                PlaneBuffer::new(&self.v, self.v_row_stride, self.v_pixel_stride).unwrap(),
            )
        }
    }
}
