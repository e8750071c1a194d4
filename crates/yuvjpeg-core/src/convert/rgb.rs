//! RGB24 expansion for encoders that consume RGB rather than YUV.

use super::{allocate_output, copy_luma_row, read_chroma_row, yuv_to_rgb, BoundsPolicy};
use crate::plane::Yuv420Frame;
use crate::ConversionError;

/// A contiguous RGB24 buffer, 3 bytes per pixel in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedRgb24Buffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
    substituted_samples: usize,
}

impl PackedRgb24Buffer {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    /// Samples replaced by a neutral value under the clamped policy.
    pub fn substituted_samples(&self) -> usize {
        self.substituted_samples
    }

    /// `[R, G, B]` at pixel `(x, y)`.
    pub fn pixel_at(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        let px = self.data.get(i..i + 3)?;
        Some([px[0], px[1], px[2]])
    }
}

/// Expand a YUV 4:2:0 frame into RGB24.
///
/// Each chroma cell is read once and shared by the two luma rows it covers.
/// Luma rows are bulk-copied when the plane is tightly packed.
///
/// # Errors
///
/// Under [`BoundsPolicy::Strict`], returns `InvalidPlaneSize` if any plane
/// cannot address all of its samples. Returns `InvalidSize` if the expanded
/// buffer cannot be allocated.
pub fn expand_rgb24(
    frame: &Yuv420Frame<'_>,
    policy: BoundsPolicy,
) -> Result<PackedRgb24Buffer, ConversionError> {
    if policy == BoundsPolicy::Strict {
        frame.check_capacity()?;
    }

    let d = frame.descriptor;
    let expected_len = d.rgb24_len()?;
    let mut data = allocate_output(expected_len, &d)?;
    let mut substituted_samples = 0;

    let width = d.width();
    let mut luma = allocate_output(width as usize, &d)?;
    let mut u_row = allocate_output(d.chroma_width() as usize, &d)?;
    let mut v_row = allocate_output(d.chroma_width() as usize, &d)?;

    for cy in 0..d.chroma_height() {
        substituted_samples += read_chroma_row(&frame.u, cy, d.chroma_width(), &mut u_row);
        substituted_samples += read_chroma_row(&frame.v, cy, d.chroma_width(), &mut v_row);

        for y in [cy * 2, cy * 2 + 1] {
            luma.clear();
            substituted_samples += copy_luma_row(&frame.y, y, width, &mut luma);

            for (x, &yv) in luma.iter().enumerate() {
                let cx = x / 2;
                data.extend_from_slice(&yuv_to_rgb(yv, u_row[cx], v_row[cx]));
            }
        }
    }

    debug_assert_eq!(data.len(), expected_len);

    Ok(PackedRgb24Buffer {
        width,
        height: d.height(),
        data,
        substituted_samples,
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
