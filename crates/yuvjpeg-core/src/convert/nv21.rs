//! NV21 packing: full-resolution Y followed by interleaved V/U pairs.

use super::{allocate_output, copy_luma_row, BoundsPolicy, NEUTRAL_CHROMA};
use crate::plane::Yuv420Frame;
use crate::ConversionError;

/// A contiguous NV21 buffer with stride equal to the image width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedNv21Buffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
    substituted_samples: usize,
}

impl PackedNv21Buffer {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed bytes: `width * height` luma, then `(V, U)` per chroma cell.
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

    /// Luma at pixel `(x, y)`.
    pub fn y_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// `(V, U)` for chroma cell `(cx, cy)`.
    pub fn vu_at(&self, cx: u32, cy: u32) -> Option<(u8, u8)> {
        let (cw, ch) = (self.width / 2, self.height / 2);
        if cx >= cw || cy >= ch {
            return None;
        }
        let base = self.width as usize * self.height as usize
            + (cy as usize * cw as usize + cx as usize) * 2;
        Some((*self.data.get(base)?, *self.data.get(base + 1)?))
    }
}

/// Pack a YUV 4:2:0 frame into NV21.
///
/// # Arguments
///
/// * `frame` - Source planes with arbitrary row and pixel strides
/// * `policy` - What to do when a plane is too short for its geometry
///
/// # Errors
///
/// Under [`BoundsPolicy::Strict`], returns `InvalidPlaneSize` if any plane
/// cannot address all of its samples. Nothing is allocated in that case.
/// Returns `InvalidSize` if the packed buffer cannot be allocated.
pub fn pack_nv21(
    frame: &Yuv420Frame<'_>,
    policy: BoundsPolicy,
) -> Result<PackedNv21Buffer, ConversionError> {
    if policy == BoundsPolicy::Strict {
        frame.check_capacity()?;
    }

    let d = frame.descriptor;
    let expected_len = d.nv21_len()?;
    let mut data = allocate_output(expected_len, &d)?;
    let mut substituted_samples = 0;

    for row in 0..d.height() {
        substituted_samples += copy_luma_row(&frame.y, row, d.width(), &mut data);
    }

    // NV21 is V first, the reverse of NV12
    for cr in 0..d.chroma_height() {
        for cc in 0..d.chroma_width() {
            let (v, v_missing) = frame.v.sample_or(cr, cc, NEUTRAL_CHROMA);
            let (u, u_missing) = frame.u.sample_or(cr, cc, NEUTRAL_CHROMA);
            data.push(v);
            data.push(u);
            substituted_samples += v_missing as usize + u_missing as usize;
        }
    }

    debug_assert_eq!(data.len(), expected_len);

    Ok(PackedNv21Buffer {
        width: d.width(),
        height: d.height(),
        data,
        substituted_samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::test_frames::OwnedFrame;
    use crate::plane::{ImageDescriptor, PlaneBuffer};

    #[test]
    fn test_pack_nv21_layout() {
        let owned = OwnedFrame::packed(
            4,
            2,
            |r, c| (r * 4 + c) as u8,
            |_, c| 100 + c as u8,
            |_, c| 200 + c as u8,
        );
        let packed = pack_nv21(&owned.frame(), BoundsPolicy::Strict).unwrap();
        assert_eq!(packed.data(), &[0, 1, 2, 3, 4, 5, 6, 7, 200, 100, 201, 101]);
        assert_eq!(packed.substituted_samples(), 0);
    }

    #[test]
    fn test_pack_nv21_length() {
        let owned = OwnedFrame::uniform(640, 480, 16, 128, 128);
        let packed = pack_nv21(&owned.frame(), BoundsPolicy::Strict).unwrap();
        assert_eq!(packed.data().len(), 640 * 480 + 320 * 240 * 2);
    }

    #[test]
    fn test_pack_nv21_interleaved_source() {
        let owned = OwnedFrame::packed(
            8,
            4,
            |r, c| (r + c) as u8,
            |r, c| (r * 4 + c) as u8,
            |r, c| (50 + r * 4 + c) as u8,
        );
        let planar = pack_nv21(&owned.frame(), BoundsPolicy::Strict).unwrap();
        let interleaved = owned.interleaved_chroma();
        let packed = pack_nv21(&interleaved.frame(), BoundsPolicy::Strict).unwrap();
        assert_eq!(planar, packed);
    }

    #[test]
    fn test_pack_nv21_row_padding_is_ignored() {
        let owned = OwnedFrame::packed(
            6,
            4,
            |r, c| (r * 6 + c) as u8,
            |r, c| (r + c) as u8,
            |r, c| (9 - r - c) as u8,
        );
        let plain = pack_nv21(&owned.frame(), BoundsPolicy::Strict).unwrap();
        let padded = owned.with_row_padding(10);
        let padded = pack_nv21(&padded.frame(), BoundsPolicy::Strict).unwrap();
        assert_eq!(plain.data(), padded.data());
    }

    #[test]
    fn test_strict_rejects_short_y_plane() {
        let mut owned = OwnedFrame::uniform(4, 4, 1, 2, 3);
        owned.y.truncate(15);
        let result = pack_nv21(&owned.frame(), BoundsPolicy::Strict);
        assert!(matches!(
            result,
            Err(ConversionError::InvalidPlaneSize { plane: "Y", .. })
        ));
    }

    #[test]
    fn test_strict_rejects_short_chroma_plane() {
        let mut owned = OwnedFrame::uniform(4, 4, 1, 2, 3);
        owned.v.truncate(3);
        let result = pack_nv21(&owned.frame(), BoundsPolicy::Strict);
        assert!(matches!(
            result,
            Err(ConversionError::InvalidPlaneSize { plane: "V", .. })
        ));
    }

    #[test]
    fn test_clamped_fills_neutral_values() {
        let mut owned = OwnedFrame::uniform(4, 4, 50, 60, 70);
        owned.y.truncate(14);
        owned.u.truncate(3);
        let packed = pack_nv21(&owned.frame(), BoundsPolicy::Clamped).unwrap();

        assert_eq!(packed.data().len(), 4 * 4 + 2 * 2 * 2);
        assert_eq!(packed.y_at(1, 3), Some(50));
        assert_eq!(packed.y_at(2, 3), Some(0));
        assert_eq!(packed.y_at(3, 3), Some(0));
        assert_eq!(packed.vu_at(0, 1), Some((70, 60)));
        assert_eq!(packed.vu_at(1, 1), Some((70, NEUTRAL_CHROMA)));
        assert_eq!(packed.substituted_samples(), 3);
    }

    #[test]
    fn test_clamped_survives_empty_planes() {
        let d = ImageDescriptor::new(2, 2).unwrap();
        let empty: [u8; 0] = [];
        let frame = Yuv420Frame::new(
            d,
            PlaneBuffer::packed(&empty, 2).unwrap(),
            PlaneBuffer::packed(&empty, 1).unwrap(),
            PlaneBuffer::packed(&empty, 1).unwrap(),
        );
        let packed = pack_nv21(&frame, BoundsPolicy::Clamped).unwrap();
        assert_eq!(packed.data(), &[0, 0, 0, 0, 128, 128]);
    }

    #[test]
    fn test_clamped_unallocatable_frame_is_an_error() {
        let empty: [u8; 0] = [];
        for (width, height) in [(1 << 30, 1 << 10), (1 << 31, 1 << 31)] {
            let d = ImageDescriptor::new(width, height).unwrap();
            let frame = Yuv420Frame::new(
                d,
                PlaneBuffer::packed(&empty, width).unwrap(),
                PlaneBuffer::packed(&empty, width / 2).unwrap(),
                PlaneBuffer::packed(&empty, width / 2).unwrap(),
            );
            let result = pack_nv21(&frame, BoundsPolicy::Clamped);
            assert!(
                matches!(result, Err(ConversionError::InvalidSize { .. })),
                "{}x{} should not be packable",
                width,
                height
            );
        }
    }

    #[test]
    fn test_accessors_reject_out_of_range() {
        let owned = OwnedFrame::uniform(2, 2, 1, 2, 3);
        let packed = pack_nv21(&owned.frame(), BoundsPolicy::Strict).unwrap();
        assert_eq!(packed.y_at(2, 0), None);
        assert_eq!(packed.vu_at(1, 0), None);
        assert_eq!(packed.vu_at(0, 0), Some((3, 2)));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
