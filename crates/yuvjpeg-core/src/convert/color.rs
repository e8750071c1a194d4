//! BT.601-derived YUV to RGB transform.
//!
//! Chroma is centered on 128. Each coefficient product is rounded to the
//! nearest integer (half away from zero) on its own before the terms are
//! summed, and the sum is saturated to `[0, 255]`.

/// V contribution to red.
pub const V_TO_R: f64 = 1.370705;

/// V contribution to green (subtracted).
pub const V_TO_G: f64 = 0.698001;

/// U contribution to green (subtracted).
pub const U_TO_G: f64 = 0.337633;

/// U contribution to blue.
pub const U_TO_B: f64 = 1.732446;

/// Chroma value carrying no color; also the fill for missing chroma samples.
pub const NEUTRAL_CHROMA: u8 = 128;

#[inline]
fn term(coefficient: f64, centered: i32) -> i32 {
    (coefficient * centered as f64).round() as i32
}

#[inline]
fn saturate(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

/// Convert one YUV sample triple to `[R, G, B]`.
///
/// # Example
/// ```
/// use yuvjpeg_core::convert::yuv_to_rgb;
///
/// assert_eq!(yuv_to_rgb(128, 128, 128), [128, 128, 128]);
/// ```
#[inline]
pub fn yuv_to_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let y = y as i32;
    let u = u as i32 - NEUTRAL_CHROMA as i32;
    let v = v as i32 - NEUTRAL_CHROMA as i32;

    let r = y + term(V_TO_R, v);
    let g = y - term(V_TO_G, v) - term(U_TO_G, u);
    let b = y + term(U_TO_B, u);

    [saturate(r), saturate(g), saturate(b)]
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: more luma never darkens any channel.
        #[test]
        fn prop_monotonic_in_luma(y in 0u8..255, u in any::<u8>(), v in any::<u8>()) {
            let lo = yuv_to_rgb(y, u, v);
            let hi = yuv_to_rgb(y + 1, u, v);
            for c in 0..3 {
                prop_assert!(hi[c] >= lo[c]);
            }
        }

        /// Property: neutral chroma reproduces luma exactly.
        #[test]
        fn prop_neutral_chroma_identity(y in any::<u8>()) {
            prop_assert_eq!(yuv_to_rgb(y, NEUTRAL_CHROMA, NEUTRAL_CHROMA), [y, y, y]);
        }
    }
}
