//! JPEG quality normalization.
//!
//! Which range is valid depends on the encoder a host targets, so the policy is
//! chosen with the rest of [`ConvertOptions`](crate::ConvertOptions) rather than
//! hard-coded.

use serde::{Deserialize, Serialize};

use crate::ConversionError;

/// Quality used when the caller does not supply one.
pub const DEFAULT_QUALITY: i32 = 75;

/// How a requested quality is mapped into the encoder's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityPolicy {
    /// Silently clamp into `[min, max]`.
    Clamp { min: u8, max: u8 },
    /// Pass `[0, 100]` through unchanged and reject anything else.
    Strict,
}

impl Default for QualityPolicy {
    fn default() -> Self {
        QualityPolicy::Clamp { min: 50, max: 100 }
    }
}

/// Normalize a quality request under `policy`.
///
/// # Example
/// ```
/// use yuvjpeg_core::quality::{clamp_quality, QualityPolicy};
///
/// let policy = QualityPolicy::default();
/// assert_eq!(clamp_quality(Some(30), policy).unwrap(), 50);
/// assert_eq!(clamp_quality(None, policy).unwrap(), 75);
/// ```
pub fn clamp_quality(requested: Option<i32>, policy: QualityPolicy) -> Result<u8, ConversionError> {
    let quality = requested.unwrap_or(DEFAULT_QUALITY);
    match policy {
        QualityPolicy::Clamp { min, max } => {
            // A misordered range still yields something inside [0, 100].
            let (lo, hi) = (min.min(max).min(100), max.max(min).min(100));
            Ok(quality.clamp(lo as i32, hi as i32) as u8)
        }
        QualityPolicy::Strict => {
            if (0..=100).contains(&quality) {
                Ok(quality as u8)
            } else {
                Err(ConversionError::InvalidArgument(format!(
                    "quality must be within 0..=100, got {}",
                    quality
                )))
            }
        }
    }
}
