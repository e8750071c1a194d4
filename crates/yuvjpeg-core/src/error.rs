//! Error types for frame conversion.

use thiserror::Error;

use crate::encode::EncodeError;

/// Errors that can occur while converting a YUV frame to JPEG.
///
/// Every failure is reported before a packed buffer leaves the converter, so a
/// caller never observes partially written output.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// A required request field was absent.
    #[error("Missing argument: {0}")]
    MissingArgument(String),

    /// A field was present but outside its accepted range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Frame dimensions are zero, odd, or too large to address.
    #[error("Invalid size: {width}x{height}")]
    InvalidSize { width: i64, height: i64 },

    /// A plane holds fewer bytes than its geometry requires.
    #[error("{plane} plane too small: {actual} < {required}")]
    InvalidPlaneSize {
        plane: &'static str,
        required: usize,
        actual: usize,
    },

    /// The JPEG encoder rejected the packed buffer or produced no data.
    #[error("Encode failure: {0}")]
    EncodeFailure(String),

    /// Any other fault, wrapped with its underlying message.
    #[error("Failed to convert YUV to JPEG: {0}")]
    UnexpectedFailure(String),
}

impl ConversionError {
    /// Stable wire code reported to the host alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            ConversionError::MissingArgument(_) => "MISSING_ARGUMENT",
            ConversionError::InvalidArgument(_) => "INVALID_ARGUMENT",
            ConversionError::InvalidSize { .. } => "INVALID_SIZE",
            ConversionError::InvalidPlaneSize { .. } => "INVALID_PLANE_SIZE",
            ConversionError::EncodeFailure(_) => "ENCODE_FAILURE",
            ConversionError::UnexpectedFailure(_) => "UNEXPECTED_FAILURE",
        }
    }
}

impl From<EncodeError> for ConversionError {
    fn from(err: EncodeError) -> Self {
        ConversionError::EncodeFailure(err.to_string())
    }
}
