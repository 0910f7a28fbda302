use enough::StopReason;

use crate::pixel::PixelFormat;

/// Errors from texel decoding and texture dumping.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DumpError {
    #[error("unknown pixel format tag {0}")]
    UnknownFormatTag(u32),

    #[error("unsupported pixel format {format:?} (tag {})", .format.tag())]
    UnsupportedFormat { format: PixelFormat },

    #[error("invalid region: left={left} right={right} top={top} bottom={bottom}")]
    InvalidRegion {
        left: u32,
        right: u32,
        top: u32,
        bottom: u32,
    },

    #[error("row stride {stride} is narrower than width {width}")]
    InvalidStride { stride: u32, width: u32 },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("pixel buffer length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("png encoding failed: {0}")]
    Encode(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for DumpError {
    fn from(r: StopReason) -> Self {
        DumpError::Cancelled(r)
    }
}
