use thiserror::Error;
use crate::domain::raster::RasterRole;

// Messages are shown to the user as-is, so they are full sentences.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("The number of {0} color components isn't 3.")]
    ColorComponents(RasterRole),

    #[error("The {0} isn't 24 or 32-bit.")]
    BitDepth(RasterRole),

    #[error("The watermark's dimensions are larger.")]
    WatermarkTooLarge,

    #[error("The watermark has no alpha channel.")]
    AlphaChannelUnavailable,

    #[error("The transparency color input is invalid.")]
    TransparencyColorInvalid,

    #[error("The transparency percentage isn't an integer number.")]
    OpacityNotInteger,

    #[error("The transparency percentage is out of range.")]
    OpacityOutOfRange,

    #[error("The position method input is invalid.")]
    PositionMethodInvalid,

    #[error("The position input is invalid.")]
    PositionInvalid,

    #[error("The position input is out of range.")]
    PositionOutOfRange,

    #[error("The output file extension isn't \"jpg\" or \"png\".")]
    OutputExtension,

    #[error("Raster must be at least 1x1, got {width}x{height}")]
    EmptyRaster { width: u32, height: u32 },

    #[error("Raster of {width}x{height} needs {expected} pixels, got {actual}")]
    PixelCountMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}
