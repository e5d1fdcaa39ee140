use crate::domain::error::DomainError;
use crate::domain::raster::RasterRole;

/// Layout of the pixels a raster was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelFormat {
    /// Color components, alpha excluded.
    pub color_components: u8,
    pub bits_per_pixel: u16,
    pub has_alpha: bool,
}

impl PixelFormat {
    pub const RGB24: PixelFormat = PixelFormat {
        color_components: 3,
        bits_per_pixel: 24,
        has_alpha: false,
    };

    #[cfg(test)]
    pub const RGBA32: PixelFormat = PixelFormat {
        color_components: 3,
        bits_per_pixel: 32,
        has_alpha: true,
    };

    /// Only 3-component, 24 or 32-bit rasters can be composited.
    pub fn validate(&self, role: RasterRole) -> Result<(), DomainError> {
        if self.color_components != 3 {
            return Err(DomainError::ColorComponents(role));
        }
        if self.bits_per_pixel != 24 && self.bits_per_pixel != 32 {
            return Err(DomainError::BitDepth(role));
        }
        Ok(())
    }
}
