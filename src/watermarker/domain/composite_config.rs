use crate::domain::error::DomainError;
use crate::domain::opacity::Opacity;
use crate::domain::position::PositionStrategy;
use crate::domain::raster::Raster;
use crate::domain::transparency::TransparencyMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompositeConfig {
    pub transparency_mode: TransparencyMode,
    pub position_strategy: PositionStrategy,
    pub opacity: Opacity,
}

impl CompositeConfig {
    pub fn new(transparency_mode: TransparencyMode, position_strategy: PositionStrategy, opacity: Opacity) -> Self {
        Self {
            transparency_mode,
            position_strategy,
            opacity,
        }
    }

    /// Checks the preconditions the compositor relies on for this pair of rasters.
    pub fn validate_for(&self, base: &Raster, mark: &Raster) -> Result<(), DomainError> {
        if !base.contains(mark) {
            return Err(DomainError::WatermarkTooLarge);
        }
        if self.transparency_mode == TransparencyMode::AlphaChannel && !mark.has_alpha() {
            return Err(DomainError::AlphaChannelUnavailable);
        }
        self.position_strategy
            .check_bounds((base.width(), base.height()), (mark.width(), mark.height()))
    }
}
