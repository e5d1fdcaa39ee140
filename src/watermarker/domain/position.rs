use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionStrategy {
    /// Tile the watermark across the whole image.
    Grid,
    /// One copy with its top-left corner at `(x, y)`.
    Single { x: u32, y: u32 },
}

impl PositionStrategy {
    /// Watermark coordinate shown at output coordinate `(x, y)`, if any.
    pub fn map_coordinate(&self, x: u32, y: u32, mark_width: u32, mark_height: u32) -> Option<(u32, u32)> {
        match *self {
            PositionStrategy::Grid => Some((x % mark_width, y % mark_height)),
            PositionStrategy::Single { x: x0, y: y0 } => {
                let inside = (x0..x0 + mark_width).contains(&x) && (y0..y0 + mark_height).contains(&y);
                inside.then(|| (x - x0, y - y0))
            }
        }
    }

    /// Checks that a single watermark lies entirely inside the base image.
    pub fn check_bounds(&self, base: (u32, u32), mark: (u32, u32)) -> Result<(), DomainError> {
        match *self {
            PositionStrategy::Grid => Ok(()),
            PositionStrategy::Single { x, y } => {
                let max_x = base.0.checked_sub(mark.0).ok_or(DomainError::WatermarkTooLarge)?;
                let max_y = base.1.checked_sub(mark.1).ok_or(DomainError::WatermarkTooLarge)?;
                if x > max_x || y > max_y {
                    return Err(DomainError::PositionOutOfRange);
                }
                Ok(())
            }
        }
    }
}
