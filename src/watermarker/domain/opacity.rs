use crate::domain::error::DomainError;

/// Weight (0-100) given to the watermark color when blending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opacity(u8);

impl Opacity {
    pub const MAX: u8 = 100;

    pub fn new(percent: u8) -> Result<Self, DomainError> {
        if percent > Self::MAX {
            return Err(DomainError::OpacityOutOfRange);
        }
        Ok(Self(percent))
    }

    pub fn percent(self) -> u8 {
        self.0
    }
}
