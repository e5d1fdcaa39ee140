use crate::domain::opacity::Opacity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const OPAQUE: u8 = 255;

    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, Self::OPAQUE)
    }

    /// Same color with the alpha channel dropped (fully opaque).
    pub fn opaque(self) -> Self {
        Self { a: Self::OPAQUE, ..self }
    }

    /// Compares red, green and blue only.
    pub fn equals_rgb(&self, other: &Color) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }

    /// Integer-weighted average of `base` and `mark`, `opacity` percent of the weight going to `mark`.
    ///
    /// Each channel is `(p * mark + (100 - p) * base) / 100` with floor division.
    /// The result is always opaque.
    pub fn blend(base: Color, mark: Color, opacity: Opacity) -> Color {
        let p = u32::from(opacity.percent());
        let channel = |b: u8, m: u8| -> u8 {
            // p * 255 + (100 - p) * 255 = 25500, so the quotient never exceeds 255
            ((p * u32::from(m) + (100 - p) * u32::from(b)) / 100) as u8
        };
        Color::rgb(
            channel(base.r, mark.r),
            channel(base.g, mark.g),
            channel(base.b, mark.b),
        )
    }
}
