use crate::domain::color::Color;

/// How watermark pixels are recognised as see-through. Chosen once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransparencyMode {
    #[default]
    None,
    AlphaChannel,
    ColorKey(Color),
}

impl TransparencyMode {
    /// Picks the mode from what the watermark carries and what the user asked for.
    ///
    /// A watermark with alpha can only use its alpha channel (or nothing); a color key
    /// is only considered when there is no alpha channel.
    pub fn choose(watermark_has_alpha: bool, use_alpha: bool, key: Option<Color>) -> Self {
        if watermark_has_alpha {
            if use_alpha {
                TransparencyMode::AlphaChannel
            } else {
                TransparencyMode::None
            }
        } else {
            key.map_or(TransparencyMode::None, TransparencyMode::ColorKey)
        }
    }

    pub fn is_transparent(&self, mark_pixel: Color) -> bool {
        match self {
            TransparencyMode::None => false,
            TransparencyMode::AlphaChannel => mark_pixel.a == 0,
            TransparencyMode::ColorKey(key) => mark_pixel.equals_rgb(key),
        }
    }
}
