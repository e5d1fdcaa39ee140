use crate::domain::color::Color;
use crate::domain::composite_config::CompositeConfig;
use crate::domain::raster::Raster;

/// Blends `mark` onto `base` and returns a new opaque raster the size of `base`.
///
/// Callers must have checked `config.validate_for(base, mark)`; the compositor itself
/// does not fail.
pub fn composite(base: &Raster, mark: &Raster, config: &CompositeConfig) -> Raster {
    base.map_pixels(|x, y, base_pixel| composite_pixel(base_pixel, mark, config, x, y).opaque())
}

fn composite_pixel(base_pixel: Color, mark: &Raster, config: &CompositeConfig, x: u32, y: u32) -> Color {
    let Some((mx, my)) = config
        .position_strategy
        .map_coordinate(x, y, mark.width(), mark.height())
    else {
        return base_pixel;
    };

    let mark_pixel = mark.pixel(mx, my);
    if config.transparency_mode.is_transparent(mark_pixel) || mark_pixel == base_pixel {
        return base_pixel;
    }
    Color::blend(base_pixel, mark_pixel, config.opacity)
}
