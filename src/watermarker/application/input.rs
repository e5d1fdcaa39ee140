//! Turns raw user answers into typed compositing options.
//!
//! Shared by the console session and the HTTP handler so both reject the same
//! inputs with the same messages.

use crate::domain::color::Color;
use crate::domain::composite_config::CompositeConfig;
use crate::domain::error::DomainError;
use crate::domain::opacity::Opacity;
use crate::domain::position::PositionStrategy;
use crate::domain::raster::Raster;
use crate::domain::transparency::TransparencyMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionMethod {
    Single,
    Grid,
}

pub fn is_yes(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("yes")
}

/// Parses `"R G B"`: three runs of digits separated by single spaces, each 0-255.
pub fn parse_transparency_color(input: &str) -> Result<Color, DomainError> {
    let channels = input
        .split(' ')
        .map(|part| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(DomainError::TransparencyColorInvalid);
            }
            part.parse::<u8>().map_err(|_| DomainError::TransparencyColorInvalid)
        })
        .collect::<Result<Vec<u8>, _>>()?;

    match channels[..] {
        [r, g, b] => Ok(Color::rgb(r, g, b)),
        _ => Err(DomainError::TransparencyColorInvalid),
    }
}

pub fn parse_opacity(input: &str) -> Result<Opacity, DomainError> {
    // Answers past the 32-bit range are not integers, not out-of-range ones.
    let percent: i32 = input.parse().map_err(|_| DomainError::OpacityNotInteger)?;
    let percent = u8::try_from(percent).map_err(|_| DomainError::OpacityOutOfRange)?;
    Opacity::new(percent)
}

pub fn parse_position_method(input: &str) -> Result<PositionMethod, DomainError> {
    match input {
        "single" => Ok(PositionMethod::Single),
        "grid" => Ok(PositionMethod::Grid),
        _ => Err(DomainError::PositionMethodInvalid),
    }
}

/// Largest top-left offsets that keep `mark` inside `base`.
pub fn max_offsets(base: &Raster, mark: &Raster) -> (u32, u32) {
    (
        base.width().saturating_sub(mark.width()),
        base.height().saturating_sub(mark.height()),
    )
}

/// Parses `"x y"` and checks it against `max` (inclusive).
///
/// Every space-separated part must be a 32-bit integer; parts after the
/// second are ignored.
pub fn parse_single_position(input: &str, max: (u32, u32)) -> Result<PositionStrategy, DomainError> {
    let coords = input
        .split(' ')
        .map(|part| part.parse::<i32>().map_err(|_| DomainError::PositionInvalid))
        .collect::<Result<Vec<i32>, _>>()?;
    let [x, y, ..] = coords[..] else {
        return Err(DomainError::PositionInvalid);
    };

    let in_range = |v: i32, max: u32| (0..=i64::from(max)).contains(&i64::from(v));
    if !in_range(x, max.0) || !in_range(y, max.1) {
        return Err(DomainError::PositionOutOfRange);
    }
    Ok(PositionStrategy::Single { x: x as u32, y: y as u32 })
}

/// All answers of one run, as given by the user.
#[derive(Debug, Clone, Default)]
pub struct WatermarkOptions {
    pub use_alpha: bool,
    pub transparency_color: Option<String>,
    pub opacity: String,
    pub position_method: String,
    /// `"x y"`, only read for the single position method.
    pub position: Option<String>,
}

impl WatermarkOptions {
    pub fn to_config(&self, base: &Raster, mark: &Raster) -> Result<CompositeConfig, DomainError> {
        let key = match &self.transparency_color {
            Some(color) if !mark.has_alpha() => Some(parse_transparency_color(color)?),
            _ => None,
        };
        let transparency_mode = TransparencyMode::choose(mark.has_alpha(), self.use_alpha, key);
        let opacity = parse_opacity(&self.opacity)?;
        let position_strategy = match parse_position_method(&self.position_method)? {
            PositionMethod::Grid => PositionStrategy::Grid,
            PositionMethod::Single => {
                parse_single_position(self.position.as_deref().unwrap_or_default(), max_offsets(base, mark))?
            }
        };
        Ok(CompositeConfig::new(transparency_mode, position_strategy, opacity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pixel_format::PixelFormat;

    fn raster(w: u32, h: u32, format: PixelFormat) -> Raster {
        Raster::new(w, h, vec![Color::rgb(0, 0, 0); (w * h) as usize], format).unwrap()
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("yes"));
        assert!(is_yes("YeS"));
        assert!(!is_yes("y"));
        assert!(!is_yes(" yes"));
    }

    #[test]
    fn test_parse_transparency_color() {
        assert_eq!(parse_transparency_color("0 255 255"), Ok(Color::rgb(0, 255, 255)));
        assert_eq!(parse_transparency_color("007 10 0"), Ok(Color::rgb(7, 10, 0)));
        for bad in ["", "1 2", "1 2 3 4", "1  2 3", "-1 2 3", "256 0 0", "a b c", "1,2,3", "99999999999 0 0"] {
            assert_eq!(parse_transparency_color(bad), Err(DomainError::TransparencyColorInvalid), "{bad:?}");
        }
    }

    #[test]
    fn test_parse_opacity() {
        assert_eq!(parse_opacity("0").unwrap().percent(), 0);
        assert_eq!(parse_opacity("100").unwrap().percent(), 100);
        assert_eq!(parse_opacity("101"), Err(DomainError::OpacityOutOfRange));
        assert_eq!(parse_opacity("-5"), Err(DomainError::OpacityOutOfRange));
        assert_eq!(parse_opacity("abc"), Err(DomainError::OpacityNotInteger));
        assert_eq!(parse_opacity(""), Err(DomainError::OpacityNotInteger));
        assert_eq!(parse_opacity("5.5"), Err(DomainError::OpacityNotInteger));
        assert_eq!(parse_opacity("9999999999"), Err(DomainError::OpacityNotInteger));
        assert_eq!(parse_opacity("2147483647"), Err(DomainError::OpacityOutOfRange));
    }

    #[test]
    fn test_parse_position_method_is_exact() {
        assert_eq!(parse_position_method("grid"), Ok(PositionMethod::Grid));
        assert_eq!(parse_position_method("single"), Ok(PositionMethod::Single));
        assert_eq!(parse_position_method("Grid"), Err(DomainError::PositionMethodInvalid));
        assert_eq!(parse_position_method("singles"), Err(DomainError::PositionMethodInvalid));
    }

    #[test]
    fn test_parse_single_position() {
        assert_eq!(parse_single_position("1 2", (2, 2)), Ok(PositionStrategy::Single { x: 1, y: 2 }));
        assert_eq!(parse_single_position("0 0", (0, 0)), Ok(PositionStrategy::Single { x: 0, y: 0 }));
        assert_eq!(parse_single_position("3 0", (2, 2)), Err(DomainError::PositionOutOfRange));
        assert_eq!(parse_single_position("-1 0", (2, 2)), Err(DomainError::PositionOutOfRange));
        assert_eq!(parse_single_position("1", (2, 2)), Err(DomainError::PositionInvalid));
        assert_eq!(parse_single_position("1 x", (2, 2)), Err(DomainError::PositionInvalid));
        assert_eq!(parse_single_position("9999999999 0", (2, 2)), Err(DomainError::PositionInvalid));
        assert_eq!(parse_single_position("2147483647 0", (2, 2)), Err(DomainError::PositionOutOfRange));
    }

    #[test]
    fn test_parse_single_position_ignores_extra_numbers() {
        assert_eq!(parse_single_position("1 1 1", (2, 2)), Ok(PositionStrategy::Single { x: 1, y: 1 }));
        assert_eq!(parse_single_position("2 0 99 -4", (2, 2)), Ok(PositionStrategy::Single { x: 2, y: 0 }));
        assert_eq!(parse_single_position("1 1 z", (2, 2)), Err(DomainError::PositionInvalid));
    }

    #[test]
    fn test_to_config_color_key_only_without_alpha() {
        let base = raster(4, 4, PixelFormat::RGB24);
        let options = WatermarkOptions {
            use_alpha: true,
            transparency_color: Some("1 2 3".to_string()),
            opacity: "50".to_string(),
            position_method: "single".to_string(),
            position: Some("2 1".to_string()),
        };

        let config = options.to_config(&base, &raster(2, 2, PixelFormat::RGB24)).unwrap();
        assert_eq!(config.transparency_mode, TransparencyMode::ColorKey(Color::rgb(1, 2, 3)));
        assert_eq!(config.position_strategy, PositionStrategy::Single { x: 2, y: 1 });
        assert_eq!(config.opacity.percent(), 50);

        let config = options.to_config(&base, &raster(2, 2, PixelFormat::RGBA32)).unwrap();
        assert_eq!(config.transparency_mode, TransparencyMode::AlphaChannel);
    }

    #[test]
    fn test_to_config_single_needs_position() {
        let options = WatermarkOptions {
            opacity: "10".to_string(),
            position_method: "single".to_string(),
            ..Default::default()
        };
        let base = raster(4, 4, PixelFormat::RGB24);
        let mark = raster(2, 2, PixelFormat::RGB24);
        assert_eq!(options.to_config(&base, &mark), Err(DomainError::PositionInvalid));
    }
}
