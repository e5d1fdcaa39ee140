use std::fmt;

use crate::domain::color::Color;
use crate::domain::error::DomainError;
use crate::domain::pixel_format::PixelFormat;

/// Which input a raster is, used to word validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterRole {
    Image,
    Watermark,
}

impl fmt::Display for RasterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterRole::Image => f.write_str("image"),
            RasterRole::Watermark => f.write_str("watermark"),
        }
    }
}

/// A 2D grid of colors stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    format: PixelFormat,
}

impl Raster {
    pub fn new(width: u32, height: u32, pixels: Vec<Color>, format: PixelFormat) -> Result<Self, DomainError> {
        if width == 0 || height == 0 {
            return Err(DomainError::EmptyRaster { width, height });
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(DomainError::PixelCountMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels, format })
    }

    #[cfg(test)]
    /// Builds a raster by evaluating `f` at every coordinate in row-major order.
    pub fn from_fn(width: u32, height: u32, format: PixelFormat, mut f: impl FnMut(u32, u32) -> Color) -> Result<Self, DomainError> {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self::new(width, height, pixels, format)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn has_alpha(&self) -> bool {
        self.format.has_alpha
    }

    /// Panics when `(x, y)` lies outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) outside {}x{}", self.width, self.height);
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    #[cfg(test)]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Whether `other` fits inside this raster without scaling.
    pub fn contains(&self, other: &Raster) -> bool {
        other.width <= self.width && other.height <= self.height
    }

    /// New alpha-less raster of the same size, each pixel computed from its coordinate and current color.
    pub fn map_pixels(&self, mut f: impl FnMut(u32, u32, Color) -> Color) -> Raster {
        let width = self.width as usize;
        let pixels = self
            .pixels
            .iter()
            .enumerate()
            .map(|(i, &color)| f((i % width) as u32, (i / width) as u32, color))
            .collect();
        Raster {
            width: self.width,
            height: self.height,
            pixels,
            format: PixelFormat::RGB24,
        }
    }

    /// Same raster read without its alpha channel: every pixel becomes opaque.
    pub fn into_opaque(mut self) -> Raster {
        for pixel in &mut self.pixels {
            *pixel = pixel.opaque();
        }
        self
    }
}
