use crate::domain::color::Color;
use crate::domain::image_codec_trait::ImageCodec;
use crate::domain::output_format::OutputFormat;
use crate::domain::pixel_format::PixelFormat;
use crate::domain::raster::Raster;
use super::error::InfrastructureError;
use image::{ColorType, ImageFormat as InnerImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use tracing::debug;

/// `ImageCodec` backed by the `image` crate.
pub struct DefaultImageCodec;

impl DefaultImageCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DefaultImageCodec {
    fn default() -> Self {
        Self::new()
    }
}

fn pixel_format(color: ColorType) -> PixelFormat {
    let has_alpha = color.has_alpha();
    PixelFormat {
        color_components: color.channel_count() - u8::from(has_alpha),
        bits_per_pixel: color.bits_per_pixel(),
        has_alpha,
    }
}

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const PNG_PALETTE_COLOR_TYPE: u8 = 3;

/// Layout of an indexed-color PNG, read from its IHDR chunk.
///
/// The decoder expands palettes to RGB(A), which would hide that the source
/// holds 1 to 8-bit indices rather than 24 or 32-bit pixels.
fn png_palette_format(image_bytes: &[u8]) -> Option<PixelFormat> {
    // signature(8) length(4) "IHDR"(4) width(4) height(4) depth(1) color type(1)
    let header = image_bytes.get(..26)?;
    if header[..8] != PNG_SIGNATURE || &header[12..16] != b"IHDR" || header[25] != PNG_PALETTE_COLOR_TYPE {
        return None;
    }
    Some(PixelFormat {
        color_components: 3,
        bits_per_pixel: u16::from(header[24]),
        has_alpha: false,
    })
}

fn inner_format(output_format: OutputFormat) -> InnerImageFormat {
    match output_format {
        OutputFormat::Png => InnerImageFormat::Png,
        OutputFormat::Jpeg => InnerImageFormat::Jpeg,
    }
}

impl ImageCodec for DefaultImageCodec {
    fn decode_raster(&self, image_bytes: &[u8]) -> Result<Raster, InfrastructureError> {
        let reader = image::io::Reader::new(Cursor::new(image_bytes)).with_guessed_format()?;
        debug!(format = ?reader.format(), "decoding image");
        let img = reader.decode()?;

        let format = png_palette_format(image_bytes).unwrap_or_else(|| pixel_format(img.color()));
        let rgba = img.to_rgba8();
        let pixels = rgba
            .pixels()
            .map(|p| Color::new(p[0], p[1], p[2], p[3]))
            .collect();

        Ok(Raster::new(rgba.width(), rgba.height(), pixels, format)?)
    }

    fn encode_raster(&self, raster: &Raster, output_format: OutputFormat) -> Result<Vec<u8>, InfrastructureError> {
        // The output never carries alpha
        let img = RgbImage::from_fn(raster.width(), raster.height(), |x, y| {
            let c = raster.pixel(x, y);
            Rgb([c.r, c.g, c.b])
        });

        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, inner_format(output_format))?;
        debug!(?output_format, bytes = buffer.get_ref().len(), "encoded image");
        Ok(buffer.into_inner())
    }
}
