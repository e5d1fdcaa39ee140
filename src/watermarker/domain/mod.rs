pub mod color;
pub mod composite_config;
pub mod compositor;
pub mod error;
pub mod image_codec_trait;
pub mod opacity;
pub mod output_format;
pub mod pixel_format;
pub mod position;
pub mod raster;
pub mod transparency;
