use std::sync::Arc;
use super::error::ApplicationError;
use super::input::WatermarkOptions;
use tracing::{debug, info};

use crate::domain::composite_config::CompositeConfig;
use crate::domain::compositor::composite;
use crate::domain::error::DomainError;
use crate::domain::image_codec_trait::ImageCodec;
use crate::domain::output_format::OutputFormat;
use crate::domain::raster::{Raster, RasterRole};
use crate::domain::transparency::TransparencyMode;

pub struct WatermarkService {
    image_codec: Arc<dyn ImageCodec + Send + Sync>, // トレイトオブジェクトとして保持
}

impl WatermarkService {
    pub fn new(image_codec: Arc<dyn ImageCodec + Send + Sync>) -> Self {
        Self { image_codec }
    }

    /// Decodes one input and checks it has a layout the compositor accepts.
    pub fn load_raster(&self, image_bytes: &[u8], role: RasterRole) -> Result<Raster, ApplicationError> {
        let raster = self.image_codec.decode_raster(image_bytes)?;
        raster.format().validate(role)?;
        debug!(%role, width = raster.width(), height = raster.height(), format = ?raster.format(), "loaded raster");
        Ok(raster)
    }

    pub fn ensure_fits(base: &Raster, mark: &Raster) -> Result<(), ApplicationError> {
        if !base.contains(mark) {
            return Err(DomainError::WatermarkTooLarge.into());
        }
        Ok(())
    }

    /// Composites `mark` onto `base` and encodes the result.
    ///
    /// The base is always read as opaque; the watermark keeps its alpha only when the
    /// alpha channel drives transparency.
    pub async fn watermark(
        &self,
        base: Raster,
        mark: Raster,
        config: CompositeConfig,
        output_format: OutputFormat,
    ) -> Result<(Vec<u8>, &'static str), ApplicationError> {
        config.validate_for(&base, &mark)?;
        info!(
            mode = ?config.transparency_mode,
            position = ?config.position_strategy,
            opacity = config.opacity.percent(),
            "compositing {}x{} watermark onto {}x{} image",
            mark.width(),
            mark.height(),
            base.width(),
            base.height()
        );

        let base = base.into_opaque();
        let mark = match config.transparency_mode {
            TransparencyMode::AlphaChannel => mark,
            _ => mark.into_opaque(),
        };

        let output = tokio::task::spawn_blocking(move || composite(&base, &mark, &config))
            .await
            .map_err(|e| ApplicationError::WatermarkFailed(e.to_string()))?;

        let bytes = self.image_codec.encode_raster(&output, output_format)?;
        Ok((bytes, output_format.content_type()))
    }

    /// Full pipeline from encoded inputs and raw options.
    pub async fn watermark_bytes(
        &self,
        image_bytes: &[u8],
        watermark_bytes: &[u8],
        options: &WatermarkOptions,
        output_format: OutputFormat,
    ) -> Result<(Vec<u8>, &'static str), ApplicationError> {
        let base = self.load_raster(image_bytes, RasterRole::Image)?;
        let mark = self.load_raster(watermark_bytes, RasterRole::Watermark)?;
        Self::ensure_fits(&base, &mark)?;

        let config = options.to_config(&base, &mark)?;
        self.watermark(base, mark, config, output_format).await
    }
}
