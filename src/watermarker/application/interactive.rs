//! Console question-and-answer flow that collects every option of one run.

use std::io::{BufRead, Write};
use tracing::info;

use super::error::ApplicationError;
use super::input::{self, PositionMethod};
use super::watermark_service::WatermarkService;
use crate::domain::composite_config::CompositeConfig;
use crate::domain::output_format::OutputFormat;
use crate::domain::position::PositionStrategy;
use crate::domain::raster::{Raster, RasterRole};
use crate::domain::transparency::TransparencyMode;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::file_storage::LocalFileStorage;

pub struct InteractiveSession<'a, R, W> {
    service: &'a WatermarkService,
    storage: &'a LocalFileStorage,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> InteractiveSession<'a, R, W> {
    pub fn new(service: &'a WatermarkService, storage: &'a LocalFileStorage, input: R, output: W) -> Self {
        Self {
            service,
            storage,
            input,
            output,
        }
    }

    /// Runs the whole flow; returns the name of the written file.
    ///
    /// The first invalid answer ends the run with its error.
    pub async fn run(mut self) -> Result<String, ApplicationError> {
        self.prompt("Input the image filename:")?;
        let image_name = self.answer()?;
        let base = self.load(&image_name, RasterRole::Image).await?;

        self.prompt("Input the watermark image filename:")?;
        let watermark_name = self.answer()?;
        let mark = self.load(&watermark_name, RasterRole::Watermark).await?;
        WatermarkService::ensure_fits(&base, &mark)?;

        let transparency_mode = self.ask_transparency_mode(&mark)?;

        self.say("Input the watermark transparency percentage (Integer 0-100):")?;
        let opacity = input::parse_opacity(&self.answer()?)?;

        self.say("Choose the position method (single, grid):")?;
        let position_strategy = match input::parse_position_method(&self.answer()?)? {
            PositionMethod::Grid => PositionStrategy::Grid,
            PositionMethod::Single => {
                let (max_x, max_y) = input::max_offsets(&base, &mark);
                self.say(&format!("Input the watermark position ([x 0-{max_x}] [y 0-{max_y}]):"))?;
                input::parse_single_position(&self.answer()?, (max_x, max_y))?
            }
        };

        self.say("Input the output image filename (jpg or png extension):")?;
        let output_name = self.answer()?;
        let output_format = OutputFormat::from_file_name(&output_name)?;

        let config = CompositeConfig::new(transparency_mode, position_strategy, opacity);
        let (bytes, _) = self.service.watermark(base, mark, config, output_format).await?;
        self.storage.save_image(&output_name, &bytes).await?;

        info!(output = %output_name, "watermarked image written");
        self.say(&format!("The watermarked image {output_name} has been created."))?;
        Ok(output_name)
    }

    fn ask_transparency_mode(&mut self, mark: &Raster) -> Result<TransparencyMode, ApplicationError> {
        if mark.has_alpha() {
            self.say("Do you want to use the watermark's Alpha channel?")?;
            let use_alpha = input::is_yes(&self.answer()?);
            return Ok(TransparencyMode::choose(true, use_alpha, None));
        }

        self.say("Do you want to set a transparency color?")?;
        if !input::is_yes(&self.answer()?) {
            return Ok(TransparencyMode::None);
        }
        self.say("Input a transparency color ([Red] [Green] [Blue]):")?;
        let key = input::parse_transparency_color(&self.answer()?)?;
        Ok(TransparencyMode::choose(false, false, Some(key)))
    }

    async fn load(&self, file_name: &str, role: RasterRole) -> Result<Raster, ApplicationError> {
        let bytes = self.storage.read_image(file_name).await?;
        self.service.load_raster(&bytes, role)
    }

    /// Question on the same line as the answer.
    fn prompt(&mut self, text: &str) -> Result<(), ApplicationError> {
        write!(self.output, "{text}").and_then(|_| self.output.flush()).map_err(InfrastructureError::IoError)?;
        Ok(())
    }

    fn say(&mut self, text: &str) -> Result<(), ApplicationError> {
        writeln!(self.output, "{text}").and_then(|_| self.output.flush()).map_err(InfrastructureError::IoError)?;
        Ok(())
    }

    fn answer(&mut self) -> Result<String, ApplicationError> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(InfrastructureError::IoError)?;
        if read == 0 {
            return Err(ApplicationError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
