use crate::domain::output_format::OutputFormat;
use crate::domain::raster::Raster;
use crate::infrastructure::error::InfrastructureError;

// Decoding keeps whatever layout the file had (see `Raster::format`); validation is up to the caller.
#[cfg_attr(test, mockall::automock)]
pub trait ImageCodec {
    fn decode_raster(&self, image_bytes: &[u8]) -> Result<Raster, InfrastructureError>;

    fn encode_raster(&self, raster: &Raster, output_format: OutputFormat) -> Result<Vec<u8>, InfrastructureError>;
}
