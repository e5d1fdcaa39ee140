use thiserror::Error;
use crate::domain::error::DomainError; // decoded rasters are validated through the domain types

#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("The file {0} doesn't exist.")]
    FileNotFound(String),

    #[error("Underlying image library error: {0}")]
    ImageLibError(#[from] image::ImageError),

    #[error("Underlying I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    DomainErrorWrapper(#[from] DomainError),
}
