use super::error::InfrastructureError;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::debug;

pub struct LocalFileStorage;

impl LocalFileStorage {
    pub fn new() -> Self {
        Self
    }

    /// Reads a whole file; a missing file is reported with the name the user gave.
    pub async fn read_image(&self, path: &str) -> Result<Vec<u8>, InfrastructureError> {
        match fs::read(path).await {
            Ok(data) => {
                debug!(path, bytes = data.len(), "read image file");
                Ok(data)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(InfrastructureError::FileNotFound(path.to_string())),
            Err(e) => Err(InfrastructureError::IoError(e)),
        }
    }

    pub async fn save_image(&self, path: impl AsRef<Path>, data: &[u8]) -> Result<(), InfrastructureError> {
        let path = path.as_ref();
        fs::write(path, data).await?;
        debug!(path = %path.display(), bytes = data.len(), "wrote image file");
        Ok(())
    }
}

impl Default for LocalFileStorage {
    fn default() -> Self {
        Self::new()
    }
}
