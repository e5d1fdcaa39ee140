use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Format implied by an output file name; only `.png` and `.jpg` are accepted.
    pub fn from_file_name(file_name: &str) -> Result<Self, DomainError> {
        if file_name.ends_with(".png") {
            Ok(OutputFormat::Png)
        } else if file_name.ends_with(".jpg") {
            Ok(OutputFormat::Jpeg)
        } else {
            Err(DomainError::OutputExtension)
        }
    }

    /// Lenient lookup by format name, falling back to PNG.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "jpeg" | "jpg" => OutputFormat::Jpeg,
            _ => OutputFormat::Png,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }
}
