//! Error handling for the resume analyzer

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeAnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Every extraction strategy registered for the file type failed.
    #[error("Could not extract text from '{}' ({} strategies tried): {}", path.display(), attempts.len(), attempts.join("; "))]
    ExtractionFailed {
        path: PathBuf,
        attempts: Vec<String>,
    },

    #[error("Could not read resume '{}': {reason}", path.display())]
    ResumeUnreadable { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ResumeAnalyzerError>;

impl ResumeAnalyzerError {
    /// True when the error means the file could be opened but no strategy
    /// produced text from it.
    pub fn is_extraction_failure(&self) -> bool {
        matches!(
            self,
            ResumeAnalyzerError::ExtractionFailed { .. }
                | ResumeAnalyzerError::PdfExtraction(_)
                | ResumeAnalyzerError::DocxExtraction(_)
        )
    }
}
