//! Input manager for handling different file types

use crate::error::{Result, ResumeAnalyzerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{ExtractionStrategy, TextExtractor};
use crate::processing::document::{Document, DocumentType};
use crate::processing::normalizer::TextNormalizer;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
    normalizer: TextNormalizer,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
            normalizer: TextNormalizer::new(),
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Extract text with the strategies registered for the file type, in
    /// order. An empty file is a successful read; every strategy failing is
    /// `ExtractionFailed`.
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(ResumeAnalyzerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = self.detect_file_type(path)?;
        let strategies = ExtractionStrategy::for_file_type(file_type);
        if strategies.is_empty() {
            return Err(ResumeAnalyzerError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            )));
        }

        let mut attempts = Vec::new();
        let mut extracted = None;
        for strategy in strategies {
            debug!("Trying {} extraction for {}", strategy.name(), path.display());
            match strategy.extract(path).await {
                Ok(text) => {
                    info!("Extracted {} characters from {} via {}", text.len(), path.display(), strategy.name());
                    extracted = Some(text);
                    break;
                }
                Err(e) => {
                    warn!("{} extraction failed for {}: {}", strategy.name(), path.display(), e);
                    attempts.push(format!("{}: {}", strategy.name(), e));
                }
            }
        }

        let text = match extracted {
            Some(text) if file_type.is_binary() => self.normalizer.clean_text(&text),
            Some(text) => text,
            None => {
                return Err(ResumeAnalyzerError::ExtractionFailed {
                    path: path.to_path_buf(),
                    attempts,
                })
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Extract a file into a typed document.
    pub async fn load_document(&mut self, path: &Path, document_type: DocumentType) -> Result<Document> {
        let text = self.extract_text(path).await?;
        Ok(Document::new(text, path.to_string_lossy().to_string(), document_type))
    }

    /// Load a resume. A file no strategy could read is `ResumeUnreadable`.
    pub async fn load_resume(&mut self, path: &Path) -> Result<Document> {
        self.load_document(path, DocumentType::Resume).await.map_err(|e| {
            if e.is_extraction_failure() {
                ResumeAnalyzerError::ResumeUnreadable {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            } else {
                e
            }
        })
    }

    /// Load a job description. A file no strategy could read is analyzed as
    /// empty text.
    pub async fn load_job_description(&mut self, path: &Path) -> Result<Document> {
        match self.load_document(path, DocumentType::JobDescription).await {
            Err(e) if e.is_extraction_failure() => {
                warn!("Continuing with an empty job description: {}", e);
                Ok(Document::empty(
                    path.to_string_lossy().to_string(),
                    DocumentType::JobDescription,
                ))
            }
            other => other,
        }
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| ResumeAnalyzerError::InvalidInput(format!("File has no extension: {}", path.display())))?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_corrupt_pdf_exhausts_strategies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"%PDF-1.4 this is not really a pdf").unwrap();

        let err = InputManager::new().extract_text(&path).await.unwrap_err();
        match err {
            ResumeAnalyzerError::ExtractionFailed { attempts, .. } => {
                assert_eq!(attempts.len(), 2);
                assert!(attempts[0].starts_with("pdf-extract"));
                assert!(attempts[1].starts_with("lopdf"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreadable_resume_and_job() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.pdf");
        std::fs::write(&path, b"garbage").unwrap();

        let mut manager = InputManager::new();
        assert!(matches!(
            manager.load_resume(&path).await,
            Err(ResumeAnalyzerError::ResumeUnreadable { .. })
        ));

        let job = manager.load_job_description(&path).await.unwrap();
        assert!(job.is_empty());
        assert_eq!(job.document_type, DocumentType::JobDescription);
    }

    #[tokio::test]
    async fn test_empty_text_file_is_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, "").unwrap();

        assert_eq!(InputManager::new().extract_text(&path).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.txt");
        std::fs::write(&path, "Rust engineer").unwrap();

        let mut manager = InputManager::new();
        manager.extract_text(&path).await.unwrap();
        std::fs::write(&path, "changed").unwrap();
        assert_eq!(manager.extract_text(&path).await.unwrap(), "Rust engineer");
        assert_eq!(manager.cache_size(), 1);

        let mut uncached = InputManager::new().with_cache(false);
        assert_eq!(uncached.extract_text(&path).await.unwrap(), "changed");
        assert_eq!(uncached.cache_size(), 0);
    }

    #[tokio::test]
    async fn test_load_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.md");
        std::fs::write(&path, "# Jane\n\nPython developer").unwrap();

        let doc = InputManager::new()
            .load_document(&path, DocumentType::Resume)
            .await
            .unwrap();
        assert_eq!(doc.content, "Jane\nPython developer");
        assert_eq!(doc.document_type, DocumentType::Resume);
    }

    #[tokio::test]
    async fn test_unsupported_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.xyz");
        std::fs::write(&path, "x").unwrap();

        let mut manager = InputManager::new();
        assert!(matches!(
            manager.extract_text(&path).await,
            Err(ResumeAnalyzerError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            manager.extract_text(&dir.path().join("missing.txt")).await,
            Err(ResumeAnalyzerError::InvalidInput(_))
        ));
    }
}
