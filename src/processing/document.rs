//! Extracted documents handed to the analysis engine

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub file_path: String,
    pub document_type: DocumentType,
    pub metadata: DocumentMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    Resume,
    JobDescription,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub word_count: usize,
    pub character_count: usize,
}

impl Document {
    pub fn new(content: String, file_path: String, document_type: DocumentType) -> Self {
        let word_count = content.split_whitespace().count();
        let character_count = content.chars().count();

        Self {
            content,
            file_path,
            document_type,
            metadata: DocumentMetadata {
                word_count,
                character_count,
            },
        }
    }

    /// A document whose text could not be extracted.
    pub fn empty(file_path: String, document_type: DocumentType) -> Self {
        Self::new(String::new(), file_path, document_type)
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// File name without its directory, for report headers.
    pub fn file_name(&self) -> String {
        file_name_of(&self.file_path)
    }
}

/// Last component of `path`, or the whole string when it has none.
pub fn file_name_of(path: &str) -> String {
    std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentType::Resume => write!(f, "resume"),
            DocumentType::JobDescription => write!(f, "job description"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_counts() {
        let doc = Document::new(
            "Senior Rust engineer\nwith café experience".to_string(),
            "/tmp/cv/resume.txt".to_string(),
            DocumentType::Resume,
        );

        assert_eq!(doc.metadata.word_count, 6);
        assert_eq!(doc.metadata.character_count, 41);
        assert_eq!(doc.file_name(), "resume.txt");
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::empty("job.pdf".to_string(), DocumentType::JobDescription);
        assert!(doc.is_empty());
        assert_eq!(doc.metadata.word_count, 0);
        assert_eq!(doc.document_type.to_string(), "job description");
    }

    #[test]
    fn test_file_name_of() {
        assert_eq!(file_name_of("/home/jane/cv/resume.pdf"), "resume.pdf");
        assert_eq!(file_name_of("job.txt"), "job.txt");
        assert_eq!(file_name_of(".."), "..");
    }
}
