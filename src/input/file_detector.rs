//! File type detection

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            // Legacy .doc files go through the same archive reader and fail there.
            "docx" | "doc" => FileType::Docx,
            "txt" | "text" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(FileType::Unknown, Self::from_extension)
    }

    /// Binary formats whose extracted text needs whitespace cleanup.
    pub fn is_binary(self) -> bool {
        matches!(self, FileType::Pdf | FileType::Docx)
    }
}
