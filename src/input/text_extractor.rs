//! Text extraction from various file formats

use crate::error::{Result, ResumeAnalyzerError};
use crate::input::file_detector::FileType;
use pulldown_cmark::{Event, Parser, Tag};
use regex::Regex;
use std::io::{Cursor, Read};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// One way of turning a file into text. Strategies for a file type are
/// tried in order until one succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    PdfExtract,
    Lopdf,
    Docx,
    PlainText,
    Markdown,
}

impl ExtractionStrategy {
    pub fn for_file_type(file_type: FileType) -> &'static [ExtractionStrategy] {
        match file_type {
            FileType::Pdf => &[ExtractionStrategy::PdfExtract, ExtractionStrategy::Lopdf],
            FileType::Docx => &[ExtractionStrategy::Docx],
            FileType::Text => &[ExtractionStrategy::PlainText],
            FileType::Markdown => &[ExtractionStrategy::Markdown],
            FileType::Unknown => &[],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ExtractionStrategy::PdfExtract => "pdf-extract",
            ExtractionStrategy::Lopdf => "lopdf",
            ExtractionStrategy::Docx => "docx",
            ExtractionStrategy::PlainText => "plain text",
            ExtractionStrategy::Markdown => "markdown",
        }
    }
}

impl TextExtractor for ExtractionStrategy {
    async fn extract(&self, path: &Path) -> Result<String> {
        match self {
            ExtractionStrategy::PdfExtract => PdfExtractor.extract(path).await,
            ExtractionStrategy::Lopdf => LopdfExtractor.extract(path).await,
            ExtractionStrategy::Docx => DocxExtractor.extract(path).await,
            ExtractionStrategy::PlainText => PlainTextExtractor.extract(path).await,
            ExtractionStrategy::Markdown => MarkdownExtractor.extract(path).await,
        }
    }
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        // pdf-extract panics on some malformed documents.
        let extracted = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(&bytes)).map_err(|_| {
            ResumeAnalyzerError::PdfExtraction(format!("pdf-extract panicked on '{}'", path.display()))
        })?;

        extracted.map_err(|e| {
            ResumeAnalyzerError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })
    }
}

/// Page-by-page text through the lopdf object model.
pub struct LopdfExtractor;

impl TextExtractor for LopdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let document = lopdf::Document::load_mem(&bytes).map_err(|e| {
            ResumeAnalyzerError::PdfExtraction(format!("Failed to load PDF '{}': {}", path.display(), e))
        })?;

        let pages: Vec<u32> = document.get_pages().keys().copied().collect();
        if pages.is_empty() {
            return Err(ResumeAnalyzerError::PdfExtraction(format!(
                "PDF '{}' has no pages",
                path.display()
            )));
        }

        document.extract_text(&pages).map_err(|e| {
            ResumeAnalyzerError::PdfExtraction(format!("Failed to read page text of '{}': {}", path.display(), e))
        })
    }
}

/// Paragraph text of `word/document.xml` inside the DOCX archive.
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| {
                ResumeAnalyzerError::DocxExtraction(format!(
                    "'{}' has no document body: {}",
                    path.display(),
                    e
                ))
            })?
            .read_to_string(&mut xml)?;

        Ok(Self::document_xml_to_text(&xml))
    }
}

impl DocxExtractor {
    fn document_xml_to_text(xml: &str) -> String {
        let breaks = Regex::new(r"</w:p>|<w:br\s*/>|<w:cr\s*/>").expect("Invalid paragraph regex");
        let tabs = Regex::new(r"<w:tab\s*/>").expect("Invalid tab regex");

        let text = breaks.replace_all(xml, "\n");
        let text = tabs.replace_all(&text, "\t");
        let text = strip_tags(&text);

        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(Self::markdown_to_text(&markdown_content))
    }
}

impl MarkdownExtractor {
    /// Text content of the markdown, one line per block element.
    fn markdown_to_text(markdown: &str) -> String {
        let mut text = String::new();

        for event in Parser::new(markdown) {
            match event {
                Event::Text(t) | Event::Code(t) => text.push_str(&t),
                Event::Html(html) => text.push_str(&strip_tags(&html)),
                Event::SoftBreak | Event::HardBreak => text.push('\n'),
                Event::End(Tag::Paragraph | Tag::Heading(..) | Tag::Item | Tag::CodeBlock(_)) => text.push('\n'),
                _ => {}
            }
        }

        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Remove markup tags and decode the XML entities that survive them.
fn strip_tags(markup: &str) -> String {
    let tags = Regex::new(r"<[^>]*>").expect("Invalid tag regex");

    tags.replace_all(markup, "")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_order() {
        assert_eq!(
            ExtractionStrategy::for_file_type(FileType::Pdf),
            &[ExtractionStrategy::PdfExtract, ExtractionStrategy::Lopdf]
        );
        assert!(ExtractionStrategy::for_file_type(FileType::Unknown).is_empty());
    }

    #[test]
    fn test_markdown_to_text() {
        let text = MarkdownExtractor::markdown_to_text(
            "# Jane Doe\n\n## Skills\n\n- **Rust** and `SQL`\n- Docker\n\nBuilt <em>APIs</em> &amp; tools.",
        );

        assert_eq!(text, "Jane Doe\nSkills\nRust and SQL\nDocker\nBuilt APIs & tools.");
    }

    #[test]
    fn test_document_xml_to_text() {
        let xml = r#"<w:document><w:body><w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p><w:p><w:r><w:t>Python</w:t></w:r><w:r><w:tab/><w:t>R&amp;D</w:t></w:r></w:p></w:body></w:document>"#;
        assert_eq!(DocxExtractor::document_xml_to_text(xml), "Jane Doe\nPython\tR&D");
    }

    #[tokio::test]
    async fn test_docx_archive_roundtrip() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");

        let file = std::fs::File::create(&path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        writer
            .start_file("word/document.xml", zip::write::FileOptions::default())
            .unwrap();
        writer
            .write_all(b"<w:document><w:body><w:p><w:r><w:t>Kubernetes engineer</w:t></w:r></w:p></w:body></w:document>")
            .unwrap();
        writer.finish().unwrap();

        let text = DocxExtractor.extract(&path).await.unwrap();
        assert_eq!(text, "Kubernetes engineer");
    }

    #[tokio::test]
    async fn test_docx_without_body_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"not a zip archive").unwrap();

        let err = DocxExtractor.extract(&path).await.unwrap_err();
        assert!(matches!(err, ResumeAnalyzerError::Archive(_)));
    }
}
