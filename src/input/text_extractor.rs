//! Text extraction from various document formats

use crate::error::{Result, SkillMatchError};
use crate::input::file_detector::FileType;
use log::{debug, error, info};
use pulldown_cmark::{Event, Parser, Tag};
use std::borrow::Cow;
use std::io::Read;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

/// A document submitted for extraction. Lives only for one extraction call.
#[derive(Debug, Clone)]
pub enum Document {
    Bytes(Vec<u8>),
    Path(PathBuf),
}

impl Document {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Document::Bytes(bytes.into())
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Document::Path(path.into())
    }

    /// Drain a byte stream (an upload body, a pipe) into an in-memory document.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Document::Bytes(bytes))
    }

    fn describe(&self) -> String {
        match self {
            Document::Bytes(bytes) => format!("<{} bytes>", bytes.len()),
            Document::Path(path) => path.display().to_string(),
        }
    }
}

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        // The PDF decoder panics on some malformed inputs instead of erroring.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(bytes)
        }));

        match outcome {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(SkillMatchError::PdfExtraction(e.to_string())),
            Err(_) => Err(SkillMatchError::PdfExtraction(
                "PDF decoder aborted on malformed input".to_string(),
            )),
        }
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        let text = std::str::from_utf8(bytes).map_err(|e| {
            SkillMatchError::UnsupportedFormat(format!("Text is not valid UTF-8: {}", e))
        })?;
        Ok(text.to_string())
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let markdown_content = PlainTextExtractor.extract(bytes)?;
        Ok(self.markdown_to_text(&markdown_content))
    }
}

impl MarkdownExtractor {
    fn markdown_to_text(&self, markdown: &str) -> String {
        let mut text = String::new();

        for event in Parser::new(markdown) {
            match event {
                Event::Text(t) | Event::Code(t) => text.push_str(&t),
                Event::SoftBreak | Event::HardBreak | Event::Rule => text.push('\n'),
                Event::End(Tag::Paragraph | Tag::Heading(..) | Tag::Item | Tag::CodeBlock(_)) => {
                    text.push('\n')
                }
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

/// Extract plain text from a document, in reading order.
///
/// Every failure (unreadable file, corrupt PDF, unknown format, bad
/// encoding, empty content) is logged and reported as `None`.
pub fn extract_text(document: &Document) -> Option<String> {
    match try_extract_text(document) {
        Ok(text) if text.trim().is_empty() => {
            info!("No text found in document {}", document.describe());
            None
        }
        Ok(text) => {
            info!(
                "Successfully extracted {} characters from {}",
                text.chars().count(),
                document.describe()
            );
            Some(text)
        }
        Err(e) => {
            error!("Error extracting text from {}: {}", document.describe(), e);
            None
        }
    }
}

/// Fallible extraction with the underlying error preserved.
pub fn try_extract_text(document: &Document) -> Result<String> {
    let (bytes, file_type): (Cow<'_, [u8]>, FileType) = match document {
        Document::Bytes(bytes) => (Cow::Borrowed(bytes.as_slice()), FileType::from_bytes(bytes)),
        Document::Path(path) => {
            let bytes = std::fs::read(path)?;
            let file_type = FileType::from_path_and_bytes(path, &bytes);
            (Cow::Owned(bytes), file_type)
        }
    };

    if bytes.is_empty() {
        return Err(SkillMatchError::InvalidInput("Document is empty".to_string()));
    }

    debug!("Detected {:?} document ({} bytes)", file_type, bytes.len());
    extract_with(file_type, &bytes, document)
}

fn extract_with(file_type: FileType, bytes: &[u8], document: &Document) -> Result<String> {
    match file_type {
        FileType::Pdf => PdfExtractor.extract(bytes),
        FileType::Text => PlainTextExtractor.extract(bytes),
        FileType::Markdown => MarkdownExtractor.extract(bytes),
        FileType::Unknown => Err(SkillMatchError::UnsupportedFormat(format!(
            "Unsupported file type for: {}",
            document.describe()
        ))),
    }
}

/// Convenience wrapper for callers holding a path.
pub fn extract_text_from_path(path: &Path) -> Option<String> {
    extract_text(&Document::from_path(path))
}
