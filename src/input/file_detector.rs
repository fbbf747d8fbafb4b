//! File type detection

use std::path::Path;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" | "text" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    /// Detect from the path extension; a missing extension is `Unknown`.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown)
    }

    /// Detect a file on disk: by extension, then by content when the extension
    /// is missing or unknown. Content sniffing only ever promotes to `Pdf`.
    pub fn from_path_and_bytes(path: &Path, bytes: &[u8]) -> Self {
        match Self::from_path(path) {
            FileType::Unknown if Self::from_bytes(bytes) == FileType::Pdf => FileType::Pdf,
            detected => detected,
        }
    }

    /// Sniff raw bytes. Anything that is not a PDF is read as plain text.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let leading = bytes
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(bytes.len());

        if bytes[leading..].starts_with(PDF_MAGIC) {
            FileType::Pdf
        } else {
            FileType::Text
        }
    }
}
