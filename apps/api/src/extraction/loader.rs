//! Document loader: turns an uploaded file into plain text.
//!
//! Dispatch is on the client-supplied filename only; the bytes are never
//! sniffed. Anything that is not a PDF or Word document is read as text with
//! invalid UTF-8 sequences dropped.

use std::fs::File;
use std::io::{Read, Write};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use quick_xml::events::Event;
use quick_xml::Reader;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

/// Path of the main document part inside an OOXML package.
const WORD_DOCUMENT_PART: &str = "word/document.xml";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("Word extraction failed: {0}")]
    Word(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Word,
    PlainText,
}

impl DocumentKind {
    pub fn from_filename(filename: &str) -> Self {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            DocumentKind::Pdf
        } else if lower.ends_with(".docx") || lower.ends_with(".doc") {
            DocumentKind::Word
        } else {
            DocumentKind::PlainText
        }
    }
}

/// Extracts plain text from the file at `path`, choosing the decoder from
/// `filename` (the name the client uploaded, not the temp path).
pub fn extract_text(path: &Path, filename: &str) -> Result<String, LoadError> {
    match DocumentKind::from_filename(filename) {
        DocumentKind::Pdf => extract_pdf(path),
        DocumentKind::Word => extract_word(path),
        DocumentKind::PlainText => extract_plain(path),
    }
}

fn extract_pdf(path: &Path) -> Result<String, LoadError> {
    let bytes = std::fs::read(path)?;
    // pdf-extract panics on some malformed inputs instead of returning Err.
    let pages = catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(&bytes)
    }))
    .map_err(|_| LoadError::Pdf("parser panicked on malformed input".to_string()))?
    .map_err(|e| LoadError::Pdf(e.to_string()))?;

    let pages: Vec<&str> = pages
        .iter()
        .map(String::as_str)
        .filter(|page| !page.trim().is_empty())
        .collect();
    Ok(pages.join("\n"))
}

fn extract_word(path: &Path) -> Result<String, LoadError> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| LoadError::Word(e.to_string()))?;
    let mut xml = String::new();
    archive
        .by_name(WORD_DOCUMENT_PART)
        .map_err(|e| LoadError::Word(e.to_string()))?
        .read_to_string(&mut xml)?;

    let paragraphs = document_paragraphs(&xml)?;
    Ok(paragraphs.join("\n"))
}

/// Collects the text of every `w:p` in a WordprocessingML body, one string
/// per paragraph, in document order.
fn document_paragraphs(xml: &str) -> Result<Vec<String>, LoadError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if e.name().as_ref() == b"w:t" {
                    in_text = true;
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                b"w:p" => paragraphs.push(String::new()),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t.unescape().map_err(|e| LoadError::Word(e.to_string()))?;
                current.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(LoadError::Word(format!(
                    "malformed document.xml at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn extract_plain(path: &Path) -> Result<String, LoadError> {
    let bytes = std::fs::read(path)?;
    Ok(decode_lossy(&bytes))
}

/// Decodes UTF-8, silently dropping invalid byte sequences.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

/// An uploaded file spooled to disk for the duration of one extraction.
///
/// The file is removed when the guard is consumed by [`TempUpload::extract`]
/// or dropped on any other path. Removal failures are logged and ignored.
pub struct TempUpload {
    file: NamedTempFile,
}

impl TempUpload {
    pub fn create(bytes: &[u8]) -> Result<Self, LoadError> {
        let mut file = NamedTempFile::new()?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Runs the loader against the spooled file, then deletes it whether or
    /// not extraction succeeded.
    pub fn extract(self, filename: &str) -> Result<String, LoadError> {
        let result = extract_text(self.path(), filename);
        self.release();
        result
    }

    fn release(self) {
        let path: PathBuf = self.file.path().to_path_buf();
        if let Err(e) = self.file.close() {
            debug!("Failed to remove temp upload {}: {e}", path.display());
        }
    }
}
