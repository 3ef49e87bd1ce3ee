//! Paragraph sources.
//!
//! A source turns an input document into the ordered paragraph sequence the
//! segmenter works on. Word documents (`.docx`) are the production input;
//! plain text files with one paragraph per line are convenient for tests and
//! hand-edited catalogues.

mod docx;
mod text;

use std::path::Path;

use crate::error::{CatalogueError, Result};
use crate::types::Paragraph;

pub use self::docx::{paragraphs_from_document_xml, DocxSource};
pub use self::text::TextSource;

/// Something that yields the paragraphs of one document.
pub trait ParagraphSource {
    /// Read all paragraphs in document order.
    ///
    /// Paragraph indices are zero-based and contiguous; empty paragraphs are
    /// kept so that indices match the document.
    fn paragraphs(&self) -> Result<Vec<Paragraph>>;
}

/// Pick a paragraph source from the file extension.
///
/// # Errors
/// `CatalogueError::UnsupportedSource` for anything other than `.docx` or `.txt`.
pub fn open_source(path: &Path) -> Result<Box<dyn ParagraphSource>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("docx") => Ok(Box::new(DocxSource::new(path))),
        Some("txt") => Ok(Box::new(TextSource::new(path))),
        _ => Err(CatalogueError::UnsupportedSource(
            path.display().to_string(),
        )),
    }
}
