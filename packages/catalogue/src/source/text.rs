//! Plain-text paragraph source.

use std::path::{Path, PathBuf};

use unicode_normalization::UnicodeNormalization;

use super::ParagraphSource;
use crate::error::Result;
use crate::types::{paragraphs_from, Paragraph};

/// Reads one paragraph per line from a UTF-8 text file.
#[derive(Debug, Clone)]
pub struct TextSource {
    path: PathBuf,
}

impl TextSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Split text into NFC-normalized paragraphs, one per line.
    pub fn parse(content: &str) -> Vec<Paragraph> {
        paragraphs_from(content.lines().map(|line| line.nfc().collect::<String>()))
    }
}

impl ParagraphSource for TextSource {
    fn paragraphs(&self) -> Result<Vec<Paragraph>> {
        let content = std::fs::read_to_string(&self.path)?;
        let paragraphs = Self::parse(&content);
        tracing::debug!(path = %self.path.display(), count = paragraphs.len(), "Read text paragraphs");
        Ok(paragraphs)
    }
}
