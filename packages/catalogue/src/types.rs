//! Core data types for the catalogue parser.
//!
//! A document is read as a flat list of `Paragraph`s, grouped into one
//! `EntryBlock` per catalogue entry, and each block becomes a `CatalogueEntry`.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// One paragraph of the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// Zero-based position in the source sequence.
    pub index: usize,

    /// Plain text of the paragraph.
    pub text: String,
}

impl Paragraph {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// Whether the paragraph carries no visible text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Build an indexed paragraph list from plain strings.
///
/// # Examples
/// ```
/// use eip_catalogue::types::paragraphs_from;
///
/// let paragraphs = paragraphs_from(["Catalogue", "Basel 1533"]);
/// assert_eq!(paragraphs[1].index, 1);
/// assert_eq!(paragraphs[1].text, "Basel 1533");
/// ```
pub fn paragraphs_from<I, S>(texts: I) -> Vec<Paragraph>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    texts
        .into_iter()
        .enumerate()
        .map(|(index, text)| Paragraph::new(index, text))
        .collect()
}

/// Paragraphs belonging to one catalogue entry, header first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryBlock {
    pub paragraphs: Vec<Paragraph>,
}

impl EntryBlock {
    pub fn new(header: Paragraph) -> Self {
        Self {
            paragraphs: vec![header],
        }
    }

    pub fn push(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// The header paragraph, if any.
    #[must_use]
    pub fn header(&self) -> Option<&Paragraph> {
        self.paragraphs.first()
    }

    /// Paragraph texts in order.
    pub fn texts(&self) -> Vec<&str> {
        self.paragraphs.iter().map(|p| p.text.as_str()).collect()
    }
}

/// One catalogue entry, i.e. one row of the output table.
///
/// Field order is column order. Enrichment columns stay `None` until an
/// enrichment pass fills them; they are written as empty cells. Columns
/// missing from a table read back as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogueEntry {
    /// Raw header paragraph (e.g. "Paris 1543a").
    pub key: String,
    pub city: String,
    pub year: String,
    pub title: String,
    pub colophon: String,
    pub imprint: String,
    /// One of the vocabulary formats, or empty.
    pub format: String,
    pub books: String,
    /// Present only when the trailing line carries an editor marker.
    pub author: String,
    /// Canonical language label, e.g. "LATIN" or "FRENCH and LATIN".
    pub language: String,

    #[serde(rename = "title_EN")]
    pub title_en: Option<String>,
    #[serde(rename = "colophon_EN")]
    pub colophon_en: Option<String>,
    #[serde(rename = "imprint_EN")]
    pub imprint_en: Option<String>,
    pub language_v2: Option<String>,
    pub publisher: Option<String>,
    pub title_verbs: Option<String>,
    pub title_features: Option<String>,
}

impl CatalogueEntry {
    /// Title, colophon and imprint joined by newlines.
    ///
    /// This is the text language detection and enrichment look at.
    pub fn body(&self) -> String {
        [
            self.title.as_str(),
            self.colophon.as_str(),
            self.imprint.as_str(),
        ]
        .join("\n")
    }
}

/// An entry dropped because its block could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub block: EntryBlock,
    pub error: ParseError,
}

impl SkippedEntry {
    /// Header text of the dropped block, for reporting.
    pub fn header_text(&self) -> &str {
        self.block.header().map(|p| p.text.as_str()).unwrap_or_default()
    }
}

/// Outcome of parsing one catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogueRun {
    /// Parsed entries in document order.
    pub entries: Vec<CatalogueEntry>,

    /// Blocks that failed extraction, in document order.
    pub skipped: Vec<SkippedEntry>,
}

impl CatalogueRun {
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}
