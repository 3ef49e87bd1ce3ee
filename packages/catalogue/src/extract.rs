//! Field extraction for a single catalogue entry.
//!
//! An entry block is laid out as:
//!
//! ```text
//! Paris 1543a                               <- header: city + year
//! Les six premiers livres des Elements      <- title, one or more paragraphs
//! d'Euclide ...
//! Imprint: A Paris, chez ...                <- optional imprint
//! Colophon: Imprimé par ...                 <- optional colophon
//! Imprint: ...                              <- imprint may also follow the colophon
//! quarto. Elements 1–6. Pierre Forcadel ed  <- trailing metadata line
//! ```
//!
//! Every section is collected paragraph by paragraph until a stop marker:
//! a post-title prefix label or a paragraph naming a physical format.

use crate::config::Vocabulary;
use crate::error::ParseError;
use crate::types::{CatalogueEntry, EntryBlock};

/// Decomposes entry blocks into `CatalogueEntry` fields.
///
/// The `language` field is left empty; classification runs separately on
/// the extracted title, colophon and imprint.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    vocabulary: Vocabulary,
    /// Vocabulary formats, lower-cased once.
    formats: Vec<String>,
}

impl FieldExtractor {
    pub fn new(vocabulary: Vocabulary) -> Self {
        let formats = vocabulary.formats.iter().map(|f| f.to_lowercase()).collect();
        Self {
            vocabulary,
            formats,
        }
    }

    /// Whether a paragraph names a physical format and so ends a section.
    ///
    /// Matches a format at the start of the paragraph or after a space,
    /// ignoring case, unless the paragraph contains the exclusion phrase.
    pub fn has_format(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        let names_format = self
            .formats
            .iter()
            .any(|f| lower.starts_with(f.as_str()) || lower.contains(&format!(" {f}")));
        let excluded = !self.vocabulary.format_exclusion.is_empty()
            && text.contains(&self.vocabulary.format_exclusion);
        names_format && !excluded
    }

    /// Whether a paragraph starts with one of the post-title labels.
    pub fn has_post_title_prefix(&self, text: &str) -> bool {
        self.vocabulary
            .post_title_prefixes
            .iter()
            .any(|prefix| text.starts_with(prefix.as_str()))
    }

    /// Whether a paragraph ends the section being collected.
    pub fn is_stop_marker(&self, text: &str) -> bool {
        self.has_post_title_prefix(text) || self.has_format(text)
    }

    /// Longest vocabulary format contained anywhere in `text`, ignoring case.
    fn format_in(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();
        self.formats
            .iter()
            .filter(|f| lower.contains(f.as_str()))
            .max_by_key(|f| f.len())
            .map(String::as_str)
    }

    /// Extract all fields of one entry.
    ///
    /// Any structural problem fails the whole entry; nothing is returned
    /// partially filled.
    pub fn extract(&self, block: &EntryBlock) -> Result<CatalogueEntry, ParseError> {
        let texts = block.texts();
        let header = texts.first().ok_or(ParseError::EmptyBlock)?;
        let last_index = block.paragraphs.last().map(|p| p.index).unwrap_or_default();
        let missing_line = || ParseError::MissingTrailingLine {
            after_index: last_index,
        };

        let (city, year) = parse_header(header)?;
        let mut entry = CatalogueEntry {
            key: (*header).to_string(),
            city,
            year,
            ..Default::default()
        };

        let mut i = self.collect_until_stop(&texts, 1, &mut entry.title);

        let vocabulary = &self.vocabulary;
        i = self
            .try_section(&texts, i, &vocabulary.imprint_label, &mut entry.imprint, true)
            .ok_or_else(missing_line)?;
        i = self
            .try_section(&texts, i, &vocabulary.colophon_label, &mut entry.colophon, false)
            .ok_or_else(missing_line)?;
        i = self
            .try_section(&texts, i, &vocabulary.imprint_label, &mut entry.imprint, false)
            .ok_or_else(missing_line)?;

        let line = texts.get(i).ok_or_else(missing_line)?;
        self.parse_trailing_line(line, &mut entry)?;

        Ok(entry)
    }

    /// Append paragraphs from `start` to `value` until a stop marker.
    ///
    /// Returns the index of the first paragraph not consumed.
    fn collect_until_stop(&self, texts: &[&str], start: usize, value: &mut String) -> usize {
        let mut i = start;
        while let Some(text) = texts.get(i) {
            if self.is_stop_marker(text) {
                break;
            }
            append_line(value, text);
            i += 1;
        }
        i
    }

    /// Collect one labelled section starting at paragraph `i`.
    ///
    /// A paragraph starting with `label` replaces the section value (label
    /// removed) and collection continues until a stop marker. Without the
    /// label, `early_break` leaves the section untouched; otherwise unlabelled
    /// paragraphs are collected. Returns `None` when `i` is past the block.
    fn try_section(
        &self,
        texts: &[&str],
        i: usize,
        label: &str,
        value: &mut String,
        early_break: bool,
    ) -> Option<usize> {
        let text = texts.get(i)?;
        let mut next = i;
        if text.starts_with(label) {
            *value = text.replace(label, "").trim().to_string();
            next += 1;
        } else if early_break {
            return Some(i);
        }
        Some(self.collect_until_stop(texts, next, value))
    }

    /// Split the trailing metadata line into format, books and author.
    fn parse_trailing_line(&self, line: &str, entry: &mut CatalogueEntry) -> Result<(), ParseError> {
        let segments: Vec<&str> = line.split('.').collect();

        let author_candidate = if let Some(line_format) = self.format_in(line) {
            let [first, books, author, ..] = segments.as_slice() else {
                return Err(ParseError::MissingSegment {
                    line: line.to_string(),
                    expected: 3,
                });
            };
            entry.format = self.format_in(first).unwrap_or(line_format).to_string();
            entry.books = books.trim().to_string();
            author.trim()
        } else {
            let [books, author, ..] = segments.as_slice() else {
                return Err(ParseError::MissingSegment {
                    line: line.to_string(),
                    expected: 2,
                });
            };
            entry.books = books.trim().to_string();
            author.trim()
        };

        entry.author = extract_author(author_candidate, &self.vocabulary.editor_suffix);
        Ok(())
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(Vocabulary::default())
    }
}

/// Split a header such as "Paris 1543a" into city and year.
///
/// The year starts at the first "1"; trailing lower-case edition letters
/// are dropped.
///
/// # Examples
/// ```
/// use eip_catalogue::extract::parse_header;
///
/// let (city, year) = parse_header("Paris 1543a").unwrap();
/// assert_eq!(city, "Paris");
/// assert_eq!(year, "1543");
/// ```
pub fn parse_header(header: &str) -> Result<(String, String), ParseError> {
    let year_index = header
        .find('1')
        .ok_or_else(|| ParseError::MissingYearDigit {
            header: header.to_string(),
        })?;

    let city = header[..year_index].trim().to_string();
    let year = header[year_index..]
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_lowercase())
        .to_string();
    Ok((city, year))
}

/// Keep the author fragment only when it carries the editor suffix.
fn extract_author(candidate: &str, suffix: &str) -> String {
    candidate
        .strip_suffix(suffix)
        .map(|name| name.trim().to_string())
        .unwrap_or_default()
}

/// Append a paragraph on a new line, trimming the running value.
fn append_line(value: &mut String, text: &str) {
    let joined = format!("{value}\n{text}");
    *value = joined.trim().to_string();
}
