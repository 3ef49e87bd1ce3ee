//! Configuration for the catalogue parser.
//!
//! The fixed vocabularies the parser relies on (physical formats, section
//! labels, region markers, candidate languages) are plain data here so they
//! can be swapped per run or per test. Defaults reproduce the EiP catalogue.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogueError, Result};
use crate::language::Language;

/// Paragraph that opens the catalogue region.
pub const DEFAULT_REGION_START: &str = "Catalogue";

/// Paragraph that closes the catalogue region.
pub const DEFAULT_REGION_END: &str = "Appendices";

/// Minimum word count a language detection needs to be kept.
pub const DEFAULT_MIN_WORD_COUNT: usize = 5;

/// Entry header: capitalized place words followed by a year, an optional
/// year range and an optional edition letter (e.g. "Basel 1533", "Paris 1543a",
/// "Venezia 1565/66").
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ENTRY_HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-zÄÖÜäöüß/\s]+\s)+\d{4}([/–]\d{2,4})?[a-z]?$").expect("valid regex")
});

/// Check whether a paragraph starts a new catalogue entry.
///
/// # Examples
/// ```
/// use eip_catalogue::config::is_entry_header;
///
/// assert!(is_entry_header("Paris 1543a"));
/// assert!(is_entry_header("Frankfurt am Main 1594–96"));
/// assert!(!is_entry_header("Euclidis elementorum libri XV"));
/// ```
pub fn is_entry_header(text: &str) -> bool {
    ENTRY_HEADER_PATTERN.is_match(text)
}

/// Section labels, physical formats and related stop conditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Physical book formats, lower case.
    pub formats: Vec<String>,

    /// Paragraph prefixes that end the title.
    pub post_title_prefixes: Vec<String>,

    /// Phrase that looks like a format line but belongs to a title.
    pub format_exclusion: String,

    /// Label introducing an imprint section.
    pub imprint_label: String,

    /// Label introducing a colophon section.
    pub colophon_label: String,

    /// Suffix marking the trailing fragment as an editor/author name.
    pub editor_suffix: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            formats: [
                "folio",
                "octavo",
                "quarto",
                "?quarto",
                "16mo",
                "duodecimo",
                "sexto",
                "octodecimo",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            post_title_prefixes: ["Colophon:", "Imprint:", "Elements 1–6"]
                .into_iter()
                .map(String::from)
                .collect(),
            format_exclusion: "nunc quarto editi".to_string(),
            imprint_label: "Imprint:".to_string(),
            colophon_label: "Colophon:".to_string(),
            editor_suffix: " ed".to_string(),
        }
    }
}

/// Paragraphs delimiting the catalogue inside the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionMarkers {
    pub start: String,
    pub end: String,
}

impl Default for RegionMarkers {
    fn default() -> Self {
        Self {
            start: DEFAULT_REGION_START.to_string(),
            end: DEFAULT_REGION_END.to_string(),
        }
    }
}

/// Settings for language detection and disambiguation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Closed set of languages the detector may report.
    pub candidates: Vec<Language>,

    /// A detection must exceed this many words unless it is the only language.
    pub min_word_count: usize,

    /// English present means the entry is English, whatever else was detected.
    pub english_short_circuit: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            candidates: vec![
                Language::Latin,
                Language::French,
                Language::German,
                Language::Greek,
                Language::Arabic,
                Language::Spanish,
                Language::Italian,
                Language::English,
                Language::Dutch,
                Language::Chinese,
            ],
            min_word_count: DEFAULT_MIN_WORD_COUNT,
            english_short_circuit: true,
        }
    }
}

/// Complete parser configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogueConfig {
    pub vocabulary: Vocabulary,
    pub region: RegionMarkers,
    pub classifier: ClassifierConfig,
}

impl CatalogueConfig {
    /// Load a configuration from a YAML file.
    ///
    /// Missing keys fall back to their defaults, so a file may override only
    /// the vocabulary it cares about.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse a configuration from YAML text and validate it.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can drive a parse.
    ///
    /// # Examples
    /// ```
    /// use eip_catalogue::config::CatalogueConfig;
    ///
    /// assert!(CatalogueConfig::default().validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let vocabulary = &self.vocabulary;
        if vocabulary.formats.is_empty() {
            return Err(CatalogueError::Config(
                "vocabulary.formats must not be empty".to_string(),
            ));
        }
        if vocabulary.formats.iter().any(|f| f.trim().is_empty()) {
            return Err(CatalogueError::Config(
                "vocabulary.formats must not contain blank entries".to_string(),
            ));
        }
        if vocabulary.imprint_label.is_empty() || vocabulary.colophon_label.is_empty() {
            return Err(CatalogueError::Config(
                "section labels must not be empty".to_string(),
            ));
        }
        if vocabulary.editor_suffix.is_empty() {
            return Err(CatalogueError::Config(
                "vocabulary.editor_suffix must not be empty".to_string(),
            ));
        }
        if self.region.start.is_empty() || self.region.end.is_empty() {
            return Err(CatalogueError::Config(
                "region markers must not be empty".to_string(),
            ));
        }
        if self.region.start == self.region.end {
            return Err(CatalogueError::Config(format!(
                "region start and end markers are both '{}'",
                self.region.start
            )));
        }
        if self.classifier.candidates.len() < 2 {
            return Err(CatalogueError::Config(
                "classifier.candidates must name at least two languages".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_entry_header_valid() {
        assert!(is_entry_header("Basel 1533"));
        assert!(is_entry_header("Paris 1543a"));
        assert!(is_entry_header("Venezia 1565/66"));
        assert!(is_entry_header("Frankfurt am Main 1594–1596"));
        assert!(is_entry_header("Köln 1600b"));
        assert!(is_entry_header("Lugduni Batavorum 1620"));
    }

    #[test]
    fn test_is_entry_header_invalid() {
        assert!(!is_entry_header(""));
        assert!(!is_entry_header("1543"));
        assert!(!is_entry_header("Paris 154"));
        assert!(!is_entry_header("Paris 1543ab"));
        assert!(!is_entry_header("Paris 1543. quarto"));
        assert!(!is_entry_header("Colophon: Paris 1543"));
        assert!(!is_entry_header("Venezia 1565/6"));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(CatalogueConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_candidates() {
        let config = ClassifierConfig::default();
        assert_eq!(config.candidates.len(), 10);
        assert_eq!(config.min_word_count, 5);
        assert!(config.english_short_circuit);
    }

    #[test]
    fn test_from_yaml_partial_override() {
        let yaml = "vocabulary:\n  formats: [folio, quarto]\nregion:\n  start: Katalog\n";
        let config = CatalogueConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.vocabulary.formats, vec!["folio", "quarto"]);
        assert_eq!(config.vocabulary.imprint_label, "Imprint:");
        assert_eq!(config.region.start, "Katalog");
        assert_eq!(config.region.end, "Appendices");
    }

    #[test]
    fn test_from_yaml_languages() {
        let yaml = "classifier:\n  candidates: [LATIN, GREEK]\n  min_word_count: 3\n";
        let config = CatalogueConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(
            config.classifier.candidates,
            vec![Language::Latin, Language::Greek]
        );
        assert_eq!(config.classifier.min_word_count, 3);
    }

    #[test]
    fn test_validate_rejects_empty_formats() {
        let mut config = CatalogueConfig::default();
        config.vocabulary.formats.clear();
        assert!(matches!(config.validate(), Err(CatalogueError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_same_markers() {
        let mut config = CatalogueConfig::default();
        config.region.end = config.region.start.clone();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Catalogue"));
    }

    #[test]
    fn test_from_yaml_invalid() {
        assert!(matches!(
            CatalogueConfig::from_yaml_str("vocabulary: [not, a, map]"),
            Err(CatalogueError::Yaml(_))
        ));
    }
}
