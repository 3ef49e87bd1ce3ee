//! Language classification for catalogue entries.
//!
//! Detection yields candidate languages with word counts; a fixed rule list
//! then collapses them into one canonical label (or two joined by "and").

mod detect;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::config::ClassifierConfig;

pub use self::detect::LinguaDetector;

/// Separator between labels of a compound language.
pub const LABEL_SEPARATOR: &str = " and ";

/// Languages an entry may be classified as.
///
/// Declared in alphabetical order so that ordered sets print alphabetically.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Language {
    Arabic,
    Chinese,
    Dutch,
    English,
    French,
    German,
    Greek,
    Italian,
    Latin,
    Spanish,
}

impl Language {
    /// Canonical label used in the output table (e.g. "LATIN").
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.into()
    }
}

/// One detected language span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub language: Language,
    pub word_count: usize,
}

impl Detection {
    pub fn new(language: Language, word_count: usize) -> Self {
        Self {
            language,
            word_count,
        }
    }
}

/// Multi-language detection over a block of text.
///
/// Implementations return one `Detection` per single-language span.
pub trait LanguageDetector: Send + Sync {
    fn detect(&self, text: &str) -> Vec<Detection>;
}

/// Keep languages with enough evidence.
///
/// A language survives when one of its detections has more than
/// `min_word_count` words, or when it is the only language detected at all.
/// Several short spans of one and the same language count as a sole language
/// and are kept.
pub fn retain_confident(detections: &[Detection], min_word_count: usize) -> BTreeSet<Language> {
    let distinct: BTreeSet<Language> = detections.iter().map(|d| d.language).collect();
    if distinct.len() == 1 {
        return distinct;
    }

    detections
        .iter()
        .filter(|d| d.word_count > min_word_count)
        .map(|d| d.language)
        .collect()
}

/// Collapse a set of detected languages into the canonical set.
///
/// Rules run in order, each on the output of the previous one. Every rule
/// builds a new set; nothing is removed while iterating.
pub fn disambiguate(languages: &BTreeSet<Language>, english_short_circuit: bool) -> BTreeSet<Language> {
    if english_short_circuit && languages.contains(&Language::English) {
        return BTreeSet::from([Language::English]);
    }

    let mut result = languages.clone();
    drop_if_both(&mut result, Language::Spanish, Language::Latin);
    drop_if_both(&mut result, Language::English, Language::Latin);
    drop_if_both(&mut result, Language::Italian, Language::Latin);
    drop_if_both(&mut result, Language::German, Language::Dutch);

    if result.contains(&Language::French) {
        result = result
            .into_iter()
            .filter(|l| matches!(l, Language::French | Language::Latin | Language::Greek))
            .collect();
    }

    result
}

/// Remove `dropped` when `kept` is also present.
fn drop_if_both(languages: &mut BTreeSet<Language>, dropped: Language, kept: Language) {
    if languages.contains(&kept) && languages.contains(&dropped) {
        languages.remove(&dropped);
    }
}

/// Join canonical labels in set order.
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
/// use eip_catalogue::language::{join_labels, Language};
///
/// let set = BTreeSet::from([Language::Latin, Language::French]);
/// assert_eq!(join_labels(&set), "FRENCH and LATIN");
/// ```
pub fn join_labels(languages: &BTreeSet<Language>) -> String {
    languages
        .iter()
        .map(Language::label)
        .collect::<Vec<_>>()
        .join(LABEL_SEPARATOR)
}

/// Detector plus disambiguation rules.
pub struct LanguageClassifier {
    detector: Box<dyn LanguageDetector>,
    config: ClassifierConfig,
}

impl LanguageClassifier {
    pub fn new(detector: Box<dyn LanguageDetector>, config: ClassifierConfig) -> Self {
        Self { detector, config }
    }

    /// Canonical language set for a block of text.
    pub fn classify_set(&self, text: &str) -> BTreeSet<Language> {
        if text.trim().is_empty() {
            return BTreeSet::new();
        }
        let detections = self.detector.detect(text);
        let retained = retain_confident(&detections, self.config.min_word_count);
        disambiguate(&retained, self.config.english_short_circuit)
    }

    /// Canonical language label for a block of text; empty if nothing was detected.
    pub fn classify(&self, text: &str) -> String {
        join_labels(&self.classify_set(text))
    }
}

impl std::fmt::Debug for LanguageClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageClassifier")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::FixedDetector;
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    use super::Language::*;

    fn set(languages: &[Language]) -> BTreeSet<Language> {
        languages.iter().copied().collect()
    }

    #[test]
    fn test_label_round_trip() {
        assert_eq!(Language::English.label(), "ENGLISH");
        assert_eq!(Language::from_str("LATIN").unwrap(), Language::Latin);
        assert_eq!(Language::Greek.to_string(), "GREEK");
    }

    #[test]
    fn test_english_wins() {
        assert_eq!(disambiguate(&set(&[English, Latin]), true), set(&[English]));
        assert_eq!(
            disambiguate(&set(&[English, French, German]), true),
            set(&[English])
        );
    }

    #[test]
    fn test_latin_beats_spanish_and_italian() {
        assert_eq!(disambiguate(&set(&[Spanish, Latin]), true), set(&[Latin]));
        assert_eq!(disambiguate(&set(&[Italian, Latin]), true), set(&[Latin]));
    }

    #[test]
    fn test_dutch_beats_german() {
        assert_eq!(disambiguate(&set(&[Dutch, German]), true), set(&[Dutch]));
    }

    #[test]
    fn test_french_keeps_latin_and_greek_only() {
        assert_eq!(
            disambiguate(&set(&[French, Italian, Latin]), true),
            set(&[French, Latin])
        );
        assert_eq!(
            disambiguate(&set(&[French, Greek, German, Arabic]), true),
            set(&[French, Greek])
        );
    }

    #[test]
    fn test_rules_apply_in_sequence() {
        assert_eq!(
            disambiguate(&set(&[Spanish, Latin, Dutch, German]), true),
            set(&[Dutch, Latin])
        );
    }

    #[test]
    fn test_without_english_short_circuit() {
        assert_eq!(disambiguate(&set(&[English, Latin]), false), set(&[Latin]));
        assert_eq!(disambiguate(&set(&[English, French]), false), set(&[French]));
        assert_eq!(disambiguate(&set(&[English, German]), false), set(&[English, German]));
    }

    #[test]
    fn test_disambiguate_is_idempotent() {
        let inputs = [
            set(&[English, Latin]),
            set(&[Spanish, Latin, Dutch, German]),
            set(&[French, Italian, Latin, Greek]),
            set(&[French, Dutch, German]),
            set(&[Arabic, Chinese]),
            set(&[]),
        ];
        for short_circuit in [true, false] {
            for input in &inputs {
                let once = disambiguate(input, short_circuit);
                let twice = disambiguate(&once, short_circuit);
                assert_eq!(once, twice, "not idempotent for {input:?}");
            }
        }
    }

    #[test]
    fn test_retain_confident_threshold() {
        let detections = [
            Detection::new(Latin, 40),
            Detection::new(Greek, 5),
            Detection::new(French, 6),
        ];
        assert_eq!(retain_confident(&detections, 5), set(&[French, Latin]));
    }

    #[test]
    fn test_retain_confident_sole_language() {
        assert_eq!(retain_confident(&[Detection::new(Greek, 2)], 5), set(&[Greek]));
        assert_eq!(
            retain_confident(&[Detection::new(Latin, 2), Detection::new(Latin, 3)], 5),
            set(&[Latin])
        );
    }

    #[test]
    fn test_retain_confident_any_span_counts() {
        let detections = [
            Detection::new(Latin, 3),
            Detection::new(Latin, 12),
            Detection::new(Italian, 4),
        ];
        assert_eq!(retain_confident(&detections, 5), set(&[Latin]));
    }

    #[test]
    fn test_classifier_joins_sorted() {
        let classifier = LanguageClassifier::new(
            Box::new(FixedDetector(vec![
                Detection::new(Latin, 20),
                Detection::new(French, 30),
            ])),
            ClassifierConfig::default(),
        );
        assert_eq!(classifier.classify("Elemens d'Euclide"), "FRENCH and LATIN");
    }

    #[test]
    fn test_classifier_blank_text() {
        let classifier = LanguageClassifier::new(
            Box::new(FixedDetector(vec![Detection::new(Latin, 20)])),
            ClassifierConfig::default(),
        );
        assert_eq!(classifier.classify("  \n "), "");
    }
}
