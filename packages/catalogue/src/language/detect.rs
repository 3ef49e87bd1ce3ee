//! `lingua`-backed multi-language detection.

use lingua::{Language as LinguaLanguage, LanguageDetectorBuilder};

use super::{Detection, Language, LanguageDetector};
use crate::error::{CatalogueError, Result};

impl Language {
    fn to_lingua(self) -> LinguaLanguage {
        match self {
            Self::Arabic => LinguaLanguage::Arabic,
            Self::Chinese => LinguaLanguage::Chinese,
            Self::Dutch => LinguaLanguage::Dutch,
            Self::English => LinguaLanguage::English,
            Self::French => LinguaLanguage::French,
            Self::German => LinguaLanguage::German,
            Self::Greek => LinguaLanguage::Greek,
            Self::Italian => LinguaLanguage::Italian,
            Self::Latin => LinguaLanguage::Latin,
            Self::Spanish => LinguaLanguage::Spanish,
        }
    }

    fn from_lingua(language: LinguaLanguage) -> Option<Self> {
        match language {
            LinguaLanguage::Arabic => Some(Self::Arabic),
            LinguaLanguage::Chinese => Some(Self::Chinese),
            LinguaLanguage::Dutch => Some(Self::Dutch),
            LinguaLanguage::English => Some(Self::English),
            LinguaLanguage::French => Some(Self::French),
            LinguaLanguage::German => Some(Self::German),
            LinguaLanguage::Greek => Some(Self::Greek),
            LinguaLanguage::Italian => Some(Self::Italian),
            LinguaLanguage::Latin => Some(Self::Latin),
            LinguaLanguage::Spanish => Some(Self::Spanish),
            _ => None,
        }
    }
}

/// Detector restricted to a closed set of candidate languages.
pub struct LinguaDetector {
    detector: lingua::LanguageDetector,
}

impl LinguaDetector {
    /// Build a detector for the given candidates.
    ///
    /// Loading language models is expensive; build once per run.
    pub fn new(candidates: &[Language]) -> Result<Self> {
        let languages: Vec<LinguaLanguage> = candidates.iter().map(|l| l.to_lingua()).collect();
        if languages.len() < 2 {
            return Err(CatalogueError::Config(
                "language detection needs at least two candidate languages".to_string(),
            ));
        }

        tracing::debug!(count = languages.len(), "Building language detector");
        let detector = LanguageDetectorBuilder::from_languages(&languages).build();
        Ok(Self { detector })
    }
}

impl LanguageDetector for LinguaDetector {
    fn detect(&self, text: &str) -> Vec<Detection> {
        self.detector
            .detect_multiple_languages_of(text)
            .into_iter()
            .filter_map(|result| {
                let language = Language::from_lingua(result.language())?;
                let span = text
                    .get(result.start_index()..result.end_index())
                    .unwrap_or_default();
                Some(Detection::new(language, span.split_whitespace().count()))
            })
            .collect()
    }
}
