//! Entry enrichment.
//!
//! Runs the selected enrichment steps over parsed entries. Every external
//! call is independent: a failed call is logged and counted, the entry keeps
//! whatever values it had, and the run continues.

use eip_catalogue::language::Language;
use eip_catalogue::CatalogueEntry;
use tracing::{debug, warn};

use crate::config::EnrichmentConfig;
use crate::error::Result;
use crate::llm::{llm_from_config, strip_json_fences, LlmClient, LlmRequest};
use crate::prompt::{
    publisher_request, title_features_request, title_verbs_request, UNKNOWN_PUBLISHER,
};
use crate::translate::{translator_from_config, Translator};

/// Target language for translations.
pub const TARGET_LANGUAGE: &str = "en";

/// Which enrichment steps to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentOptions {
    pub translate: bool,
    pub title_verbs: bool,
    pub publisher: bool,
    pub title_features: bool,
}

impl EnrichmentOptions {
    /// Whether any step is selected.
    pub fn any(&self) -> bool {
        self.translate || self.title_verbs || self.publisher || self.title_features
    }

    fn uses_llm(&self) -> bool {
        self.title_verbs || self.publisher || self.title_features
    }
}

/// Counts reported after an enrichment run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentReport {
    /// Entries processed.
    pub entries: usize,
    /// Entries that received translations.
    pub translated: usize,
    /// LLM queries sent.
    pub llm_calls: usize,
    /// Translation or LLM calls that failed.
    pub failed_calls: usize,
}

/// Applies the selected enrichment steps to entries.
pub struct Enricher {
    translator: Box<dyn Translator>,
    llm: Box<dyn LlmClient>,
    options: EnrichmentOptions,
}

impl Enricher {
    pub fn new(
        translator: Box<dyn Translator>,
        llm: Box<dyn LlmClient>,
        options: EnrichmentOptions,
    ) -> Self {
        Self {
            translator,
            llm,
            options,
        }
    }

    /// Build adapters from configuration; unconfigured adapters are disabled.
    pub fn from_config(config: &EnrichmentConfig, options: EnrichmentOptions) -> Result<Self> {
        let enricher = Self::new(
            translator_from_config(config)?,
            llm_from_config(config)?,
            options,
        );

        if options.translate && !enricher.translator.is_enabled() {
            warn!("Translation requested but GOOGLE_TRANSLATE_ACCESS_TOKEN is not set; skipping");
        }
        if options.uses_llm() && !enricher.llm.is_enabled() {
            warn!("LLM enrichment requested but OPENAI_API_KEY is not set; skipping");
        }
        Ok(enricher)
    }

    /// Enrich all entries in place.
    pub fn enrich(&self, entries: &mut [CatalogueEntry]) -> EnrichmentReport {
        let mut report = EnrichmentReport::default();
        for entry in entries.iter_mut() {
            self.enrich_entry(entry, &mut report);
        }
        report
    }

    /// Enrich one entry in place, updating `report`.
    pub fn enrich_entry(&self, entry: &mut CatalogueEntry, report: &mut EnrichmentReport) {
        debug!(key = %entry.key, "Enriching entry");
        report.entries += 1;

        if self.options.translate && self.translator.is_enabled() {
            self.translate_entry(entry, report);
        }

        if !self.llm.is_enabled() {
            return;
        }

        if self.options.title_verbs && mentions_french(entry) {
            let request = title_verbs_request(&entry.title);
            if let Some(verbs) = self.query(&entry.key, "title_verbs", &request, report) {
                entry.title_verbs = Some(verbs);
            }
        }

        if self.options.publisher {
            let request = publisher_request(entry.body().trim());
            if let Some(publisher) = self.query(&entry.key, "publisher", &request, report) {
                if publisher != UNKNOWN_PUBLISHER {
                    entry.publisher = Some(publisher);
                }
            }
        }

        if self.options.title_features {
            let request = title_features_request(&entry.title);
            if let Some(features) = self.query(&entry.key, "title_features", &request, report) {
                entry.title_features = Some(strip_json_fences(&features));
            }
        }
    }

    fn translate_entry(&self, entry: &mut CatalogueEntry, report: &mut EnrichmentReport) {
        if entry.language == Language::English.label() {
            return;
        }

        let fields = [
            entry.title.as_str(),
            entry.colophon.as_str(),
            entry.imprint.as_str(),
        ];
        match self.translator.translate(&fields, TARGET_LANGUAGE) {
            Ok(translation) => {
                // Empty cells read back as `None`, so never store `Some("")`.
                let language_v2 = translation.detected_label();
                let mut texts = translation.texts.into_iter().map(non_empty);
                entry.title_en = texts.next().flatten();
                entry.colophon_en = texts.next().flatten();
                entry.imprint_en = texts.next().flatten();
                entry.language_v2 = non_empty(language_v2);
                report.translated += 1;
            }
            Err(e) => {
                warn!(key = %entry.key, error = %e, "Translation failed");
                report.failed_calls += 1;
            }
        }
    }

    fn query(
        &self,
        key: &str,
        step: &'static str,
        request: &LlmRequest,
        report: &mut EnrichmentReport,
    ) -> Option<String> {
        report.llm_calls += 1;
        match self.llm.query(request) {
            Ok(answer) => Some(answer),
            Err(e) => {
                warn!(key, step, error = %e, "LLM query failed");
                report.failed_calls += 1;
                None
            }
        }
    }
}

impl std::fmt::Debug for Enricher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enricher")
            .field("translation_enabled", &self.translator.is_enabled())
            .field("llm_enabled", &self.llm.is_enabled())
            .field("options", &self.options)
            .finish()
    }
}

fn non_empty(value: String) -> Option<String> {
    Some(value).filter(|v| !v.is_empty())
}

/// Whether the entry's language, or the language detected during
/// translation, includes French.
fn mentions_french(entry: &CatalogueEntry) -> bool {
    let french = Language::French.label();
    entry.language.contains(french)
        || entry.language_v2.as_deref().is_some_and(|detected| {
            detected.contains(french) || detected.split(" and ").any(|code| code == "fr")
        })
}
