//! Translation adapter.
//!
//! Translates the title, colophon and imprint of an entry and reports the
//! source languages the service detected.

use std::collections::BTreeSet;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::config::EnrichmentConfig;
use crate::error::{EnrichError, Result};
use crate::http::{create_client, post_json, JsonRequest};

/// Translated fragments aligned to the input fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translation {
    /// One translation per input; empty inputs map to empty strings.
    pub texts: Vec<String>,

    /// Source-language codes reported by the service, sorted.
    pub detected_languages: BTreeSet<String>,
}

impl Translation {
    /// An all-empty translation for `count` inputs.
    pub fn empty(count: usize) -> Self {
        Self {
            texts: vec![String::new(); count],
            detected_languages: BTreeSet::new(),
        }
    }

    /// Detected languages joined with " and ".
    pub fn detected_label(&self) -> String {
        self.detected_languages
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" and ")
    }
}

/// Trait for translation services, enabling mocking in tests.
pub trait Translator: Send + Sync {
    /// Translate `texts` into `target` (a language code such as "en").
    fn translate(&self, texts: &[&str], target: &str) -> Result<Translation>;

    /// Whether calls reach a real service.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Stand-in used when no translation credentials are configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledTranslator;

impl Translator for DisabledTranslator {
    fn translate(&self, texts: &[&str], _target: &str) -> Result<Translation> {
        Ok(Translation::empty(texts.len()))
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Google Cloud Translation (v3, REST `translateText`).
///
/// NOTE: Do NOT derive `Debug` on this struct; `access_token` would be exposed.
pub struct GoogleTranslator {
    http: Client,
    access_token: String,
    project_id: String,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateTextRequest<'a> {
    contents: Vec<&'a str>,
    target_language_code: &'a str,
    mime_type: &'a str,
}

#[derive(Deserialize)]
struct TranslateTextResponse {
    #[serde(default)]
    translations: Vec<TranslatedText>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslatedText {
    translated_text: String,
    #[serde(default)]
    detected_language_code: Option<String>,
}

impl GoogleTranslator {
    pub fn new(access_token: impl Into<String>, config: &EnrichmentConfig) -> Result<Self> {
        Ok(Self {
            http: create_client(config.timeout_secs)?,
            access_token: access_token.into(),
            project_id: config.google_project_id.clone(),
            base_url: config.google_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v3/projects/{}:translateText",
            self.base_url, self.project_id
        )
    }
}

impl Translator for GoogleTranslator {
    fn translate(&self, texts: &[&str], target: &str) -> Result<Translation> {
        let contents: Vec<&str> = texts.iter().copied().filter(|t| !t.trim().is_empty()).collect();
        if contents.is_empty() {
            return Ok(Translation::empty(texts.len()));
        }

        let url = self.endpoint();
        let body = TranslateTextRequest {
            contents,
            target_language_code: target,
            mime_type: "text/plain",
        };
        let response: TranslateTextResponse = post_json(
            &self.http,
            &JsonRequest {
                service: "Google Translate",
                url: &url,
                bearer_token: &self.access_token,
                headers: &[("x-goog-user-project", self.project_id.as_str())],
                body: &body,
            },
        )?;

        if response.translations.len() != body.contents.len() {
            return Err(EnrichError::ResponseParse {
                service: "Google Translate",
                message: format!(
                    "expected {} translations, got {}",
                    body.contents.len(),
                    response.translations.len()
                ),
            });
        }

        Ok(align(texts, response.translations))
    }
}

/// Re-insert empty strings for inputs that were not sent.
fn align(texts: &[&str], translations: Vec<TranslatedText>) -> Translation {
    let mut translated = translations.into_iter();
    let mut result = Translation::default();

    for text in texts {
        if text.trim().is_empty() {
            result.texts.push(String::new());
            continue;
        }
        if let Some(t) = translated.next() {
            if let Some(code) = t.detected_language_code.filter(|c| !c.is_empty()) {
                result.detected_languages.insert(code);
            }
            result.texts.push(t.translated_text);
        }
    }
    result
}

/// Pick the translator for a configuration.
pub fn translator_from_config(config: &EnrichmentConfig) -> Result<Box<dyn Translator>> {
    match &config.google_access_token {
        Some(token) => Ok(Box::new(GoogleTranslator::new(token.clone(), config)?)),
        None => {
            tracing::debug!("No translation credentials, translation disabled");
            Ok(Box::new(DisabledTranslator))
        }
    }
}
