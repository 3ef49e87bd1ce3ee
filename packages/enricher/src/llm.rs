//! LLM feature-extraction adapter.
//!
//! A request is an instruction, the text it applies to and an instruction
//! about the answer format. The answer is opaque text; callers strip JSON
//! fences before storing it.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::config::EnrichmentConfig;
use crate::error::{EnrichError, Result};
use crate::http::{create_client, post_json, JsonRequest};

/// One question about one piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmRequest {
    pub instruction: String,
    pub subject: String,
    pub output_format: String,
    /// Optional JSON schema the answer should follow.
    pub schema_hint: Option<String>,
    /// Sampling temperature; the service default when `None`.
    pub temperature: Option<f64>,
}

impl LlmRequest {
    pub fn new(
        instruction: impl Into<String>,
        subject: impl Into<String>,
        output_format: impl Into<String>,
    ) -> Self {
        Self {
            instruction: instruction.into(),
            subject: subject.into(),
            output_format: output_format.into(),
            schema_hint: None,
            temperature: None,
        }
    }

    #[must_use]
    pub fn with_schema_hint(mut self, schema: impl Into<String>) -> Self {
        self.schema_hint = Some(schema.into());
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// System message: the answer format plus the schema, if any.
    pub fn system_prompt(&self) -> String {
        match &self.schema_hint {
            Some(schema) => format!("{}\n\nFollow this JSON schema:\n{schema}", self.output_format),
            None => self.output_format.clone(),
        }
    }

    /// User message: the instruction followed by the subject text.
    pub fn user_prompt(&self) -> String {
        format!("{}\n\n{}", self.instruction, self.subject)
    }
}

/// Trait for LLM clients, enabling mocking in tests.
pub trait LlmClient: Send + Sync {
    fn query(&self, request: &LlmRequest) -> Result<String>;

    /// Whether calls reach a real service.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Stand-in used when no API key is configured. Always answers empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledLlmClient;

impl LlmClient for DisabledLlmClient {
    fn query(&self, _request: &LlmRequest) -> Result<String> {
        Ok(String::new())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// OpenAI chat completions client.
///
/// NOTE: Do NOT derive `Debug` on this struct; `api_key` would be exposed.
pub struct OpenAiClient {
    http: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, config: &EnrichmentConfig) -> Result<Self> {
        Ok(Self {
            http: create_client(config.timeout_secs)?,
            api_key: api_key.into(),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            model: config.openai_model.clone(),
        })
    }
}

impl LlmClient for OpenAiClient {
    fn query(&self, request: &LlmRequest) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let system = request.system_prompt();
        let user = request.user_prompt();
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &system,
                },
                ChatMessage {
                    role: "user",
                    content: &user,
                },
            ],
            temperature: request.temperature,
        };

        let response: ChatResponse = post_json(
            &self.http,
            &JsonRequest {
                service: "OpenAI",
                url: &url,
                bearer_token: &self.api_key,
                headers: &[],
                body: &body,
            },
        )?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| EnrichError::ResponseParse {
                service: "OpenAI",
                message: "response contains no message content".to_string(),
            })
    }
}

/// Remove Markdown JSON fences from an answer.
///
/// # Examples
/// ```
/// use eip_enricher::llm::strip_json_fences;
///
/// assert_eq!(strip_json_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
/// assert_eq!(strip_json_fences("{}"), "{}");
/// ```
pub fn strip_json_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Pick the LLM client for a configuration.
pub fn llm_from_config(config: &EnrichmentConfig) -> Result<Box<dyn LlmClient>> {
    match &config.openai_api_key {
        Some(key) => Ok(Box::new(OpenAiClient::new(key.clone(), config)?)),
        None => {
            tracing::debug!("No OpenAI API key, LLM enrichment disabled");
            Ok(Box::new(DisabledLlmClient))
        }
    }
}
