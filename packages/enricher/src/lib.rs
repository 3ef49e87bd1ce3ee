//! EiP Enricher - Translate and annotate parsed catalogue entries.
//!
//! Reads the entry table written by `eip-catalogue` and fills the
//! enrichment columns: English translations of title, colophon and imprint
//! (Google Cloud Translation) and LLM-extracted title verbs, publisher and
//! title-page features (OpenAI). Missing credentials disable an adapter;
//! failed calls are logged and counted but never abort the run.
//!
//! # Architecture
//!
//! - [`config`]: Credentials and endpoints from the environment
//! - [`error`]: Error types and Result alias
//! - [`http`]: Shared HTTP client with retries
//! - [`translate`]: Translation adapter
//! - [`llm`]: LLM adapter
//! - [`prompt`]: Fixed enrichment prompts
//! - [`enricher`]: Per-entry enrichment steps
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod enricher;
pub mod error;
pub mod http;
pub mod llm;
pub mod prompt;
pub mod translate;

pub use config::EnrichmentConfig;
pub use enricher::{Enricher, EnrichmentOptions, EnrichmentReport};
pub use error::{EnrichError, Result};
pub use llm::{LlmClient, LlmRequest, OpenAiClient};
pub use translate::{GoogleTranslator, Translation, Translator};
