//! Enrichment configuration.
//!
//! Credentials come from the environment. A missing credential disables the
//! corresponding adapter instead of failing the run.

/// Default Google Cloud project used for translation.
pub const DEFAULT_GOOGLE_PROJECT_ID: &str = "euclid-449115";

/// Default Cloud Translation endpoint.
pub const DEFAULT_GOOGLE_BASE_URL: &str = "https://translation.googleapis.com";

/// Default OpenAI model.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

/// Default OpenAI endpoint.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the translation and LLM adapters.
#[derive(Clone)]
pub struct EnrichmentConfig {
    pub google_project_id: String,
    /// OAuth access token for Cloud Translation; `None` disables translation.
    pub google_access_token: Option<String>,
    pub google_base_url: String,
    /// `None` disables every LLM-based enrichment.
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub timeout_secs: u64,
}

impl EnrichmentConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_secs = var("LLM_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            google_project_id: var("GOOGLE_PROJECT_ID")
                .unwrap_or_else(|| DEFAULT_GOOGLE_PROJECT_ID.into()),
            google_access_token: var("GOOGLE_TRANSLATE_ACCESS_TOKEN"),
            google_base_url: var("GOOGLE_TRANSLATE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GOOGLE_BASE_URL.into()),
            openai_api_key: var("OPENAI_API_KEY"),
            openai_model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.into()),
            openai_base_url: var("OPENAI_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.into()),
            timeout_secs,
        }
    }

    /// Create a config builder for testing.
    pub fn builder() -> EnrichmentConfigBuilder {
        EnrichmentConfigBuilder {
            config: Self::from_lookup(|_| None),
        }
    }

    pub fn translation_enabled(&self) -> bool {
        self.google_access_token.is_some()
    }

    pub fn llm_enabled(&self) -> bool {
        self.openai_api_key.is_some()
    }
}

// Credentials stay out of logs.
impl std::fmt::Debug for EnrichmentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnrichmentConfig")
            .field("google_project_id", &self.google_project_id)
            .field("translation_enabled", &self.translation_enabled())
            .field("google_base_url", &self.google_base_url)
            .field("llm_enabled", &self.llm_enabled())
            .field("openai_model", &self.openai_model)
            .field("openai_base_url", &self.openai_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Builder for constructing `EnrichmentConfig` in tests.
pub struct EnrichmentConfigBuilder {
    config: EnrichmentConfig,
}

impl EnrichmentConfigBuilder {
    pub fn google_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.config.google_project_id = project_id.into();
        self
    }

    pub fn google_access_token(mut self, token: impl Into<String>) -> Self {
        self.config.google_access_token = Some(token.into());
        self
    }

    pub fn google_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.google_base_url = base_url.into();
        self
    }

    pub fn openai_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.openai_api_key = Some(api_key.into());
        self
    }

    pub fn openai_model(mut self, model: impl Into<String>) -> Self {
        self.config.openai_model = model.into();
        self
    }

    pub fn openai_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.openai_base_url = base_url.into();
        self
    }

    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    pub fn build(self) -> EnrichmentConfig {
        self.config
    }
}
