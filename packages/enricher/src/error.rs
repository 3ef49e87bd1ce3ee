//! Error types for the enricher.

use thiserror::Error;

/// Main error type for enrichment.
#[derive(Debug, Error)]
pub enum EnrichError {
    /// Reading or writing the entry table failed.
    #[error(transparent)]
    Catalogue(#[from] eip_catalogue::CatalogueError),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A service answered with a non-retryable error status.
    #[error("{service} API error (status {status}): {message}")]
    Api {
        service: &'static str,
        status: u16,
        message: String,
    },

    /// All retry attempts failed.
    #[error("Request failed after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    /// A service answered with a body we could not use.
    #[error("Failed to parse {service} response: {message}")]
    ResponseParse {
        service: &'static str,
        message: String,
    },

    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for enrichment operations.
pub type Result<T> = std::result::Result<T, EnrichError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = EnrichError::Api {
            service: "OpenAI",
            status: 401,
            message: "invalid key".to_string(),
        };
        assert_eq!(err.to_string(), "OpenAI API error (status 401): invalid key");
    }

    #[test]
    fn test_catalogue_error_is_transparent() {
        let err: EnrichError =
            eip_catalogue::CatalogueError::UnsupportedSource("x.pdf".to_string()).into();
        assert!(err.to_string().starts_with("Unsupported input 'x.pdf'"));
    }
}
