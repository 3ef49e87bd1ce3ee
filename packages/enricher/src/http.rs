//! HTTP plumbing shared by the translation and LLM adapters.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{EnrichError, Result};

/// User agent string identifying this enricher.
const USER_AGENT: &str = concat!("eip-enricher/", env!("CARGO_PKG_VERSION"));

/// Maximum number of attempts for transient failures.
pub const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (milliseconds).
const RETRY_BASE_DELAY_MS: u64 = 500;

/// Create a configured HTTP client.
pub fn create_client(timeout_secs: u64) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// An authenticated JSON POST request.
pub struct JsonRequest<'a, B: ?Sized> {
    /// Service name used in errors and logs.
    pub service: &'static str,
    pub url: &'a str,
    pub bearer_token: &'a str,
    pub headers: &'a [(&'a str, &'a str)],
    pub body: &'a B,
}

/// POST a JSON body and decode the JSON answer, with retry logic.
///
/// Uses exponential backoff for transient failures (connection errors,
/// timeouts, 429 and 5xx responses). Other error statuses fail at once.
pub fn post_json<B, R>(client: &Client, request: &JsonRequest<'_, B>) -> Result<R>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let mut last_error: Option<String> = None;

    for attempt in 0..MAX_RETRIES {
        if attempt > 0 {
            // Exponential backoff: 500ms, 1000ms
            let delay = RETRY_BASE_DELAY_MS * (1 << (attempt - 1));
            tracing::debug!(service = request.service, attempt, delay_ms = delay, "Retrying after delay");
            thread::sleep(Duration::from_millis(delay));
        }

        let mut builder = client
            .post(request.url)
            .bearer_auth(request.bearer_token)
            .json(request.body);
        for (name, value) in request.headers {
            builder = builder.header(*name, *value);
        }

        let response = match builder.send() {
            Ok(response) => response,
            Err(e) if e.is_connect() || e.is_timeout() => {
                tracing::warn!(
                    service = request.service,
                    error = %e,
                    attempt = attempt + 1,
                    max_retries = MAX_RETRIES,
                    "Connection error, will retry"
                );
                last_error = Some(e.to_string());
                continue;
            }
            Err(e) => return Err(EnrichError::Http(e)),
        };

        let status = response.status();
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!(
                service = request.service,
                status = %status,
                attempt = attempt + 1,
                max_retries = MAX_RETRIES,
                "Transient server error, will retry"
            );
            last_error = Some(format!("Server error: {status}"));
            continue;
        }

        let text = response.text()?;
        if !status.is_success() {
            return Err(EnrichError::Api {
                service: request.service,
                status: status.as_u16(),
                message: text,
            });
        }

        return serde_json::from_str(&text).map_err(|e| EnrichError::ResponseParse {
            service: request.service,
            message: e.to_string(),
        });
    }

    Err(EnrichError::RetriesExhausted {
        attempts: MAX_RETRIES,
        message: last_error.unwrap_or_else(|| "Unknown error".to_string()),
    })
}
