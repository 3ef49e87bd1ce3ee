//! Adapter tests against mocked HTTP services.
//!
//! The adapters use blocking clients, so every call runs inside
//! `spawn_blocking` next to the async mock server.

use eip_catalogue::CatalogueEntry;
use eip_enricher::enricher::{Enricher, EnrichmentOptions};
use eip_enricher::llm::{LlmClient, LlmRequest, OpenAiClient};
use eip_enricher::translate::{GoogleTranslator, Translator};
use eip_enricher::{EnrichError, EnrichmentConfig};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn openai_response(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-4o",
        "choices": [
            {
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }
        ]
    })
}

fn google_response(translations: &[(&str, &str)]) -> serde_json::Value {
    let translations: Vec<_> = translations
        .iter()
        .map(|(text, code)| serde_json::json!({"translatedText": text, "detectedLanguageCode": code}))
        .collect();
    serde_json::json!({ "translations": translations })
}

fn config(server: &MockServer) -> EnrichmentConfig {
    EnrichmentConfig::builder()
        .google_access_token("google-token")
        .google_project_id("test-project")
        .google_base_url(server.uri())
        .openai_api_key("sk-test")
        .openai_base_url(server.uri())
        .timeout_secs(5)
        .build()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_google_translate_aligns_empty_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/projects/test-project:translateText"))
        .and(header("authorization", "Bearer google-token"))
        .and(body_partial_json(serde_json::json!({
            "contents": ["Euclidis elementorum libri XV", "Basileae apud Ioan. Hervagium"],
            "targetLanguageCode": "en",
            "mimeType": "text/plain"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(google_response(&[
            ("Euclid's fifteen books of elements", "la"),
            ("Basel, at Johann Herwagen", "la"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let config = config(&server);
    let translation = tokio::task::spawn_blocking(move || {
        let translator = GoogleTranslator::new("google-token", &config)?;
        translator.translate(
            &["Euclidis elementorum libri XV", "", "Basileae apud Ioan. Hervagium"],
            "en",
        )
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(
        translation.texts,
        vec!["Euclid's fifteen books of elements", "", "Basel, at Johann Herwagen"]
    );
    assert_eq!(translation.detected_label(), "la");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_google_translate_count_mismatch() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(google_response(&[("one", "fr")])))
        .mount(&server)
        .await;

    let config = config(&server);
    let result = tokio::task::spawn_blocking(move || {
        GoogleTranslator::new("google-token", &config)?.translate(&["un", "deux"], "en")
    })
    .await
    .unwrap();

    assert!(matches!(result, Err(EnrichError::ResponseParse { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_openai_query() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-4o",
            "temperature": 0.3
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_response("  {\"a\": 1}\n")))
        .expect(1)
        .mount(&server)
        .await;

    let config = config(&server);
    let answer = tokio::task::spawn_blocking(move || {
        let client = OpenAiClient::new("sk-test", &config)?;
        client.query(&LlmRequest::new("instruction", "subject", "format").with_temperature(0.3))
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(answer, "{\"a\": 1}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_openai_retries_server_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_response("Hervagius")))
        .mount(&server)
        .await;

    let config = config(&server);
    let answer = tokio::task::spawn_blocking(move || {
        OpenAiClient::new("sk-test", &config)?.query(&LlmRequest::new("a", "b", "c"))
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(answer, "Hervagius");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_openai_client_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .expect(1)
        .mount(&server)
        .await;

    let config = config(&server);
    let result = tokio::task::spawn_blocking(move || {
        OpenAiClient::new("sk-test", &config)?.query(&LlmRequest::new("a", "b", "c"))
    })
    .await
    .unwrap();

    match result {
        Err(EnrichError::Api {
            status, message, ..
        }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "invalid api key");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_openai_retries_exhausted() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let config = config(&server);
    let result = tokio::task::spawn_blocking(move || {
        OpenAiClient::new("sk-test", &config)?.query(&LlmRequest::new("a", "b", "c"))
    })
    .await
    .unwrap();

    assert!(matches!(
        result,
        Err(EnrichError::RetriesExhausted { attempts: 3, .. })
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_enricher_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/projects/test-project:translateText"))
        .respond_with(ResponseTemplate::new(200).set_body_json(google_response(&[
            ("The first six books of Euclid's Elements", "fr"),
            ("In Paris, at Jean Loys", "fr"),
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_response("Jean Loys")))
        .mount(&server)
        .await;

    let config = config(&server);
    let (entries, report) = tokio::task::spawn_blocking(move || {
        let enricher = Enricher::from_config(
            &config,
            EnrichmentOptions {
                translate: true,
                publisher: true,
                ..Default::default()
            },
        )?;
        let mut entries = vec![
            CatalogueEntry {
                key: "Paris 1543a".to_string(),
                title: "Les six premiers livres des Elements d'Euclide".to_string(),
                imprint: "A Paris, chez Iean Loys".to_string(),
                language: "FRENCH".to_string(),
                ..Default::default()
            },
            CatalogueEntry {
                key: "London 1570".to_string(),
                title: "The elements of geometrie".to_string(),
                language: "ENGLISH".to_string(),
                ..Default::default()
            },
        ];
        let report = enricher.enrich(&mut entries);
        Ok::<_, EnrichError>((entries, report))
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(
        entries[0].title_en.as_deref(),
        Some("The first six books of Euclid's Elements")
    );
    assert_eq!(entries[0].colophon_en.as_deref(), Some(""));
    assert_eq!(entries[0].language_v2.as_deref(), Some("fr"));
    assert_eq!(entries[0].publisher.as_deref(), Some("Jean Loys"));
    assert_eq!(entries[1].title_en, None);
    assert_eq!(report.entries, 2);
    assert_eq!(report.translated, 1);
    assert_eq!(report.llm_calls, 2);
    assert_eq!(report.failed_calls, 0);
}
