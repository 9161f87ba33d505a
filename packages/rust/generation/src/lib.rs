//! Gemini answer generation client.
//!
//! One synchronous request/response call per prompt via `generateContent`.
//! Generation is never retried here — a duplicate call could double-bill
//! or produce a second, inconsistent answer — so transport failures
//! propagate straight to the caller as [`AskdocsError::Generation`].

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use askdocs_shared::{AppConfig, AskdocsError, GenerationClient, Result, body_snippet};

/// User-Agent string for generation requests.
const USER_AGENT: &str = concat!("askdocs/", env!("CARGO_PKG_VERSION"));

/// Per-request timeout.
const REQUEST_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

// ---------------------------------------------------------------------------
// GeminiGenerator
// ---------------------------------------------------------------------------

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiGenerator {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiGenerator {
    /// Create a generator from the application config and a resolved key.
    pub fn new(config: &AppConfig, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AskdocsError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.gemini.base_url.trim_end_matches('/').to_string(),
            model: config.gemini.generation_model.clone(),
            api_key: api_key.into(),
        })
    }
}

impl GenerationClient for GeminiGenerator {
    #[instrument(skip_all, fields(prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AskdocsError::Generation(format!("generation request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AskdocsError::Generation(format!(
                "generation request returned {status}: {}",
                body_snippet(&detail)
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AskdocsError::Generation(format!("invalid generation response: {e}")))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| {
                AskdocsError::Generation("generation response contained no candidates".into())
            })?;

        debug!(answer_len = text.len(), "generation complete");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn generator_for(server: &MockServer) -> GeminiGenerator {
        let mut config = AppConfig::default();
        config.gemini.base_url = server.uri();
        GeminiGenerator::new(&config, "test-key").unwrap()
    }

    #[tokio::test]
    async fn returns_first_candidate_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{ "parts": [{ "text": "the prompt" }] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [
                    { "content": { "parts": [{ "text": "Run `mkdocs serve`." }] } }
                ]
            })))
            .mount(&server)
            .await;

        let generator = generator_for(&server);
        let answer = generator.generate("the prompt").await.unwrap();
        assert_eq!(answer, "Run `mkdocs serve`.");
    }

    #[tokio::test]
    async fn quota_error_is_a_generation_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429).set_body_string(r#"{"error": "quota exceeded"}"#),
            )
            .mount(&server)
            .await;

        let generator = generator_for(&server);
        let err = generator.generate("p").await.unwrap_err();
        assert!(matches!(err, AskdocsError::Generation(_)));
        assert!(err.to_string().contains("429"));
    }

    #[tokio::test]
    async fn multibyte_error_body_still_maps_to_a_generation_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("答".repeat(100)))
            .mount(&server)
            .await;

        let generator = generator_for(&server);
        let err = generator.generate("p").await.unwrap_err();
        assert!(matches!(err, AskdocsError::Generation(_)));
    }

    #[tokio::test]
    async fn empty_candidates_is_a_generation_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "candidates": [] })),
            )
            .mount(&server)
            .await;

        let generator = generator_for(&server);
        let err = generator.generate("p").await.unwrap_err();
        assert!(err.to_string().contains("no candidates"));
    }

    #[tokio::test]
    async fn exactly_one_request_per_call_no_retry() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let generator = generator_for(&server);
        let _ = generator.generate("p").await;
        // Mock expectation (exactly one call) is verified on server drop.
    }
}
