//! Gemini query embedding client.
//!
//! Turns a question into the numeric vector the Chroma index was built
//! with. Uses the `embedContent` endpoint with the `RETRIEVAL_QUERY` task
//! type so query vectors land in the same space as the stored
//! `RETRIEVAL_DOCUMENT` vectors.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use askdocs_shared::{AskdocsError, Result, body_snippet};

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedRequest<'a> {
    model: String,
    content: Content<'a>,
    task_type: &'static str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: Embedding,
}

#[derive(Debug, Deserialize)]
struct Embedding {
    values: Vec<f32>,
}

// ---------------------------------------------------------------------------
// GeminiEmbedder
// ---------------------------------------------------------------------------

/// Client for the Gemini `embedContent` endpoint.
pub struct GeminiEmbedder {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiEmbedder {
    /// Create an embedder. `base_url` is the API origin
    /// (`https://generativelanguage.googleapis.com` in production,
    /// a mock server in tests).
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// Embed one query string.
    ///
    /// Embedding is part of the retrieval path, so failures surface as
    /// [`AskdocsError::Retrieval`].
    pub async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/v1beta/models/{}:embedContent", self.base_url, self.model);

        let body = EmbedRequest {
            model: format!("models/{}", self.model),
            content: Content {
                parts: vec![Part { text }],
            },
            task_type: "RETRIEVAL_QUERY",
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AskdocsError::Retrieval(format!("embedding request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AskdocsError::Retrieval(format!(
                "embedding request returned {status}: {}",
                body_snippet(&detail)
            )));
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| AskdocsError::Retrieval(format!("invalid embedding response: {e}")))?;

        if parsed.embedding.values.is_empty() {
            return Err(AskdocsError::Retrieval(
                "embedding response contained no values".into(),
            ));
        }

        debug!(dims = parsed.embedding.values.len(), "query embedded");
        Ok(parsed.embedding.values)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn embedder_for(server: &MockServer) -> GeminiEmbedder {
        GeminiEmbedder::new(
            Client::new(),
            server.uri(),
            "text-embedding-004",
            "test-key",
        )
    }

    #[tokio::test]
    async fn embeds_a_query() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/text-embedding-004:embedContent"))
            .and(body_partial_json(serde_json::json!({
                "taskType": "RETRIEVAL_QUERY",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "embedding": { "values": [0.1, -0.2, 0.3] }
            })))
            .mount(&server)
            .await;

        let embedder = embedder_for(&server);
        let values = embedder.embed_query("how do I preview?").await.unwrap();
        assert_eq!(values, vec![0.1, -0.2, 0.3]);
    }

    #[tokio::test]
    async fn api_error_status_is_a_retrieval_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(403).set_body_string(r#"{"error": "key not valid"}"#),
            )
            .mount(&server)
            .await;

        let embedder = embedder_for(&server);
        let err = embedder.embed_query("q").await.unwrap_err();
        assert!(matches!(err, AskdocsError::Retrieval(_)));
        assert!(err.to_string().contains("403"));
    }

    #[tokio::test]
    async fn empty_embedding_is_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "embedding": { "values": [] }
            })))
            .mount(&server)
            .await;

        let embedder = embedder_for(&server);
        let err = embedder.embed_query("q").await.unwrap_err();
        assert!(err.to_string().contains("no values"));
    }
}
