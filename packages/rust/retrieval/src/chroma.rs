//! Chroma HTTP client: collection lookup at startup, nearest-neighbor
//! query per question.
//!
//! The collection is resolved once when the client connects — a missing
//! index is a fatal configuration error, not a per-query error. Queries
//! are read-only, so a transport failure is retried once before giving up.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use askdocs_shared::{AskdocsError, Result, RetrievedPassage, body_snippet};

/// Extra attempts for the (idempotent) query request after a transport error.
const QUERY_RETRIES: u32 = 1;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CollectionInfo {
    id: String,
    name: String,
}

/// Chroma returns one inner array per query embedding; we always send
/// exactly one, so only the first row of each field is meaningful.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    documents: Vec<Vec<Option<String>>>,
    #[serde(default)]
    metadatas: Vec<Vec<Option<serde_json::Map<String, serde_json::Value>>>>,
}

// ---------------------------------------------------------------------------
// ChromaClient
// ---------------------------------------------------------------------------

/// Handle to one Chroma collection, immutable after [`ChromaClient::connect`].
#[derive(Debug)]
pub struct ChromaClient {
    client: Client,
    base_url: String,
    collection_id: String,
    collection_name: String,
}

impl ChromaClient {
    /// Connect to a Chroma server and resolve the named collection.
    ///
    /// Fails fast with [`AskdocsError::Config`] when the server is
    /// unreachable or the collection does not exist — askdocs never
    /// creates or populates the index itself.
    pub async fn connect(
        client: Client,
        base_url: impl Into<String>,
        collection_name: &str,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let url = format!("{base_url}/api/v1/collections/{collection_name}");

        let response = client.get(&url).send().await.map_err(|e| {
            AskdocsError::config(format!("cannot reach Chroma at {base_url}: {e}"))
        })?;

        if !response.status().is_success() {
            return Err(AskdocsError::config(format!(
                "collection '{collection_name}' not found on {base_url} \
                 (HTTP {}). Has the documentation index been built?",
                response.status()
            )));
        }

        let info: CollectionInfo = response.json().await.map_err(|e| {
            AskdocsError::config(format!("invalid collection response from Chroma: {e}"))
        })?;

        info!(collection = %info.name, id = %info.id, "connected to Chroma collection");

        Ok(Self {
            client,
            base_url,
            collection_id: info.id,
            collection_name: info.name,
        })
    }

    /// The resolved collection name.
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// Run a nearest-neighbor query with a pre-computed embedding.
    ///
    /// Documents and metadatas come back positionally aligned; rows with a
    /// missing document are skipped. An empty result is `Ok(vec![])`, never
    /// an error.
    pub async fn query(&self, embedding: &[f32], n_results: usize) -> Result<Vec<RetrievedPassage>> {
        let url = format!(
            "{}/api/v1/collections/{}/query",
            self.base_url, self.collection_id
        );

        let body = serde_json::json!({
            "query_embeddings": [embedding],
            "n_results": n_results,
            "include": ["documents", "metadatas"],
        });

        let mut attempt = 0;
        let response = loop {
            match self.client.post(&url).json(&body).send().await {
                Ok(resp) => break resp,
                Err(e) if attempt < QUERY_RETRIES => {
                    attempt += 1;
                    warn!(error = %e, attempt, "chroma query transport error, retrying");
                }
                Err(e) => {
                    return Err(AskdocsError::Retrieval(format!("chroma query failed: {e}")));
                }
            }
        };

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AskdocsError::Retrieval(format!(
                "chroma query returned {status}: {}",
                body_snippet(&detail)
            )));
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| AskdocsError::Retrieval(format!("invalid chroma response: {e}")))?;

        let documents = parsed.documents.into_iter().next().unwrap_or_default();
        let mut metadatas = parsed
            .metadatas
            .into_iter()
            .next()
            .unwrap_or_default()
            .into_iter();

        let passages: Vec<RetrievedPassage> = documents
            .into_iter()
            .filter_map(|doc| {
                let metadata = metadatas.next().flatten().unwrap_or_default();
                doc.map(|text| RetrievedPassage { text, metadata })
            })
            .collect();

        debug!(passages = passages.len(), "chroma query complete");
        Ok(passages)
    }
}
