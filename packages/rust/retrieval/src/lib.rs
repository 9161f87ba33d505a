//! Query-by-text retrieval against the pre-built documentation index.
//!
//! [`DocSearcher`] composes the two halves of the search path — embed the
//! question with Gemini, then nearest-neighbor query against Chroma — and
//! exposes them behind the [`SearchClient`] trait the pipeline core
//! consumes.

mod chroma;
mod embedder;

use std::time::Duration;

use reqwest::Client;
use tracing::instrument;
use url::Url;

use askdocs_shared::{AppConfig, AskdocsError, Result, RetrievedPassage, SearchClient};

pub use chroma::ChromaClient;
pub use embedder::GeminiEmbedder;

/// User-Agent string for retrieval requests.
const USER_AGENT: &str = concat!("askdocs/", env!("CARGO_PKG_VERSION"));

/// Per-request timeout. Bounds a hung upstream so one bad call cannot
/// wedge the whole session.
const REQUEST_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// DocSearcher
// ---------------------------------------------------------------------------

/// The production [`SearchClient`]: Gemini query embedding + Chroma
/// similarity search.
pub struct DocSearcher {
    embedder: GeminiEmbedder,
    chroma: ChromaClient,
}

impl DocSearcher {
    /// Connect to both upstream services.
    ///
    /// Resolves the Chroma collection eagerly so a missing or unreachable
    /// index aborts startup rather than failing on the first question.
    pub async fn connect(config: &AppConfig, api_key: &str) -> Result<Self> {
        let chroma_base = Url::parse(&config.chroma.base_url).map_err(|e| {
            AskdocsError::config(format!(
                "invalid chroma base_url '{}': {e}",
                config.chroma.base_url
            ))
        })?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AskdocsError::config(format!("failed to build HTTP client: {e}")))?;

        let embedder = GeminiEmbedder::new(
            client.clone(),
            config.gemini.base_url.clone(),
            config.gemini.embedding_model.clone(),
            api_key,
        );

        let chroma =
            ChromaClient::connect(client, chroma_base.as_str(), &config.chroma.collection).await?;

        Ok(Self { embedder, chroma })
    }
}

impl SearchClient for DocSearcher {
    #[instrument(skip_all, fields(limit = limit))]
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<RetrievedPassage>> {
        let embedding = self.embedder.embed_query(query).await?;
        self.chroma.query(&embedding, limit).await
    }
}
