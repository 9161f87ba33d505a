//! Client trait seams for the two external collaborators.
//!
//! The pipeline core never talks to the network itself — it is generic over
//! these traits. Production implementations live in `askdocs-retrieval`
//! (Chroma + Gemini embeddings) and `askdocs-generation` (Gemini), and
//! tests substitute in-memory fakes.

use std::future::Future;

use crate::error::Result;
use crate::types::RetrievedPassage;

/// Query-by-text similarity search over the pre-built vector index.
pub trait SearchClient: Send + Sync {
    /// Return the top `limit` most similar stored passages for `query`,
    /// most-relevant first.
    ///
    /// An empty corpus or a query with no matches yields `Ok(vec![])`,
    /// never an error — the orchestrator's refusal policy depends on
    /// being able to tell "nothing found" apart from "retrieval broke".
    fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<RetrievedPassage>>> + Send;
}

/// Free-text completion from a hosted language model.
pub trait GenerationClient: Send + Sync {
    /// Generate a completion for `prompt`. Transport errors propagate as
    /// [`crate::AskdocsError::Generation`]; the caller never retries this
    /// (a duplicate call could double-bill or return an inconsistent
    /// answer).
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}
