//! Core domain types for the askdocs pipeline.

use serde::{Deserialize, Serialize};

/// Source label used when a passage's metadata carries no `source` field.
pub const UNKNOWN_SOURCE: &str = "Unknown File";

// ---------------------------------------------------------------------------
// RetrievedPassage
// ---------------------------------------------------------------------------

/// A stored unit of source text with provenance metadata, as returned by
/// the vector store for one query.
///
/// Ordering among passages is the store's similarity order (most-relevant
/// first) and is preserved end to end. A passage lives only for the
/// duration of one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedPassage {
    /// The passage text, verbatim as stored.
    pub text: String,
    /// Arbitrary metadata attached at ingestion time. At minimum a
    /// `source` identifier, but the store may attach anything.
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl RetrievedPassage {
    /// Create a passage with a single `source` metadata entry.
    pub fn with_source(text: impl Into<String>, source: impl Into<String>) -> Self {
        let mut metadata = serde_json::Map::new();
        metadata.insert("source".into(), serde_json::Value::String(source.into()));
        Self {
            text: text.into(),
            metadata,
        }
    }

    /// The source identifier for this passage, or [`UNKNOWN_SOURCE`] when
    /// metadata lacks a string-valued `source` field.
    pub fn source(&self) -> &str {
        self.metadata
            .get("source")
            .and_then(|v| v.as_str())
            .unwrap_or(UNKNOWN_SOURCE)
    }
}
