//! Error types for askdocs.
//!
//! Library crates use [`AskdocsError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all askdocs operations.
#[derive(Debug, thiserror::Error)]
pub enum AskdocsError {
    /// Configuration loading or validation error (missing API key,
    /// unreachable vector store, missing collection). Fatal at startup.
    #[error("config error: {message}")]
    Config { message: String },

    /// Transport or protocol failure talking to the vector store.
    /// Distinct from a legitimate empty retrieval result, which is not
    /// an error at all.
    #[error("retrieval error: {0}")]
    Retrieval(String),

    /// Transport, quota, or response-shape failure from the language model.
    #[error("generation error: {0}")]
    Generation(String),

    /// Data validation error (bad limit, malformed response, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, AskdocsError>;

impl AskdocsError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Maximum length of an upstream error body embedded in an error message.
const BODY_SNIPPET_MAX_BYTES: usize = 200;

/// The leading portion of an upstream error body, for error messages.
///
/// Truncates on a UTF-8 character boundary — upstream bodies are arbitrary
/// text, and slicing mid-character would panic.
pub fn body_snippet(body: &str) -> &str {
    if body.len() <= BODY_SNIPPET_MAX_BYTES {
        return body;
    }
    let mut end = BODY_SNIPPET_MAX_BYTES;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
