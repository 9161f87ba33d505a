//! Shared types, error model, and configuration for askdocs.
//!
//! This crate is the foundation depended on by all other askdocs crates.
//! It provides:
//! - [`AskdocsError`] — the unified error type
//! - Domain types ([`RetrievedPassage`])
//! - The client trait seams ([`SearchClient`], [`GenerationClient`])
//! - Configuration ([`AppConfig`], config loading)

pub mod clients;
pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use clients::{GenerationClient, SearchClient};
pub use config::{
    AppConfig, ChromaConfig, DefaultsConfig, GeminiConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from, resolve_api_key,
};
pub use error::{AskdocsError, Result, body_snippet};
pub use types::{RetrievedPassage, UNKNOWN_SOURCE};
