//! Application configuration for askdocs.
//!
//! User config lives at `~/.askdocs/askdocs.toml`.
//! CLI flags override config file values, which override defaults.
//! API keys are never stored in config — only the name of the env var
//! holding them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AskdocsError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "askdocs.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".askdocs";

// ---------------------------------------------------------------------------
// Config structs (matching askdocs.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Chroma vector store settings.
    #[serde(default)]
    pub chroma: ChromaConfig,

    /// Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// How many passages to retrieve per question. Balances context
    /// completeness against prompt size; must be positive.
    #[serde(default = "default_passage_limit")]
    pub passage_limit: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            passage_limit: default_passage_limit(),
        }
    }
}

fn default_passage_limit() -> usize {
    6
}

/// `[chroma]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChromaConfig {
    /// Base URL of the Chroma server.
    #[serde(default = "default_chroma_base_url")]
    pub base_url: String,

    /// Name of the collection holding the documentation corpus. The
    /// collection must already exist; askdocs never populates it.
    #[serde(default = "default_collection")]
    pub collection: String,
}

impl Default for ChromaConfig {
    fn default() -> Self {
        Self {
            base_url: default_chroma_base_url(),
            collection: default_collection(),
        }
    }
}

fn default_chroma_base_url() -> String {
    "http://localhost:8000".into()
}
fn default_collection() -> String {
    "docs".into()
}

/// `[gemini]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Base URL of the Gemini API (overridable for tests).
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// Name of the env var holding the API key (never store the key itself).
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Model used for answer generation.
    #[serde(default = "default_generation_model")]
    pub generation_model: String,

    /// Model used for query embeddings.
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: default_gemini_base_url(),
            api_key_env: default_api_key_env(),
            generation_model: default_generation_model(),
            embedding_model: default_embedding_model(),
        }
    }
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}
fn default_api_key_env() -> String {
    "GOOGLE_API_KEY".into()
}
fn default_generation_model() -> String {
    "gemini-2.0-flash".into()
}
fn default_embedding_model() -> String {
    "text-embedding-004".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.askdocs/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AskdocsError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.askdocs/askdocs.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AskdocsError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| AskdocsError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| AskdocsError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| AskdocsError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| AskdocsError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Read the Gemini API key from the configured env var.
/// A missing or empty key is a fatal configuration error.
pub fn resolve_api_key(config: &AppConfig) -> Result<String> {
    let var_name = &config.gemini.api_key_env;
    match std::env::var(var_name) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => Err(AskdocsError::config(format!(
            "Gemini API key not found. Set the {var_name} environment variable.\n\
             Get a key at https://aistudio.google.com/apikey"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("passage_limit"));
        assert!(toml_str.contains("GOOGLE_API_KEY"));
        assert!(toml_str.contains("gemini-2.0-flash"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.defaults.passage_limit, 6);
        assert_eq!(parsed.chroma.base_url, "http://localhost:8000");
        assert_eq!(parsed.gemini.embedding_model, "text-embedding-004");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[chroma]
collection = "MkDocsGuide"

[defaults]
passage_limit = 4
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.chroma.collection, "MkDocsGuide");
        assert_eq!(config.defaults.passage_limit, 4);
        assert_eq!(config.gemini.generation_model, "gemini-2.0-flash");
    }

    #[test]
    fn api_key_resolution_fails_when_unset() {
        let mut config = AppConfig::default();
        // Use a unique env var name to avoid interfering with other tests
        config.gemini.api_key_env = "ASKDOCS_TEST_NONEXISTENT_KEY_12345".into();
        let result = resolve_api_key(&config);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("API key not found")
        );
    }
}
