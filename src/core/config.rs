//! Application configuration.
//!
//! Defaults cover the reference deployment; an optional TOML file overrides
//! them, and the completion binding additionally reads `SANCTA_API_KEY` and
//! `SANCTA_BASE_URL` from the environment. A missing API key never fails
//! startup; the provider degrades to an offline placeholder instead.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::ApiError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub completion: CompletionConfig,
    pub retrieval: RetrievalConfig,
    pub retention: RetentionConfig,
    /// When set, logs are also written to daily-rolling files in this directory.
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Bearer token for the OpenAI-compatible endpoint. Absent key selects
    /// the offline placeholder provider.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub embedding_model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Client-level timeout for completion/embedding calls. A timed-out call
    /// surfaces as a provider failure; it is never retried automatically.
    pub request_timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o-mini".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            temperature: 0.5,
            max_tokens: 1500,
            request_timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Number of source references retrieved per query.
    pub top_k: usize,
    /// Character budget per source snippet in the assembled prompt.
    pub snippet_budget: usize,
    /// Number of trailing history messages included in the prompt.
    pub history_window: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            snippet_budget: 1000,
            history_window: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionConfig {
    /// Cap on messages returned to callers per chat. Reads only; persistence
    /// is bounded by the eviction ceilings below.
    pub returned_messages: usize,
    pub max_messages_per_chat: usize,
    pub max_chats_per_user: usize,
    pub max_total_messages: usize,
    pub sweep_interval_secs: u64,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            returned_messages: 5,
            max_messages_per_chat: 20,
            max_chats_per_user: 25,
            max_total_messages: 500,
            sweep_interval_secs: 900,
        }
    }
}

impl AppConfig {
    /// Loads configuration: defaults, then the TOML file if one exists at
    /// `path`, then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ApiError> {
        let mut config = match path {
            Some(path) if path.exists() => {
                let raw = std::fs::read_to_string(path).map_err(ApiError::internal)?;
                toml::from_str(&raw)
                    .map_err(|e| ApiError::Validation(format!("invalid config file: {}", e)))?
            }
            _ => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("SANCTA_API_KEY") {
            if !key.trim().is_empty() {
                self.completion.api_key = Some(key);
            }
        }
        if let Ok(url) = std::env::var("SANCTA_BASE_URL") {
            if !url.trim().is_empty() {
                self.completion.base_url = url;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_reference_values() {
        let config = AppConfig::default();
        assert_eq!(config.retrieval.top_k, 3);
        assert_eq!(config.retrieval.snippet_budget, 1000);
        assert_eq!(config.retrieval.history_window, 5);
        assert_eq!(config.retention.returned_messages, 5);
        assert_eq!(config.retention.max_messages_per_chat, 20);
        assert_eq!(config.retention.max_chats_per_user, 25);
        assert_eq!(config.retention.max_total_messages, 500);
        assert_eq!(config.retention.sweep_interval_secs, 900);
        assert_eq!(config.completion.temperature, 0.5);
        assert_eq!(config.completion.max_tokens, 1500);
        assert!(config.completion.api_key.is_none());
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "[retrieval]\ntop_k = 5\n\n[completion]\nmodel = \"local-model\"\n"
        )
        .expect("write config");

        let config = AppConfig::load(Some(file.path())).expect("load config");
        assert_eq!(config.retrieval.top_k, 5);
        assert_eq!(config.completion.model, "local-model");
        // Untouched sections keep their defaults.
        assert_eq!(config.retrieval.history_window, 5);
        assert_eq!(config.retention.max_messages_per_chat, 20);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config =
            AppConfig::load(Some(Path::new("/nonexistent/sancta.toml"))).expect("load config");
        assert_eq!(config.retrieval.top_k, 3);
    }
}
