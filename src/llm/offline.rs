use async_trait::async_trait;

use crate::core::errors::ApiError;

use super::provider::CompletionProvider;
use super::types::CompletionRequest;

/// Placeholder provider used when no API key is configured. Keeps the rest
/// of the system testable offline: completions return a clearly labeled
/// placeholder and embeddings are reported as unavailable, which selects the
/// keyword retrieval fallback.
pub struct OfflineProvider;

#[async_trait]
impl CompletionProvider for OfflineProvider {
    fn name(&self) -> &str {
        "offline"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, ApiError> {
        let query = request
            .messages
            .last()
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        Ok(format!(
            "[offline placeholder] No completion provider is configured; set \
SANCTA_API_KEY to enable generated answers. Your question was: {}",
            query
        ))
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>, ApiError> {
        Err(ApiError::Provider(
            "embeddings are unavailable in offline mode".to_string(),
        ))
    }

    fn supports_embeddings(&self) -> bool {
        false
    }
}
