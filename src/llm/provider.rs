use async_trait::async_trait;

use crate::core::errors::ApiError;

use super::types::CompletionRequest;

/// Black-box completion/embedding backend. Implementations must be usable
/// behind an `Arc` from handlers and the pipeline.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// provider name (e.g. "openai", "offline")
    fn name(&self) -> &str;

    /// chat completion (non-streaming)
    async fn complete(&self, request: CompletionRequest) -> Result<String, ApiError>;

    /// map text to a fixed-length embedding vector
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ApiError>;

    /// whether the embedding endpoint is available; false selects the
    /// keyword fallback for retrieval
    fn supports_embeddings(&self) -> bool;
}
