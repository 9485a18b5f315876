//! Completion/embedding provider binding.

mod offline;
mod openai;
pub mod provider;
pub mod types;

use std::sync::Arc;

use crate::core::config::CompletionConfig;
use crate::core::errors::ApiError;

pub use offline::OfflineProvider;
pub use openai::OpenAiProvider;
pub use provider::CompletionProvider;

/// Builds the provider from configuration. A missing API key selects the
/// offline placeholder so startup never fails on absent credentials.
pub fn provider_from_config(
    config: &CompletionConfig,
) -> Result<Arc<dyn CompletionProvider>, ApiError> {
    match &config.api_key {
        Some(key) => Ok(Arc::new(OpenAiProvider::new(config, key.clone())?)),
        None => {
            tracing::warn!(
                "no API key configured; completions degrade to an offline placeholder"
            );
            Ok(Arc::new(OfflineProvider))
        }
    }
}
