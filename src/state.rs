use std::sync::{Arc, RwLock};

use crate::core::config::AppConfig;
use crate::core::errors::ApiError;
use crate::corpus::DocumentStore;
use crate::history::ConversationStore;
use crate::llm::{self, CompletionProvider};
use crate::rag::{DocumentIndex, RagPipeline};

/// Application state shared across routes and background tasks. All stores
/// are constructed here and passed by reference; there are no process-wide
/// singletons.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub documents: Arc<DocumentStore>,
    pub index: Arc<RwLock<DocumentIndex>>,
    pub conversations: Arc<ConversationStore>,
    pub provider: Arc<dyn CompletionProvider>,
    pub pipeline: Arc<RagPipeline>,
}

impl AppState {
    /// Initializes the application state:
    /// 1. Builds the completion provider (offline placeholder without a key)
    /// 2. Loads the fixed corpus into the document store
    /// 3. Indexes the corpus, embedding it best-effort when the provider
    ///    supports embeddings (per-document failures leave a partial index
    ///    and the keyword fallback covers the rest)
    /// 4. Wires the conversation store and the query pipeline
    pub async fn initialize(config: AppConfig) -> Result<Arc<Self>, ApiError> {
        let provider = llm::provider_from_config(&config.completion)?;
        let documents = Arc::new(DocumentStore::seeded());

        let mut index = DocumentIndex::new();
        for doc in documents.all() {
            if provider.supports_embeddings() {
                match provider.embed(&doc.content).await {
                    Ok(vector) => {
                        index.add_document_with_vector(doc.clone(), vector);
                        continue;
                    }
                    Err(err) => {
                        tracing::warn!(doc_id = doc.id, "corpus embedding failed: {}", err);
                    }
                }
            }
            index.add_document(doc.clone());
        }
        tracing::info!(
            documents = index.len(),
            embedded = index.has_embeddings(),
            provider = provider.name(),
            "corpus indexed"
        );
        let index = Arc::new(RwLock::new(index));

        let conversations = Arc::new(ConversationStore::new(config.retention.clone()));

        let pipeline = Arc::new(RagPipeline::new(
            index.clone(),
            conversations.clone(),
            provider.clone(),
            &config.retrieval,
            &config.completion,
        ));

        Ok(Arc::new(Self {
            config,
            documents,
            index,
            conversations,
            provider,
            pipeline,
        }))
    }
}
