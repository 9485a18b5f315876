//! End-to-end query processing: retrieve, assemble, complete, persist.

use std::sync::{Arc, RwLock, RwLockReadGuard};

use crate::core::config::{CompletionConfig, RetrievalConfig};
use crate::core::errors::ApiError;
use crate::history::ConversationStore;
use crate::llm::types::{ChatMessage, CompletionRequest};
use crate::llm::CompletionProvider;
use crate::models::{DocumentMetadata, MessageRole, SourceReference};
use crate::rag::context::ContextBuilder;
use crate::rag::retriever::DocumentIndex;

#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub content: String,
    pub sources: Vec<SourceReference>,
}

pub struct RagPipeline {
    index: Arc<RwLock<DocumentIndex>>,
    conversations: Arc<ConversationStore>,
    provider: Arc<dyn CompletionProvider>,
    context: ContextBuilder,
    top_k: usize,
    temperature: f64,
    max_tokens: u32,
    /// Serializes whole queries so the user-then-assistant persistence order
    /// holds under concurrent calls for any chat.
    query_lock: tokio::sync::Mutex<()>,
}

impl RagPipeline {
    pub fn new(
        index: Arc<RwLock<DocumentIndex>>,
        conversations: Arc<ConversationStore>,
        provider: Arc<dyn CompletionProvider>,
        retrieval: &RetrievalConfig,
        completion: &CompletionConfig,
    ) -> Self {
        Self {
            index,
            conversations,
            provider,
            context: ContextBuilder::new(retrieval),
            top_k: retrieval.top_k,
            temperature: completion.temperature,
            max_tokens: completion.max_tokens,
            query_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Processes one user query against a chat.
    ///
    /// Retrieval and completion failures abort the whole operation before
    /// anything is persisted; they surface as a single aggregate error
    /// carrying the underlying cause and are never retried automatically.
    pub async fn process_query(
        &self,
        chat_id: u64,
        query: &str,
        history: &[ChatMessage],
    ) -> Result<QueryOutcome, ApiError> {
        if query.trim().is_empty() {
            return Err(ApiError::Validation(
                "query must not be empty".to_string(),
            ));
        }

        let _guard = self.query_lock.lock().await;
        self.run(chat_id, query, history)
            .await
            .map_err(ApiError::query_processing)
    }

    async fn run(
        &self,
        chat_id: u64,
        query: &str,
        history: &[ChatMessage],
    ) -> Result<QueryOutcome, ApiError> {
        tracing::debug!(chat_id, "retrieving sources");
        let use_vectors =
            self.provider.supports_embeddings() && self.read_index().has_embeddings();

        let sources = if use_vectors {
            // Embed outside the index lock; std locks must not be held
            // across an await.
            let query_vector = self.provider.embed(query).await?;
            self.read_index().search_vector(&query_vector, self.top_k)
        } else {
            self.read_index().search_text(query, self.top_k)
        };
        tracing::debug!(chat_id, count = sources.len(), "sources retrieved");

        let cited: Vec<(SourceReference, DocumentMetadata)> = {
            let index = self.read_index();
            sources
                .iter()
                .map(|s| {
                    let metadata = index
                        .document_by_id(s.id)
                        .map(|d| d.metadata.clone())
                        .unwrap_or(DocumentMetadata::General);
                    (s.clone(), metadata)
                })
                .collect()
        };

        let messages = self.context.assemble(query, history, &cited);
        let request = CompletionRequest {
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let content = self.provider.complete(request).await?;
        // An empty completion would fail message validation after the user
        // message is already persisted; reject it up front so a failure
        // never leaves a user message without its assistant reply.
        if content.trim().is_empty() {
            return Err(ApiError::Provider(
                "completion returned empty content".to_string(),
            ));
        }

        self.conversations
            .create_message(chat_id, MessageRole::User, query, None)?;
        self.conversations.create_message(
            chat_id,
            MessageRole::Assistant,
            &content,
            Some(sources.clone()),
        )?;

        Ok(QueryOutcome { content, sources })
    }

    fn read_index(&self) -> RwLockReadGuard<'_, DocumentIndex> {
        self.index.read().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::core::config::RetentionConfig;
    use crate::models::Document;

    struct StubProvider {
        answer: &'static str,
        embedding: Option<Vec<f32>>,
        fail_completion: bool,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn text_only(answer: &'static str) -> Self {
            Self {
                answer,
                embedding: None,
                fail_completion: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                answer: "",
                embedding: None,
                fail_completion: true,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CompletionProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn complete(&self, _request: CompletionRequest) -> Result<String, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_completion {
                return Err(ApiError::Provider("upstream unavailable".to_string()));
            }
            Ok(self.answer.to_string())
        }

        async fn embed(&self, _text: &str) -> Result<Vec<f32>, ApiError> {
            self.embedding
                .clone()
                .ok_or_else(|| ApiError::Provider("no embeddings".to_string()))
        }

        fn supports_embeddings(&self) -> bool {
            self.embedding.is_some()
        }
    }

    fn corpus_index() -> Arc<RwLock<DocumentIndex>> {
        let mut index = DocumentIndex::new();
        index.add_document(Document {
            id: 1,
            title: "On Faith".to_string(),
            content: "Faith is the theological virtue by which we believe.".to_string(),
            source: "Catechism of the Catholic Church".to_string(),
            metadata: DocumentMetadata::Catechism {
                section: Some("Part Three".to_string()),
                paragraphs: Some("1814-1816".to_string()),
            },
        });
        index.add_document(Document {
            id: 2,
            title: "On Hope".to_string(),
            content: "Hope responds to the aspiration to happiness.".to_string(),
            source: "Catechism of the Catholic Church".to_string(),
            metadata: DocumentMetadata::Catechism {
                section: Some("Part Three".to_string()),
                paragraphs: Some("1817-1821".to_string()),
            },
        });
        Arc::new(RwLock::new(index))
    }

    fn pipeline(provider: Arc<dyn CompletionProvider>) -> (RagPipeline, Arc<ConversationStore>) {
        let conversations = Arc::new(ConversationStore::new(RetentionConfig {
            returned_messages: 50,
            ..RetentionConfig::default()
        }));
        let pipeline = RagPipeline::new(
            corpus_index(),
            conversations.clone(),
            provider,
            &RetrievalConfig::default(),
            &CompletionConfig::default(),
        );
        (pipeline, conversations)
    }

    #[tokio::test]
    async fn persists_exactly_user_then_assistant_with_matching_sources() {
        let provider = Arc::new(StubProvider::text_only("Faith is a gift."));
        let (pipeline, conversations) = pipeline(provider);

        let outcome = pipeline
            .process_query(1, "What is faith?", &[])
            .await
            .expect("query succeeds");

        assert_eq!(outcome.content, "Faith is a gift.");
        assert!(!outcome.sources.is_empty());

        let messages = conversations.messages_for_chat(1);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[0].content, "What is faith?");
        assert!(messages[0].sources.is_none());
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(messages[1].sources.as_ref(), Some(&outcome.sources));
    }

    #[tokio::test]
    async fn provider_failure_aborts_without_partial_persistence() {
        let provider = Arc::new(StubProvider::failing());
        let (pipeline, conversations) = pipeline(provider);

        let err = pipeline
            .process_query(1, "What is faith?", &[])
            .await
            .expect_err("provider failure propagates");

        match err {
            ApiError::QueryProcessing(cause) => {
                assert!(matches!(*cause, ApiError::Provider(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(conversations.total_messages(), 0);
    }

    #[tokio::test]
    async fn empty_completion_aborts_without_persisting_the_user_message() {
        let provider = Arc::new(StubProvider::text_only(""));
        let (pipeline, conversations) = pipeline(provider);

        let err = pipeline
            .process_query(1, "What is faith?", &[])
            .await
            .expect_err("empty completion must fail");

        match err {
            ApiError::QueryProcessing(cause) => {
                assert!(matches!(*cause, ApiError::Provider(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
        // Neither the user message nor an assistant message may remain.
        assert_eq!(conversations.total_messages(), 0);
    }

    #[tokio::test]
    async fn empty_query_is_rejected_before_any_work() {
        let provider = Arc::new(StubProvider::text_only("unused"));
        let (pipeline, conversations) = pipeline(provider.clone());

        let err = pipeline
            .process_query(1, "  ", &[])
            .await
            .expect_err("empty query rejected");
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(conversations.total_messages(), 0);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn keyword_fallback_is_used_when_embeddings_are_unavailable() {
        let provider = Arc::new(StubProvider::text_only("answer"));
        let (pipeline, _) = pipeline(provider);

        let outcome = pipeline
            .process_query(1, "faith", &[])
            .await
            .expect("query succeeds");
        assert_eq!(outcome.sources[0].id, 1);
        assert_eq!(outcome.sources[0].category.as_deref(), Some("Catechism"));
    }

    #[tokio::test]
    async fn vector_strategy_is_preferred_when_index_and_provider_have_embeddings() {
        let provider = Arc::new(StubProvider {
            answer: "answer",
            embedding: Some(vec![0.0, 1.0]),
            fail_completion: false,
            calls: AtomicUsize::new(0),
        });

        let mut index = DocumentIndex::new();
        index.add_document_with_vector(
            Document {
                id: 1,
                title: "A".to_string(),
                content: "faith faith faith".to_string(),
                source: "test".to_string(),
                metadata: DocumentMetadata::General,
            },
            vec![1.0, 0.0],
        );
        index.add_document_with_vector(
            Document {
                id: 2,
                title: "B".to_string(),
                content: "unrelated".to_string(),
                source: "test".to_string(),
                metadata: DocumentMetadata::General,
            },
            vec![0.0, 1.0],
        );

        let conversations = Arc::new(ConversationStore::new(RetentionConfig::default()));
        let pipeline = RagPipeline::new(
            Arc::new(RwLock::new(index)),
            conversations,
            provider,
            &RetrievalConfig::default(),
            &CompletionConfig::default(),
        );

        // Keyword scoring would pick document 1; the embedding picks 2.
        let outcome = pipeline
            .process_query(1, "faith", &[])
            .await
            .expect("query succeeds");
        assert_eq!(outcome.sources[0].id, 2);
    }
}
