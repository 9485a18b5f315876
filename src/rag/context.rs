//! Prompt assembly: bounded system context from retrieved sources, a
//! truncated history window, and the new user query.

use crate::core::config::RetrievalConfig;
use crate::llm::types::ChatMessage;
use crate::models::{DocumentMetadata, MessageRole, SourceReference};

const SYSTEM_PREAMBLE: &str = "You are a knowledgeable assistant on Catholic teaching. \
Answer from the reference texts provided below, citing them by title. \
When the context does not cover the question, say so plainly rather than \
speculating, and keep answers faithful to the cited sources.";

pub struct ContextBuilder {
    snippet_budget: usize,
    history_window: usize,
}

impl ContextBuilder {
    pub fn new(config: &RetrievalConfig) -> Self {
        Self {
            snippet_budget: config.snippet_budget,
            history_window: config.history_window,
        }
    }

    /// Assembles the full message sequence sent to the completion provider:
    /// one system message, the last `history_window` history entries, then
    /// the new user query.
    pub fn assemble(
        &self,
        query: &str,
        history: &[ChatMessage],
        sources: &[(SourceReference, DocumentMetadata)],
    ) -> Vec<ChatMessage> {
        let blocks: Vec<String> = sources
            .iter()
            .enumerate()
            .map(|(i, (source, metadata))| self.source_block(i + 1, source, metadata))
            .collect();

        let system = format!(
            "{}\n\nRelevant context:\n{}",
            SYSTEM_PREAMBLE,
            blocks.join("\n\n")
        );

        let skip = history.len().saturating_sub(self.history_window);

        let mut messages = Vec::with_capacity(history.len().min(self.history_window) + 2);
        messages.push(ChatMessage {
            role: MessageRole::System.as_str().to_string(),
            content: system,
        });
        messages.extend(history.iter().skip(skip).cloned());
        messages.push(ChatMessage {
            role: MessageRole::User.as_str().to_string(),
            content: query.to_string(),
        });
        messages
    }

    fn source_block(
        &self,
        position: usize,
        source: &SourceReference,
        metadata: &DocumentMetadata,
    ) -> String {
        let category = source.category.as_deref().unwrap_or("General");
        let mut block = format!(
            "[{}] {} ({}, relevance: {:.2})\n{}",
            position,
            source.title,
            category,
            source.relevance_score,
            self.truncate_snippet(source.content.as_deref().unwrap_or("")),
        );
        for line in metadata_lines(metadata) {
            block.push('\n');
            block.push_str(&line);
        }
        block
    }

    fn truncate_snippet(&self, content: &str) -> String {
        if content.chars().count() <= self.snippet_budget {
            return content.to_string();
        }
        let truncated: String = content.chars().take(self.snippet_budget).collect();
        format!("{}...", truncated)
    }
}

/// Category-specific metadata lines, matched exhaustively over the fixed
/// enumeration. `General` documents get none.
fn metadata_lines(metadata: &DocumentMetadata) -> Vec<String> {
    let mut lines = Vec::new();
    let mut push = |label: &str, value: &Option<String>| {
        if let Some(value) = value {
            lines.push(format!("{}: {}", label, value));
        }
    };
    match metadata {
        DocumentMetadata::Catechism {
            section,
            paragraphs,
        } => {
            push("Section", section);
            push("Paragraphs", paragraphs);
        }
        DocumentMetadata::CouncilDocument { document, kind } => {
            push("Document", document);
            push("Type", kind);
        }
        DocumentMetadata::Encyclical { pope, year } => {
            push("Pope", pope);
            push("Year", year);
        }
        DocumentMetadata::Saint { lifespan, feast } => {
            push("Lifespan", lifespan);
            push("Feast", feast);
        }
        DocumentMetadata::Scripture { testament, books } => {
            push("Testament", testament);
            push("Books", books);
        }
        DocumentMetadata::General => {}
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ContextBuilder {
        ContextBuilder::new(&RetrievalConfig::default())
    }

    fn source(id: u64, title: &str, content: &str) -> SourceReference {
        SourceReference {
            id,
            title: title.to_string(),
            content: Some(content.to_string()),
            source: "test".to_string(),
            category: Some("Catechism".to_string()),
            section: None,
            relevance_score: 0.9,
        }
    }

    fn user_msg(content: &str) -> ChatMessage {
        ChatMessage {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn system_message_leads_and_query_closes_the_sequence() {
        let sources = vec![(
            source(1, "On Prayer", "Prayer is the raising of the mind to God."),
            DocumentMetadata::General,
        )];
        let history = vec![user_msg("earlier question")];

        let messages = builder().assemble("What is prayer?", &history, &sources);

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, "system");
        assert!(messages[0].content.contains("Relevant context:"));
        assert!(messages[0].content.contains("On Prayer"));
        assert_eq!(messages.last().map(|m| m.content.as_str()), Some("What is prayer?"));
    }

    #[test]
    fn history_truncates_to_the_last_window_entries() {
        let history: Vec<ChatMessage> =
            (0..8).map(|i| user_msg(&format!("message {i}"))).collect();

        let messages = builder().assemble("query", &history, &[]);

        // system + 5 history entries + query
        assert_eq!(messages.len(), 7);
        assert_eq!(messages[1].content, "message 3");
        assert_eq!(messages[5].content, "message 7");
    }

    #[test]
    fn long_snippets_truncate_with_ellipsis_marker() {
        let long = "a".repeat(1500);
        let sources = vec![(source(1, "Long", &long), DocumentMetadata::General)];

        let messages = builder().assemble("q", &[], &sources);

        let system = &messages[0].content;
        assert!(system.contains(&format!("{}...", "a".repeat(1000))));
        assert!(!system.contains(&"a".repeat(1001)));
    }

    #[test]
    fn each_category_contributes_its_own_metadata_lines() {
        let cases = vec![
            (
                DocumentMetadata::Catechism {
                    section: Some("Part One".to_string()),
                    paragraphs: Some("26-49".to_string()),
                },
                vec!["Section: Part One", "Paragraphs: 26-49"],
            ),
            (
                DocumentMetadata::CouncilDocument {
                    document: Some("Lumen Gentium".to_string()),
                    kind: Some("Dogmatic Constitution".to_string()),
                },
                vec!["Document: Lumen Gentium", "Type: Dogmatic Constitution"],
            ),
            (
                DocumentMetadata::Encyclical {
                    pope: Some("Leo XIII".to_string()),
                    year: Some("1891".to_string()),
                },
                vec!["Pope: Leo XIII", "Year: 1891"],
            ),
            (
                DocumentMetadata::Saint {
                    lifespan: Some("354-430".to_string()),
                    feast: Some("August 28".to_string()),
                },
                vec!["Lifespan: 354-430", "Feast: August 28"],
            ),
            (
                DocumentMetadata::Scripture {
                    testament: Some("New Testament".to_string()),
                    books: Some("Matthew".to_string()),
                },
                vec!["Testament: New Testament", "Books: Matthew"],
            ),
        ];

        for (metadata, expected) in cases {
            let lines = metadata_lines(&metadata);
            assert_eq!(lines, expected);
        }

        assert!(metadata_lines(&DocumentMetadata::General).is_empty());
    }

    #[test]
    fn absent_metadata_fields_produce_no_lines() {
        let lines = metadata_lines(&DocumentMetadata::Encyclical {
            pope: Some("Francis".to_string()),
            year: None,
        });
        assert_eq!(lines, vec!["Pope: Francis"]);
    }
}
