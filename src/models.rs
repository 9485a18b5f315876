//! Core data model: corpus documents, chats, messages, and citations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reference text from the fixed corpus. Immutable once loaded; never
/// deleted in normal operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: u64,
    pub title: String,
    pub content: String,
    /// Human-readable provenance, e.g. "Catechism of the Catholic Church".
    pub source: String,
    #[serde(flatten)]
    pub metadata: DocumentMetadata,
}

impl Document {
    pub fn category(&self) -> &'static str {
        self.metadata.category()
    }
}

/// Per-category metadata. Each corpus category carries its own fields; the
/// context assembler matches exhaustively over this enum when rendering
/// citation blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum DocumentMetadata {
    #[serde(rename = "Catechism")]
    Catechism {
        section: Option<String>,
        paragraphs: Option<String>,
    },
    #[serde(rename = "Council Documents")]
    CouncilDocument {
        document: Option<String>,
        kind: Option<String>,
    },
    #[serde(rename = "Encyclicals")]
    Encyclical {
        pope: Option<String>,
        year: Option<String>,
    },
    #[serde(rename = "Saints")]
    Saint {
        lifespan: Option<String>,
        feast: Option<String>,
    },
    #[serde(rename = "Scripture")]
    Scripture {
        testament: Option<String>,
        books: Option<String>,
    },
    /// Documents outside the fixed enumeration get no metadata line.
    #[serde(rename = "General")]
    General,
}

impl DocumentMetadata {
    pub fn category(&self) -> &'static str {
        match self {
            DocumentMetadata::Catechism { .. } => "Catechism",
            DocumentMetadata::CouncilDocument { .. } => "Council Documents",
            DocumentMetadata::Encyclical { .. } => "Encyclicals",
            DocumentMetadata::Saint { .. } => "Saints",
            DocumentMetadata::Scripture { .. } => "Scripture",
            DocumentMetadata::General => "General",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: u64,
    pub title: Option<String>,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

impl MessageRole {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::System => "system",
        }
    }
}

/// A chat message. Immutable once created; append-only within a chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub chat_id: u64,
    pub role: MessageRole,
    pub content: String,
    /// Citations backing an assistant message. Absent on user messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceReference>>,
    pub created_at: DateTime<Utc>,
}

/// A denormalized snapshot of a document taken at citation time. Later
/// corpus changes never retroactively alter persisted citations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceReference {
    pub id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Always within [0, 1]; negative cosine scores are clamped to 0.
    pub relevance_score: f32,
}
