//! Fixed document corpus with category and substring queries.

pub mod seed;

use crate::models::Document;

/// Read-only store over the reference corpus. Built once at startup and
/// never mutated; the retrieval index keeps its own copies alongside any
/// embeddings.
pub struct DocumentStore {
    docs: Vec<Document>,
}

impl DocumentStore {
    pub fn from_documents(docs: Vec<Document>) -> Self {
        Self { docs }
    }

    pub fn seeded() -> Self {
        Self::from_documents(seed::seed_documents())
    }

    pub fn all(&self) -> &[Document] {
        &self.docs
    }

    pub fn by_id(&self, id: u64) -> Option<&Document> {
        self.docs.iter().find(|d| d.id == id)
    }

    /// Exact label match against the fixed category enumeration; an unknown
    /// label simply matches nothing.
    pub fn by_category<'a>(&'a self, category: &str) -> Vec<&'a Document> {
        self.docs
            .iter()
            .filter(|d| d.category() == category)
            .collect()
    }

    /// Case-insensitive substring search over title and content.
    pub fn search(&self, needle: &str) -> Vec<&Document> {
        let needle = needle.to_lowercase();
        self.docs
            .iter()
            .filter(|d| {
                d.title.to_lowercase().contains(&needle)
                    || d.content.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}
