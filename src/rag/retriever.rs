//! Document index with two selection strategies: cosine similarity over
//! embeddings when vectors are available, keyword overlap otherwise.

use std::collections::HashSet;

use crate::models::{Document, DocumentMetadata, SourceReference};
use crate::rag::similarity::cosine_similarity;

struct IndexEntry {
    doc: Document,
    vector: Option<Vec<f32>>,
}

/// In-memory retrieval index over the corpus. Documents are scored against
/// a query and returned as citation snapshots, descending by relevance with
/// ties broken by ascending document id so results are deterministic.
#[derive(Default)]
pub struct DocumentIndex {
    entries: Vec<IndexEntry>,
}

impl DocumentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_document(&mut self, doc: Document) {
        self.entries.push(IndexEntry { doc, vector: None });
    }

    pub fn add_document_with_vector(&mut self, doc: Document, vector: Vec<f32>) {
        self.entries.push(IndexEntry {
            doc,
            vector: Some(vector),
        });
    }

    pub fn document_by_id(&self, id: u64) -> Option<&Document> {
        self.entries.iter().map(|e| &e.doc).find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when at least one indexed document carries an embedding, which
    /// selects the vector strategy for the next search.
    pub fn has_embeddings(&self) -> bool {
        self.entries.iter().any(|e| e.vector.is_some())
    }

    /// Keyword-overlap search over lower-cased title+content.
    ///
    /// Query terms of length <= 2 are discarded; the score is the fraction of
    /// distinct terms found in the document. An empty or whitespace-only
    /// query returns the first `limit` documents in store order with
    /// relevance fixed at 1.0, so an empty query never signals "no results".
    pub fn search_text(&self, query: &str, limit: usize) -> Vec<SourceReference> {
        if query.trim().is_empty() {
            return self
                .entries
                .iter()
                .take(limit)
                .map(|e| to_source(&e.doc, 1.0))
                .collect();
        }

        let lowered = query.to_lowercase();
        let terms: HashSet<&str> = lowered
            .split_whitespace()
            .filter(|t| t.len() > 2)
            .collect();
        if terms.is_empty() {
            return Vec::new();
        }

        let scored = self
            .entries
            .iter()
            .filter_map(|e| {
                let haystack =
                    format!("{} {}", e.doc.title, e.doc.content).to_lowercase();
                let matches = terms.iter().filter(|t| haystack.contains(**t)).count();
                if matches == 0 {
                    return None;
                }
                let score = matches as f32 / terms.len() as f32;
                Some(to_source(&e.doc, score))
            })
            .collect();

        rank(scored, limit)
    }

    /// Cosine-similarity search against the query embedding.
    ///
    /// Documents without an embedding are silently skipped, so a partially
    /// embedded index yields results drawn only from the embedded subset —
    /// a known limitation of the vector strategy, preserved deliberately.
    /// A dimension mismatch skips the offending document with a warning and
    /// never aborts the search. Documents with non-positive similarity are
    /// dropped from the result set, so returned scores always land in (0, 1].
    pub fn search_vector(&self, query_vector: &[f32], limit: usize) -> Vec<SourceReference> {
        let scored = self
            .entries
            .iter()
            .filter_map(|e| {
                let vector = e.vector.as_ref()?;
                let score = match cosine_similarity(query_vector, vector) {
                    Ok(score) => score,
                    Err(err) => {
                        tracing::warn!(
                            doc_id = e.doc.id,
                            "skipping document in vector search: {}",
                            err
                        );
                        return None;
                    }
                };
                if score <= 0.0 {
                    return None;
                }
                Some(to_source(&e.doc, score))
            })
            .collect();

        rank(scored, limit)
    }
}

fn to_source(doc: &Document, score: f32) -> SourceReference {
    let section = match &doc.metadata {
        DocumentMetadata::Catechism { section, .. } => section.clone(),
        _ => None,
    };
    SourceReference {
        id: doc.id,
        title: doc.title.clone(),
        content: Some(doc.content.clone()),
        source: doc.source.clone(),
        category: Some(doc.category().to_string()),
        section,
        relevance_score: score.clamp(0.0, 1.0),
    }
}

fn rank(mut scored: Vec<SourceReference>, limit: usize) -> Vec<SourceReference> {
    scored.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.id.cmp(&b.id))
    });
    scored.truncate(limit);
    scored
}
