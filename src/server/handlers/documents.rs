use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::core::errors::ApiError;
use crate::corpus::DocumentStore;
use crate::models::Document;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DocumentFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

pub async fn list_documents(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<DocumentFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let documents = filter_documents(&state.documents, &filter);
    Ok(Json(json!({ "documents": documents })))
}

pub async fn get_document(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    let document = state
        .documents
        .by_id(document_id)
        .ok_or_else(|| ApiError::NotFound("Document not found".to_string()))?;
    Ok(Json(json!({ "document": document })))
}

/// Applies both query parameters when present: the category filter narrows
/// the corpus first, then the substring search narrows within it.
fn filter_documents<'a>(store: &'a DocumentStore, filter: &DocumentFilter) -> Vec<&'a Document> {
    let mut documents: Vec<&Document> = match &filter.category {
        Some(category) => store.by_category(category),
        None => store.all().iter().collect(),
    };
    if let Some(needle) = &filter.search {
        let needle = needle.to_lowercase();
        documents.retain(|d| {
            d.title.to_lowercase().contains(&needle)
                || d.content.to_lowercase().contains(&needle)
        });
    }
    documents
}
