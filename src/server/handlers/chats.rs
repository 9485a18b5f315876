use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::core::errors::ApiError;
use crate::llm::types::ChatMessage;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateChatRequest {
    pub title: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateChatRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    pub content: String,
}

pub async fn list_chats(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let chats = state.conversations.list_chats();
    Ok(Json(json!({ "chats": chats })))
}

pub async fn create_chat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateChatRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let chat = state.conversations.create_chat(payload.title, payload.user_id);
    Ok(Json(json!({ "chat": chat })))
}

pub async fn get_chat(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    let chat = state
        .conversations
        .get_chat(chat_id)
        .ok_or_else(|| ApiError::NotFound("Chat not found".to_string()))?;
    let messages = state.conversations.messages_for_chat(chat_id);
    Ok(Json(json!({ "chat": chat, "messages": messages })))
}

pub async fn update_chat(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<u64>,
    Json(payload): Json<UpdateChatRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.conversations.update_chat_title(chat_id, &payload.title) {
        return Err(ApiError::NotFound("Chat not found".to_string()));
    }
    Ok(Json(json!({ "success": true })))
}

pub async fn delete_chat(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.conversations.delete_chat(chat_id) {
        return Err(ApiError::NotFound("Chat not found".to_string()));
    }
    Ok(Json(json!({ "success": true })))
}

pub async fn get_chat_messages(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    let messages = state.conversations.messages_for_chat(chat_id);
    Ok(Json(json!({ "messages": messages })))
}

/// Runs the full query pipeline for a chat. History is read through the
/// capped store view and mapped to role+content pairs; citation sources
/// never reach the completion provider.
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<u64>,
    Json(payload): Json<PostMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let history: Vec<ChatMessage> = state
        .conversations
        .messages_for_chat(chat_id)
        .into_iter()
        .map(|m| ChatMessage {
            role: m.role.as_str().to_string(),
            content: m.content,
        })
        .collect();

    let outcome = state
        .pipeline
        .process_query(chat_id, &payload.content, &history)
        .await?;

    Ok(Json(json!({
        "content": outcome.content,
        "sources": outcome.sources,
    })))
}
