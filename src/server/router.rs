use axum::http::header;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::server::handlers::{chats, documents, health};
use crate::state::AppState;

/// Thin request/response mapping over the core stores and pipeline; the
/// core's contract is the store and pipeline signatures, independent of
/// this transport.
pub fn router(state: Arc<AppState>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health::health))
        .route("/api/documents", get(documents::list_documents))
        .route("/api/documents/:document_id", get(documents::get_document))
        .route(
            "/api/chats",
            get(chats::list_chats).post(chats::create_chat),
        )
        .route(
            "/api/chats/:chat_id",
            get(chats::get_chat)
                .patch(chats::update_chat)
                .delete(chats::delete_chat),
        )
        .route(
            "/api/chats/:chat_id/messages",
            get(chats::get_chat_messages).post(chats::post_message),
        )
        .with_state(state)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
}
