use serde::{Deserialize, Serialize};

/// Role-tagged message as the completion endpoint understands it. Citation
/// sources never travel here; the orchestrator strips them before sending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}
