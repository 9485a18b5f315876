//! Retrieval-augmented chat backend over a fixed corpus of Catholic
//! reference texts.
//!
//! The pipeline retrieves the most relevant documents for a query (cosine
//! similarity over embeddings when available, keyword overlap otherwise),
//! assembles a bounded prompt, obtains a completion, and persists the
//! exchange with its citations. Conversations live in an in-memory store
//! bounded by a periodic eviction sweep.

pub mod core;
pub mod corpus;
pub mod history;
pub mod llm;
pub mod logging;
pub mod models;
pub mod rag;
pub mod server;
pub mod state;
