//! Retrieval-augmented generation: index, similarity scoring, prompt
//! assembly, and the query-processing pipeline.

pub mod context;
pub mod pipeline;
pub mod retriever;
pub mod similarity;

pub use pipeline::{QueryOutcome, RagPipeline};
pub use retriever::DocumentIndex;
