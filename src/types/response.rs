//! Retrieval and answer response types

use serde::{Deserialize, Serialize};

use super::document::Chunk;

/// A chunk returned from similarity search, with its score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedChunk {
    /// The retrieved chunk
    pub chunk: Chunk,
    /// Similarity score (higher is more similar)
    pub score: f32,
}

/// A retrieved chunk judged to support the generated answer.
/// Used purely for user-facing citation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedChunk {
    /// Citation label, e.g. `"report.pdf, page 3"`
    pub source: String,
    /// Chunk text
    pub text: String,
    /// Chunk text with overlapping terms wrapped in `<mark>` tags
    pub highlighted: String,
}

/// Response to a single question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Generated answer text
    pub answer: String,
    /// Ordered subset of retrieved chunks that support the answer
    pub matched_chunks: Vec<MatchedChunk>,
    /// Number of chunks retrieved for context
    pub chunks_retrieved: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
