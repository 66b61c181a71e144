//! Query-time retrieval: embed the question, search the index

use std::sync::Arc;

use crate::config::RetrievalConfig;
use crate::error::{Error, Result};
use crate::providers::{EmbeddingProvider, VectorIndexProvider};
use crate::types::{Chunk, RetrievedChunk};

/// Retrieves the top-k most similar chunks for a question.
///
/// Uses the same embedding provider as ingestion so query and chunk vectors
/// live in the same space.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndexProvider>,
    top_k: usize,
    score_threshold: Option<f32>,
}

impl Retriever {
    /// Create a new retriever
    pub fn new(
        config: &RetrievalConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndexProvider>,
    ) -> Self {
        Self {
            embedder,
            index,
            top_k: config.top_k,
            score_threshold: config.score_threshold,
        }
    }

    /// Retrieve up to `top_k` chunks ranked by descending similarity.
    ///
    /// Low-similarity chunks are returned rather than filtered unless a
    /// score threshold is configured. Fails when the index is empty or the
    /// query cannot be executed.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<RetrievedChunk>> {
        let empty = self
            .index
            .is_empty()
            .await
            .map_err(|e| Error::Retrieval(e.to_string()))?;
        if empty {
            return Err(Error::retrieval(
                "vector index is empty; ingest a document first",
            ));
        }

        let query_embedding = self.embedder.embed(query).await?;

        let matches = self
            .index
            .query(&query_embedding, self.top_k)
            .await
            .map_err(|e| Error::Retrieval(e.to_string()))?;

        let mut results: Vec<RetrievedChunk> = matches
            .into_iter()
            .map(|m| RetrievedChunk {
                chunk: Chunk::from_index_metadata(&m.id, &m.metadata),
                score: m.score,
            })
            .collect();

        // Index implementations return ranked results; enforce the ordering
        // contract here regardless of backend.
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        if let Some(threshold) = self.score_threshold {
            results.retain(|r| r.score >= threshold);
        }
        results.truncate(self.top_k);

        tracing::debug!(query = %query, results = results.len(), "retrieval complete");

        Ok(results)
    }
}
