//! Vector index provider trait for storing and searching embeddings

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::Result;

/// A record to upsert into the vector index
#[derive(Debug, Clone)]
pub struct VectorRecord {
    /// Stable record ID
    pub id: String,
    /// Embedding vector
    pub vector: Vec<f32>,
    /// Metadata stored alongside the vector (chunk text, source)
    pub metadata: HashMap<String, serde_json::Value>,
}

/// A match returned from a nearest-neighbor query
#[derive(Debug, Clone)]
pub struct QueryMatch {
    /// Record ID
    pub id: String,
    /// Similarity score (higher is more similar)
    pub score: f32,
    /// Metadata stored with the vector
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Trait for vector storage and similarity search.
///
/// Records are partitioned into namespaces (one per document) so that
/// re-ingesting a document can replace its prior records wholesale.
#[async_trait]
pub trait VectorIndexProvider: Send + Sync {
    /// Insert or replace records within a namespace
    async fn upsert(&self, namespace: &str, records: Vec<VectorRecord>) -> Result<()>;

    /// Search across all namespaces for the `top_k` nearest vectors
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<QueryMatch>>;

    /// Delete every record in a namespace, returning how many were removed
    async fn delete_namespace(&self, namespace: &str) -> Result<usize>;

    /// Get total number of vectors stored
    async fn len(&self) -> Result<usize>;

    /// Check if the index holds no vectors
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Check if the index is healthy and reachable
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
