//! In-memory vector index using exact cosine similarity
//!
//! Namespaced flat index behind a `parking_lot::RwLock`. Individual upsert,
//! query, and delete operations are atomic; concurrent readers stay safe
//! during writes. Suitable for single-document workloads and tests.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::error::{Error, Result};

use super::vector_index::{QueryMatch, VectorIndexProvider, VectorRecord};

struct StoredRecord {
    vector: Vec<f32>,
    metadata: HashMap<String, serde_json::Value>,
}

/// In-memory vector index: namespace -> record ID -> record
pub struct InMemoryVectorIndex {
    namespaces: RwLock<HashMap<String, HashMap<String, StoredRecord>>>,
    dimensions: usize,
}

impl InMemoryVectorIndex {
    /// Create a new empty index for vectors of the given dimension
    pub fn new(dimensions: usize) -> Self {
        Self {
            namespaces: RwLock::new(HashMap::new()),
            dimensions,
        }
    }

    /// Number of records in a single namespace
    pub fn namespace_len(&self, namespace: &str) -> usize {
        self.namespaces
            .read()
            .get(namespace)
            .map(|records| records.len())
            .unwrap_or(0)
    }
}

/// Cosine similarity between two vectors; 0.0 if either has zero magnitude
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorIndexProvider for InMemoryVectorIndex {
    async fn upsert(&self, namespace: &str, records: Vec<VectorRecord>) -> Result<()> {
        for record in &records {
            if record.vector.len() != self.dimensions {
                return Err(Error::Index(format!(
                    "vector dimension mismatch: expected {}, got {}",
                    self.dimensions,
                    record.vector.len()
                )));
            }
        }

        let mut namespaces = self.namespaces.write();
        let store = namespaces.entry(namespace.to_string()).or_default();
        for record in records {
            store.insert(
                record.id.clone(),
                StoredRecord {
                    vector: record.vector,
                    metadata: record.metadata,
                },
            );
        }
        Ok(())
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<QueryMatch>> {
        if vector.len() != self.dimensions {
            return Err(Error::Index(format!(
                "query dimension mismatch: expected {}, got {}",
                self.dimensions,
                vector.len()
            )));
        }

        let namespaces = self.namespaces.read();
        let mut matches: Vec<QueryMatch> = namespaces
            .values()
            .flat_map(|records| records.iter())
            .map(|(id, record)| QueryMatch {
                id: id.clone(),
                score: cosine_similarity(&record.vector, vector),
                metadata: record.metadata.clone(),
            })
            .collect();

        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(top_k);
        Ok(matches)
    }

    async fn delete_namespace(&self, namespace: &str) -> Result<usize> {
        let mut namespaces = self.namespaces.write();
        Ok(namespaces
            .remove(namespace)
            .map(|records| records.len())
            .unwrap_or(0))
    }

    async fn len(&self) -> Result<usize> {
        let namespaces = self.namespaces.read();
        Ok(namespaces.values().map(|records| records.len()).sum())
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, vector: Vec<f32>) -> VectorRecord {
        VectorRecord {
            id: id.to_string(),
            vector,
            metadata: HashMap::new(),
        }
    }

    #[tokio::test]
    async fn query_ranks_by_cosine_similarity() {
        let index = InMemoryVectorIndex::new(3);
        index
            .upsert(
                "doc.pdf",
                vec![
                    record("a", vec![1.0, 0.0, 0.0]),
                    record("b", vec![0.0, 1.0, 0.0]),
                    record("c", vec![0.9, 0.1, 0.0]),
                ],
            )
            .await
            .unwrap();

        let matches = index.query(&[1.0, 0.0, 0.0], 2).await.unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].id, "a");
        assert_eq!(matches[1].id, "c");
        assert!(matches[0].score >= matches[1].score);
    }

    #[tokio::test]
    async fn delete_namespace_removes_all_records() {
        let index = InMemoryVectorIndex::new(2);
        index
            .upsert("old.pdf", vec![record("a", vec![1.0, 0.0])])
            .await
            .unwrap();
        index
            .upsert("keep.pdf", vec![record("b", vec![0.0, 1.0])])
            .await
            .unwrap();

        let deleted = index.delete_namespace("old.pdf").await.unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(index.len().await.unwrap(), 1);
        assert_eq!(index.namespace_len("old.pdf"), 0);
        assert_eq!(index.delete_namespace("missing.pdf").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn dimension_mismatch_is_an_error() {
        let index = InMemoryVectorIndex::new(3);
        let err = index
            .upsert("doc.pdf", vec![record("a", vec![1.0, 0.0])])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Index(_)));

        let err = index.query(&[1.0], 1).await.unwrap_err();
        assert!(matches!(err, Error::Index(_)));
    }

    #[test]
    fn zero_vector_has_zero_similarity() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
