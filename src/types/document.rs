//! Document and chunk types with source tracking for citations

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A document that has been ingested
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document ID
    pub id: Uuid,
    /// Original filename as uploaded by the user
    pub filename: String,
    /// SHA-256 hash of the extracted text, for change detection
    pub content_hash: String,
    /// File size in bytes
    pub file_size: u64,
    /// Total number of pages
    pub total_pages: u32,
    /// Total number of chunks created
    pub total_chunks: u32,
    /// Ingestion timestamp
    pub ingested_at: chrono::DateTime<chrono::Utc>,
}

impl Document {
    /// Create a new document record
    pub fn new(filename: String, content_hash: String, file_size: u64, total_pages: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename,
            content_hash,
            file_size,
            total_pages,
            total_chunks: 0,
            ingested_at: chrono::Utc::now(),
        }
    }
}

/// Source information for a chunk (used for citations)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSource {
    /// Document name the chunk was extracted from
    pub document: String,
    /// Page number (1-indexed)
    pub page_number: u32,
}

impl ChunkSource {
    /// Create source info for a page of a document
    pub fn new(document: impl Into<String>, page_number: u32) -> Self {
        Self {
            document: document.into(),
            page_number,
        }
    }

    /// Format as a citation label, e.g. `"report.pdf, page 3"`
    pub fn label(&self) -> String {
        format!("{}, page {}", self.document, self.page_number)
    }
}

/// A token-bounded chunk of text from a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique chunk ID
    pub id: Uuid,
    /// Text content
    pub text: String,
    /// Source information for citations
    pub source: ChunkSource,
    /// Number of tokens in `text`
    pub token_count: usize,
    /// Chunk index within the document (reading order)
    pub chunk_index: u32,
    /// Embedding vector, empty until the chunk is embedded
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub embedding: Vec<f32>,
}

impl Chunk {
    /// Create a new chunk without an embedding
    pub fn new(text: String, source: ChunkSource, token_count: usize, chunk_index: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            source,
            token_count,
            chunk_index,
            embedding: Vec::new(),
        }
    }

    /// Convert to vector index metadata. Text and source travel with the
    /// vector so retrieval needs no secondary lookup.
    pub fn to_index_metadata(&self) -> HashMap<String, serde_json::Value> {
        let mut meta = HashMap::new();
        meta.insert("chunk_id".to_string(), serde_json::json!(self.id.to_string()));
        meta.insert("text".to_string(), serde_json::json!(self.text));
        meta.insert("document".to_string(), serde_json::json!(self.source.document));
        meta.insert("page_number".to_string(), serde_json::json!(self.source.page_number));
        meta.insert("token_count".to_string(), serde_json::json!(self.token_count));
        meta.insert("chunk_index".to_string(), serde_json::json!(self.chunk_index));
        meta
    }

    /// Reconstruct a chunk from vector index metadata
    pub fn from_index_metadata(id: &str, metadata: &HashMap<String, serde_json::Value>) -> Self {
        let chunk_id = metadata
            .get("chunk_id")
            .and_then(|v| v.as_str())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(|| Uuid::parse_str(id).unwrap_or_else(|_| Uuid::new_v4()));

        let text = metadata
            .get("text")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();

        let document = metadata
            .get("document")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
            .to_string();

        let page_number = metadata
            .get("page_number")
            .and_then(|v| v.as_u64())
            .unwrap_or(1) as u32;

        let token_count = metadata
            .get("token_count")
            .and_then(|v| v.as_u64())
            .unwrap_or(0) as usize;

        let chunk_index = metadata
            .get("chunk_index")
            .and_then(|v| v.as_u64())
            .unwrap_or(0) as u32;

        Self {
            id: chunk_id,
            text,
            source: ChunkSource::new(document, page_number),
            token_count,
            chunk_index,
            embedding: Vec::new(),
        }
    }
}
