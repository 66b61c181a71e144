//! Configuration for the RAG pipeline

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main RAG pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Embedding configuration
    #[serde(default)]
    pub embeddings: EmbeddingConfig,
    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// LLM configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Upload limits
    #[serde(default)]
    pub limits: UploadLimits,
    /// Document storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

impl RagConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("invalid config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration invariants
    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_size == 0 {
            return Err(Error::config("chunk_size must be greater than zero"));
        }
        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return Err(Error::Config(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.chunking.chunk_overlap, self.chunking.chunk_size
            )));
        }
        if self.retrieval.top_k == 0 {
            return Err(Error::config("top_k must be greater than zero"));
        }
        if self.embeddings.dimensions == 0 {
            return Err(Error::config("embedding dimensions must be greater than zero"));
        }
        if self.limits.file_size_limit_mb == 0 {
            return Err(Error::config("file_size_limit_mb must be greater than zero"));
        }
        Ok(())
    }
}

/// Token-based chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum tokens per chunk
    pub chunk_size: usize,
    /// Tokens shared between consecutive chunks
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 512,
            chunk_overlap: 50,
        }
    }
}

/// Embedding model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Embedding model name
    pub model: String,
    /// Embedding dimensions (768 for nomic-embed-text)
    pub dimensions: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "nomic-embed-text".to_string(),
            dimensions: 768,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of nearest chunks to retrieve
    pub top_k: usize,
    /// Optional minimum similarity score; results below it are dropped.
    /// Disabled by default: low-similarity chunks are still returned.
    #[serde(default)]
    pub score_threshold: Option<f32>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 4,
            score_threshold: None,
        }
    }
}

/// LLM (Ollama) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Generation model name
    pub model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retries for failed requests. Zero by default: transient
    /// failures surface to the caller instead of being masked.
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.1".to_string(),
            temperature: 0.3,
            timeout_secs: 60,
            max_retries: 0,
        }
    }
}

/// Upload limits enforced before ingestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadLimits {
    /// Maximum uploaded file size in megabytes
    pub file_size_limit_mb: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            file_size_limit_mb: 10,
        }
    }
}

/// Document storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory where uploaded documents are persisted
    pub documents_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let documents_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("docqa-rag")
            .join("documents");
        Self { documents_dir }
    }
}
