//! docqa-rag: retrieval-augmented question answering over PDF documents
//!
//! The crate covers the full RAG pipeline: ingestion (PDF parsing, token
//! chunking, embedding, vector indexing) and query time (similarity
//! retrieval, grounded prompt construction, answer generation, and matching
//! the answer back to its supporting source passages).
//!
//! External capabilities - tokenizer, embedder, vector index, and language
//! model - are consumed through traits in [`providers`], with local
//! implementations (`WordTokenizer`, `InMemoryVectorIndex`, Ollama HTTP
//! client) included.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod storage;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use generation::{AnswerGenerator, PromptBuilder, SourceMatcher};
pub use ingestion::{IngestOutcome, IngestPipeline, IngestReport, PdfParser, TokenChunker};
pub use providers::{
    EmbeddingProvider, InMemoryVectorIndex, LlmProvider, OllamaClient, TokenizerProvider,
    VectorIndexProvider, WordTokenizer,
};
pub use retrieval::Retriever;
pub use storage::DocumentStore;
pub use types::{Chunk, ChunkSource, Document, MatchedChunk, QueryResponse, RetrievedChunk};
