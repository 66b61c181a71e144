//! Capability traits for tokenization, embeddings, LLM, and vector storage
//!
//! The pipeline depends on these seams, not on concrete SDKs. Shipped
//! implementations: `WordTokenizer`, `OllamaEmbedder`/`OllamaLlm` (HTTP), and
//! `InMemoryVectorIndex` for development and tests.

pub mod embedding;
pub mod llm;
pub mod memory;
pub mod ollama;
pub mod tokenizer;
pub mod vector_index;

pub use embedding::EmbeddingProvider;
pub use llm::LlmProvider;
pub use memory::InMemoryVectorIndex;
pub use ollama::{OllamaClient, OllamaEmbedder, OllamaLlm};
pub use tokenizer::{TokenizerProvider, WordTokenizer};
pub use vector_index::{QueryMatch, VectorIndexProvider, VectorRecord};
