//! Core data types for documents, chunks, and query responses

pub mod document;
pub mod response;

pub use document::{Chunk, ChunkSource, Document};
pub use response::{MatchedChunk, QueryResponse, RetrievedChunk};
