//! Ingestion pipeline: parse, chunk, embed, and index a document

use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::config::RagConfig;
use crate::error::{Error, Result};
use crate::providers::{EmbeddingProvider, TokenizerProvider, VectorIndexProvider, VectorRecord};
use crate::storage::DocumentStore;
use crate::types::Document;

use super::chunker::TokenChunker;
use super::parser::{PageText, PdfParser};

/// Successful ingestion report
#[derive(Debug, Clone)]
pub struct IngestReport {
    /// The ingested document record
    pub document: Document,
    /// Number of chunks stored in the index
    pub chunk_count: usize,
}

/// Outcome of an ingestion attempt, for callers that only need
/// a loaded/not-loaded signal
#[derive(Debug, Clone, Copy)]
pub struct IngestOutcome {
    /// Whether the document was fully ingested
    pub success: bool,
    /// Number of chunks stored (zero on failure)
    pub chunk_count: usize,
}

/// Orchestrates parse -> chunk -> embed -> upsert.
///
/// Records are namespaced by document name, and re-ingesting a name replaces
/// its prior chunks via delete-then-insert. If the backing index has no
/// transactions, concurrent readers may briefly observe the namespace empty
/// during the replace window.
pub struct IngestPipeline {
    chunker: TokenChunker,
    tokenizer: Arc<dyn TokenizerProvider>,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndexProvider>,
    document_store: Option<Arc<DocumentStore>>,
    file_size_limit_bytes: u64,
}

impl IngestPipeline {
    /// Create a new ingestion pipeline
    pub fn new(
        config: &RagConfig,
        tokenizer: Arc<dyn TokenizerProvider>,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndexProvider>,
    ) -> Result<Self> {
        let chunker = TokenChunker::new(config.chunking.chunk_size, config.chunking.chunk_overlap)?;
        Ok(Self {
            chunker,
            tokenizer,
            embedder,
            index,
            document_store: None,
            file_size_limit_bytes: config.limits.file_size_limit_mb * 1024 * 1024,
        })
    }

    /// Persist original document bytes after successful indexing
    pub fn with_document_store(mut self, store: Arc<DocumentStore>) -> Self {
        self.document_store = Some(store);
        self
    }

    /// Ingest a PDF document end to end.
    ///
    /// Any stage failure aborts the whole ingestion; nothing from the failed
    /// attempt remains queryable.
    pub async fn ingest(&self, filename: &str, data: &[u8]) -> Result<IngestReport> {
        if data.len() as u64 > self.file_size_limit_bytes {
            return Err(Error::Config(format!(
                "file size ({} bytes) exceeds the {} byte limit",
                data.len(),
                self.file_size_limit_bytes
            )));
        }

        let parsed = PdfParser::parse(filename, data)?;
        let report = self
            .index_pages(filename, &parsed.pages, parsed.content_hash.clone(), data.len() as u64)
            .await?;

        if let Some(store) = &self.document_store {
            if let Err(e) = store.save(filename, data).await {
                // Keep index and storage consistent: roll the namespace back
                // so a half-ingested document is not queryable.
                let _ = self.index.delete_namespace(filename).await;
                return Err(e);
            }
        }

        tracing::info!(
            filename = %filename,
            chunks = report.chunk_count,
            pages = parsed.total_pages,
            "document ingested"
        );

        Ok(report)
    }

    /// Ingest pre-extracted pages, bypassing PDF parsing.
    ///
    /// Useful when text was extracted elsewhere; follows the same replace
    /// and rollback semantics as [`IngestPipeline::ingest`].
    pub async fn ingest_pages(&self, filename: &str, pages: &[PageText]) -> Result<IngestReport> {
        let mut hasher = Sha256::new();
        let mut byte_len = 0u64;
        for page in pages {
            hasher.update(page.text.as_bytes());
            byte_len += page.text.len() as u64;
        }
        let content_hash = hex::encode(hasher.finalize());

        self.index_pages(filename, pages, content_hash, byte_len).await
    }

    /// Ingest and reduce the result to a success flag and chunk count,
    /// logging the underlying cause of any failure for operators.
    pub async fn run(&self, filename: &str, data: &[u8]) -> IngestOutcome {
        match self.ingest(filename, data).await {
            Ok(report) => IngestOutcome {
                success: true,
                chunk_count: report.chunk_count,
            },
            Err(e) => {
                tracing::error!(filename = %filename, error = %e, "ingestion failed");
                IngestOutcome {
                    success: false,
                    chunk_count: 0,
                }
            }
        }
    }

    async fn index_pages(
        &self,
        filename: &str,
        pages: &[PageText],
        content_hash: String,
        file_size: u64,
    ) -> Result<IngestReport> {
        let mut chunks = self
            .chunker
            .chunk_pages(filename, pages, self.tokenizer.as_ref());

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        if embeddings.len() != chunks.len() {
            return Err(Error::Embedding(format!(
                "embedder returned {} vectors for {} chunks",
                embeddings.len(),
                chunks.len()
            )));
        }
        for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
            chunk.embedding = embedding;
        }

        // Replace semantics: drop any previous version of this document
        // before inserting the new chunks.
        self.index.delete_namespace(filename).await?;

        let records: Vec<VectorRecord> = chunks
            .iter()
            .map(|chunk| VectorRecord {
                id: chunk.id.to_string(),
                vector: chunk.embedding.clone(),
                metadata: chunk.to_index_metadata(),
            })
            .collect();

        if let Err(e) = self.index.upsert(filename, records).await {
            let _ = self.index.delete_namespace(filename).await;
            return Err(e);
        }

        let mut document = Document::new(
            filename.to_string(),
            content_hash,
            file_size,
            pages.len() as u32,
        );
        document.total_chunks = chunks.len() as u32;

        Ok(IngestReport {
            document,
            chunk_count: chunks.len(),
        })
    }
}
