//! Document ingestion: PDF parsing, token chunking, and index upsert

mod chunker;
mod parser;
mod pipeline;

pub use chunker::TokenChunker;
pub use parser::{PageText, ParsedPdf, PdfParser};
pub use pipeline::{IngestOutcome, IngestPipeline, IngestReport};
