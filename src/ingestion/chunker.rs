//! Token-bounded chunking with page provenance

use crate::error::{Error, Result};
use crate::providers::tokenizer::TokenizerProvider;
use crate::types::{Chunk, ChunkSource};

use super::parser::PageText;

/// Chunker emitting overlapping token windows per page.
///
/// A window of `chunk_size` tokens starts every `chunk_size - chunk_overlap`
/// tokens; the final window of a page may be shorter. Chunks never span page
/// boundaries, so every chunk cites exactly one page.
#[derive(Debug)]
pub struct TokenChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TokenChunker {
    /// Create a new chunker. Requires `0 <= chunk_overlap < chunk_size`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::config("chunk_size must be greater than zero"));
        }
        if chunk_overlap >= chunk_size {
            return Err(Error::Config(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                chunk_overlap, chunk_size
            )));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    /// Chunk the pages of a document, in reading order.
    ///
    /// Chunk text is sliced from the page between the first and last token of
    /// the window, so punctuation inside a chunk is preserved verbatim. Pages
    /// with zero tokens produce zero chunks.
    pub fn chunk_pages(
        &self,
        document_name: &str,
        pages: &[PageText],
        tokenizer: &dyn TokenizerProvider,
    ) -> Vec<Chunk> {
        let stride = self.chunk_size - self.chunk_overlap;
        let mut chunks = Vec::new();

        for page in pages {
            let spans = tokenizer.spans(&page.text);
            if spans.is_empty() {
                continue;
            }

            let mut start = 0;
            loop {
                let end = (start + self.chunk_size).min(spans.len());
                let window = &spans[start..end];
                let text = page.text[window[0].start..window[window.len() - 1].end].to_string();
                let source = ChunkSource::new(document_name, page.page_number);

                chunks.push(Chunk::new(text, source, window.len(), chunks.len() as u32));

                if end == spans.len() {
                    break;
                }
                start += stride;
            }
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::tokenizer::WordTokenizer;

    fn page(number: u32, text: &str) -> PageText {
        PageText {
            page_number: number,
            text: text.to_string(),
        }
    }

    #[test]
    fn overlap_must_be_less_than_chunk_size() {
        assert!(matches!(
            TokenChunker::new(6, 6).unwrap_err(),
            Error::Config(_)
        ));
        assert!(matches!(
            TokenChunker::new(6, 10).unwrap_err(),
            Error::Config(_)
        ));
        assert!(TokenChunker::new(6, 0).is_ok());
    }

    #[test]
    fn two_sentence_page_splits_into_two_overlapping_chunks() {
        let tokenizer = WordTokenizer::new();
        let chunker = TokenChunker::new(6, 2).unwrap();
        let pages = vec![page(1, "The sky is blue. Grass is green.")];

        let chunks = chunker.chunk_pages("sky.pdf", &pages, &tokenizer);
        assert_eq!(chunks.len(), 2);

        let first_tokens = tokenizer.encode(&chunks[0].text);
        let second_tokens = tokenizer.encode(&chunks[1].text);
        assert_eq!(first_tokens.len(), 6);
        assert_eq!(chunks[0].token_count, 6);

        // Second chunk starts with the last two tokens of the first
        assert_eq!(second_tokens[..2], first_tokens[4..]);
        assert_eq!(chunks[0].source.label(), "sky.pdf, page 1");
        assert_eq!(chunks[1].source.label(), "sky.pdf, page 1");
        assert_eq!(chunks[0].chunk_index, 0);
        assert_eq!(chunks[1].chunk_index, 1);
    }

    #[test]
    fn windows_reconstruct_the_token_stream_with_overlaps_doubled() {
        let tokenizer = WordTokenizer::new();
        let text = "one two three four five six seven eight nine ten eleven";
        let original = tokenizer.encode(text);

        for (size, overlap) in [(4, 0), (4, 1), (4, 2), (5, 3), (11, 4), (20, 5)] {
            let chunker = TokenChunker::new(size, overlap).unwrap();
            let chunks = chunker.chunk_pages("doc.pdf", &[page(1, text)], &tokenizer);

            // Stitch windows back together, skipping each window's leading
            // overlap; the result must be the original token stream.
            let mut rebuilt = Vec::new();
            for (i, chunk) in chunks.iter().enumerate() {
                let tokens = tokenizer.encode(&chunk.text);
                let skip = if i == 0 { 0 } else { overlap };
                rebuilt.extend_from_slice(&tokens[skip..]);

                // Overlapping region appears at the tail of the previous
                // window and the head of this one.
                if i > 0 {
                    let prev = tokenizer.encode(&chunks[i - 1].text);
                    assert_eq!(prev[prev.len() - overlap..], tokens[..overlap]);
                }
                assert!(chunk.token_count <= size);
            }
            assert_eq!(rebuilt, original, "size={} overlap={}", size, overlap);
        }
    }

    #[test]
    fn chunk_text_is_a_verbatim_slice_of_the_page() {
        let tokenizer = WordTokenizer::new();
        let chunker = TokenChunker::new(6, 2).unwrap();
        let pages = vec![page(1, "The sky is blue. Grass is green.")];

        let chunks = chunker.chunk_pages("sky.pdf", &pages, &tokenizer);
        assert_eq!(chunks[0].text, "The sky is blue. Grass is");
        assert_eq!(chunks[1].text, "Grass is green");
        for chunk in &chunks {
            assert!(pages[0].text.contains(&chunk.text));
        }
    }

    #[test]
    fn empty_page_produces_no_chunks() {
        let tokenizer = WordTokenizer::new();
        let chunker = TokenChunker::new(6, 2).unwrap();
        let pages = vec![page(1, ""), page(2, "some text here")];

        let chunks = chunker.chunk_pages("doc.pdf", &pages, &tokenizer);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].source.page_number, 2);
    }

    #[test]
    fn chunks_never_span_pages() {
        let tokenizer = WordTokenizer::new();
        let chunker = TokenChunker::new(10, 2).unwrap();
        let pages = vec![page(1, "alpha beta gamma"), page(2, "delta epsilon")];

        let chunks = chunker.chunk_pages("doc.pdf", &pages, &tokenizer);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].source.page_number, 1);
        assert_eq!(chunks[1].source.page_number, 2);
        assert_eq!(chunks[0].token_count, 3);
        assert_eq!(chunks[1].token_count, 2);
    }
}
