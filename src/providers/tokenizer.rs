//! Tokenizer trait for chunk sizing and boundary slicing

use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

/// Trait for converting text to token sequences and back.
///
/// Chunk boundaries are computed over the token stream, so encode/decode must
/// be deterministic and consistent between ingestion and queries.
pub trait TokenizerProvider: Send + Sync {
    /// Split text into tokens
    fn encode(&self, text: &str) -> Vec<String>;

    /// Byte range of each token within `text`, in token order.
    ///
    /// Chunk text is sliced from the source with these ranges, so anything
    /// between two tokens of the same chunk (punctuation, whitespace) is
    /// carried through verbatim.
    fn spans(&self, text: &str) -> Vec<Range<usize>>;

    /// Reassemble tokens into text
    fn decode(&self, tokens: &[String]) -> String;

    /// Count tokens in text
    fn count_tokens(&self, text: &str) -> usize {
        self.encode(text).len()
    }

    /// Get tokenizer name for logging
    fn name(&self) -> &str;
}

/// Word-level tokenizer based on Unicode word segmentation.
///
/// Punctuation is not a token and never counts toward a chunk budget, but it
/// survives in chunk text because chunks are sliced by token spans.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    /// Create a new word tokenizer
    pub fn new() -> Self {
        Self
    }
}

impl TokenizerProvider for WordTokenizer {
    fn encode(&self, text: &str) -> Vec<String> {
        text.unicode_words().map(str::to_string).collect()
    }

    fn spans(&self, text: &str) -> Vec<Range<usize>> {
        text.unicode_word_indices()
            .map(|(start, word)| start..start + word.len())
            .collect()
    }

    fn decode(&self, tokens: &[String]) -> String {
        tokens.join(" ")
    }

    fn name(&self) -> &str {
        "unicode-words"
    }
}
