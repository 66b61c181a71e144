//! Prompt templates for grounded answer generation

use crate::types::RetrievedChunk;

/// Prompt builder for RAG queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the context block: each retrieved chunk enumerated with its
    /// source label.
    pub fn build_context(results: &[RetrievedChunk]) -> String {
        let mut context = String::new();

        for (i, result) in results.iter().enumerate() {
            context.push_str(&format!(
                "[{}] Source: {}\n{}\n\n---\n\n",
                i + 1,
                result.chunk.source.label(),
                result.chunk.text
            ));
        }

        context
    }

    /// Build the full grounded prompt: context-only instructions, the
    /// enumerated chunks, then the user question.
    pub fn build_rag_prompt(question: &str, results: &[RetrievedChunk]) -> String {
        format!(
            r#"You are a document-grounded assistant that ONLY uses information from the provided context.

RULES:
1. Answer using ONLY information stated in the CONTEXT below.
2. If the answer is not in the context, respond with "This information is not available in the provided document."
3. Do NOT use external knowledge or make assumptions beyond what is stated.
4. When a claim comes from a source, mention it, e.g. (report.pdf, page 3).

CONTEXT FROM THE DOCUMENT:
{context}

QUESTION: {question}

Answer using only the document content above:"#,
            context = Self::build_context(results),
            question = question
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Chunk, ChunkSource};

    fn retrieved(text: &str, page: u32, score: f32) -> RetrievedChunk {
        RetrievedChunk {
            chunk: Chunk::new(text.to_string(), ChunkSource::new("doc.pdf", page), 0, 0),
            score,
        }
    }

    #[test]
    fn context_enumerates_chunks_with_source_labels() {
        let results = vec![retrieved("first passage", 1, 0.9), retrieved("second", 2, 0.5)];
        let context = PromptBuilder::build_context(&results);

        assert!(context.contains("[1] Source: doc.pdf, page 1"));
        assert!(context.contains("first passage"));
        assert!(context.contains("[2] Source: doc.pdf, page 2"));
    }

    #[test]
    fn prompt_contains_grounding_rules_context_and_question() {
        let results = vec![retrieved("the sky is blue", 1, 0.9)];
        let prompt = PromptBuilder::build_rag_prompt("What color is the sky?", &results);

        assert!(prompt.contains("ONLY uses information"));
        assert!(prompt.contains("the sky is blue"));
        assert!(prompt.ends_with("Answer using only the document content above:"));
        assert!(prompt.contains("QUESTION: What color is the sky?"));
    }
}
