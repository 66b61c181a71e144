//! LLM-backed answer generation with source matching

use std::sync::Arc;
use std::time::Instant;

use crate::error::{Error, Result};
use crate::providers::LlmProvider;
use crate::types::{QueryResponse, RetrievedChunk};

use super::matcher::SourceMatcher;
use super::prompt::PromptBuilder;

/// Generates grounded answers from retrieved chunks.
///
/// No retry on LLM failure; callers that need resilience wrap this with
/// their own retry or backoff.
pub struct AnswerGenerator {
    llm: Arc<dyn LlmProvider>,
    matcher: SourceMatcher,
}

impl AnswerGenerator {
    /// Create a new generator with the default source matcher
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            llm,
            matcher: SourceMatcher::default(),
        }
    }

    /// Override the source matching policy
    pub fn with_matcher(mut self, matcher: SourceMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Build the grounded prompt and invoke the language model
    pub async fn answer(&self, question: &str, retrieved: &[RetrievedChunk]) -> Result<String> {
        let prompt = PromptBuilder::build_rag_prompt(question, retrieved);
        self.llm
            .generate(&prompt)
            .await
            .map_err(|e| match e {
                e @ Error::Generation(_) => e,
                other => Error::Generation(other.to_string()),
            })
    }

    /// Generate an answer and match it back to its supporting chunks
    pub async fn respond(
        &self,
        question: &str,
        retrieved: &[RetrievedChunk],
    ) -> Result<QueryResponse> {
        let start = Instant::now();

        let answer = self.answer(question, retrieved).await?;
        let matched_chunks = self.matcher.matching_chunks(&answer, retrieved);

        let processing_time_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(
            model = %self.llm.model(),
            matched = matched_chunks.len(),
            elapsed_ms = processing_time_ms,
            "answer generated"
        );

        Ok(QueryResponse {
            answer,
            matched_chunks,
            chunks_retrieved: retrieved.len(),
            processing_time_ms,
        })
    }
}
