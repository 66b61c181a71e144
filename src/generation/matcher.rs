//! Matching a generated answer back to its supporting source chunks

use std::collections::BTreeSet;

use unicode_segmentation::UnicodeSegmentation;

use crate::types::{MatchedChunk, RetrievedChunk};

/// Words too common to signal that a chunk contributed to an answer
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "was", "were", "has", "have", "had", "not", "but", "this", "that",
    "these", "those", "with", "from", "you", "your", "its", "it's", "can", "will", "would",
    "about", "into", "than", "then", "they", "their", "there", "which", "what", "when", "who",
    "how", "why", "does", "did", "also", "been", "being", "such", "may", "more", "most", "other",
    "some", "any", "all", "one", "two", "per", "via", "use", "used", "using",
];

/// Decides which retrieved chunks materially contributed to an answer.
///
/// The policy is a deterministic keyword-overlap heuristic: a chunk matches
/// when at least `min_overlap` of its distinct significant terms appear in
/// the answer. Approximate by design; output is used for citation only.
pub struct SourceMatcher {
    min_overlap: usize,
}

impl Default for SourceMatcher {
    fn default() -> Self {
        Self { min_overlap: 2 }
    }
}

impl SourceMatcher {
    /// Create a matcher requiring `min_overlap` shared terms per chunk
    pub fn new(min_overlap: usize) -> Self {
        Self {
            min_overlap: min_overlap.max(1),
        }
    }

    /// Return the chunks that support the answer, preserving retrieval rank
    /// order. An answer overlapping no chunk yields an empty vec.
    pub fn matching_chunks(
        &self,
        answer: &str,
        retrieved: &[RetrievedChunk],
    ) -> Vec<MatchedChunk> {
        let answer_terms = significant_terms(answer);
        if answer_terms.is_empty() {
            return Vec::new();
        }

        retrieved
            .iter()
            .filter_map(|result| {
                let chunk_terms = significant_terms(&result.chunk.text);
                let shared: Vec<&str> = chunk_terms
                    .intersection(&answer_terms)
                    .map(String::as_str)
                    .collect();

                if shared.len() >= self.min_overlap {
                    Some(MatchedChunk {
                        source: result.chunk.source.label(),
                        text: result.chunk.text.clone(),
                        highlighted: highlight_terms(&result.chunk.text, &shared),
                    })
                } else {
                    None
                }
            })
            .collect()
    }
}

/// Distinct lowercase terms worth matching on: at least three characters,
/// not a stopword. A `BTreeSet` keeps iteration order deterministic.
fn significant_terms(text: &str) -> BTreeSet<String> {
    text.unicode_words()
        .map(str::to_lowercase)
        .filter(|w| w.len() >= 3 && !STOPWORDS.contains(&w.as_str()))
        .collect()
}

/// Wrap each term in `<mark>` tags, case-insensitively, preserving the
/// original casing of the text.
fn highlight_terms(text: &str, terms: &[&str]) -> String {
    let mut highlighted = text.to_string();
    for term in terms {
        let re = regex::RegexBuilder::new(&format!(r"\b{}\b", regex::escape(term)))
            .case_insensitive(true)
            .build();
        if let Ok(re) = re {
            highlighted = re
                .replace_all(&highlighted, |caps: &regex::Captures| {
                    format!("<mark>{}</mark>", &caps[0])
                })
                .to_string();
        }
    }
    highlighted
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
    fn chunks_sharing_terms_with_the_answer_match() {
        let matcher = SourceMatcher::default();
        let retrieved = vec![
            retrieved("The sky appears blue because of Rayleigh scattering", 1, 0.9),
            retrieved("Grass is green due to chlorophyll", 2, 0.4),
        ];

        let matched =
            matcher.matching_chunks("The sky is blue because of Rayleigh scattering.", &retrieved);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].source, "doc.pdf, page 1");
        assert!(matched[0].highlighted.contains("<mark>sky</mark>"));
        assert!(matched[0].highlighted.contains("<mark>Rayleigh</mark>"));
    }

    #[test]
    fn zero_overlap_answer_matches_nothing() {
        let matcher = SourceMatcher::default();
        let retrieved = vec![retrieved("The sky appears blue at noon", 1, 0.9)];

        let matched = matcher.matching_chunks(
            "Photosynthesis converts carbon dioxide using chlorophyll.",
            &retrieved,
        );
        assert!(matched.is_empty());
    }

    #[test]
    fn rank_order_is_preserved() {
        let matcher = SourceMatcher::new(1);
        let retrieved = vec![
            retrieved("glaciers retreat as temperatures rise", 3, 0.8),
            retrieved("ocean temperatures also rise", 1, 0.6),
        ];

        let matched = matcher.matching_chunks("Temperatures rise across glaciers and oceans", &retrieved);
        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].source, "doc.pdf, page 3");
        assert_eq!(matched[1].source, "doc.pdf, page 1");
    }

    #[test]
    fn matching_is_deterministic() {
        let matcher = SourceMatcher::default();
        let retrieved = vec![retrieved("solar panels convert sunlight into electricity", 1, 0.9)];
        let answer = "Solar panels convert sunlight into electricity.";

        let first = matcher.matching_chunks(answer, &retrieved);
        let second = matcher.matching_chunks(answer, &retrieved);
        assert_eq!(first.len(), second.len());
        assert_eq!(first[0].highlighted, second[0].highlighted);
    }

    #[test]
    fn highlight_preserves_original_casing() {
        let highlighted = highlight_terms("Rayleigh scattering", &["rayleigh"]);
        assert_eq!(highlighted, "<mark>Rayleigh</mark> scattering");
    }
}
