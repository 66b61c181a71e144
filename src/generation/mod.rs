//! Answer generation: prompt construction, LLM invocation, source matching

mod generator;
mod matcher;
mod prompt;

pub use generator::AnswerGenerator;
pub use matcher::SourceMatcher;
pub use prompt::PromptBuilder;
