//! Advisory keyword stage: coarse cable category and ranked domain terms.
//!
//! Two traits define the stage boundary so the orchestrator can take any
//! implementation (the built-in [`KeywordEngine`], or a mock in tests):
//! - CableClassifier: one category label per document
//! - KeywordRanker: ranked terms plus the conductor-type hint
//!
//! Failures here never affect the core specs; the orchestrator downgrades
//! them to a report warning.

pub mod classify;
pub mod ranking;
pub mod stopwords;

use thiserror::Error;

use crate::config::KeywordConfig;
use crate::models::KeywordResult;

pub use classify::UNCATEGORIZED;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum KeywordError {
    #[error("Input too large for keyword stage: {chars} characters (max {max})")]
    InputTooLarge { chars: usize, max: usize },

    #[error("Keyword engine failure: {0}")]
    Engine(String),
}

/// Assigns a coarse cable category to recognized text.
pub trait CableClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<String, KeywordError>;
}

/// Ranks frequent domain terms in recognized text.
pub trait KeywordRanker: Send + Sync {
    fn rank_keywords(&self, text: &str) -> Result<KeywordResult, KeywordError>;
}

/// Built-in weighted-term classifier and frequency ranker.
#[derive(Debug, Clone, Default)]
pub struct KeywordEngine {
    config: KeywordConfig,
}

impl KeywordEngine {
    pub fn new(config: KeywordConfig) -> Self {
        Self { config }
    }

    fn check_size(&self, text: &str) -> Result<(), KeywordError> {
        let chars = text.chars().count();
        if chars > self.config.max_input_chars {
            return Err(KeywordError::InputTooLarge {
                chars,
                max: self.config.max_input_chars,
            });
        }
        Ok(())
    }
}

impl CableClassifier for KeywordEngine {
    fn classify(&self, text: &str) -> Result<String, KeywordError> {
        self.check_size(text)?;
        Ok(classify::classify_text(text, self.config.min_category_score).to_string())
    }
}

impl KeywordRanker for KeywordEngine {
    fn rank_keywords(&self, text: &str) -> Result<KeywordResult, KeywordError> {
        self.check_size(text)?;
        Ok(KeywordResult {
            category: classify::classify_text(text, self.config.min_category_score).to_string(),
            top_terms: ranking::rank_terms(text, self.config.min_term_length, self.config.top_n),
            conductor_type_hint: ranking::conductor_type_hint(text),
        })
    }
}
