//! Keyword extraction for stock-clip search.
//!
//! Two interchangeable strategies sit behind one interface: a model-backed
//! extractor that asks a local language-model endpoint for content words,
//! and a pattern extractor over alphabetic runs. A capability probe at
//! startup selects the strategy once; extraction itself never fails, it
//! degrades to the pattern strategy on any model error.

mod engine;
mod model;
mod pattern;

use async_trait::async_trait;
use mshorts_models::KeywordSet;

pub use engine::KeywordEngine;
pub use model::{ModelExtractor, DEFAULT_KEYWORD_MODEL};
pub use pattern::PatternExtractor;

/// One keyword extraction strategy.
#[async_trait]
pub trait KeywordExtractor: Send + Sync {
    /// Extract search keywords from free text. Never fails; strategies that
    /// can error internally report that through [`KeywordEngine`] fallback,
    /// not through this interface.
    async fn extract(&self, text: &str) -> KeywordSet;

    /// Strategy name for logging.
    fn name(&self) -> &'static str;
}
