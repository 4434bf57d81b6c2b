//! Strategy selection for keyword extraction.

use tracing::info;

use mshorts_models::KeywordSet;

use crate::model::ModelExtractor;
use crate::pattern::PatternExtractor;
use crate::KeywordExtractor;

/// Holds the strategy selected at startup.
///
/// The capability check runs once, when the engine is built; the chosen
/// strategy stays installed for the process lifetime. Extraction never
/// fails: model errors degrade to the pattern strategy per call.
pub struct KeywordEngine {
    model: Option<ModelExtractor>,
    pattern: PatternExtractor,
}

impl KeywordEngine {
    /// Probe the model endpoint once and install the matching strategy.
    pub async fn detect(model_url: Option<&str>) -> Self {
        let model = match model_url {
            Some(url) if ModelExtractor::probe(url).await => {
                info!(url = %url, "Keyword model endpoint available");
                Some(ModelExtractor::new(url))
            }
            Some(url) => {
                info!(url = %url, "Keyword model endpoint unavailable, using pattern extraction");
                None
            }
            None => None,
        };

        Self {
            model,
            pattern: PatternExtractor::new(),
        }
    }

    /// An engine that only ever uses the pattern strategy.
    pub fn pattern_only() -> Self {
        Self {
            model: None,
            pattern: PatternExtractor::new(),
        }
    }

    /// Extract keywords from `text`. Never fails.
    pub async fn extract(&self, text: &str) -> KeywordSet {
        match &self.model {
            Some(model) => model.extract(text).await,
            None => self.pattern.extract_sync(text),
        }
    }

    /// Name of the installed strategy.
    pub fn strategy(&self) -> &'static str {
        match &self.model {
            Some(model) => model.name(),
            None => self.pattern.name(),
        }
    }
}
