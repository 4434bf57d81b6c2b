//! Keyword sets derived from input text.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An unordered set of lowercase search keywords, each longer than 2 chars.
///
/// The set itself carries no ordering invariant; search attempt order is
/// produced by [`KeywordSet::search_candidates`], which appends the configured
/// fallback keywords after the extracted ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordSet(HashSet<String>);

impl KeywordSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from candidate words, enforcing the keyword invariants:
    /// lowercase, length > 2, deduplicated. Words that don't qualify are
    /// silently dropped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .filter(|w| w.chars().count() > 2)
            .collect();
        Self(set)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Ordered search candidates: the extracted keywords (set iteration
    /// order), then the fallback list, skipping fallbacks already present.
    pub fn search_candidates(&self, fallbacks: &[String]) -> Vec<String> {
        let mut candidates: Vec<String> = self.0.iter().cloned().collect();
        for fallback in fallbacks {
            let fallback = fallback.to_lowercase();
            if !self.0.contains(&fallback) {
                candidates.push(fallback);
            }
        }
        candidates
    }
}
