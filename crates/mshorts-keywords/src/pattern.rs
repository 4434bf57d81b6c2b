//! Pattern-based keyword extraction.

use async_trait::async_trait;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

use mshorts_models::KeywordSet;

use crate::KeywordExtractor;

/// Common function words that make poor search queries.
const STOP_WORDS: &[&str] = &[
    "the", "and", "but", "for", "nor", "not", "are", "was", "were", "been",
    "being", "have", "has", "had", "does", "did", "will", "would", "could",
    "should", "may", "might", "must", "shall", "can", "this", "that", "these",
    "those", "you", "your", "they", "them", "their", "what", "which", "who",
    "where", "when", "why", "how", "all", "each", "every", "both", "few",
    "more", "most", "other", "some", "such", "only", "own", "same", "than",
    "too", "very", "just", "also", "now", "here", "there", "then", "once",
    "with", "from", "into", "onto", "out", "off", "over", "under",
];

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[A-Za-z]{3,}").expect("valid word pattern"))
}

fn stop_words() -> &'static HashSet<&'static str> {
    static WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    WORDS.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

/// Extracts alphabetic runs of length >= 3, lowercased, stop-words removed,
/// deduplicated. This is the fallback strategy and the floor the engine can
/// always stand on: it cannot fail.
#[derive(Debug, Default, Clone)]
pub struct PatternExtractor;

impl PatternExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous extraction used directly by the engine's fallback path.
    pub fn extract_sync(&self, text: &str) -> KeywordSet {
        let words = word_pattern()
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .filter(|w| !stop_words().contains(w.as_str()));
        KeywordSet::from_words(words)
    }
}

#[async_trait]
impl KeywordExtractor for PatternExtractor {
    async fn extract(&self, text: &str) -> KeywordSet {
        self.extract_sync(text)
    }

    fn name(&self) -> &'static str {
        "pattern"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_lowercase_words() {
        let set = PatternExtractor::new().extract_sync("Wake UP! The best Version of you is waiting.");
        assert!(set.contains("wake"));
        assert!(set.contains("best"));
        assert!(set.contains("version"));
        assert!(set.contains("waiting"));
        // "UP", "of", "is" are shorter than 3 chars; "the" and "you" are stop words
        assert!(!set.contains("the"));
        assert!(!set.contains("you"));
    }

    #[test]
    fn test_empty_input_is_fine() {
        let set = PatternExtractor::new().extract_sync("");
        assert!(set.is_empty());
    }

    #[test]
    fn test_non_latin_input_yields_empty_set() {
        let set = PatternExtractor::new().extract_sync("استيقظ الآن");
        assert!(set.is_empty());
    }

    #[test]
    fn test_punctuation_splits_words() {
        let set = PatternExtractor::new().extract_sync("hustle,focus;energy-success");
        assert!(set.contains("hustle"));
        assert!(set.contains("focus"));
        assert!(set.contains("energy"));
        assert!(set.contains("success"));
    }

    #[test]
    fn test_all_keywords_longer_than_two_chars() {
        let set = PatternExtractor::new().extract_sync("go up and win it all, champion");
        for word in set.iter() {
            assert!(word.chars().count() > 2, "short keyword: {}", word);
        }
    }
}
