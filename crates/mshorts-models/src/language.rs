//! Speech language tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language tag passed to the speech synthesizer.
///
/// Detection is purely script-based: any codepoint outside the ASCII range
/// selects Arabic, otherwise English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// Latin-script text.
    En,
    /// Non-Latin (Arabic) text.
    Ar,
}

impl Language {
    /// Detect the language of `text` from its script.
    pub fn detect(text: &str) -> Self {
        if text.chars().any(|c| !c.is_ascii()) {
            Language::Ar
        } else {
            Language::En
        }
    }

    /// The tag sent to the synthesis service.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_text_is_english() {
        assert_eq!(Language::detect("Wake up. The best version of you is waiting."), Language::En);
        assert_eq!(Language::detect(""), Language::En);
    }

    #[test]
    fn test_non_ascii_text_is_arabic() {
        assert_eq!(Language::detect("استيقظ! النسخة الأفضل منك تنتظرك"), Language::Ar);
        // A single non-ASCII character anywhere flips the detection.
        assert_eq!(Language::detect("wake up é"), Language::Ar);
    }

    #[test]
    fn test_tag() {
        assert_eq!(Language::En.tag(), "en");
        assert_eq!(Language::Ar.tag(), "ar");
    }
}
