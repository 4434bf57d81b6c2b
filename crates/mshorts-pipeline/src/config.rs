//! Pipeline configuration from environment variables.

use std::path::PathBuf;

use mshorts_models::{EncodingConfig, MixPolicy, RenderSpec, ResizePolicy};
use mshorts_search::DEFAULT_SEARCH_BASE_URL;
use mshorts_speech::DEFAULT_SPEECH_BASE_URL;

use crate::error::{PipelineError, PipelineResult};

/// Default background music track, downloaded once per run.
pub const DEFAULT_MUSIC_URL: &str =
    "https://cdn.pixabay.com/audio/2021/09/09/audio_22d566ebf6.mp3";

/// Backup queries used when text-derived keywords yield no search match.
pub const DEFAULT_FALLBACK_KEYWORDS: &[&str] = &[
    "motivation",
    "success",
    "workout",
    "inspiration",
    "hustle",
    "focus",
    "energy",
];

/// Default work directory for temp and output files.
const DEFAULT_WORK_DIR: &str = "/tmp/mshorts";

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Search API key (secret). Required; absence is fatal at startup.
    pub api_key: String,
    /// Stock video search API base URL.
    pub search_base_url: String,
    /// Text-to-speech endpoint base URL.
    pub speech_base_url: String,
    /// Local keyword-model endpoint; `None` installs the pattern extractor.
    pub keyword_model_url: Option<String>,
    /// Background music URL; `None` disables music entirely.
    pub music_url: Option<String>,
    /// Backup search queries.
    pub fallback_keywords: Vec<String>,
    /// Directory for temp and output files.
    pub work_dir: PathBuf,
    /// Target shape of the assembled video.
    pub render: RenderSpec,
    /// Export encoding settings.
    pub encoding: EncodingConfig,
}

impl PipelineConfig {
    /// Create config from environment variables.
    ///
    /// `PEXELS_API_KEY` is the one required secret; everything else has a
    /// default.
    pub fn from_env() -> PipelineResult<Self> {
        let api_key = std::env::var("PEXELS_API_KEY").map_err(|_| {
            PipelineError::configuration(
                "PEXELS_API_KEY is not set; a stock video search key is required",
            )
        })?;
        if api_key.trim().is_empty() {
            return Err(PipelineError::configuration("PEXELS_API_KEY is empty"));
        }

        let render = RenderSpec {
            target_duration_secs: env_parse("TARGET_DURATION_SECS", 60.0),
            target_width: env_parse("TARGET_WIDTH", 1080),
            target_height: env_parse("TARGET_HEIGHT", 1920),
            music_volume: 0.0,
            resize: env_parse("RESIZE_POLICY", ResizePolicy::default()),
            mix: env_parse("MIX_POLICY", MixPolicy::default()),
        }
        .with_music_volume(env_parse("MUSIC_VOLUME", 0.3));

        Ok(Self {
            api_key,
            search_base_url: env_or("SEARCH_BASE_URL", DEFAULT_SEARCH_BASE_URL),
            speech_base_url: env_or("SPEECH_BASE_URL", DEFAULT_SPEECH_BASE_URL),
            keyword_model_url: std::env::var("KEYWORD_MODEL_URL")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            music_url: match std::env::var("MUSIC_URL") {
                Ok(url) if url.trim().is_empty() => None,
                Ok(url) => Some(url),
                Err(_) => Some(DEFAULT_MUSIC_URL.to_string()),
            },
            fallback_keywords: match std::env::var("FALLBACK_KEYWORDS") {
                Ok(list) => list
                    .split(',')
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect(),
                Err(_) => DEFAULT_FALLBACK_KEYWORDS
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
            work_dir: PathBuf::from(env_or("WORK_DIR", DEFAULT_WORK_DIR)),
            render,
            encoding: EncodingConfig::default(),
        })
    }

    /// A config for tests and embedding: required key plus defaults.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            speech_base_url: DEFAULT_SPEECH_BASE_URL.to_string(),
            keyword_model_url: None,
            music_url: Some(DEFAULT_MUSIC_URL.to_string()),
            fallback_keywords: DEFAULT_FALLBACK_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            work_dir: PathBuf::from(DEFAULT_WORK_DIR),
            render: RenderSpec::default(),
            encoding: EncodingConfig::default(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment-variable manipulation happens in a single test to keep
    // parallel test runs from racing on process-global state.
    #[test]
    fn test_from_env_requires_api_key() {
        std::env::remove_var("PEXELS_API_KEY");
        let err = PipelineConfig::from_env().unwrap_err();
        assert!(matches!(err, PipelineError::Configuration(_)));

        std::env::set_var("PEXELS_API_KEY", "test-key");
        let config = PipelineConfig::from_env().unwrap();
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.music_url.as_deref(), Some(DEFAULT_MUSIC_URL));
        assert_eq!(config.fallback_keywords.len(), 7);
        std::env::remove_var("PEXELS_API_KEY");
    }

    #[test]
    fn test_with_api_key_defaults() {
        let config = PipelineConfig::with_api_key("k");
        assert_eq!(config.render.target_width, 1080);
        assert_eq!(config.render.target_height, 1920);
        assert!((config.render.music_volume - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.fallback_keywords[0], "motivation");
    }
}
