//! Pipeline error hierarchy.
//!
//! Callers distinguish terminal conditions (search exhausted) from transport
//! failures and from assembly failures; cleanup problems are never errors.

use thiserror::Error;

use mshorts_media::MediaError;
use mshorts_search::SearchError;
use mshorts_speech::SpeechError;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors surfaced by one pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Missing or invalid configuration (e.g. the search API key). Fatal at
    /// startup, before any run can begin.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The caller submitted unusable input (e.g. blank text).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No search candidate (keywords plus fallbacks) yielded a usable
    /// portrait clip. Terminal and user-visible; re-triggering with the same
    /// text will not help.
    #[error("No suitable video found for any keyword")]
    SearchExhausted,

    /// A network call outside the multi-candidate search failed or timed
    /// out. Fatal for this run; a later run may succeed.
    #[error("Network failure: {0}")]
    Transport(String),

    /// Loop/resize/mix/mux/export failed. Fatal for this run; every partial
    /// artifact has already been cleaned up.
    #[error("Assembly failed: {0}")]
    Assembly(String),
}

impl PipelineError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Terminal errors cannot succeed on manual re-trigger with the same
    /// input; transport errors might.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PipelineError::Configuration(_)
                | PipelineError::InvalidInput(_)
                | PipelineError::SearchExhausted
        )
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, PipelineError::Transport(_))
    }
}

impl From<SearchError> for PipelineError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::Exhausted => PipelineError::SearchExhausted,
            SearchError::Transport(msg) => PipelineError::Transport(msg),
            SearchError::MalformedResponse(msg) => PipelineError::Transport(msg),
        }
    }
}

impl From<SpeechError> for PipelineError {
    fn from(e: SpeechError) -> Self {
        match e {
            SpeechError::Transport(msg) => PipelineError::Transport(msg),
            SpeechError::EmptyAudio => PipelineError::Transport(e.to_string()),
            SpeechError::Io(io) => PipelineError::Assembly(io.to_string()),
        }
    }
}

impl From<MediaError> for PipelineError {
    fn from(e: MediaError) -> Self {
        match e {
            MediaError::DownloadFailed { .. } | MediaError::Timeout(_) => {
                PipelineError::Transport(e.to_string())
            }
            other => PipelineError::Assembly(other.to_string()),
        }
    }
}
