//! Sequential text-to-video pipeline for MotiShorts.
//!
//! This crate wires the collaborators together: keyword extraction, stock
//! clip search, speech synthesis, and media assembly, behind one `run()`
//! call that returns a scoped [`RenderHandle`] to the delivered file.

pub mod config;
pub mod error;
pub mod handle;
pub mod pipeline;

pub use config::{PipelineConfig, DEFAULT_FALLBACK_KEYWORDS, DEFAULT_MUSIC_URL};
pub use error::{PipelineError, PipelineResult};
pub use handle::{RenderHandle, DISPLAY_FILE_NAME};
pub use pipeline::Pipeline;
