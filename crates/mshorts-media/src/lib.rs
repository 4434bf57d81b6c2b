#![deny(unreachable_patterns)]
//! FFmpeg CLI wrapper and media assembly for MotiShorts.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building with progress parsing
//! - FFprobe wrappers for video and audio tracks
//! - Streaming HTTP downloads for source clips and music
//! - Loop-to-duration planning and execution
//! - The media assembler (loop, resize, mix, mux, export)
//! - Best-effort temp-file cleanup

pub mod assemble;
pub mod command;
pub mod download;
pub mod error;
pub mod filters;
pub mod janitor;
pub mod loops;
pub mod probe;
pub mod progress;

pub use assemble::{AssembledVideo, MediaAssembler};
pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use download::download_file;
pub use error::{MediaError, MediaResult};
pub use janitor::TempFileJanitor;
pub use loops::LoopPlan;
pub use probe::{probe_audio_duration, probe_video, VideoInfo};
pub use progress::FfmpegProgress;
