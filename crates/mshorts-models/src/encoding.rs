//! Video encoding configuration.

use serde::{Deserialize, Serialize};

/// Default video codec (H.264)
pub const DEFAULT_VIDEO_CODEC: &str = "libx264";
/// Default audio codec
pub const DEFAULT_AUDIO_CODEC: &str = "aac";
/// Default encoding preset
pub const DEFAULT_PRESET: &str = "fast";
/// Default audio bitrate
pub const DEFAULT_AUDIO_BITRATE: &str = "128k";
/// Default encoder worker threads
pub const DEFAULT_THREADS: u32 = 4;
/// Output frame rate is capped at min(source fps, this ceiling).
pub const DEFAULT_FPS_CEILING: f64 = 30.0;

/// Video encoding configuration for the export step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodingConfig {
    /// Video codec (e.g., "libx264")
    #[serde(default = "default_video_codec")]
    pub codec: String,

    /// Encoding preset (e.g., "fast", "medium", "slow")
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Audio codec
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,

    /// Audio bitrate
    #[serde(default = "default_audio_bitrate")]
    pub audio_bitrate: String,

    /// Encoder worker threads
    #[serde(default = "default_threads")]
    pub threads: u32,

    /// Frame-rate ceiling; the export never exceeds the source rate.
    #[serde(default = "default_fps_ceiling")]
    pub fps_ceiling: f64,
}

fn default_video_codec() -> String {
    DEFAULT_VIDEO_CODEC.to_string()
}
fn default_preset() -> String {
    DEFAULT_PRESET.to_string()
}
fn default_audio_codec() -> String {
    DEFAULT_AUDIO_CODEC.to_string()
}
fn default_audio_bitrate() -> String {
    DEFAULT_AUDIO_BITRATE.to_string()
}
fn default_threads() -> u32 {
    DEFAULT_THREADS
}
fn default_fps_ceiling() -> f64 {
    DEFAULT_FPS_CEILING
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            codec: DEFAULT_VIDEO_CODEC.to_string(),
            preset: DEFAULT_PRESET.to_string(),
            audio_codec: DEFAULT_AUDIO_CODEC.to_string(),
            audio_bitrate: DEFAULT_AUDIO_BITRATE.to_string(),
            threads: DEFAULT_THREADS,
            fps_ceiling: DEFAULT_FPS_CEILING,
        }
    }
}

impl EncodingConfig {
    /// Create a new encoding configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the output frame rate at the lesser of the source rate and the
    /// configured ceiling.
    pub fn output_fps(&self, source_fps: f64) -> f64 {
        source_fps.min(self.fps_ceiling)
    }

    /// Convert to FFmpeg output arguments for the export step.
    pub fn to_ffmpeg_args(&self, source_fps: f64) -> Vec<String> {
        vec![
            "-c:v".to_string(),
            self.codec.clone(),
            "-preset".to_string(),
            self.preset.clone(),
            "-c:a".to_string(),
            self.audio_codec.clone(),
            "-b:a".to_string(),
            self.audio_bitrate.clone(),
            "-r".to_string(),
            format!("{:.3}", self.output_fps(source_fps)),
            "-threads".to_string(),
            self.threads.to_string(),
        ]
    }
}
