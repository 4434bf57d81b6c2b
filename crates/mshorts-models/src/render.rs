//! Render specification for the assembled video.

use serde::{Deserialize, Serialize};

use crate::policy::{MixPolicy, ResizePolicy};

/// Default output length in seconds.
pub const DEFAULT_TARGET_DURATION_SECS: f64 = 60.0;
/// Default output width (9:16 portrait).
pub const DEFAULT_TARGET_WIDTH: u32 = 1080;
/// Default output height (9:16 portrait).
pub const DEFAULT_TARGET_HEIGHT: u32 = 1920;
/// Default background-music amplitude scale.
pub const DEFAULT_MUSIC_VOLUME: f32 = 0.3;

/// Target shape of one assembled video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSpec {
    /// Output duration in seconds.
    #[serde(default = "default_duration")]
    pub target_duration_secs: f64,

    /// Output frame width in pixels.
    #[serde(default = "default_width")]
    pub target_width: u32,

    /// Output frame height in pixels.
    #[serde(default = "default_height")]
    pub target_height: u32,

    /// Background-music amplitude scale (0.0 - 1.0).
    #[serde(default = "default_music_volume")]
    pub music_volume: f32,

    /// How the looped video is fitted to the target frame.
    #[serde(default)]
    pub resize: ResizePolicy,

    /// How speech and music are combined.
    #[serde(default)]
    pub mix: MixPolicy,
}

fn default_duration() -> f64 {
    DEFAULT_TARGET_DURATION_SECS
}
fn default_width() -> u32 {
    DEFAULT_TARGET_WIDTH
}
fn default_height() -> u32 {
    DEFAULT_TARGET_HEIGHT
}
fn default_music_volume() -> f32 {
    DEFAULT_MUSIC_VOLUME
}

impl Default for RenderSpec {
    fn default() -> Self {
        Self {
            target_duration_secs: DEFAULT_TARGET_DURATION_SECS,
            target_width: DEFAULT_TARGET_WIDTH,
            target_height: DEFAULT_TARGET_HEIGHT,
            music_volume: DEFAULT_MUSIC_VOLUME,
            resize: ResizePolicy::default(),
            mix: MixPolicy::default(),
        }
    }
}

impl RenderSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new spec with the music volume clamped to 0.0 - 1.0.
    pub fn with_music_volume(mut self, volume: f32) -> Self {
        self.music_volume = volume.clamp(0.0, 1.0);
        self
    }

    /// Returns a new spec with the given resize policy.
    pub fn with_resize(mut self, resize: ResizePolicy) -> Self {
        self.resize = resize;
        self
    }

    /// Returns a new spec with the given mix policy.
    pub fn with_mix(mut self, mix: MixPolicy) -> Self {
        self.mix = mix;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spec() {
        let spec = RenderSpec::default();
        assert_eq!(spec.target_width, 1080);
        assert_eq!(spec.target_height, 1920);
        assert!((spec.target_duration_secs - 60.0).abs() < f64::EPSILON);
        assert_eq!(spec.resize, ResizePolicy::PreserveAspect);
        assert_eq!(spec.mix, MixPolicy::Overlay);
    }

    #[test]
    fn test_music_volume_clamped() {
        let spec = RenderSpec::new().with_music_volume(2.5);
        assert!((spec.music_volume - 1.0).abs() < f32::EPSILON);
        let spec = RenderSpec::new().with_music_volume(-0.1);
        assert!(spec.music_volume.abs() < f32::EPSILON);
    }
}
