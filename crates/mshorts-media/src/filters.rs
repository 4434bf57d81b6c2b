//! FFmpeg filter builders for resizing and audio mixing.

use mshorts_models::{MixPolicy, ResizePolicy};

/// Build the scale filter for a resize policy.
///
/// `PreserveAspect` pins the target height and lets the width follow the
/// source aspect ratio (-2 keeps it even for the encoder); `Stretch` forces
/// both dimensions.
pub fn resize_filter(policy: ResizePolicy, width: u32, height: u32) -> String {
    match policy {
        ResizePolicy::PreserveAspect => format!("scale=-2:{}", height),
        ResizePolicy::Stretch => format!("scale={}:{}", width, height),
    }
}

/// Build the filter_complex for combining looped speech (input 0) with the
/// looped, volume-scaled music track (input 1). The mixed stream is labelled
/// `[mix]` for mapping.
pub fn mix_filter(policy: MixPolicy, music_volume: f32) -> String {
    match policy {
        MixPolicy::Overlay => format!(
            "[1:a]volume={:.2}[music];[0:a][music]amix=inputs=2:duration=first:dropout_transition=0[mix]",
            music_volume
        ),
        MixPolicy::Sequential => format!(
            "[1:a]volume={:.2}[music];[music][0:a]concat=n=2:v=0:a=1[mix]",
            music_volume
        ),
    }
}

/// Stream label produced by [`mix_filter`].
pub const MIX_OUTPUT_LABEL: &str = "[mix]";
