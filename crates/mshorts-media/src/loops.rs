//! Loop-to-duration: forcing a track of natural duration D to an exact
//! target duration T.
//!
//! The plan is pure and unit-testable: consecutive sub-segments starting at
//! offset 0, each of length `min(D, T - accumulated)`, until the accumulated
//! length reaches T. A short source replays from its start as many whole or
//! partial times as needed; a long source is trimmed to T. The executors
//! realize a plan with one FFmpeg invocation (`-stream_loop` + `-t`).

use std::path::Path;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Segment plan that stretches or trims a source track to an exact duration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopPlan {
    /// Natural duration of the source track.
    pub source_duration: f64,
    /// Requested output duration.
    pub target_duration: f64,
    /// Lengths of the consecutive segments, each starting at offset 0.
    pub segments: Vec<f64>,
}

impl LoopPlan {
    /// Build the plan for a source of duration `source` and target `target`.
    ///
    /// A zero-length (or negative) source can never reach the target and is
    /// rejected up front rather than looping forever.
    pub fn for_duration(source: f64, target: f64) -> MediaResult<Self> {
        if target <= 0.0 || !target.is_finite() {
            return Err(MediaError::InvalidTargetDuration(target));
        }
        if source <= 0.0 || !source.is_finite() {
            return Err(MediaError::EmptySource(Path::new("").to_path_buf()));
        }

        let mut segments = Vec::new();
        let mut accumulated = 0.0;
        while accumulated < target {
            let len = source.min(target - accumulated);
            segments.push(len);
            accumulated += len;
        }

        Ok(Self {
            source_duration: source,
            target_duration: target,
            segments,
        })
    }

    /// Total planned duration (sums to the target).
    pub fn total(&self) -> f64 {
        self.segments.iter().sum()
    }

    /// How many extra replays of the whole source FFmpeg must perform
    /// (`-stream_loop` argument): one fewer than the segment count.
    pub fn extra_repeats(&self) -> u32 {
        (self.segments.len().saturating_sub(1)) as u32
    }
}

/// Loop a video track to the planned duration, dropping any audio streams.
pub async fn loop_video(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    plan: &LoopPlan,
    codec: &str,
    preset: &str,
) -> MediaResult<()> {
    let input = input.as_ref();
    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    let cmd = FfmpegCommand::new(input, output.as_ref())
        .stream_loop(plan.extra_repeats())
        .duration(plan.target_duration)
        .video_codec(codec)
        .preset(preset)
        .no_audio();

    FfmpegRunner::new().run(&cmd).await
}

/// Loop an audio track to the planned duration, encoding to AAC.
pub async fn loop_audio(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    plan: &LoopPlan,
    audio_codec: &str,
) -> MediaResult<()> {
    let input = input.as_ref();
    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    let cmd = FfmpegCommand::new(input, output.as_ref())
        .stream_loop(plan.extra_repeats())
        .duration(plan.target_duration)
        .audio_codec(audio_codec)
        .no_video();

    FfmpegRunner::new().run(&cmd).await
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_short_source_repeats() {
        // 7s source into 60s: 8 whole copies + one 4s partial
        let plan = LoopPlan::for_duration(7.0, 60.0).unwrap();
        assert_eq!(plan.segments.len(), 9);
        assert!((plan.total() - 60.0).abs() < TOLERANCE);
        assert!((plan.segments[8] - 4.0).abs() < TOLERANCE);
        assert_eq!(plan.extra_repeats(), 8);
    }

    #[test]
    fn test_long_source_trims() {
        let plan = LoopPlan::for_duration(90.0, 60.0).unwrap();
        assert_eq!(plan.segments.len(), 1);
        assert!((plan.total() - 60.0).abs() < TOLERANCE);
        assert_eq!(plan.extra_repeats(), 0);
    }

    #[test]
    fn test_exact_source_is_single_segment() {
        let plan = LoopPlan::for_duration(60.0, 60.0).unwrap();
        assert_eq!(plan.segments.len(), 1);
        assert!((plan.total() - 60.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_divisible_source_has_no_partial() {
        let plan = LoopPlan::for_duration(15.0, 60.0).unwrap();
        assert_eq!(plan.segments.len(), 4);
        for seg in &plan.segments {
            assert!((seg - 15.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_total_is_exact_across_durations() {
        for source in [0.3, 1.0, 7.7, 59.9, 60.0, 61.3, 600.0] {
            for target in [1.0, 30.0, 60.0] {
                let plan = LoopPlan::for_duration(source, target).unwrap();
                assert!(
                    (plan.total() - target).abs() < TOLERANCE,
                    "source={} target={}",
                    source,
                    target
                );
                // Partial segment, when present, is shorter than the source
                if let Some(last) = plan.segments.last() {
                    assert!(*last <= source + TOLERANCE);
                }
            }
        }
    }

    #[test]
    fn test_zero_duration_source_is_fatal() {
        let err = LoopPlan::for_duration(0.0, 60.0).unwrap_err();
        assert!(matches!(err, MediaError::EmptySource(_)));
    }

    #[test]
    fn test_negative_source_is_fatal() {
        assert!(LoopPlan::for_duration(-1.0, 60.0).is_err());
    }

    #[test]
    fn test_non_positive_target_is_rejected() {
        let err = LoopPlan::for_duration(10.0, 0.0).unwrap_err();
        assert!(matches!(err, MediaError::InvalidTargetDuration(_)));
    }
}
