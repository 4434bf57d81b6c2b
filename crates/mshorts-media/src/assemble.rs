//! Media assembly: source clip + speech + optional music into one
//! fixed-duration portrait video.
//!
//! The pipeline is a sequence of FFmpeg invocations over uuid-named temp
//! files: download, loop each track to the target duration, resize the video,
//! mix the audio per policy, then mux and export in one encode pass. Any
//! failure aborts the remainder and sweeps every file created so far,
//! including a partially written export; no partial video is ever returned.

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use mshorts_models::{EncodingConfig, MixPolicy, RenderSpec, RunId};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::download::download_file;
use crate::error::{MediaError, MediaResult};
use crate::filters::{mix_filter, resize_filter, MIX_OUTPUT_LABEL};
use crate::janitor::TempFileJanitor;
use crate::loops::{loop_audio, loop_video, LoopPlan};
use crate::probe::{probe_audio_duration, probe_video};

/// The final output file of one run.
#[derive(Debug, Clone)]
pub struct AssembledVideo {
    /// Path of the exported file; the only artifact that survives the run.
    pub path: PathBuf,
    /// Measured duration in seconds.
    pub duration: f64,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frame rate.
    pub fps: f64,
}

/// Assembles source media into the target short-form video.
pub struct MediaAssembler {
    client: reqwest::Client,
    spec: RenderSpec,
    encoding: EncodingConfig,
    work_dir: PathBuf,
}

impl MediaAssembler {
    /// Create an assembler writing its temp and output files under `work_dir`.
    pub fn new(spec: RenderSpec, encoding: EncodingConfig, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            client: reqwest::Client::new(),
            spec,
            encoding,
            work_dir: work_dir.into(),
        }
    }

    /// The render spec this assembler targets.
    pub fn spec(&self) -> &RenderSpec {
        &self.spec
    }

    /// Produce the assembled video for one run.
    ///
    /// `speech_path` is consumed: it is removed with the other intermediates
    /// once the run finishes, on success and on failure alike.
    pub async fn assemble(
        &self,
        run_id: &RunId,
        video_url: &str,
        speech_path: &Path,
        music_url: Option<&str>,
    ) -> MediaResult<AssembledVideo> {
        tokio::fs::create_dir_all(&self.work_dir).await?;

        let output = self.work_dir.join(format!("shorts_{}.mp4", run_id));
        let mut janitor = TempFileJanitor::new();
        janitor.track(speech_path);

        match self
            .assemble_inner(run_id, video_url, speech_path, music_url, &output, &mut janitor)
            .await
        {
            Ok(assembled) => {
                janitor.sweep().await;
                Ok(assembled)
            }
            Err(e) => {
                // Failure path also removes the partially written export
                janitor.track(&output);
                janitor.sweep().await;
                Err(e)
            }
        }
    }

    async fn assemble_inner(
        &self,
        run_id: &RunId,
        video_url: &str,
        speech_path: &Path,
        music_url: Option<&str>,
        output: &Path,
        janitor: &mut TempFileJanitor,
    ) -> MediaResult<AssembledVideo> {
        let target = self.spec.target_duration_secs;

        // Step 1: download the source clip; failure here is fatal.
        info!(run_id = %run_id, "Downloading source clip");
        let video_file = self.work_dir.join(format!("video_{}.mp4", run_id));
        janitor.track(&video_file);
        download_file(&self.client, video_url, &video_file).await?;

        // Music download failure degrades to a speech-only mix.
        let music_file = match music_url {
            Some(url) => {
                info!(run_id = %run_id, "Downloading background music");
                let path = self.work_dir.join(format!("music_{}.mp3", run_id));
                janitor.track(&path);
                match download_file(&self.client, url, &path).await {
                    Ok(()) => Some(path),
                    Err(e) => {
                        warn!(run_id = %run_id, error = %e, "Music download failed, continuing without music");
                        None
                    }
                }
            }
            None => None,
        };

        let source = probe_video(&video_file).await?;
        if source.duration <= 0.0 {
            return Err(MediaError::EmptySource(video_file.clone()));
        }
        info!(
            run_id = %run_id,
            duration = source.duration,
            width = source.width,
            height = source.height,
            fps = source.fps,
            "Probed source clip"
        );

        // Sequential mixing splits the timeline between music and speech;
        // overlay plays both for the full duration.
        let (speech_target, music_target) = match (self.spec.mix, &music_file) {
            (MixPolicy::Sequential, Some(_)) => (target - target / 2.0, target / 2.0),
            _ => (target, target),
        };

        // Step 2: loop every track to its target length.
        info!(run_id = %run_id, "Looping tracks to {:.1}s", target);
        let video_plan = LoopPlan::for_duration(source.duration, target)?;
        let looped_video = self.work_dir.join(format!("video_loop_{}.mp4", run_id));
        janitor.track(&looped_video);
        loop_video(
            &video_file,
            &looped_video,
            &video_plan,
            &self.encoding.codec,
            &self.encoding.preset,
        )
        .await?;

        let speech_duration = probe_audio_duration(speech_path).await?;
        if speech_duration <= 0.0 {
            return Err(MediaError::EmptySource(speech_path.to_path_buf()));
        }
        let speech_plan = LoopPlan::for_duration(speech_duration, speech_target)?;
        let looped_speech = self.work_dir.join(format!("speech_loop_{}.m4a", run_id));
        janitor.track(&looped_speech);
        loop_audio(speech_path, &looped_speech, &speech_plan, &self.encoding.audio_codec).await?;

        let looped_music = match &music_file {
            Some(path) => {
                let music_duration = probe_audio_duration(path).await?;
                if music_duration <= 0.0 {
                    return Err(MediaError::EmptySource(path.clone()));
                }
                let music_plan = LoopPlan::for_duration(music_duration, music_target)?;
                let looped = self.work_dir.join(format!("music_loop_{}.m4a", run_id));
                janitor.track(&looped);
                loop_audio(path, &looped, &music_plan, &self.encoding.audio_codec).await?;
                Some(looped)
            }
            None => None,
        };

        // Step 3: resize per policy.
        info!(run_id = %run_id, policy = %self.spec.resize, "Resizing video");
        let sized_video = self.work_dir.join(format!("video_sized_{}.mp4", run_id));
        janitor.track(&sized_video);
        let resize_cmd = FfmpegCommand::new(&looped_video, &sized_video)
            .video_filter(resize_filter(
                self.spec.resize,
                self.spec.target_width,
                self.spec.target_height,
            ))
            .video_codec(&self.encoding.codec)
            .preset(&self.encoding.preset)
            .no_audio();
        FfmpegRunner::new().run(&resize_cmd).await?;

        // Step 4: mix speech with music per policy, or pass speech through.
        let mixed_audio = match &looped_music {
            Some(music) => {
                info!(run_id = %run_id, policy = %self.spec.mix, "Mixing speech and music");
                let mixed = self.work_dir.join(format!("audio_{}.m4a", run_id));
                janitor.track(&mixed);
                let mix_cmd = FfmpegCommand::new(&looped_speech, &mixed)
                    .extra_input(music)
                    .filter_complex(mix_filter(self.spec.mix, self.spec.music_volume))
                    .map(MIX_OUTPUT_LABEL)
                    .audio_codec(&self.encoding.audio_codec);
                FfmpegRunner::new().run(&mix_cmd).await?;
                mixed
            }
            None => looped_speech.clone(),
        };

        // Step 5: mux audio into video and export in one encode pass.
        info!(run_id = %run_id, output = %output.display(), "Exporting final video");
        let export_cmd = FfmpegCommand::new(&sized_video, output)
            .extra_input(&mixed_audio)
            .map("0:v")
            .map("1:a")
            .output_args(self.encoding.to_ffmpeg_args(source.fps))
            .duration(target);
        FfmpegRunner::new().run(&export_cmd).await?;

        let exported = probe_video(output).await?;
        info!(
            run_id = %run_id,
            duration = exported.duration,
            width = exported.width,
            height = exported.height,
            "Assembly complete"
        );

        Ok(AssembledVideo {
            path: output.to_path_buf(),
            duration: exported.duration,
            width: exported.width,
            height: exported.height,
            fps: exported.fps,
        })
    }
}
