//! The sequential text-to-video pipeline.

use tracing::info;

use mshorts_keywords::KeywordEngine;
use mshorts_media::MediaAssembler;
use mshorts_models::RunId;
use mshorts_search::StockClient;
use mshorts_speech::SpeechClient;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::handle::RenderHandle;

/// Drives one text input through extract -> locate -> synthesize -> assemble.
///
/// Every stage blocks until complete; a failure at any stage aborts the rest
/// of the run. Construction performs the startup work: the configuration
/// must already carry the API key, and the keyword capability probe runs
/// once here.
pub struct Pipeline {
    config: PipelineConfig,
    keywords: KeywordEngine,
    search: StockClient,
    speech: SpeechClient,
    assembler: MediaAssembler,
}

impl Pipeline {
    /// Build a pipeline from environment configuration.
    pub async fn from_env() -> PipelineResult<Self> {
        let config = PipelineConfig::from_env()?;
        Ok(Self::new(config).await)
    }

    /// Build a pipeline from an explicit configuration.
    pub async fn new(config: PipelineConfig) -> Self {
        let keywords = KeywordEngine::detect(config.keyword_model_url.as_deref()).await;
        info!(strategy = keywords.strategy(), "Keyword extraction ready");

        let search = StockClient::new(&config.api_key, &config.search_base_url);
        let speech = SpeechClient::new(&config.speech_base_url);
        let assembler = MediaAssembler::new(
            config.render.clone(),
            config.encoding.clone(),
            &config.work_dir,
        );

        Self {
            config,
            keywords,
            search,
            speech,
            assembler,
        }
    }

    /// The configuration this pipeline runs with.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full pipeline for one input text.
    pub async fn run(&self, text: &str) -> PipelineResult<RenderHandle> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PipelineError::invalid_input("text must not be blank"));
        }

        let run_id = RunId::new();
        info!(run_id = %run_id, "Pipeline run started");

        // Keyword extraction never fails; an empty set simply leaves only
        // the fallback candidates.
        let keywords = self.keywords.extract(text).await;
        info!(run_id = %run_id, count = keywords.len(), "Extracted keywords");

        let candidates = keywords.search_candidates(&self.config.fallback_keywords);
        let located = self.search.locate_portrait_clip(&candidates).await?;
        info!(run_id = %run_id, query = %located.query, "Located stock clip");

        tokio::fs::create_dir_all(&self.config.work_dir)
            .await
            .map_err(|e| PipelineError::Assembly(e.to_string()))?;
        let speech_path = self.config.work_dir.join(format!("speech_{}.mp3", run_id));
        let language = match self.speech.synthesize(text, &speech_path).await {
            Ok(language) => language,
            Err(e) => {
                // A partial speech file must not outlive the failed run
                let _ = tokio::fs::remove_file(&speech_path).await;
                return Err(e.into());
            }
        };
        info!(run_id = %run_id, language = %language, "Synthesized speech");

        let assembled = self
            .assembler
            .assemble(
                &run_id,
                &located.url,
                &speech_path,
                self.config.music_url.as_deref(),
            )
            .await?;
        info!(
            run_id = %run_id,
            output = %assembled.path.display(),
            duration = assembled.duration,
            "Pipeline run complete"
        );

        Ok(RenderHandle::new(run_id, assembled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn pipeline_against(search_server: &MockServer) -> Pipeline {
        let mut config = PipelineConfig::with_api_key("test-key");
        config.search_base_url = search_server.uri();
        config.fallback_keywords = vec!["motivation".to_string()];
        config.work_dir = tempfile::tempdir().unwrap().into_path();
        Pipeline::new(config).await
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected_before_any_network_call() {
        let server = MockServer::start().await;
        let pipeline = pipeline_against(&server).await;

        let err = pipeline.run("   ").await.unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_exhausted_search_is_terminal_and_leaves_no_files() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "videos": [] })))
            .mount(&server)
            .await;

        let pipeline = pipeline_against(&server).await;
        let work_dir = pipeline.config().work_dir.clone();

        let err = pipeline.run("keep pushing forward").await.unwrap_err();
        assert!(matches!(err, PipelineError::SearchExhausted));
        assert!(err.is_terminal());

        // No assembly was attempted, so nothing was written.
        let mut entries = tokio::fs::read_dir(&work_dir).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_assembly_failure_sweeps_all_temp_files() {
        let server = MockServer::start().await;
        let clip_url = format!("{}/clip.mp4", server.uri());
        let body = serde_json::json!({
            "videos": [{
                "video_files": [
                    { "link": clip_url, "width": 1080, "height": 1920 }
                ]
            }]
        });
        Mock::given(method("GET"))
            .and(path("/videos/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;
        // The "clip" is junk bytes, so assembly fails at the probe step
        Mock::given(method("GET"))
            .and(path("/clip.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"not a video".to_vec()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/tts"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"not audio".to_vec()))
            .mount(&server)
            .await;

        let mut config = PipelineConfig::with_api_key("test-key");
        config.search_base_url = server.uri();
        config.speech_base_url = format!("{}/tts", server.uri());
        config.music_url = None;
        config.fallback_keywords = vec!["motivation".to_string()];
        config.work_dir = tempfile::tempdir().unwrap().into_path();
        let pipeline = Pipeline::new(config).await;
        let work_dir = pipeline.config().work_dir.clone();

        let err = pipeline.run("keep pushing forward").await.unwrap_err();
        assert!(matches!(err, PipelineError::Assembly(_)));

        // The downloaded clip and the speech file were both swept.
        let mut entries = tokio::fs::read_dir(&work_dir).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }
}
