//! Scoped handle for the delivered video file.

use std::path::Path;

use tracing::debug;

use mshorts_media::AssembledVideo;
use mshorts_models::RunId;

/// Fixed display name offered for download.
pub const DISPLAY_FILE_NAME: &str = "shorts_motivational.mp4";

/// Handle to the one file a successful run leaves behind.
///
/// The caller owns the file through this handle and invokes [`release`] when
/// done with it; nothing else tracks the path.
///
/// [`release`]: RenderHandle::release
#[derive(Debug)]
pub struct RenderHandle {
    run_id: RunId,
    video: AssembledVideo,
}

impl RenderHandle {
    /// Wrap a finished assembly.
    pub fn new(run_id: RunId, video: AssembledVideo) -> Self {
        Self { run_id, video }
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    /// Path of the delivered file on disk.
    pub fn path(&self) -> &Path {
        &self.video.path
    }

    /// The assembled video's measured properties.
    pub fn video(&self) -> &AssembledVideo {
        &self.video
    }

    /// Fixed name the file is offered under for download.
    pub fn display_name(&self) -> &'static str {
        DISPLAY_FILE_NAME
    }

    /// Delete the delivered file. Best-effort: a failure to remove is logged
    /// and swallowed, matching the janitor contract.
    pub async fn release(self) {
        match tokio::fs::remove_file(&self.video.path).await {
            Ok(()) => debug!(run_id = %self.run_id, "Released delivered file"),
            Err(e) => debug!(
                run_id = %self.run_id,
                error = %e,
                "Could not remove delivered file"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fake_video(path: std::path::PathBuf) -> AssembledVideo {
        AssembledVideo {
            path,
            duration: 60.0,
            width: 1080,
            height: 1920,
            fps: 30.0,
        }
    }

    #[tokio::test]
    async fn test_release_removes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shorts_test.mp4");
        tokio::fs::write(&path, b"video").await.unwrap();

        let handle = RenderHandle::new(RunId::new(), fake_video(path.clone()));
        assert_eq!(handle.display_name(), "shorts_motivational.mp4");
        handle.release().await;

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_release_tolerates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("already_gone.mp4");

        let handle = RenderHandle::new(RunId::new(), fake_video(path));
        // Must not panic
        handle.release().await;
    }
}
