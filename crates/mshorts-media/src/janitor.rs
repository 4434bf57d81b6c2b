//! Best-effort cleanup of intermediate files.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Tracks the intermediate files of one assembly run and removes them when
/// the run finishes, on both the success and the failure path.
///
/// Deletion is best-effort: missing files (e.g. the skipped music track) and
/// removal failures are logged at debug and swallowed, never escalated.
#[derive(Debug, Default)]
pub struct TempFileJanitor {
    paths: Vec<PathBuf>,
}

impl TempFileJanitor {
    /// Create an empty janitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a path for later removal.
    pub fn track(&mut self, path: impl AsRef<Path>) {
        self.paths.push(path.as_ref().to_path_buf());
    }

    /// Number of tracked paths.
    pub fn tracked(&self) -> usize {
        self.paths.len()
    }

    /// Remove every tracked file. Consumes the janitor.
    pub async fn sweep(self) {
        for path in self.paths {
            match fs::remove_file(&path).await {
                Ok(()) => debug!("Removed temp file {}", path.display()),
                Err(e) => debug!("Skipping temp file {}: {}", path.display(), e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_sweep_removes_existing_files() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.mp4");
        let b = dir.path().join("b.mp3");
        fs::write(&a, b"x").await.unwrap();
        fs::write(&b, b"y").await.unwrap();

        let mut janitor = TempFileJanitor::new();
        janitor.track(&a);
        janitor.track(&b);
        janitor.sweep().await;

        assert!(!a.exists());
        assert!(!b.exists());
    }

    #[tokio::test]
    async fn test_sweep_tolerates_missing_files() {
        let dir = TempDir::new().unwrap();
        let present = dir.path().join("present.mp4");
        fs::write(&present, b"x").await.unwrap();

        let mut janitor = TempFileJanitor::new();
        janitor.track(dir.path().join("never_created.mp3"));
        janitor.track(&present);
        // Must not panic or error on the missing entry
        janitor.sweep().await;

        assert!(!present.exists());
    }
}
