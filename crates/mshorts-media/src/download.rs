//! HTTP byte downloads for source clips and music tracks.
//!
//! Stock clips and music arrive as direct file URLs; each is streamed to a
//! uuid-named temp file with a short request timeout.

use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::{MediaError, MediaResult};

/// Request timeout for file downloads.
pub const DOWNLOAD_TIMEOUT_SECS: u64 = 15;

/// Download a file from `url` to `output_path`, streaming the body to disk.
pub async fn download_file(
    client: &reqwest::Client,
    url: &str,
    output_path: impl AsRef<Path>,
) -> MediaResult<()> {
    let output_path = output_path.as_ref();

    debug!("Downloading {} to {}", url, output_path.display());

    let response = client
        .get(url)
        .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
        .send()
        .await
        .map_err(map_reqwest_error)?
        .error_for_status()
        .map_err(|e| MediaError::download_failed(format!("HTTP status {}", status_of(&e))))?;

    let mut file = File::create(output_path).await?;
    let mut response = response;
    let mut downloaded: u64 = 0;

    while let Some(chunk) = response.chunk().await.map_err(map_reqwest_error)? {
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
    }
    file.flush().await?;

    if downloaded == 0 {
        return Err(MediaError::download_failed("Empty response body"));
    }

    info!(
        output = %output_path.display(),
        size_kb = downloaded / 1024,
        "Downloaded file"
    );

    Ok(())
}

fn status_of(e: &reqwest::Error) -> String {
    e.status()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn map_reqwest_error(e: reqwest::Error) -> MediaError {
    if e.is_timeout() {
        MediaError::Timeout(DOWNLOAD_TIMEOUT_SECS)
    } else {
        MediaError::download_failed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_download_writes_body_to_disk() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/clip.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fake video bytes".to_vec()))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("clip.mp4");
        let client = reqwest::Client::new();

        download_file(&client, &format!("{}/clip.mp4", server.uri()), &dest)
            .await
            .unwrap();

        assert_eq!(std::fs::read(&dest).unwrap(), b"fake video bytes");
    }

    #[tokio::test]
    async fn test_download_http_error_is_download_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.mp4"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("missing.mp4");
        let client = reqwest::Client::new();

        let err = download_file(&client, &format!("{}/missing.mp4", server.uri()), &dest)
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::DownloadFailed { .. }));
    }

    #[tokio::test]
    async fn test_download_empty_body_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/empty.mp3"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(Vec::new()))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("empty.mp3");
        let client = reqwest::Client::new();

        let err = download_file(&client, &format!("{}/empty.mp3", server.uri()), &dest)
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::DownloadFailed { .. }));
    }
}
