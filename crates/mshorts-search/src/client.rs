//! Pexels-style search client.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{SearchError, SearchResult};

/// Default search API base URL.
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://api.pexels.com";

/// Per-request timeout in seconds.
pub const SEARCH_TIMEOUT_SECS: u64 = 10;

/// Results per search request; the first page of one is enough since only
/// the first portrait variant is used.
const PER_PAGE: u32 = 1;

/// A clip located by the candidate walk.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedClip {
    /// Direct-download URL of the portrait video file.
    pub url: String,
    /// The candidate query that matched.
    pub query: String,
}

/// Search API response shape.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    videos: Vec<StockVideo>,
}

#[derive(Debug, Deserialize)]
struct StockVideo {
    #[serde(default)]
    video_files: Vec<VideoFile>,
}

#[derive(Debug, Deserialize)]
struct VideoFile {
    link: String,
    width: Option<u32>,
    height: Option<u32>,
}

impl VideoFile {
    /// Portrait means width does not exceed height.
    fn is_portrait(&self) -> bool {
        matches!((self.width, self.height), (Some(w), Some(h)) if w <= h)
    }
}

/// Client for the stock video search API.
pub struct StockClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl StockClient {
    /// Create a new client against `base_url` using `api_key` for the
    /// Authorization header.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Issue one search request and return the first portrait file URL, if
    /// any video in the response carries one.
    pub async fn search_portrait(&self, query: &str) -> SearchResult<Option<String>> {
        let url = format!("{}/videos/search", self.base_url);
        let per_page = PER_PAGE.to_string();

        let response = self
            .client
            .get(&url)
            .header("Authorization", &self.api_key)
            .query(&[
                ("query", query),
                ("per_page", per_page.as_str()),
                ("orientation", "portrait"),
                ("size", "medium"),
            ])
            .timeout(Duration::from_secs(SEARCH_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::MalformedResponse(e.to_string()))?;

        let link = body
            .videos
            .iter()
            .flat_map(|v| v.video_files.iter())
            .find(|f| f.is_portrait())
            .map(|f| f.link.clone());

        Ok(link)
    }

    /// Walk `candidates` in order and return the first portrait clip found.
    ///
    /// A transport or HTTP error on one candidate is logged and the walk
    /// moves on; only exhausting the whole list yields
    /// [`SearchError::Exhausted`].
    pub async fn locate_portrait_clip(&self, candidates: &[String]) -> SearchResult<LocatedClip> {
        for query in candidates {
            debug!(query = %query, "Searching for stock clip");
            match self.search_portrait(query).await {
                Ok(Some(url)) => {
                    info!(query = %query, "Found portrait clip");
                    return Ok(LocatedClip {
                        url,
                        query: query.clone(),
                    });
                }
                Ok(None) => {
                    debug!(query = %query, "No portrait match");
                }
                Err(e) => {
                    warn!(query = %query, error = %e, "Search candidate failed, trying next");
                }
            }
        }
        Err(SearchError::Exhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn portrait_body(link: &str) -> serde_json::Value {
        serde_json::json!({
            "videos": [{
                "video_files": [
                    { "link": "https://cdn.example.com/landscape.mp4", "width": 1920, "height": 1080 },
                    { "link": link, "width": 1080, "height": 1920 }
                ]
            }]
        })
    }

    #[tokio::test]
    async fn test_search_sends_auth_and_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos/search"))
            .and(header("Authorization", "test-key"))
            .and(query_param("query", "focus"))
            .and(query_param("orientation", "portrait"))
            .and(query_param("size", "medium"))
            .respond_with(ResponseTemplate::new(200).set_body_json(portrait_body("https://cdn.example.com/p.mp4")))
            .expect(1)
            .mount(&server)
            .await;

        let client = StockClient::new("test-key", server.uri());
        let url = client.search_portrait("focus").await.unwrap();
        assert_eq!(url.as_deref(), Some("https://cdn.example.com/p.mp4"));
    }

    #[tokio::test]
    async fn test_search_skips_landscape_variants() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "videos": [{
                "video_files": [
                    { "link": "https://cdn.example.com/wide.mp4", "width": 1920, "height": 1080 }
                ]
            }]
        });
        Mock::given(method("GET"))
            .and(path("/videos/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = StockClient::new("test-key", server.uri());
        let url = client.search_portrait("focus").await.unwrap();
        assert_eq!(url, None);
    }

    #[tokio::test]
    async fn test_square_variant_counts_as_portrait() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "videos": [{
                "video_files": [
                    { "link": "https://cdn.example.com/square.mp4", "width": 1080, "height": 1080 }
                ]
            }]
        });
        Mock::given(method("GET"))
            .and(path("/videos/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = StockClient::new("test-key", server.uri());
        let url = client.search_portrait("focus").await.unwrap();
        assert_eq!(url.as_deref(), Some("https://cdn.example.com/square.mp4"));
    }

    #[tokio::test]
    async fn test_locate_stops_at_first_success() {
        let server = MockServer::start().await;
        // First two candidates fail at the HTTP level, the third matches.
        Mock::given(method("GET"))
            .and(path("/videos/search"))
            .and(query_param("query", "alpha"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/videos/search"))
            .and(query_param("query", "beta"))
            .respond_with(ResponseTemplate::new(502))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/videos/search"))
            .and(query_param("query", "gamma"))
            .respond_with(ResponseTemplate::new(200).set_body_json(portrait_body("https://cdn.example.com/g.mp4")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/videos/search"))
            .and(query_param("query", "delta"))
            .respond_with(ResponseTemplate::new(200).set_body_json(portrait_body("https://cdn.example.com/d.mp4")))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/videos/search"))
            .and(query_param("query", "epsilon"))
            .respond_with(ResponseTemplate::new(200).set_body_json(portrait_body("https://cdn.example.com/e.mp4")))
            .expect(0)
            .mount(&server)
            .await;

        let client = StockClient::new("test-key", server.uri());
        let candidates: Vec<String> = ["alpha", "beta", "gamma", "delta", "epsilon"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let located = client.locate_portrait_clip(&candidates).await.unwrap();
        assert_eq!(located.query, "gamma");
        assert_eq!(located.url, "https://cdn.example.com/g.mp4");

        // Exactly three search calls were made
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 3);
    }

    #[tokio::test]
    async fn test_locate_exhausts_when_nothing_matches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "videos": [] })))
            .mount(&server)
            .await;

        let client = StockClient::new("test-key", server.uri());
        let candidates: Vec<String> = ["one", "two"].iter().map(|s| s.to_string()).collect();

        let err = client.locate_portrait_clip(&candidates).await.unwrap_err();
        assert!(matches!(err, SearchError::Exhausted));
    }

    #[tokio::test]
    async fn test_locate_survives_all_transport_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = StockClient::new("test-key", server.uri());
        let candidates: Vec<String> = ["one", "two", "three"].iter().map(|s| s.to_string()).collect();

        // Transport errors never escalate mid-walk; the result is Exhausted.
        let err = client.locate_portrait_clip(&candidates).await.unwrap_err();
        assert!(matches!(err, SearchError::Exhausted));
    }
}
