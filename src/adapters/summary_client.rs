use crate::domain::model::{ExternalSummary, SummaryLookup};
use crate::domain::ports::{ConfigProvider, SummarySource};
use crate::utils::error::{EnrichError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const DEFAULT_SUMMARY_ENDPOINT: &str = "https://en.wikipedia.org/api/rest_v1/page/summary";
pub const DEFAULT_USER_AGENT: &str = "WildlifeRescueCentre/1.0 (Educational Project)";

#[derive(Debug, Deserialize)]
struct SummaryPayload {
    extract: Option<String>,
    thumbnail: Option<ImageSource>,
    originalimage: Option<ImageSource>,
    content_urls: Option<ContentUrls>,
}

#[derive(Debug, Deserialize)]
struct ImageSource {
    source: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentUrls {
    desktop: Option<PageUrl>,
}

#[derive(Debug, Deserialize)]
struct PageUrl {
    page: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<SummaryPayload> for SummaryLookup {
    fn from(payload: SummaryPayload) -> Self {
        let image_url = non_empty(payload.thumbnail.and_then(|t| t.source))
            .or_else(|| non_empty(payload.originalimage.and_then(|o| o.source)));

        let summary = ExternalSummary {
            extract_text: non_empty(payload.extract),
            image_url,
            canonical_url: non_empty(
                payload
                    .content_urls
                    .and_then(|urls| urls.desktop)
                    .and_then(|desktop| desktop.page),
            ),
        };

        SummaryLookup::from(Some(summary))
    }
}

/// Client for the REST page-summary endpoint, one GET per lookup key.
#[derive(Debug, Clone)]
pub struct WikipediaClient {
    client: Client,
    endpoint: Url,
}

impl WikipediaClient {
    pub fn new(endpoint: &str, user_agent: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| EnrichError::InvalidConfigValueError {
            field: "source.endpoint".to_string(),
            value: endpoint.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(EnrichError::InvalidConfigValueError {
                field: "source.endpoint".to_string(),
                value: endpoint.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, endpoint })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(
            config.summary_endpoint(),
            config.user_agent(),
            config.request_timeout(),
        )
    }

    /// Endpoint with the key appended as a single percent-encoded path segment.
    fn summary_url(&self, key: &str) -> Option<Url> {
        let mut url = self.endpoint.clone();
        {
            let mut segments = url.path_segments_mut().ok()?;
            segments.pop_if_empty().push(key);
        }
        Some(url)
    }

    async fn request(&self, url: Url) -> std::result::Result<SummaryLookup, reqwest::Error> {
        let response = self.client.get(url).send().await?;
        tracing::debug!("summary response status: {}", response.status());

        if !response.status().is_success() {
            return Ok(SummaryLookup::NotFound);
        }

        let payload: SummaryPayload = response.json().await?;
        Ok(payload.into())
    }
}

#[async_trait]
impl SummarySource for WikipediaClient {
    async fn fetch(&self, key: &str) -> SummaryLookup {
        if key.trim().is_empty() {
            return SummaryLookup::NotFound;
        }
        let Some(url) = self.summary_url(key) else {
            return SummaryLookup::NotFound;
        };

        tracing::debug!("Fetching summary for '{}' from {}", key, url);
        match self.request(url).await {
            Ok(lookup) => lookup,
            Err(e) => {
                tracing::warn!("Error fetching summary for {}: {}", key, e);
                SummaryLookup::NotFound
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> WikipediaClient {
        WikipediaClient::new(
            &server.url("/api/rest_v1/page/summary"),
            DEFAULT_USER_AGENT,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_parses_full_summary() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/rest_v1/page/summary/Otter")
                .header("user-agent", DEFAULT_USER_AGENT);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "title": "Otter",
                    "extract": "Otters are carnivorous mammals.",
                    "thumbnail": {"source": "https://upload.example/otter-320.jpg", "width": 320, "height": 213},
                    "originalimage": {"source": "https://upload.example/otter.jpg"},
                    "content_urls": {"desktop": {"page": "https://en.wikipedia.org/wiki/Otter"}}
                }));
        });

        let lookup = client_for(&server).fetch("Otter").await;

        api_mock.assert();
        let summary = lookup.summary().unwrap();
        assert_eq!(summary.extract_text.as_deref(), Some("Otters are carnivorous mammals."));
        assert_eq!(summary.image_url.as_deref(), Some("https://upload.example/otter-320.jpg"));
        assert_eq!(
            summary.canonical_url.as_deref(),
            Some("https://en.wikipedia.org/wiki/Otter")
        );
    }

    #[tokio::test]
    async fn test_original_image_used_without_thumbnail() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/rest_v1/page/summary/Hare");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "originalimage": {"source": "https://upload.example/hare.jpg"}
                }));
        });

        let lookup = client_for(&server).fetch("Hare").await;

        let summary = lookup.summary().unwrap();
        assert!(summary.extract_text.is_none());
        assert_eq!(summary.image_url.as_deref(), Some("https://upload.example/hare.jpg"));
        assert!(!lookup.has_extract());
    }

    #[tokio::test]
    async fn test_non_success_status_is_not_found() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/rest_v1/page/summary/Unicorn");
            then.status(404)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"title": "Not found."}));
        });

        let lookup = client_for(&server).fetch("Unicorn").await;

        api_mock.assert();
        assert_eq!(lookup, SummaryLookup::NotFound);
    }

    #[tokio::test]
    async fn test_malformed_payload_is_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/rest_v1/page/summary/Broken");
            then.status(200).body("<html>maintenance</html>");
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/rest_v1/page/summary/Empty");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"title": "Empty", "extract": ""}));
        });

        let client = client_for(&server);
        assert_eq!(client.fetch("Broken").await, SummaryLookup::NotFound);
        assert_eq!(client.fetch("Empty").await, SummaryLookup::NotFound);
    }

    #[tokio::test]
    async fn test_unreachable_source_is_not_found() {
        let client = WikipediaClient::new(
            "http://127.0.0.1:1/api/rest_v1/page/summary",
            DEFAULT_USER_AGENT,
            Duration::from_secs(1),
        )
        .unwrap();

        assert_eq!(client.fetch("Otter").await, SummaryLookup::NotFound);
    }

    #[tokio::test]
    async fn test_blank_key_skips_network() {
        let server = MockServer::start();
        let any_mock = server.mock(|when, then| {
            when.method(GET);
            then.status(200);
        });

        let lookup = client_for(&server).fetch("  ").await;

        assert_eq!(lookup, SummaryLookup::NotFound);
        any_mock.assert_hits(0);
    }

    #[test]
    fn test_summary_url_encodes_key() {
        let client = WikipediaClient::new(
            "https://en.wikipedia.org/api/rest_v1/page/summary/",
            DEFAULT_USER_AGENT,
            Duration::from_secs(1),
        )
        .unwrap();

        let url = client.summary_url("Red Fox").unwrap();
        assert_eq!(
            url.as_str(),
            "https://en.wikipedia.org/api/rest_v1/page/summary/Red%20Fox"
        );

        let url = client.summary_url("AC/DC").unwrap();
        assert!(url.as_str().ends_with("/AC%2FDC"));
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        assert!(WikipediaClient::new("not a url", DEFAULT_USER_AGENT, Duration::from_secs(1)).is_err());
    }
}
