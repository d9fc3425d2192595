use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ProjectsConfig;

const USER_AGENT: &str = concat!("portfolio/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github+json";

/// Repository summary as returned by the listing endpoint. Unknown fields are
/// ignored and nullable ones default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCard {
    pub name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamFetchError {
    #[error("listing request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("listing endpoint returned {0}")]
    Status(reqwest::StatusCode),
}

/// Read-only source of project cards.
#[async_trait]
pub trait ProjectSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<ProjectCard>, UpstreamFetchError>;
}

/// Fetches one account's public repositories with a bounded timeout.
#[derive(Debug, Clone)]
pub struct GithubProjectSource {
    http: Client,
    url: String,
}

impl GithubProjectSource {
    pub fn new(config: &ProjectsConfig) -> Result<Self, UpstreamFetchError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(ACCEPT));

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            url: config.listing_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ProjectSource for GithubProjectSource {
    async fn fetch(&self) -> Result<Vec<ProjectCard>, UpstreamFetchError> {
        debug!(url = %self.url, "fetching project listing");
        let response = self.http.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamFetchError::Status(status));
        }

        Ok(response.json::<Vec<ProjectCard>>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    async fn answering(response: &'static str) -> GithubProjectSource {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener binds");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("connection accepted");
            let mut buffer = [0u8; 2048];
            let _ = socket.read(&mut buffer).await;
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        GithubProjectSource::new(&ProjectsConfig {
            api_base: format!("http://{addr}"),
            account: "octocat".to_string(),
            timeout: Duration::from_secs(2),
        })
        .expect("client builds")
    }

    #[test]
    fn cards_decode_from_listing_payload() {
        let payload = serde_json::json!([
            {
                "id": 1,
                "name": "hello-world",
                "html_url": "https://github.com/octocat/hello-world",
                "description": null,
                "language": "Rust",
                "stargazers_count": 42,
                "forks_count": 5,
                "fork": false,
                "updated_at": "2025-01-02T03:04:05Z",
                "owner": { "login": "octocat" }
            },
            {
                "name": "sparse",
                "html_url": "https://github.com/octocat/sparse"
            }
        ]);

        let cards: Vec<ProjectCard> = serde_json::from_value(payload).expect("cards decode");
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].stargazers_count, 42);
        assert!(cards[0].description.is_none());
        assert!(cards[0].updated_at.is_some());
        assert_eq!(cards[1].language, None);
        assert!(!cards[1].fork);
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_error() {
        let config = ProjectsConfig {
            api_base: "http://127.0.0.1:1".to_string(),
            account: "octocat".to_string(),
            timeout: Duration::from_secs(1),
        };
        let source = GithubProjectSource::new(&config).expect("client builds");
        assert_eq!(source.url(), "http://127.0.0.1:1/users/octocat/repos");

        assert!(matches!(
            source.fetch().await,
            Err(UpstreamFetchError::Request(_))
        ));
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let source = answering(
            "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;

        match source.fetch().await {
            Err(UpstreamFetchError::Status(status)) => {
                assert_eq!(status, reqwest::StatusCode::SERVICE_UNAVAILABLE)
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_request_error() {
        let source = answering(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 5\r\nConnection: close\r\n\r\n{oops",
        )
        .await;

        assert!(matches!(
            source.fetch().await,
            Err(UpstreamFetchError::Request(_))
        ));
    }
}
