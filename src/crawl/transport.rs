// src/crawl/transport.rs
// =============================================================================
// This module downloads pages over HTTP.
//
// The Transport trait is the seam between the crawler and the network:
// - HttpTransport is the real implementation (reqwest)
// - Tests plug in their own implementations to count or fail requests
//
// Any failure (DNS, refused connection, timeout, non-2xx status) comes back
// as an error. The caller does not retry.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Fetches the raw bytes behind a URL
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>>;
}

// Lets callers keep a handle on a transport they hand to a fetcher
#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        self.as_ref().fetch_bytes(url).await
    }
}

/// Transport backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    // Builds a client with the given request timeout
    //
    // The client is reused for every request (connection pooling), and is
    // cheap to clone because it is reference counted internally.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP {}", response.status()));
        }

        let body = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read body of {}", url))?;

        log::debug!("Downloaded {} ({} bytes)", url, body.len());
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport() -> HttpTransport {
        HttpTransport::new(Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_body() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/hello"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<title>Hi</title>"))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/hello", server.uri()))?;
        let body = transport().fetch_bytes(&url).await?;
        assert_eq!(body, b"<title>Hi</title>");
        Ok(())
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/missing", server.uri()))?;
        let err = transport().fetch_bytes(&url).await.unwrap_err();
        assert!(err.to_string().contains("404"));
        Ok(())
    }

    #[tokio::test]
    async fn test_unreachable_host_is_error() -> Result<()> {
        // Port 9 (discard) on localhost is closed on test machines
        let url = Url::parse("http://127.0.0.1:9/")?;
        let err = transport().fetch_bytes(&url).await.unwrap_err();
        assert!(err.to_string().contains("Failed to fetch"));
        Ok(())
    }
}
