// src/crawl/fetch.rs
// =============================================================================
// Fetchers resolve a URL to a Page.
//
// - CachedFetcher: Transport + parser + shared PageCache. A URL that was
//   already resolved is served from the cache without touching the network.
// - StaticFetcher: a fixed map of pages, used to crawl a known link graph.
//
// The traversal only sees the Fetcher trait, so either one can be injected.
// =============================================================================

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

use super::cache::PageCache;
use super::page::Page;
use super::parse::parse_page;
use super::transport::Transport;

/// Resolves a URL to its Page
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Arc<Page>>;
}

/// Downloads, parses and caches pages
///
/// The cache lookup and the cache write are separate steps. Two concurrent
/// fetches of the same uncached URL both download and parse it, and the
/// cache keeps whichever result is written last.
pub struct CachedFetcher<T> {
    transport: T,
    cache: Arc<PageCache>,
}

impl<T: Transport> CachedFetcher<T> {
    pub fn new(transport: T, cache: Arc<PageCache>) -> Self {
        Self { transport, cache }
    }

    pub fn cache(&self) -> &Arc<PageCache> {
        &self.cache
    }
}

#[async_trait]
impl<T: Transport> Fetcher for CachedFetcher<T> {
    async fn fetch(&self, url: &Url) -> Result<Arc<Page>> {
        let key = url.as_str();

        if let Some(page) = self.cache.get(key) {
            log::debug!("Cache hit for {}", url);
            return Ok(page);
        }

        let body = match self.transport.fetch_bytes(url).await {
            Ok(body) => body,
            Err(e) => {
                log::warn!("Failed to fetch url {}: {:#}", url, e);
                return Err(e);
            }
        };

        let page = match parse_page(&body, url) {
            Ok(page) => Arc::new(page),
            Err(e) => {
                log::warn!("Failed to parse page {}: {:#}", url, e);
                return Err(e);
            }
        };

        self.cache.set(key, Arc::clone(&page));
        Ok(page)
    }
}

/// Serves pages from a fixed in-memory map keyed by URL string
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, Arc<Page>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page, builder style
    pub fn with_page(mut self, url: &Url, page: Page) -> Self {
        self.pages.insert(url.as_str().to_string(), Arc::new(page));
        self
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &Url) -> Result<Arc<Page>> {
        self.pages
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| anyhow!("no page for {}", url))
    }
}
