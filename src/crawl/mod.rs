// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Submodules:
// - page: Page and ReportLine data types
// - parse: extracts title and same-host links from HTML
// - transport: downloads pages over HTTP
// - cache: shared URL -> Page cache
// - fetch: Fetcher trait with cached and static implementations
// - tree: the concurrent depth-bounded traversal that builds the report
//
// Features:
// - Never leaves the seed's host
// - Configurable depth limit and optional bound on concurrent fetches
// - Report lines come out in pre-order regardless of fetch timing
// =============================================================================

mod cache;
mod fetch;
mod page;
mod parse;
mod transport;
mod tree;

// Re-export the crawling API
pub use cache::PageCache;
pub use fetch::{CachedFetcher, Fetcher, StaticFetcher};
pub use page::{Page, ReportLine};
pub use parse::parse_page;
pub use transport::{HttpTransport, Transport, DEFAULT_TIMEOUT_SECS};
pub use tree::{collect_report, crawl, CrawlConfig, DEFAULT_MAX_DEPTH};
