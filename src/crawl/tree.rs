// src/crawl/tree.rs
// =============================================================================
// This module walks a website depth-first and reports it as a tree.
//
// How it works:
// 1. Every node (url, depth) runs in its own tokio task
// 2. The task fetches its page and sends its own report line
// 3. It spawns one child task per link, all running at the same time
// 4. It then drains the children's channels one at a time, in link order,
//    forwarding every line to its own channel
//
// Step 4 is what keeps the output in pre-order no matter which fetch
// finishes first: a parent never reads child N+1 before child N is closed.
//
// Depth limit:
// - A node at depth >= max_depth is reported as a bare leaf and never fetched
// - Links are not deduplicated across the tree, so a page reachable twice is
//   printed twice (the second fetch is normally a cache hit)
// =============================================================================

use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::Semaphore;
use url::Url;

use super::fetch::Fetcher;
use super::page::ReportLine;

/// Default crawl depth
pub const DEFAULT_MAX_DEPTH: usize = 2;

/// Settings for one crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Nodes at this depth or deeper are reported but not fetched
    pub max_depth: usize,
    /// Upper bound on fetches in flight; None means one fetch per task, unbounded
    pub max_concurrency: Option<usize>,
}

impl CrawlConfig {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            max_concurrency: None,
        }
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = Some(max_concurrency);
        self
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

// State shared by every task of one crawl
struct Walk {
    max_depth: usize,
    fetcher: Arc<dyn Fetcher>,
    limiter: Option<Arc<Semaphore>>,
}

// Starts a crawl at `seed` and returns the ordered report stream
//
// The receiver yields lines in pre-order and closes once the seed and every
// descendant have finished. Dropping the receiver stops the crawl from
// forwarding further lines.
//
// Must be called from inside a tokio runtime.
pub fn crawl(
    seed: Url,
    config: &CrawlConfig,
    fetcher: Arc<dyn Fetcher>,
) -> UnboundedReceiver<ReportLine> {
    let walk = Arc::new(Walk {
        max_depth: config.max_depth,
        fetcher,
        limiter: config
            .max_concurrency
            .map(|permits| Arc::new(Semaphore::new(permits.max(1)))),
    });

    log::debug!(
        "Crawling {} to depth {} (concurrency: {})",
        seed,
        config.max_depth,
        config
            .max_concurrency
            .map_or_else(|| "unbounded".to_string(), |n| n.to_string())
    );

    spawn_node(walk, seed, 0)
}

// Drains a report stream into its text lines
pub async fn collect_report(mut report: UnboundedReceiver<ReportLine>) -> Vec<String> {
    let mut lines = Vec::new();
    while let Some(line) = report.recv().await {
        lines.push(line.to_string());
    }
    lines
}

fn spawn_node(walk: Arc<Walk>, url: Url, depth: usize) -> UnboundedReceiver<ReportLine> {
    let (tx, rx) = mpsc::unbounded_channel();
    log::trace!("Spawning node {} at depth {}", url, depth);
    tokio::spawn(visit(walk, url, depth, tx));
    rx
}

// Boxed because the task spawns more tasks running this same future
fn visit(
    walk: Arc<Walk>,
    url: Url,
    depth: usize,
    out: UnboundedSender<ReportLine>,
) -> BoxFuture<'static, ()> {
    async move {
        if depth >= walk.max_depth {
            let _ = out.send(ReportLine::Leaf {
                depth,
                url: url.to_string(),
            });
            return;
        }

        let fetched = {
            // The permit covers the fetch only; holding it while draining
            // children would starve them of permits
            let _permit = match &walk.limiter {
                Some(limiter) => Arc::clone(limiter).acquire_owned().await.ok(),
                None => None,
            };
            walk.fetcher.fetch(&url).await
        };

        let page = match fetched {
            Ok(page) => page,
            Err(e) => {
                let _ = out.send(ReportLine::Failed {
                    depth,
                    url: url.to_string(),
                    error: format!("{:#}", e),
                });
                return;
            }
        };

        if out
            .send(ReportLine::Visited {
                depth,
                url: url.to_string(),
                title: page.title.clone(),
            })
            .is_err()
        {
            return;
        }

        let children: Vec<_> = page
            .links
            .iter()
            .map(|link| spawn_node(Arc::clone(&walk), link.clone(), depth + 1))
            .collect();

        for mut child in children {
            while let Some(line) = child.recv().await {
                if out.send(line).is_err() {
                    log::debug!("Report receiver dropped, stopping at {}", url);
                    return;
                }
            }
        }

        log::trace!("Finished node {} at depth {}", url, depth);
    }
    .boxed()
}
