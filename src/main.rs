// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr only, stdout is reserved for the report)
// 3. Validate the seed URL and build the HTTP fetcher
// 4. Start the crawl and print every report line as it arrives
// 5. Exit with proper code (0 = finished, 1 = invalid seed URL, 2 = error)
// =============================================================================

mod cli; // src/cli.rs - command-line parsing

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crawl_tree::crawl::{self, CachedFetcher, CrawlConfig, HttpTransport, PageCache};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr. RUST_LOG wins over --verbose when it is set.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

// Runs one crawl
// Returns:
//   Ok(0) = crawl finished (per-page failures are part of the report)
//   Ok(1) = the seed URL could not be parsed
//   Err   = setup failed
async fn run(cli: Cli) -> Result<i32> {
    let seed = match Url::parse(&cli.url) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("Could not parse start url {:?}: {}", cli.url, e);
            return Ok(1);
        }
    };

    let mut config = CrawlConfig::new(cli.depth);
    if let Some(limit) = cli.concurrency {
        config = config.with_max_concurrency(usize::try_from(limit)?);
    }

    let transport = HttpTransport::new(Duration::from_secs(cli.timeout))?;
    let cache = Arc::new(PageCache::new());
    let fetcher = Arc::new(CachedFetcher::new(transport, Arc::clone(&cache)));

    log::info!("Starting crawl of {} (depth {})", seed, config.max_depth);

    let mut report = crawl::crawl(seed, &config, fetcher);

    let mut out = std::io::stdout();
    let mut lines = 0usize;

    while let Some(line) = report.recv().await {
        if cli.json {
            writeln!(out, "{}", serde_json::to_string(&line)?)?;
        } else {
            writeln!(out, "{}", line)?;
        }
        lines += 1;
    }
    out.flush()?;

    log::info!("Crawl complete: {} line(s), {} page(s) cached", lines, cache.len());

    Ok(0)
}
