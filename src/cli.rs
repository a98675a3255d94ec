// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the struct below is the full set of options and
// clap generates the parsing, --help and --version for us.
// =============================================================================

use clap::Parser;

use crawl_tree::crawl::{DEFAULT_MAX_DEPTH, DEFAULT_TIMEOUT_SECS};

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "crawl-tree",
    version,
    about = "Crawl a website and print a tree of its pages",
    long_about = "crawl-tree follows links from a seed URL up to a maximum depth, \
                  staying on the seed's host, and prints every page it visits \
                  (URL and title) as a tab-indented tree."
)]
pub struct Cli {
    /// URL to start crawling from
    #[arg(long, default_value = "https://monzo.com")]
    pub url: String,

    /// Crawl depth
    ///
    /// Depth 0 = only print the seed URL, without fetching it
    /// Depth 1 = fetch the seed and list the pages it links to
    /// etc.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub depth: usize,

    /// Maximum number of pages fetched at the same time (default: unbounded)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub concurrency: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Print each report line as a JSON object instead of the text tree
    #[arg(long)]
    pub json: bool,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}
