// src/lib.rs
// =============================================================================
// Library side of crawl-tree.
//
// The binary (src/main.rs) is a thin CLI around this. Everything needed to
// crawl lives in the `crawl` module so it can be driven with any Fetcher,
// for example a StaticFetcher describing a known link graph.
// =============================================================================

pub mod crawl;
