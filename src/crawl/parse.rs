// src/crawl/parse.rs
// =============================================================================
// This module turns a downloaded HTML document into a Page.
//
// We use the `scraper` crate to:
// - Read the <title> text from <head>
// - Collect the href of every <a> element in <body>
//
// And the `url` crate to:
// - Resolve relative hrefs against the page's own URL
// - Compare hosts, so the crawl never leaves the seed's site
//
// A link is kept only when it stays on the same host (and port) and is not
// the page itself. Order follows the document and repeated links are kept.
// =============================================================================

use anyhow::{anyhow, Result};
use scraper::{Html, Selector};
use url::Url;

use super::page::Page;

// Parses raw document bytes into a Page
//
// Parameters:
//   body: the response bytes
//   page_url: the URL the bytes were downloaded from (base for relative links)
//
// Returns: the Page, or an error when the document can't be parsed
//
// Bytes that are not UTF-8 (Latin-1 pages, stray bytes) are decoded lossily,
// so titles and links around them still come through.
pub fn parse_page(body: &[u8], page_url: &Url) -> Result<Page> {
    let html = String::from_utf8_lossy(body);

    let document = Html::parse_document(&html);

    let title_selector =
        Selector::parse("head title").map_err(|e| anyhow!("invalid title selector: {:?}", e))?;
    let link_selector =
        Selector::parse("body a").map_err(|e| anyhow!("invalid link selector: {:?}", e))?;

    let title = document
        .select(&title_selector)
        .flat_map(|element| element.text())
        .collect::<String>()
        .trim()
        .to_string();

    let mut links = Vec::new();
    for element in document.select(&link_selector) {
        // A missing href behaves like an empty one: it points back at the page
        let href = element.value().attr("href").unwrap_or("");

        let resolved = match page_url.join(href) {
            Ok(url) => url,
            Err(e) => {
                log::debug!("Skipping unresolvable link {:?} on {}: {}", href, page_url, e);
                continue;
            }
        };

        if is_followable(page_url, &resolved) {
            links.push(resolved);
        } else {
            log::trace!("Rejected link {} on {}", resolved, page_url);
        }
    }

    log::debug!("Parsed {}: title {:?}, {} link(s)", page_url, title, links.len());

    Ok(Page::new(title, links))
}

// Same host, same port, and not a link back to the page itself
fn is_followable(page_url: &Url, link: &Url) -> bool {
    link.as_str() != page_url.as_str()
        && link.host_str().is_some()
        && link.host_str() == page_url.host_str()
        && link.port() == page_url.port()
}
