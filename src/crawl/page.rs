// src/crawl/page.rs
// =============================================================================
// Data types shared by the crawler.
//
// - Page: what we learned about one URL (its title and outgoing links)
// - ReportLine: one entry of the tree report printed by the CLI
//
// A Page is created once per URL by the parser and never changed afterwards.
// The cache hands out Arc<Page> so every task reading it shares one copy.
// =============================================================================

use serde::Serialize;
use std::fmt;
use url::Url;

/// Title and same-host links of one fetched page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    /// Trimmed text of the <title> element, empty if the page has none
    pub title: String,
    /// Absolute links in document order, duplicates kept
    pub links: Vec<Url>,
}

impl Page {
    pub fn new(title: impl Into<String>, links: Vec<Url>) -> Self {
        Self {
            title: title.into(),
            links,
        }
    }
}

// One line of the crawl report
//
// The traversal produces these in pre-order. Display renders the text form
// the CLI prints; Serialize is used for --json output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportLine {
    /// Node at or past the maximum depth, never fetched
    Leaf { depth: usize, url: String },
    /// Node fetched successfully
    Visited {
        depth: usize,
        url: String,
        title: String,
    },
    /// Node whose fetch or parse failed
    Failed {
        depth: usize,
        url: String,
        error: String,
    },
}

impl ReportLine {
    pub fn depth(&self) -> usize {
        match self {
            ReportLine::Leaf { depth, .. }
            | ReportLine::Visited { depth, .. }
            | ReportLine::Failed { depth, .. } => *depth,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            ReportLine::Leaf { url, .. }
            | ReportLine::Visited { url, .. }
            | ReportLine::Failed { url, .. } => url,
        }
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = "\t".repeat(self.depth());
        match self {
            ReportLine::Leaf { url, .. } => write!(f, "{}|_ {}", indent, url),
            ReportLine::Visited { url, title, .. } => {
                write!(f, "{}|_ {} {}", indent, url, quote_title(title))
            }
            // Failed nodes keep the indent and URL of their place in the tree,
            // with the error text appended, so the report stays a tree
            ReportLine::Failed { url, error, .. } => {
                write!(f, "{}|_ {} ({})", indent, url, error)
            }
        }
    }
}

// Wraps a title in double quotes
//
// Quotes, backslashes and control characters inside the title are escaped
// so every report line stays one line with a balanced pair of quotes.
fn quote_title(title: &str) -> String {
    let mut quoted = String::with_capacity(title.len() + 2);
    quoted.push('"');
    for c in title.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            '\u{7}' => quoted.push_str("\\a"),
            '\u{8}' => quoted.push_str("\\b"),
            '\u{b}' => quoted.push_str("\\v"),
            '\u{c}' => quoted.push_str("\\f"),
            c if c.is_control() && (c as u32) < 0x80 => {
                quoted.push_str(&format!("\\x{:02x}", c as u32));
            }
            c if c.is_control() => quoted.push_str(&format!("\\u{:04x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_line_has_no_title() {
        let line = ReportLine::Leaf {
            depth: 2,
            url: "http://test.com/page3/".to_string(),
        };
        assert_eq!(line.to_string(), "\t\t|_ http://test.com/page3/");
    }

    #[test]
    fn test_visited_line_quotes_title() {
        let line = ReportLine::Visited {
            depth: 0,
            url: "http://test.com/".to_string(),
            title: "Home".to_string(),
        };
        assert_eq!(line.to_string(), "|_ http://test.com/ \"Home\"");
    }

    #[test]
    fn test_empty_title_renders_empty_quotes() {
        let line = ReportLine::Visited {
            depth: 1,
            url: "http://test.com/a".to_string(),
            title: String::new(),
        };
        assert_eq!(line.to_string(), "\t|_ http://test.com/a \"\"");
    }

    #[test]
    fn test_title_quotes_are_escaped() {
        assert_eq!(quote_title(r#"Say "hi""#), r#""Say \"hi\"""#);
        assert_eq!(quote_title(r"a\b"), r#""a\\b""#);
    }

    #[test]
    fn test_title_control_characters_are_escaped() {
        assert_eq!(quote_title("a\u{b}b\u{c}c\u{7}"), r#""a\vb\fc\a""#);
        assert_eq!(quote_title("x\u{1}y\u{7f}"), r#""x\x01y\x7f""#);
        assert_eq!(quote_title("z\u{85}"), r#""z\u0085""#);
        assert!(!quote_title("a\u{b}b").chars().any(|c| c.is_control()));
    }

    #[test]
    fn test_failed_line_carries_error() {
        let line = ReportLine::Failed {
            depth: 1,
            url: "http://test.com/x".to_string(),
            error: "HTTP 404 Not Found".to_string(),
        };
        assert_eq!(line.to_string(), "\t|_ http://test.com/x (HTTP 404 Not Found)");
    }

    #[test]
    fn test_report_line_json_shape() {
        let line = ReportLine::Visited {
            depth: 0,
            url: "http://test.com/".to_string(),
            title: "Home".to_string(),
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["kind"], "visited");
        assert_eq!(json["depth"], 0);
        assert_eq!(json["title"], "Home");
    }
}
