//! HTML page parsing and section segmentation for sift.
//!
//! This crate turns one rendered HTML page into a flat, search-indexable record:
//! - Locating the content root with a CSS selector (`main` by default)
//! - Reading the page title from the first `h1`
//! - Splitting the content root into sections at `h2`..`h6` boundaries
//! - Normalizing whitespace in titles and content

#![warn(missing_docs)]

mod error;
mod node;
mod normalize;
mod page;
mod parse;
mod segment;

pub use error::DocumentError;
pub use node::{Element, Node, PreorderIter};
pub use normalize::normalize_whitespace;
pub use page::{DEFAULT_CONTENT_ROOT, ExtractOptions, PageExtractor, route_for};
pub use parse::{ParseOptions, parse_document, to_node};
pub use segment::{DEFAULT_IGNORED_TAGS, IgnoreSet, segment};
use serde::{Deserialize, Serialize};

/// One extracted page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Site-relative route, e.g. `/guide/intro`.
    pub route: String,
    /// Normalized text of the first `h1` in the content root, or empty.
    pub title: String,
    /// Sections in document order.
    pub sections: Vec<SectionRecord>,
}

/// A run of content under one heading.
///
/// The leading section of a page has no title when text appears before the first heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
    /// Normalized heading text; `None` for the orphan section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Anchor reference found next to the heading, or empty.
    pub href: String,
    /// Normalized text between this heading and the next.
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orphan_section_serializes_without_title() {
        let section = SectionRecord {
            title: None,
            href: String::new(),
            content: "lead".into(),
        };
        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json, serde_json::json!({ "href": "", "content": "lead" }));
    }

    #[test]
    fn test_page_record_json_shape() {
        let page = PageRecord {
            route: "/guide/intro".into(),
            title: "Intro".into(),
            sections: vec![SectionRecord {
                title: Some("Setup".into()),
                href: "#setup".into(),
                content: "Install it.".into(),
            }],
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["route"], "/guide/intro");
        assert_eq!(json["sections"][0]["title"], "Setup");
        assert_eq!(json["sections"][0]["href"], "#setup");
    }
}
