//! Section segmentation.
//!
//! Splits a content subtree into an ordered, flat list of sections. A single pre-order walk
//! visits every node:
//! - elements in the [`IgnoreSet`] are pruned with their whole subtree
//! - `h2`..`h6` start a new section and end that branch of the walk
//! - text is appended to the open section, or to a lazily created orphan section when no
//!   heading has been seen yet
//!
//! Titles and content are normalized in one pass once the walk is done, and sections with
//! neither a title nor content are dropped.

use std::collections::HashSet;

use crate::{
    SectionRecord,
    node::{Element, Node},
    normalize::normalize_whitespace,
};

/// Tags pruned by default: code samples and navigation chrome.
pub const DEFAULT_IGNORED_TAGS: &[&str] = &["code", "nav"];

/// A case-insensitive set of tag names whose subtrees are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreSet {
    /// Lowercase tag names.
    tags: HashSet<String>,
}

impl IgnoreSet {
    /// Builds an ignore set from tag names.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tags: tags
                .into_iter()
                .map(|tag| tag.as_ref().trim().to_ascii_lowercase())
                .filter(|tag| !tag.is_empty())
                .collect(),
        }
    }

    /// Returns true if the tag is ignored.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(&tag.to_ascii_lowercase())
    }
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self::new(DEFAULT_IGNORED_TAGS)
    }
}

/// Accumulates sections during a walk. The open section is always the last one.
#[derive(Debug, Default)]
struct SectionBuilder {
    /// Sections in document order.
    sections: Vec<SectionRecord>,
}

impl SectionBuilder {
    /// Opens a new titled section.
    fn start(&mut self, title: String, href: String) {
        self.sections.push(SectionRecord {
            title: Some(title),
            href,
            content: String::new(),
        });
    }

    /// Appends raw text and a separating space to the open section.
    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.sections.last_mut() {
            Some(section) => {
                section.content.push_str(text);
                section.content.push(' ');
            }
            None => self.sections.push(SectionRecord {
                title: None,
                href: String::new(),
                content: format!("{text} "),
            }),
        }
    }

    /// Normalizes every section and drops the empty ones.
    fn finish(self) -> Vec<SectionRecord> {
        self.sections
            .into_iter()
            .map(|section| SectionRecord {
                title: section.title.as_deref().map(normalize_whitespace),
                href: section.href,
                content: normalize_whitespace(&section.content),
            })
            .filter(|section| {
                section.title.as_deref().is_some_and(|t| !t.is_empty())
                    || !section.content.is_empty()
            })
            .collect()
    }
}

/// Splits the subtree at `root` into sections.
pub fn segment(root: &Node, ignore: &IgnoreSet) -> Vec<SectionRecord> {
    let mut builder = SectionBuilder::default();
    // Each entry pairs a node with its parent element, which anchor lookup needs.
    let mut stack: Vec<(&Node, Option<&Element>)> = vec![(root, None)];

    while let Some((node, parent)) = stack.pop() {
        match node {
            Node::Comment(_) => {}
            Node::Text(text) => builder.push_text(text),
            Node::Element(element) => {
                if ignore.contains(&element.tag) {
                    continue;
                }
                if element.heading_level().is_some_and(|level| level >= 2) {
                    builder.start(element.text(), anchor_href(parent));
                    continue;
                }
                // Push children in reverse order so leftmost child is processed first
                stack.extend(
                    element
                        .children
                        .iter()
                        .rev()
                        .map(|child| (child, Some(element))),
                );
            }
        }
    }

    builder.finish()
}

/// Returns the `href` of the first anchor under the heading's parent, in document order.
///
/// The heading itself is part of the search, so an anchor wrapped in the heading is found.
fn anchor_href(parent: Option<&Element>) -> String {
    parent
        .and_then(|parent| {
            parent
                .children
                .iter()
                .flat_map(Node::iter_preorder)
                .filter_map(Node::as_element)
                .find(|element| element.tag == "a")
        })
        .and_then(|anchor| anchor.attr("href"))
        .unwrap_or_default()
        .to_string()
}
