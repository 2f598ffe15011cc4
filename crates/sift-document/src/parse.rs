//! Conversion from parsed HTML into the [`Node`] model.
//!
//! Markup is parsed with `scraper` (html5ever). The subtree under a selected element is then
//! copied into [`Node`]s according to [`ParseOptions`].

use std::{collections::BTreeMap, mem, vec};

use scraper::{ElementRef, Html, Node as HtmlNode};

use crate::node::{Element, Node};

/// Options controlling how a parsed subtree is modelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Whether comments are kept as [`Node::Comment`].
    pub comments: bool,
    /// Tags whose children are not modelled as markup. `true` keeps the element's text as a
    /// single opaque text node, `false` drops it.
    pub block_text: BTreeMap<String, bool>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            comments: false,
            block_text: BTreeMap::from([("script".to_string(), false), ("style".to_string(), false)]),
        }
    }
}

impl ParseOptions {
    /// Returns the block-text rule for a tag, if one is configured.
    fn block_text_rule(&self, tag: &str) -> Option<bool> {
        self.block_text
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(tag))
            .map(|(_, keep)| *keep)
    }
}

/// Parses a full HTML document.
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// Converts the subtree rooted at `element` into the node model.
///
/// The conversion keeps its own stack of partially built elements, so nesting depth is bounded
/// by heap rather than by the native stack.
pub fn to_node(element: ElementRef<'_>, options: &ParseOptions) -> Node {
    let mut open = Vec::new();
    let mut current = Frame::open(element, options);
    loop {
        match current.pending.next() {
            Some(Pending::Leaf(node)) => current.element.children.push(node),
            Some(Pending::Element(child)) => {
                let parent = mem::replace(&mut current, Frame::open(child, options));
                open.push(parent);
            }
            None => {
                let Some(mut parent) = open.pop() else {
                    return Node::Element(current.element);
                };
                mem::swap(&mut current, &mut parent);
                current.element.children.push(Node::Element(parent.element));
            }
        }
    }
}

/// A child of an open element that has not been converted yet.
enum Pending<'a> {
    /// An element still to be opened.
    Element(ElementRef<'a>),
    /// A finished text or comment node.
    Leaf(Node),
}

/// An element whose children are being converted.
struct Frame<'a> {
    /// The element built so far.
    element: Element,
    /// Remaining children in document order.
    pending: vec::IntoIter<Pending<'a>>,
}

impl<'a> Frame<'a> {
    /// Opens an element: copies its tag and attributes and queues its children.
    fn open(element: ElementRef<'a>, options: &ParseOptions) -> Self {
        let value = element.value();
        let tag = value.name().to_ascii_lowercase();
        let attrs = value
            .attrs()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        let mut children = Vec::new();
        let mut pending = Vec::new();
        match options.block_text_rule(&tag) {
            Some(true) => {
                let text: String = element.text().collect();
                if !text.is_empty() {
                    children.push(Node::Text(text));
                }
            }
            Some(false) => {}
            None => {
                pending = element
                    .children()
                    .filter_map(|child| match child.value() {
                        HtmlNode::Element(_) => ElementRef::wrap(child).map(Pending::Element),
                        HtmlNode::Text(text) => {
                            Some(Pending::Leaf(Node::Text((**text).to_owned())))
                        }
                        HtmlNode::Comment(comment) if options.comments => {
                            Some(Pending::Leaf(Node::Comment((**comment).to_owned())))
                        }
                        _ => None,
                    })
                    .collect();
            }
        }

        Self {
            element: Element {
                tag,
                attrs,
                children,
            },
            pending: pending.into_iter(),
        }
    }
}
