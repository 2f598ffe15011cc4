//! A small, owned model of a parsed HTML subtree.
//!
//! The segmenter never touches the parser's own tree. Instead the content root is converted
//! once into a closed set of node kinds (element, text, comment) so the traversal can dispatch
//! by pattern matching and stays independent of the parsing library.

use std::mem;

/// A node in a parsed HTML subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with a tag name, attributes and children.
    Element(Element),
    /// A run of character data.
    Text(String),
    /// A comment. Only present when comments were requested at parse time.
    Comment(String),
}

/// An HTML element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name.
    pub tag: String,
    /// Attributes in source order.
    pub attrs: Vec<(String, String)>,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl Node {
    /// Creates an element node with no attributes.
    pub fn element(tag: &str, children: Vec<Self>) -> Self {
        Self::Element(Element::new(tag, children))
    }

    /// Creates a text node.
    pub fn text_node(text: &str) -> Self {
        Self::Text(text.to_string())
    }

    /// Returns the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) | Self::Comment(_) => None,
        }
    }

    /// Returns the flattened text of this node: the concatenation of every descendant text
    /// node in document order. Comments contribute nothing.
    pub fn text(&self) -> String {
        self.iter_preorder()
            .filter_map(|node| match node {
                Self::Text(text) => Some(text.as_str()),
                Self::Element(_) | Self::Comment(_) => None,
            })
            .collect()
    }

    /// Returns an iterator over this node and all descendants in pre-order (depth-first).
    pub fn iter_preorder(&self) -> PreorderIter<'_> {
        PreorderIter { stack: vec![self] }
    }

    /// Returns the first element with the given tag in pre-order, including this node.
    pub fn find_first(&self, tag: &str) -> Option<&Element> {
        self.iter_preorder()
            .filter_map(Self::as_element)
            .find(|element| element.tag.eq_ignore_ascii_case(tag))
    }
}

impl Element {
    /// Creates an element with no attributes.
    pub fn new(tag: &str, children: Vec<Node>) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            children,
        }
    }

    /// Adds an attribute, returning the element for chaining.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    /// Returns the value of the named attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the heading level (1-6) if this is an `h1`..`h6` element.
    pub fn heading_level(&self) -> Option<u8> {
        match self.tag.as_str() {
            "h1" => Some(1),
            "h2" => Some(2),
            "h3" => Some(3),
            "h4" => Some(4),
            "h5" => Some(5),
            "h6" => Some(6),
            _ => None,
        }
    }

    /// Returns the flattened text of this element's descendants.
    pub fn text(&self) -> String {
        self.children.iter().map(Node::text).collect()
    }

    /// Returns the direct child elements in order.
    pub fn child_elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(Node::as_element)
    }
}

impl Drop for Element {
    fn drop(&mut self) {
        // Flatten the subtree so dropping a deep tree never recurses
        let mut stack = mem::take(&mut self.children);
        while let Some(node) = stack.pop() {
            if let Node::Element(mut element) = node {
                stack.append(&mut element.children);
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// Iterator for pre-order traversal of nodes.
pub struct PreorderIter<'a> {
    /// Stack of nodes to visit (rightmost children pushed first).
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for PreorderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Node::Element(element) = node {
            // Push children in reverse order so leftmost child is processed first
            self.stack.extend(element.children.iter().rev());
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::element(
            "div",
            vec![
                Node::text_node("a"),
                Node::element("p", vec![Node::text_node("b"), Node::Comment("c".into())]),
                Node::element("h1", vec![Node::text_node("d")]),
            ],
        )
    }

    #[test]
    fn test_flattened_text_skips_comments() {
        assert_eq!(sample().text(), "abd");
    }

    #[test]
    fn test_preorder_traversal() {
        let root = sample();
        let tags: Vec<&str> = root
            .iter_preorder()
            .map(|n| match n {
                Node::Element(e) => e.tag.as_str(),
                Node::Text(t) | Node::Comment(t) => t.as_str(),
            })
            .collect();
        assert_eq!(tags, vec!["div", "a", "p", "b", "c", "h1", "d"]);
    }

    #[test]
    fn test_find_first_includes_self() {
        let node = Node::element("H1", vec![Node::text_node("Title")]);
        let found = node.find_first("h1").unwrap();
        assert_eq!(found.text(), "Title");
        assert!(sample().find_first("h2").is_none());
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(Element::new("h1", vec![]).heading_level(), Some(1));
        assert_eq!(Element::new("H4", vec![]).heading_level(), Some(4));
        assert_eq!(Element::new("header", vec![]).heading_level(), None);
        assert_eq!(Element::new("hr", vec![]).heading_level(), None);
    }

    #[test]
    fn test_attr_lookup() {
        let a = Element::new("a", vec![]).with_attr("href", "#x");
        assert_eq!(a.attr("href"), Some("#x"));
        assert_eq!(a.attr("HREF"), Some("#x"));
        assert_eq!(a.attr("title"), None);
    }

    #[test]
    fn test_deep_tree_drops_without_recursion() {
        let mut node = Node::text_node("leaf");
        for _ in 0..100_000 {
            node = Node::element("div", vec![node]);
        }
        assert_eq!(node.iter_preorder().count(), 100_001);
        drop(node);
    }
}
