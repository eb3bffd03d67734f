//! Rendered content tree.

use serde::{Deserialize, Serialize};

/// A node of a rendered page.
///
/// The converter only reads this tree; it never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentNode {
    /// An element with a tag, attributes and children
    Element(Element),
    /// A bare text node
    Text {
        /// Text content
        text: String,
    },
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Lowercase tag name (e.g., "div", "h2")
    pub tag: String,

    /// Attributes in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<(String, String)>,

    /// Child nodes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ContentNode>,
}

impl ContentNode {
    /// Create an element node without attributes.
    pub fn element(tag: impl Into<String>, children: Vec<ContentNode>) -> Self {
        ContentNode::Element(Element::new(tag).with_children(children))
    }

    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        ContentNode::Text { text: text.into() }
    }

    /// Get the element data if this is an element.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            ContentNode::Element(e) => Some(e),
            ContentNode::Text { .. } => None,
        }
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out, &|_| true);
        out
    }

    /// Text of the subtree, skipping elements rejected by `descend`.
    pub(crate) fn collect_text(&self, out: &mut String, descend: &dyn Fn(&Element) -> bool) {
        match self {
            ContentNode::Text { text } => out.push_str(text),
            ContentNode::Element(e) => {
                if descend(e) {
                    for child in &e.children {
                        child.collect_text(out, descend);
                    }
                }
            }
        }
    }

    /// Texts of all h1–h6 elements in pre-order.
    pub fn heading_texts(&self) -> Vec<String> {
        let mut headings = Vec::new();
        self.walk_headings(&mut headings);
        headings
    }

    fn walk_headings(&self, out: &mut Vec<String>) {
        if let ContentNode::Element(e) = self {
            if e.heading_level().is_some() {
                let text = self.text_content();
                let text = text.trim();
                if !text.is_empty() {
                    out.push(text.to_string());
                }
                return;
            }
            for child in &e.children {
                child.walk_headings(out);
            }
        }
    }
}

impl Element {
    /// Create a new element with no attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Set the class attribute.
    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attr("class", class)
    }

    /// Set the children.
    pub fn with_children(mut self, children: Vec<ContentNode>) -> Self {
        self.children = children;
        self
    }

    /// Wrap into a [`ContentNode`].
    pub fn into_node(self) -> ContentNode {
        ContentNode::Element(self)
    }

    /// Get an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Whitespace-separated class names.
    pub fn class_list(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    /// Check for an exact class name.
    pub fn has_class(&self, class: &str) -> bool {
        self.class_list().any(|c| c == class)
    }

    /// Heading level for h1–h6.
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

    /// Child elements, skipping text nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(ContentNode::as_element)
    }

    /// Text content of the element.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out, &|_| true);
        }
        out
    }

    /// All descendant elements in pre-order matching `pred`.
    pub fn descendants_where<'a>(&'a self, pred: &dyn Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut out = Vec::new();
        self.collect_descendants(pred, &mut out);
        out
    }

    fn collect_descendants<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        for child in self.child_elements() {
            if pred(child) {
                out.push(child);
            }
            child.collect_descendants(pred, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ContentNode {
        ContentNode::element(
            "div",
            vec![
                ContentNode::element("h1", vec![ContentNode::text(" Overview ")]),
                ContentNode::element(
                    "section",
                    vec![
                        ContentNode::element("h2", vec![ContentNode::text("Details")]),
                        ContentNode::element("p", vec![ContentNode::text("Body")]),
                    ],
                ),
                ContentNode::element("h3", vec![ContentNode::text("   ")]),
            ],
        )
    }

    #[test]
    fn test_text_content() {
        assert_eq!(sample().text_content(), " Overview DetailsBody   ");
    }

    #[test]
    fn test_heading_texts_preorder() {
        assert_eq!(sample().heading_texts(), vec!["Overview", "Details"]);
    }

    #[test]
    fn test_class_list() {
        let el = Element::new("DIV").with_class("mermaid  diagram");
        assert_eq!(el.tag, "div");
        assert!(el.has_class("mermaid"));
        assert!(el.has_class("diagram"));
        assert!(!el.has_class("merm"));
        assert_eq!(el.attr("CLASS"), Some("mermaid  diagram"));
    }
}
