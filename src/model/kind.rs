//! Closed classification of rendered elements.

use super::Element;

/// How an element is converted to Markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// h1–h6
    Heading(u8),
    /// p
    Paragraph,
    /// pre (fenced code block)
    Code,
    /// code outside of a preformatted block
    InlineCode,
    /// ul / ol
    List {
        /// Numbered list
        ordered: bool,
    },
    /// table
    Table,
    /// a
    Link,
    /// strong / b / em / i
    Emphasis {
        /// Bold rather than italic
        strong: bool,
    },
    /// img
    Image,
    /// blockquote
    Quote,
    /// hr
    Rule,
    /// br
    Break,
    /// svg (diagram drawing)
    Graphic,
    /// Generic container whose children are converted
    Container,
    /// Contributes nothing
    Excluded,
    /// Any other tag: plain text fallback
    Other,
}

/// Tags that never produce output.
const EXCLUDED_TAGS: &[&str] = &["script", "style", "nav", "button", "noscript", "template"];

/// Classes marking screen-reader-only decorations.
const EXCLUDED_CLASSES: &[&str] = &["sr-only"];

/// Tags treated as generic containers.
const CONTAINER_TAGS: &[&str] = &[
    "div", "section", "article", "span", "main", "body", "html", "figure",
];

impl NodeKind {
    /// Classify an element.
    ///
    /// `in_pre` is true when the element is nested in a preformatted block.
    pub fn classify(element: &Element, in_pre: bool) -> Self {
        let tag = element.tag.as_str();

        if EXCLUDED_TAGS.contains(&tag) || EXCLUDED_CLASSES.iter().any(|c| element.has_class(c)) {
            return NodeKind::Excluded;
        }
        if let Some(level) = element.heading_level() {
            return NodeKind::Heading(level);
        }

        match tag {
            "p" => NodeKind::Paragraph,
            "pre" => NodeKind::Code,
            "code" if in_pre => NodeKind::Other,
            "code" => NodeKind::InlineCode,
            "ul" => NodeKind::List { ordered: false },
            "ol" => NodeKind::List { ordered: true },
            "table" => NodeKind::Table,
            "a" => NodeKind::Link,
            "strong" | "b" => NodeKind::Emphasis { strong: true },
            "em" | "i" => NodeKind::Emphasis { strong: false },
            "img" => NodeKind::Image,
            "blockquote" => NodeKind::Quote,
            "hr" => NodeKind::Rule,
            "br" => NodeKind::Break,
            "svg" => NodeKind::Graphic,
            t if CONTAINER_TAGS.contains(&t) => NodeKind::Container,
            _ => NodeKind::Other,
        }
    }

    /// Block-level kinds start on their own line.
    pub fn is_block(self) -> bool {
        matches!(
            self,
            NodeKind::Heading(_)
                | NodeKind::Paragraph
                | NodeKind::Code
                | NodeKind::List { .. }
                | NodeKind::Table
                | NodeKind::Image
                | NodeKind::Quote
                | NodeKind::Rule
                | NodeKind::Graphic
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(tag: &str) -> NodeKind {
        NodeKind::classify(&Element::new(tag), false)
    }

    #[test]
    fn test_classify_tags() {
        assert_eq!(kind("h3"), NodeKind::Heading(3));
        assert_eq!(kind("p"), NodeKind::Paragraph);
        assert_eq!(kind("ol"), NodeKind::List { ordered: true });
        assert_eq!(kind("b"), NodeKind::Emphasis { strong: true });
        assert_eq!(kind("i"), NodeKind::Emphasis { strong: false });
        assert_eq!(kind("svg"), NodeKind::Graphic);
        assert_eq!(kind("section"), NodeKind::Container);
        assert_eq!(kind("nav"), NodeKind::Excluded);
        assert_eq!(kind("details"), NodeKind::Other);
    }

    #[test]
    fn test_classify_code_context() {
        let code = Element::new("code");
        assert_eq!(NodeKind::classify(&code, false), NodeKind::InlineCode);
        assert_eq!(NodeKind::classify(&code, true), NodeKind::Other);
    }

    #[test]
    fn test_classify_screen_reader_only() {
        let el = Element::new("span").with_class("sr-only");
        assert_eq!(NodeKind::classify(&el, false), NodeKind::Excluded);
    }

    #[test]
    fn test_block_kinds() {
        assert!(NodeKind::Heading(1).is_block());
        assert!(NodeKind::Graphic.is_block());
        assert!(!NodeKind::Link.is_block());
        assert!(!NodeKind::Container.is_block());
    }
}
