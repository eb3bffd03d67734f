//! HTML parsing into the content tree.

use kuchikikiki::traits::*;
use kuchikikiki::{NodeData, NodeRef};

use crate::error::{Error, Result};
use crate::model::{ContentNode, Element};

use super::{ErrorMode, ParseOptions};

/// Parses rendered HTML and locates the page's content container.
#[derive(Debug, Clone, Default)]
pub struct HtmlParser {
    options: ParseOptions,
}

impl HtmlParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Get the parse options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse a page and return the tree rooted at its content container.
    pub fn parse_content(&self, html: &str) -> Result<ContentNode> {
        let document = kuchikikiki::parse_html().one(html);

        for selector in &self.options.content_selectors {
            let mut matches = document
                .select(selector)
                .map_err(|()| Error::Config(format!("invalid content selector: {}", selector)))?;
            if let Some(found) = matches.next() {
                log::debug!("content container matched '{}'", selector);
                return convert_node(found.as_node())
                    .ok_or_else(|| Error::MissingContent(selector.clone()));
            }
        }

        if self.options.error_mode == ErrorMode::Lenient {
            if let Ok(body) = document.select_first("body") {
                log::debug!("no content container matched, using <body>");
                if let Some(node) = convert_node(body.as_node()) {
                    return Ok(node);
                }
            }
        }

        Err(Error::MissingContent(self.options.content_selectors.join(", ")))
    }
}

/// Convert a DOM node into an owned content node.
///
/// Comments, doctypes and processing instructions are dropped.
fn convert_node(node: &NodeRef) -> Option<ContentNode> {
    match node.data() {
        NodeData::Element(data) => {
            let mut element = Element::new(data.name.local.to_string());
            element.attributes = data
                .attributes
                .borrow()
                .map
                .iter()
                .map(|(name, attr)| (name.local.to_string(), attr.value.clone()))
                .collect();
            element.children = node.children().filter_map(|c| convert_node(&c)).collect();
            Some(element.into_node())
        }
        NodeData::Text(text) => Some(ContentNode::text(text.borrow().clone())),
        _ => None,
    }
}

/// Parse a page's content container with default options.
pub fn parse_html(html: &str) -> Result<ContentNode> {
    HtmlParser::new().parse_content(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>T</title><script>var x = 1;</script></head>
<body>
  <nav>menu</nav>
  <div class="prose dark:prose-invert">
    <h1>Overview</h1>
    <!-- comment -->
    <p>Hello <a href="https://deepwiki.com/acme/widget/2-api">API</a></p>
  </div>
</body></html>"#;

    #[test]
    fn test_parse_content_container() {
        let root = parse_html(PAGE).unwrap();
        let el = root.as_element().unwrap();
        assert_eq!(el.tag, "div");
        assert!(el.has_class("prose"));
        assert_eq!(root.heading_texts(), vec!["Overview"]);
        assert!(root.text_content().contains("Hello API"));
        assert!(!root.text_content().contains("menu"));
    }

    #[test]
    fn test_attributes_preserved() {
        let root = parse_html(PAGE).unwrap();
        let links = root
            .as_element()
            .unwrap()
            .descendants_where(&|e| e.tag == "a");
        assert_eq!(links.len(), 1);
        assert_eq!(
            links[0].attr("href"),
            Some("https://deepwiki.com/acme/widget/2-api")
        );
    }

    #[test]
    fn test_missing_container_strict() {
        let result = parse_html("<html><body><p>No container</p></body></html>");
        assert!(matches!(result, Err(Error::MissingContent(_))));
    }

    #[test]
    fn test_missing_container_lenient() {
        let parser = HtmlParser::with_options(ParseOptions::new().lenient());
        let root = parser
            .parse_content("<html><body><p>No container</p></body></html>")
            .unwrap();
        assert_eq!(root.as_element().unwrap().tag, "body");
    }

    #[test]
    fn test_invalid_selector() {
        let parser = HtmlParser::with_options(ParseOptions::new().with_selectors(["[[["]));
        assert!(matches!(
            parser.parse_content(PAGE),
            Err(Error::Config(_))
        ));
    }
}
