//! Integration tests for content tree conversion.

use unwiki::model::{ContentNode, Element};
use unwiki::parser::parse_html;
use unwiki::render::{to_markdown, to_markdown_with_stats, RenderOptions, DEFAULT_PLACEHOLDER};

fn el(tag: &str, children: Vec<ContentNode>) -> ContentNode {
    ContentNode::element(tag, children)
}

fn text(t: &str) -> ContentNode {
    ContentNode::text(t)
}

#[test]
fn test_heading_and_paragraph() {
    let root = el(
        "div",
        vec![el("h1", vec![text("Title")]), el("p", vec![text("Hello world")])],
    );
    assert_eq!(
        to_markdown(&root, &RenderOptions::default()),
        "# Title\n\nHello world\n\n"
    );
}

#[test]
fn test_table() {
    let root = el(
        "table",
        vec![
            el("thead", vec![el("tr", vec![el("th", vec![text("A")]), el("th", vec![text("B")])])]),
            el("tbody", vec![el("tr", vec![el("td", vec![text("1")]), el("td", vec![text("2")])])]),
        ],
    );
    assert_eq!(
        to_markdown(&root, &RenderOptions::default()),
        "| A | B |\n|---|---|\n| 1 | 2 |\n\n"
    );
}

#[test]
fn test_no_placeholder_without_diagrams() {
    let root = el(
        "article",
        vec![
            el("h2", vec![text("Setup")]),
            el("pre", vec![el("code", vec![text("cargo build")])]),
            el("ul", vec![el("li", vec![text("fast")])]),
        ],
    );
    let result = to_markdown_with_stats(&root, &RenderOptions::default());
    assert_eq!(result.diagram_count(), 0);
    assert!(!result.content.contains(DEFAULT_PLACEHOLDER));
}

#[test]
fn test_one_placeholder_per_graphic() {
    let graphic = || el("svg", vec![el("g", vec![text("label")])]);
    let root = el(
        "div",
        vec![
            graphic(),
            el("p", vec![text("between")]),
            el("section", vec![graphic(), graphic()]),
        ],
    );
    let result = to_markdown_with_stats(&root, &RenderOptions::default());
    assert_eq!(result.content.matches(DEFAULT_PLACEHOLDER).count(), 3);
    assert_eq!(result.diagram_count(), 3);
    assert!(!result.content.contains("label"));
}

#[test]
fn test_conversion_is_deterministic_and_read_only() {
    let root = el(
        "div",
        vec![
            el("h3", vec![text("Stage")]),
            Element::new("div")
                .with_class("mermaid")
                .with_children(vec![el("svg", vec![])])
                .into_node(),
        ],
    );
    let snapshot = root.clone();
    let options = RenderOptions::default();
    let first = to_markdown(&root, &options);
    let second = to_markdown(&root, &options);
    assert_eq!(first, second);
    assert_eq!(root, snapshot);
}

#[test]
fn test_custom_placeholder() {
    let options = RenderOptions::default().with_placeholder("@@D@@");
    let root = el("div", vec![el("svg", vec![])]);
    assert_eq!(to_markdown(&root, &options), "@@D@@\n\n");
}

#[test]
fn test_parsed_page() {
    let html = r#"<!DOCTYPE html><html><body>
        <nav><a href="/x">Home</a></nav>
        <div class="prose dark:prose-invert">
          <h1>Rendering</h1>
          <p>The renderer draws   frames.</p>
          <pre><code class="language-cpp">int main() {}
</code></pre>
          <ol><li>Load</li><li>Draw <code>Artboard</code></li></ol>
          <button>Copy</button>
        </div></body></html>"#;

    let root = parse_html(html).unwrap();
    let markdown = to_markdown(&root, &RenderOptions::default());

    assert_eq!(
        markdown,
        "# Rendering\n\nThe renderer draws   frames.\n\n```cpp\nint main() {}\n```\n\n1. Load\n2. Draw Artboard\n\n"
    );
}
