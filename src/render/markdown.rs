//! Markdown rendering for content trees.
//!
//! Conversion is a fold over the tree: every node renders to an immutable
//! [`Rendered`] value assembled from its children's results, so any subtree
//! can be converted and tested on its own.

use crate::model::{ContentNode, Element, NodeKind};

use super::cleanup::normalize_markdown;
use super::{CleanupPipeline, ExtractionStats, RenderOptions, RenderResult};

/// Convert a content tree to Markdown.
///
/// The result may contain diagram placeholders; see [`crate::diagram`].
pub fn to_markdown(root: &ContentNode, options: &RenderOptions) -> String {
    MarkdownRenderer::new(options.clone()).render(root).content
}

/// Convert a content tree to Markdown with statistics.
pub fn to_markdown_with_stats(root: &ContentNode, options: &RenderOptions) -> RenderResult {
    MarkdownRenderer::new(options.clone()).render(root)
}

/// Output of converting one subtree.
#[derive(Debug, Clone, Default)]
struct Rendered {
    text: String,
    stats: ExtractionStats,
}

impl Rendered {
    fn empty() -> Self {
        Self::default()
    }

    fn text(text: String) -> Self {
        Self {
            text,
            stats: ExtractionStats::default(),
        }
    }

    fn counted(text: String, count: impl FnOnce(&mut ExtractionStats)) -> Self {
        let mut stats = ExtractionStats::default();
        count(&mut stats);
        Self { text, stats }
    }
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a content tree rooted at the page's content container.
    ///
    /// An empty root yields an empty string.
    pub fn render(&self, root: &ContentNode) -> RenderResult {
        let rendered = match root {
            ContentNode::Element(el) => self.render_element(el),
            ContentNode::Text { text } => Rendered::text(text.trim().to_string()),
        };

        let mut content = normalize_markdown(&rendered.text);
        if let Some(ref cleanup_options) = self.options.cleanup {
            content = CleanupPipeline::new(cleanup_options.clone()).process(&content);
        }

        let mut stats = rendered.stats;
        stats.count_text(&content);
        RenderResult::new(content, stats)
    }

    fn render_element(&self, el: &Element) -> Rendered {
        self.render_kind(el, NodeKind::classify(el, false))
    }

    fn render_kind(&self, el: &Element, kind: NodeKind) -> Rendered {
        match kind {
            NodeKind::Heading(level) => self.render_heading(el, level),
            NodeKind::Paragraph => self.render_paragraph(el),
            NodeKind::Code => self.render_code_block(el),
            NodeKind::InlineCode => wrap_text(el, "`"),
            NodeKind::List { ordered } => self.render_list(el, ordered),
            NodeKind::Table => self.render_table(el),
            NodeKind::Link => self.render_link(el),
            NodeKind::Emphasis { strong: true } => wrap_text(el, "**"),
            NodeKind::Emphasis { strong: false } => wrap_text(el, "*"),
            NodeKind::Image => self.render_image(el),
            NodeKind::Quote => self.render_quote(el),
            NodeKind::Rule => Rendered::text("---\n\n".to_string()),
            NodeKind::Break => Rendered::text("\n".to_string()),
            NodeKind::Graphic => self.placeholder(),
            NodeKind::Container => {
                if el.class_list().any(|c| self.options.is_diagram_class(c)) {
                    self.placeholder()
                } else {
                    self.render_children(el)
                }
            }
            NodeKind::Excluded => Rendered::empty(),
            NodeKind::Other => {
                let text = el.text_content();
                let text = text.trim();
                if text.is_empty() {
                    Rendered::empty()
                } else {
                    Rendered::text(format!("{} ", text))
                }
            }
        }
    }

    fn render_children(&self, el: &Element) -> Rendered {
        let mut acc = Rendered::empty();

        for child in &el.children {
            match child {
                ContentNode::Text { text } => {
                    let text = text.trim();
                    if !text.is_empty() {
                        acc.text.push_str(text);
                        acc.text.push(' ');
                    }
                }
                ContentNode::Element(child_el) => {
                    let kind = NodeKind::classify(child_el, false);
                    let rendered = self.render_kind(child_el, kind);
                    acc.stats.merge(&rendered.stats);
                    if rendered.text.is_empty() {
                        continue;
                    }
                    // Blocks never continue a line of inline text.
                    if kind.is_block() && !acc.text.is_empty() && !acc.text.ends_with('\n') {
                        let trimmed = acc.text.trim_end_matches(' ').len();
                        acc.text.truncate(trimmed);
                        acc.text.push_str("\n\n");
                    }
                    acc.text.push_str(&rendered.text);
                }
            }
        }

        acc
    }

    fn render_heading(&self, el: &Element, level: u8) -> Rendered {
        let text = el.text_content();
        let text = text.trim();
        if text.is_empty() {
            return Rendered::empty();
        }
        Rendered::counted(
            format!("{} {}\n\n", "#".repeat(level as usize), text),
            |s| s.heading_count += 1,
        )
    }

    fn render_paragraph(&self, el: &Element) -> Rendered {
        let text = el.text_content();
        let text = text.trim();
        if text.is_empty() {
            return Rendered::empty();
        }
        if self.options.is_leaked_stylesheet(text) {
            log::debug!("suppressed leaked stylesheet paragraph ({} bytes)", text.len());
            return Rendered::counted(String::new(), |s| s.suppressed_count += 1);
        }
        Rendered::counted(format!("{}\n\n", text), |s| s.paragraph_count += 1)
    }

    fn render_code_block(&self, el: &Element) -> Rendered {
        let text = el.text_content();
        if self.options.is_leaked_stylesheet(&text) {
            return self.placeholder();
        }

        let language = el
            .descendants_where(&|e| e.tag == "code")
            .first()
            .and_then(|code| {
                code.class_list()
                    .find_map(|c| c.strip_prefix("language-"))
                    .map(str::to_string)
            })
            .unwrap_or_default();

        Rendered::counted(
            format!("```{}\n{}\n```\n\n", language, text.trim_end()),
            |s| s.code_block_count += 1,
        )
    }

    /// Only direct items are rendered; nested lists are dropped, not flattened
    /// into their parent item. This is a known limitation kept for
    /// compatibility with previously exported documents.
    fn render_list(&self, el: &Element, ordered: bool) -> Rendered {
        let mut out = String::new();
        let mut items = 0;

        for item in el.child_elements().filter(|c| c.tag == "li") {
            let text = item_text(item);
            if text.is_empty() {
                continue;
            }
            items += 1;
            if ordered {
                out.push_str(&format!("{}. {}\n", items, text));
            } else {
                out.push_str(&format!("- {}\n", text));
            }
        }

        if items == 0 {
            return Rendered::empty();
        }
        out.push('\n');
        Rendered::counted(out, |s| s.list_item_count += items)
    }

    fn render_table(&self, el: &Element) -> Rendered {
        let rows: Vec<Vec<String>> = el
            .descendants_where(&|e| e.tag == "tr")
            .into_iter()
            .map(|row| {
                row.child_elements()
                    .filter(|c| c.tag == "th" || c.tag == "td")
                    .map(|cell| collapse_whitespace(&cell.text_content()))
                    .collect::<Vec<_>>()
            })
            .filter(|cells| !cells.is_empty())
            .collect();

        let Some(first) = rows.first() else {
            return Rendered::empty();
        };
        let col_count = first.len();

        let mut out = String::new();
        for (i, cells) in rows.iter().enumerate() {
            out.push_str("| ");
            out.push_str(&cells.join(" | "));
            out.push_str(" |\n");
            if i == 0 {
                out.push('|');
                out.push_str(&"---|".repeat(col_count));
                out.push('\n');
            }
        }
        out.push('\n');

        Rendered::counted(out, |s| s.table_count += 1)
    }

    fn render_link(&self, el: &Element) -> Rendered {
        let text = el.text_content();
        let text = text.trim();
        let href = el.attr("href").unwrap_or("");
        if text.is_empty() && href.is_empty() {
            return Rendered::empty();
        }
        Rendered::counted(format!("[{}]({})", text, href), |s| s.link_count += 1)
    }

    fn render_image(&self, el: &Element) -> Rendered {
        let alt = el.attr("alt").filter(|a| !a.trim().is_empty()).unwrap_or("image");
        let src = el.attr("src").unwrap_or("");
        Rendered::counted(format!("![{}]({})\n\n", alt, src), |s| s.image_count += 1)
    }

    fn render_quote(&self, el: &Element) -> Rendered {
        let text = el.text_content();
        let text = text.trim();
        if text.is_empty() {
            return Rendered::empty();
        }
        let quoted = text
            .lines()
            .map(|line| format!("> {}", line))
            .collect::<Vec<_>>()
            .join("\n");
        Rendered::text(format!("{}\n\n", quoted))
    }

    fn placeholder(&self) -> Rendered {
        Rendered::counted(format!("\n\n{}\n\n", self.options.placeholder), |s| {
            s.diagram_count += 1
        })
    }
}

/// Wrap an element's trimmed text in a delimiter (inline code, emphasis).
fn wrap_text(el: &Element, delimiter: &str) -> Rendered {
    let text = el.text_content();
    let text = text.trim();
    if text.is_empty() {
        Rendered::empty()
    } else {
        Rendered::text(format!("{delimiter}{text}{delimiter}"))
    }
}

/// Text of a list item, excluding nested lists.
fn item_text(item: &Element) -> String {
    let mut out = String::new();
    for child in &item.children {
        child.collect_text(&mut out, &|e| e.tag != "ul" && e.tag != "ol");
    }
    collapse_whitespace(&out)
}

/// Collapse whitespace runs to single spaces and trim.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
