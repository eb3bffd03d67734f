//! # unwiki
//!
//! Export DeepWiki documentation sites to plain Markdown files.
//!
//! Rendered pages are parsed into a content tree, converted to Markdown,
//! diagram sources are recovered from the raw page markup, same-site links
//! are rewritten to relative file references and an index is generated.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unwiki::{convert_html, ExportOptions};
//!
//! fn main() -> unwiki::Result<()> {
//!     let html = std::fs::read_to_string("1-overview.html")?;
//!     let options = ExportOptions::new("acme/widget").with_min_content_length(0);
//!     let markdown = convert_html(&html, &options)?;
//!     println!("{}", markdown);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Tree conversion**: headings, code blocks, lists, tables, links, quotes
//! - **Diagram recovery**: mermaid sources restored from the page payload
//! - **Link rewriting**: same-site links become `./<page>.md`
//! - **Export runs**: sequential, rate limited, with per-page failure isolation

pub mod diagram;
pub mod error;
pub mod export;
pub mod index;
pub mod links;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use diagram::{fill_placeholders, recover_diagrams, strip_placeholders, RecoveryOptions};
pub use error::{Error, Result};
pub use export::{
    convert_page, ConvertedPage, DirectoryRenderer, ExportOptions, ExportProgress, ExportSummary,
    Exporter, FsSink, MemorySink, NullProgress, PageFailure, PageRenderer, Sink,
};
#[cfg(feature = "http")]
pub use export::HttpRenderer;
pub use index::generate_index;
pub use links::LinkRewriter;
pub use model::{ContentNode, Element, NodeKind, PageSpec};
pub use parser::{ErrorMode, HtmlParser, ParseOptions};
pub use render::{CleanupOptions, JsonFormat, RenderOptions, RenderResult};

/// Convert a saved page to final Markdown.
///
/// The same markup serves as the raw payload for diagram recovery.
///
/// # Example
///
/// ```no_run
/// use unwiki::{convert_html, ExportOptions};
///
/// let html = std::fs::read_to_string("2.1-intro.html").unwrap();
/// let markdown = convert_html(&html, &ExportOptions::new("acme/widget")).unwrap();
/// ```
pub fn convert_html(html: &str, options: &ExportOptions) -> Result<String> {
    let root = HtmlParser::new().parse_content(html)?;
    let converted = convert_page(&root, || Ok(html.to_string()), options)?;
    Ok(converted.markdown)
}

/// Parse a page and serialize its content tree to JSON.
pub fn to_json(html: &str, format: JsonFormat) -> Result<String> {
    let root = HtmlParser::new().parse_content(html)?;
    render::to_json(&root, format)
}

/// Builder for converting single pages.
///
/// # Example
///
/// ```no_run
/// use unwiki::Unwiki;
///
/// let html = std::fs::read_to_string("1-overview.html")?;
/// let markdown = Unwiki::new()
///     .with_source("acme/widget")
///     .lenient()
///     .parse(&html)?
///     .to_markdown()?;
/// # Ok::<(), unwiki::Error>(())
/// ```
pub struct Unwiki {
    parse_options: ParseOptions,
    export_options: ExportOptions,
}

impl Unwiki {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            export_options: ExportOptions::default().with_min_content_length(0),
        }
    }

    /// Fall back to `<body>` when no content container matches.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Try a content selector before the defaults.
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.parse_options = self.parse_options.with_preferred_selector(selector);
        self
    }

    /// Set the source used for link rewriting.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.export_options.source = source.into();
        self
    }

    /// Set the site used for link rewriting.
    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.export_options.site = site.into();
        self
    }

    /// Set the minimum converted length.
    pub fn with_min_content_length(mut self, length: usize) -> Self {
        self.export_options.min_content_length = length;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.export_options.render = options;
        self
    }

    /// Parse a page and return a result wrapper.
    pub fn parse(self, html: &str) -> Result<UnwikiResult> {
        let root = HtmlParser::with_options(self.parse_options).parse_content(html)?;
        Ok(UnwikiResult {
            root,
            raw: html.to_string(),
            export_options: self.export_options,
        })
    }
}

impl Default for Unwiki {
    fn default() -> Self {
        Self::new()
    }
}

/// A parsed page ready for conversion.
pub struct UnwikiResult {
    root: ContentNode,
    raw: String,
    export_options: ExportOptions,
}

impl UnwikiResult {
    /// The parsed content tree.
    pub fn root(&self) -> &ContentNode {
        &self.root
    }

    /// Headings of the page in document order.
    pub fn headings(&self) -> Vec<String> {
        self.root.heading_texts()
    }

    /// Convert to final Markdown, recovering diagrams from the page itself.
    pub fn to_markdown(&self) -> Result<String> {
        let converted = convert_page(&self.root, || Ok(self.raw.clone()), &self.export_options)?;
        Ok(converted.markdown)
    }

    /// Convert to Markdown with the source footer for `url`.
    pub fn to_markdown_with_footer(&self, url: &str) -> Result<String> {
        Ok(export::with_footer(&self.to_markdown()?, url))
    }

    /// Serialize the content tree to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.root, format)
    }

    /// Consume the result and return the content tree.
    pub fn into_root(self) -> ContentNode {
        self.root
    }
}
