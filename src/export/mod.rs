//! Sequential export of a documentation source.
//!
//! Pages are processed one at a time in list order. Per-page failures are
//! logged and counted; sink failures abort the run. The index is written
//! after every page was attempted.
//!
//! # Example
//!
//! ```no_run
//! use unwiki::export::{DirectoryRenderer, ExportOptions, Exporter, FsSink, NullProgress};
//! use unwiki::model::discover_pages;
//!
//! fn main() -> unwiki::Result<()> {
//!     let pages = discover_pages("./saved")?;
//!     let options = ExportOptions::new("acme/widget");
//!     let mut exporter = Exporter::new(DirectoryRenderer::new("./saved"), FsSink::new("./docs"), options);
//!     let summary = exporter.run(&pages, &mut NullProgress)?;
//!     println!("{}/{} pages", summary.succeeded, summary.attempted);
//!     Ok(())
//! }
//! ```

mod renderer;
mod sink;

pub use renderer::{page_id_from_url, DirectoryRenderer, PageRenderer};
#[cfg(feature = "http")]
pub use renderer::HttpRenderer;
pub use sink::{FsSink, MemorySink, Sink};

use crate::diagram::{recover_diagrams, resolve_placeholders, RecoveryOptions};
use crate::error::{Error, Result};
use crate::index::generate_index;
use crate::links::LinkRewriter;
use crate::model::{ContentNode, PageSpec};
use crate::render::{normalize_markdown, to_markdown_with_stats, ExtractionStats, RenderOptions};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default documentation site.
pub const DEFAULT_SITE: &str = "deepwiki.com";

/// Default exported source.
pub const DEFAULT_SOURCE: &str = "rive-app/rive-runtime";

/// File name of the generated table of contents.
pub const INDEX_FILE: &str = "index.md";

/// Options for an export run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Host serving the documentation
    pub site: String,

    /// Source identifier (`owner/repo`)
    pub source: String,

    /// Pause after each page except the last
    pub delay: Duration,

    /// Minimum length of a converted page, in characters
    pub min_content_length: usize,

    /// Markdown rendering options
    pub render: RenderOptions,

    /// Diagram recovery options
    pub recovery: RecoveryOptions,
}

impl ExportOptions {
    /// Create options for exporting `source` with defaults.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    /// Set the documentation site.
    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.site = site.into();
        self
    }

    /// Set the delay between pages.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the minimum converted length.
    pub fn with_min_content_length(mut self, length: usize) -> Self {
        self.min_content_length = length;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set diagram recovery options.
    pub fn with_recovery_options(mut self, options: RecoveryOptions) -> Self {
        self.recovery = options;
        self
    }

    /// Remote URL of a page.
    pub fn page_url(&self, page: &PageSpec) -> String {
        page.url(&self.site, &self.source)
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            site: DEFAULT_SITE.to_string(),
            source: DEFAULT_SOURCE.to_string(),
            delay: Duration::from_secs(1),
            min_content_length: 100,
            render: RenderOptions::default(),
            recovery: RecoveryOptions::default(),
        }
    }
}

/// A converted page, before the source footer is appended.
#[derive(Debug, Clone)]
pub struct ConvertedPage {
    /// Final Markdown
    pub markdown: String,

    /// Conversion statistics
    pub stats: ExtractionStats,

    /// Diagrams found in the content tree
    pub diagrams_expected: usize,

    /// Diagram sources recovered from the raw markup
    pub diagrams_recovered: usize,
}

/// Convert one page's content tree to final Markdown.
///
/// `fetch_raw` is only called when the tree contains diagrams. If it fails,
/// the page is kept and its diagrams are dropped.
pub fn convert_page<F>(root: &ContentNode, fetch_raw: F, options: &ExportOptions) -> Result<ConvertedPage>
where
    F: FnOnce() -> Result<String>,
{
    let result = to_markdown_with_stats(root, &options.render);
    let expected = result.diagram_count();

    let sources = if expected > 0 {
        match fetch_raw() {
            Ok(raw) => recover_diagrams(&raw, &root.heading_texts(), expected, &options.recovery),
            Err(e) => {
                log::warn!("raw markup unavailable, dropping {} diagram(s): {}", expected, e);
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };
    if sources.len() < expected {
        log::warn!("recovered {} of {} diagram(s)", sources.len(), expected);
    }

    let markdown = resolve_placeholders(&result.content, &options.render.placeholder, &sources);
    let markdown = normalize_markdown(&markdown);
    let markdown = LinkRewriter::new(&options.site, &options.source).relativize(&markdown);

    let length = markdown.trim().chars().count();
    if length < options.min_content_length {
        return Err(Error::ContentTooShort {
            length,
            minimum: options.min_content_length,
        });
    }

    Ok(ConvertedPage {
        markdown,
        stats: result.stats,
        diagrams_expected: expected,
        diagrams_recovered: sources.len(),
    })
}

/// Append the source attribution footer.
pub fn with_footer(markdown: &str, url: &str) -> String {
    format!("{}\n\n---\n\n*Source: [{}]({})*\n", markdown, url, url)
}

/// Callbacks for reporting export progress.
pub trait ExportProgress {
    /// Called once with the number of pages.
    fn begin(&mut self, _total: usize) {}

    /// Called before a page is processed.
    fn page_started(&mut self, _index: usize, _page: &PageSpec) {}

    /// Called after a page was written.
    fn page_done(&mut self, _page: &PageSpec, _path: &Path) {}

    /// Called when a page was skipped.
    fn page_failed(&mut self, _page: &PageSpec, _error: &Error) {}

    /// Called at the end of a completed run.
    fn finish(&mut self, _summary: &ExportSummary) {}
}

/// Progress reporter that ignores everything.
pub struct NullProgress;
impl ExportProgress for NullProgress {}

/// A page that could not be exported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageFailure {
    /// Page id
    pub id: String,

    /// Page URL
    pub url: String,

    /// Error message
    pub error: String,
}

/// Outcome of an export run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSummary {
    /// Exported source
    pub source: String,

    /// Pages attempted
    pub attempted: usize,

    /// Pages written
    pub succeeded: usize,

    /// Pages skipped, in list order
    pub failures: Vec<PageFailure>,

    /// Files written relative to the sink root, index included
    pub files_written: Vec<PathBuf>,

    /// Run start
    pub started_at: DateTime<Utc>,

    /// Run end
    pub finished_at: DateTime<Utc>,
}

impl ExportSummary {
    /// Number of skipped pages.
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Whether every page was written.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs an export with one renderer and one sink.
pub struct Exporter<R, S> {
    renderer: R,
    sink: S,
    options: ExportOptions,
}

impl<R: PageRenderer, S: Sink> Exporter<R, S> {
    /// Create an exporter.
    pub fn new(renderer: R, sink: S, options: ExportOptions) -> Self {
        Self {
            renderer,
            sink,
            options,
        }
    }

    /// Export options.
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the exporter and return the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Export all pages, then write the index.
    pub fn run(&mut self, pages: &[PageSpec], progress: &mut dyn ExportProgress) -> Result<ExportSummary> {
        let started_at = Utc::now();
        self.sink.ensure_directory(Path::new(""))?;
        progress.begin(pages.len());

        let mut succeeded = 0;
        let mut failures = Vec::new();
        let mut files_written = Vec::new();

        for (i, page) in pages.iter().enumerate() {
            let url = self.options.page_url(page);
            progress.page_started(i, page);
            log::info!("[{}/{}] {}", i + 1, pages.len(), page.id);

            match self.export_page(page, &url) {
                Ok(path) => {
                    succeeded += 1;
                    progress.page_done(page, &path);
                    files_written.push(path);
                }
                Err(e) if e.is_page_local() => {
                    log::warn!("skipping {}: {}", page.id, e);
                    progress.page_failed(page, &e);
                    failures.push(PageFailure {
                        id: page.id.clone(),
                        url,
                        error: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }

            if i + 1 < pages.len() && !self.options.delay.is_zero() {
                std::thread::sleep(self.options.delay);
            }
        }

        let index_path = PathBuf::from(INDEX_FILE);
        self.sink
            .write(&index_path, &generate_index(&self.options.source, pages))?;
        files_written.push(index_path);

        let summary = ExportSummary {
            source: self.options.source.clone(),
            attempted: pages.len(),
            succeeded,
            failures,
            files_written,
            started_at,
            finished_at: Utc::now(),
        };
        log::info!("exported {}/{} pages", summary.succeeded, summary.attempted);
        progress.finish(&summary);
        Ok(summary)
    }

    fn export_page(&mut self, page: &PageSpec, url: &str) -> Result<PathBuf> {
        let root = self.renderer.render(url)?;
        let renderer = &mut self.renderer;
        let converted = convert_page(&root, || renderer.fetch_raw(url), &self.options)?;
        if converted.diagrams_expected > 0 {
            log::info!(
                "{}: {}/{} diagram(s) recovered",
                page.id,
                converted.diagrams_recovered,
                converted.diagrams_expected
            );
        }

        let path = PathBuf::from(page.file_name());
        self.sink.write(&path, &with_footer(&converted.markdown, url))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn el(tag: &str, children: Vec<ContentNode>) -> ContentNode {
        ContentNode::element(tag, children)
    }

    fn options() -> ExportOptions {
        ExportOptions::new("acme/widget")
            .with_site("site.example")
            .with_min_content_length(0)
    }

    #[test]
    fn test_convert_page_without_diagrams_skips_raw_fetch() {
        let root = el("div", vec![el("p", vec![ContentNode::text("Hello")])]);
        let converted = convert_page(&root, || panic!("no fetch expected"), &options()).unwrap();
        assert_eq!(converted.markdown, "Hello\n\n");
        assert_eq!(converted.diagrams_expected, 0);
    }

    #[test]
    fn test_convert_page_recovers_diagram() {
        let root = el(
            "div",
            vec![
                el("h2", vec![ContentNode::text("Flow")]),
                el("svg", vec![]),
                el("p", vec![ContentNode::text("After")]),
            ],
        );
        let raw = r#"... Flow \"```mermaid\ngraph TD\nA-->B\n```\" ..."#;
        let converted = convert_page(&root, || Ok(raw.to_string()), &options()).unwrap();
        assert_eq!(
            converted.markdown,
            "## Flow\n\n```mermaid\ngraph TD\nA-->B\n```\n\nAfter\n\n"
        );
        assert_eq!(converted.diagrams_recovered, 1);
    }

    #[test]
    fn test_convert_page_raw_failure_strips_placeholder() {
        let root = el("div", vec![el("svg", vec![]), el("p", vec![ContentNode::text("Text")])]);
        let converted = convert_page(
            &root,
            || Err(Error::Fetch("offline".into())),
            &options(),
        )
        .unwrap();
        assert!(!converted.markdown.contains(&options().render.placeholder));
        assert_eq!(converted.markdown, "Text\n\n");
        assert_eq!(converted.diagrams_recovered, 0);
    }

    #[test]
    fn test_convert_page_relativizes_links() {
        let link = crate::model::Element::new("a")
            .with_attr("href", "https://site.example/acme/widget/2.1-intro")
            .with_children(vec![ContentNode::text("intro")])
            .into_node();
        let root = el("div", vec![el("p", vec![ContentNode::text("See ")]), link]);
        let converted = convert_page(&root, || Ok(String::new()), &options()).unwrap();
        assert!(converted.markdown.contains("[intro](./2.1-intro.md)"));
    }

    #[test]
    fn test_convert_page_too_short() {
        let root = el("div", vec![el("p", vec![ContentNode::text("short")])]);
        let err = convert_page(&root, || Ok(String::new()), &options().with_min_content_length(100))
            .unwrap_err();
        assert!(matches!(err, Error::ContentTooShort { length: 5, minimum: 100 }));
    }

    #[test]
    fn test_footer() {
        assert_eq!(
            with_footer("# A\n\n", "https://x/y"),
            "# A\n\n\n\n---\n\n*Source: [https://x/y](https://x/y)*\n"
        );
    }

    #[test]
    fn test_export_options_defaults() {
        let options = ExportOptions::default();
        assert_eq!(options.site, "deepwiki.com");
        assert_eq!(options.delay, Duration::from_secs(1));
        assert_eq!(options.min_content_length, 100);
        assert_eq!(
            options.page_url(&PageSpec::new("1-overview", "Overview")),
            "https://deepwiki.com/rive-app/rive-runtime/1-overview"
        );
    }
}
