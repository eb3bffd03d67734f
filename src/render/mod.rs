//! Rendering module for converting content trees to Markdown and JSON.

mod cleanup;
mod json;
mod markdown;
mod options;
mod result;

pub use cleanup::{normalize_markdown, CleanupOptions, CleanupPipeline};
pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, to_markdown_with_stats, MarkdownRenderer};
pub use options::{RenderOptions, DEFAULT_PLACEHOLDER};
pub use result::{ExtractionStats, RenderResult};
