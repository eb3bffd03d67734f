//! Diagram source recovery and placeholder resolution.
//!
//! Diagrams are drawn as vector graphics, so conversion leaves a placeholder
//! where each one was. Their sources are recovered separately from the raw
//! page markup and joined back by position.

mod recover;
mod unescape;

pub use recover::recover_diagrams;
pub use unescape::unescape_source;

/// Language tag of recovered diagram blocks.
pub const DIAGRAM_LANGUAGE: &str = "mermaid";

/// Options for diagram source recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryOptions {
    /// Bytes after an anchor in which a diagram fence must appear
    pub lookahead: usize,

    /// Bytes kept after the last anchor to catch a trailing diagram
    pub tail_margin: usize,

    /// Escaped fence opening a diagram in the raw payload
    pub fence_marker: String,
}

impl RecoveryOptions {
    /// Create recovery options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the anchor lookahead.
    pub fn with_lookahead(mut self, bytes: usize) -> Self {
        self.lookahead = bytes;
        self
    }

    /// Set the margin after the last anchor.
    pub fn with_tail_margin(mut self, bytes: usize) -> Self {
        self.tail_margin = bytes;
        self
    }
}

impl Default for RecoveryOptions {
    fn default() -> Self {
        Self {
            lookahead: 5000,
            tail_margin: 10000,
            fence_marker: format!("```{}", DIAGRAM_LANGUAGE),
        }
    }
}

/// Replace placeholders with recovered sources, k-th marker with k-th source.
///
/// Markers beyond the number of sources are left in place.
pub fn fill_placeholders(markdown: &str, marker: &str, sources: &[String]) -> String {
    if marker.is_empty() || sources.is_empty() {
        return markdown.to_string();
    }

    let mut out = String::with_capacity(markdown.len());
    let mut sources = sources.iter();

    for (i, part) in markdown.split(marker).enumerate() {
        if i > 0 {
            match sources.next() {
                Some(src) => {
                    out.push_str(&format!("```{}\n{}\n```\n\n", DIAGRAM_LANGUAGE, src));
                }
                None => out.push_str(marker),
            }
        }
        out.push_str(part);
    }

    out
}

/// Remove all remaining placeholders.
pub fn strip_placeholders(markdown: &str, marker: &str) -> String {
    if marker.is_empty() {
        return markdown.to_string();
    }
    markdown.replace(marker, "")
}

/// Fill what was recovered and strip the rest.
pub fn resolve_placeholders(markdown: &str, marker: &str, sources: &[String]) -> String {
    strip_placeholders(&fill_placeholders(markdown, marker, sources), marker)
}
