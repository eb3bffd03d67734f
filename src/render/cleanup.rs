//! Markdown normalization and text cleanup.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{4,}").expect("valid newline regex"));

/// Normalize assembled Markdown.
///
/// Collapses runs of four or more newlines to exactly two and makes sure a
/// blank line precedes every heading line outside fenced code blocks.
/// Leading whitespace of the document is removed.
pub fn normalize_markdown(text: &str) -> String {
    let collapsed = EXCESS_NEWLINES.replace_all(text, "\n\n");

    let mut out = String::with_capacity(collapsed.len() + 16);
    let mut in_fence = false;
    let mut prev_blank = true;

    for (i, line) in collapsed.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
        } else if !in_fence && !prev_blank && is_heading_line(line) {
            out.push('\n');
        }
        out.push_str(line);
        prev_blank = line.trim().is_empty();
    }

    out.trim_start().to_string()
}

/// A Markdown ATX heading line (`#`..`######` followed by a space).
fn is_heading_line(line: &str) -> bool {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    (1..=6).contains(&hashes) && line[hashes..].starts_with(' ')
}

/// Options for text cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Remove trailing spaces and tabs from every line
    pub trim_trailing_whitespace: bool,

    /// Replace non-breaking spaces with regular spaces
    pub replace_nbsp: bool,
}

impl CleanupOptions {
    /// No cleanup at all.
    pub fn none() -> Self {
        Self {
            normalize_unicode: false,
            trim_trailing_whitespace: false,
            replace_nbsp: false,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            trim_trailing_whitespace: true,
            replace_nbsp: true,
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Text cleanup pipeline applied after normalization.
pub struct CleanupPipeline {
    options: CleanupOptions,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self { options }
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut result = if self.options.normalize_unicode {
            text.nfc().collect::<String>()
        } else {
            text.to_string()
        };

        if self.options.replace_nbsp {
            result = result.replace('\u{00A0}', " ");
        }

        if self.options.trim_trailing_whitespace {
            result = result
                .split('\n')
                .map(|line| line.trim_end_matches([' ', '\t']))
                .collect::<Vec<_>>()
                .join("\n");
        }

        result
    }
}
