//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

/// Result of converting a content tree, including statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The Markdown content, possibly containing diagram placeholders
    pub content: String,

    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: ExtractionStats) -> Self {
        Self { content, stats }
    }

    /// Number of diagram placeholders emitted during conversion.
    pub fn diagram_count(&self) -> usize {
        self.stats.diagram_count as usize
    }
}

/// Statistics collected during conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of headings
    pub heading_count: u32,

    /// Number of paragraphs
    pub paragraph_count: u32,

    /// Number of fenced code blocks
    pub code_block_count: u32,

    /// Number of list items
    pub list_item_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of links
    pub link_count: u32,

    /// Number of images
    pub image_count: u32,

    /// Number of diagram placeholders
    pub diagram_count: u32,

    /// Number of paragraphs dropped as leaked stylesheets
    pub suppressed_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.code_block_count += other.code_block_count;
        self.list_item_count += other.list_item_count;
        self.table_count += other.table_count;
        self.link_count += other.link_count;
        self.image_count += other.image_count;
        self.diagram_count += other.diagram_count;
        self.suppressed_count += other.suppressed_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
