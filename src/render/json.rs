//! JSON rendering for content trees.

use crate::error::{Error, Result};
use crate::model::ContentNode;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a content tree to JSON.
pub fn to_json(node: &ContentNode, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(node),
        JsonFormat::Compact => serde_json::to_string(node),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
