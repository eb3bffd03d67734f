//! Table of contents generation.

use crate::model::PageSpec;

/// Generate the `index.md` table of contents for an exported source.
///
/// Entries keep the supplied order. Nested pages are indented a single
/// level regardless of how deep their section number goes.
pub fn generate_index(source: &str, pages: &[PageSpec]) -> String {
    let mut md = format!("# {} - DeepWiki Documentation\n\n", source);
    md.push_str("This documentation was exported from [DeepWiki](https://deepwiki.com).\n\n");
    md.push_str("## Table of Contents\n\n");

    for page in pages {
        let indent = if page.depth() == 0 { "" } else { "  " };
        md.push_str(&format!("{}- [{}](./{})\n", indent, page.title, page.file_name()));
    }

    md
}
