//! Content model types for rendered documentation pages.
//!
//! This module defines the intermediate representation that bridges page
//! rendering and Markdown conversion: an owned, read-only content tree,
//! the closed set of node kinds the converter dispatches on, and the
//! externally supplied page list.

mod kind;
mod node;
mod page;

pub use kind::NodeKind;
pub use node::{ContentNode, Element};
pub use page::{discover_pages, extract_title, load_page_list, parse_page_list, PageSpec};
