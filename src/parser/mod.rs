//! HTML parsing module.

mod html;
mod options;

pub use html::{parse_html, HtmlParser};
pub use options::{ErrorMode, ParseOptions};
