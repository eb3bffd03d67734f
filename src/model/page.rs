//! Page list types.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>([^<]+)</title>").expect("valid title regex"));

static TITLE_SUFFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\|\s*DeepWiki.*$").expect("valid suffix regex"));

/// One documentation page to export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSpec {
    /// Slug used as URL path segment and output file stem (e.g., "2.3-rendering")
    pub id: String,

    /// Human-readable title
    pub title: String,
}

impl PageSpec {
    /// Create a new page spec.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }

    /// Nesting depth: the number of dots in the section number before the first `-`.
    ///
    /// `"2-foo"` is 0, `"2.3-foo"` is 1, `"10.4.1-bar"` is 2.
    pub fn depth(&self) -> usize {
        let section = self.id.split('-').next().unwrap_or("");
        section.matches('.').count()
    }

    /// Remote URL of this page.
    pub fn url(&self, site: &str, source: &str) -> String {
        format!("https://{}/{}/{}", site, source, self.id)
    }

    /// Output file name (`<id>.md`).
    pub fn file_name(&self) -> String {
        format!("{}.md", self.id)
    }
}

/// Load an ordered page list from a JSON array of `{"id", "title"}` objects.
pub fn load_page_list<P: AsRef<Path>>(path: P) -> Result<Vec<PageSpec>> {
    let data = std::fs::read_to_string(path.as_ref())?;
    parse_page_list(&data)
}

/// Parse an ordered page list from JSON.
pub fn parse_page_list(json: &str) -> Result<Vec<PageSpec>> {
    let pages: Vec<PageSpec> = serde_json::from_str(json)?;
    if let Some(page) = pages.iter().find(|p| p.id.trim().is_empty()) {
        return Err(Error::Config(format!("page '{}' has an empty id", page.title)));
    }
    Ok(pages)
}

/// Build a page list from a directory of saved `<id>.html` pages.
///
/// Titles come from each page's `<title>` element with the site suffix removed,
/// falling back to the id. Pages are ordered by id.
pub fn discover_pages<P: AsRef<Path>>(dir: P) -> Result<Vec<PageSpec>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::Config(format!(
            "not a directory: {}",
            dir.display()
        )));
    }

    let mut pages = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("html") {
            continue;
        }
        let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let html = std::fs::read_to_string(&path)?;
        let title = extract_title(&html).unwrap_or_else(|| id.to_string());
        pages.push(PageSpec::new(id, title));
    }

    pages.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(pages)
}

/// Extract a page title from `<title>`, removing a trailing "| DeepWiki" suffix.
pub fn extract_title(html: &str) -> Option<String> {
    let raw = TITLE_REGEX.captures(html)?.get(1)?.as_str();
    let title = TITLE_SUFFIX_REGEX.replace(raw.trim(), "");
    let title = title.trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth() {
        assert_eq!(PageSpec::new("2-foo", "").depth(), 0);
        assert_eq!(PageSpec::new("2.3-foo", "").depth(), 1);
        assert_eq!(PageSpec::new("10.4-bar", "").depth(), 1);
        assert_eq!(PageSpec::new("1.2.3-deep", "").depth(), 2);
        assert_eq!(PageSpec::new("overview", "").depth(), 0);
    }

    #[test]
    fn test_url_and_file_name() {
        let page = PageSpec::new("2.1-intro", "Intro");
        assert_eq!(
            page.url("deepwiki.com", "acme/widget"),
            "https://deepwiki.com/acme/widget/2.1-intro"
        );
        assert_eq!(page.file_name(), "2.1-intro.md");
    }

    #[test]
    fn test_parse_page_list() {
        let pages =
            parse_page_list(r#"[{"id":"1-overview","title":"Overview"},{"id":"1.1-setup","title":"Setup"}]"#)
                .unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1], PageSpec::new("1.1-setup", "Setup"));
    }

    #[test]
    fn test_parse_page_list_rejects_empty_id() {
        let result = parse_page_list(r#"[{"id":" ","title":"Broken"}]"#);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_page_list_invalid_json() {
        assert!(matches!(parse_page_list("{"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_extract_title() {
        let html = "<html><head><title>Runtime Overview | DeepWiki | acme</title></head></html>";
        assert_eq!(extract_title(html), Some("Runtime Overview".to_string()));
        assert_eq!(extract_title("<title> | DeepWiki</title>"), None);
        assert_eq!(extract_title("<p>no title</p>"), None);
    }

    #[test]
    fn test_discover_pages() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("2-api.html"),
            "<title>API | DeepWiki</title>",
        )
        .unwrap();
        std::fs::write(dir.path().join("1-overview.html"), "<p>untitled</p>").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let pages = discover_pages(dir.path()).unwrap();
        assert_eq!(
            pages,
            vec![
                PageSpec::new("1-overview", "1-overview"),
                PageSpec::new("2-api", "API"),
            ]
        );
    }
}
