//! Page renderers: where content trees and raw markup come from.

use crate::error::{Error, Result};
use crate::model::ContentNode;
use crate::parser::HtmlParser;
use std::path::{Path, PathBuf};

/// Supplies the rendered content tree and the raw markup of a page.
pub trait PageRenderer {
    /// Render the page and return the tree rooted at its content container.
    fn render(&mut self, url: &str) -> Result<ContentNode>;

    /// Fetch the page's raw markup, in which diagram sources are embedded.
    fn fetch_raw(&mut self, url: &str) -> Result<String>;
}

/// Page id of a URL: its last path segment, without query or fragment.
pub fn page_id_from_url(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.trim_end_matches('/').rsplit('/').next().unwrap_or(path)
}

/// Serves pages saved earlier as `<dir>/<page-id>.html`.
#[derive(Debug, Clone)]
pub struct DirectoryRenderer {
    dir: PathBuf,
    parser: HtmlParser,
}

impl DirectoryRenderer {
    /// Create a renderer reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            parser: HtmlParser::new(),
        }
    }

    /// Use a custom parser.
    pub fn with_parser(mut self, parser: HtmlParser) -> Self {
        self.parser = parser;
        self
    }

    /// Directory the pages are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_page(&self, url: &str) -> Result<String> {
        let path = self.dir.join(format!("{}.html", page_id_from_url(url)));
        std::fs::read_to_string(&path)
            .map_err(|e| Error::Fetch(format!("cannot read {}: {}", path.display(), e)))
    }
}

impl PageRenderer for DirectoryRenderer {
    fn render(&mut self, url: &str) -> Result<ContentNode> {
        let html = self.read_page(url)?;
        self.parser.parse_content(&html)
    }

    fn fetch_raw(&mut self, url: &str) -> Result<String> {
        self.read_page(url)
    }
}

#[cfg(feature = "http")]
pub use self::http::HttpRenderer;

#[cfg(feature = "http")]
mod http {
    use super::PageRenderer;
    use crate::error::{Error, Result};
    use crate::model::ContentNode;
    use crate::parser::HtmlParser;
    use reqwest::blocking::Client;
    use std::time::Duration;

    const USER_AGENT: &str = concat!("unwiki/", env!("CARGO_PKG_VERSION"));

    /// Fetches pages over HTTP.
    ///
    /// Both the content tree and the raw markup come from the server-rendered
    /// response; no scripts are executed.
    #[derive(Debug, Clone)]
    pub struct HttpRenderer {
        client: Client,
        parser: HtmlParser,
    }

    impl HttpRenderer {
        /// Create a renderer with a 30 second request timeout.
        pub fn new() -> Result<Self> {
            Self::with_timeout(Duration::from_secs(30))
        }

        /// Create a renderer with a custom request timeout.
        pub fn with_timeout(timeout: Duration) -> Result<Self> {
            let client = Client::builder()
                .user_agent(USER_AGENT)
                .timeout(timeout)
                .build()
                .map_err(|e| Error::Config(format!("cannot build HTTP client: {}", e)))?;
            Ok(Self {
                client,
                parser: HtmlParser::new(),
            })
        }

        /// Use a custom parser.
        pub fn with_parser(mut self, parser: HtmlParser) -> Self {
            self.parser = parser;
            self
        }

        fn get(&self, url: &str) -> Result<String> {
            let response = self.client.get(url).send()?.error_for_status()?;
            Ok(response.text()?)
        }
    }

    impl PageRenderer for HttpRenderer {
        fn render(&mut self, url: &str) -> Result<ContentNode> {
            let html = self.get(url)?;
            self.parser.parse_content(&html)
        }

        fn fetch_raw(&mut self, url: &str) -> Result<String> {
            self.get(url)
        }
    }
}
