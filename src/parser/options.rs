//! Parsing options and configuration.

/// Options for parsing rendered HTML pages.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// CSS selectors for the content container, tried in order
    pub content_selectors: Vec<String>,

    /// Error handling mode when no content container matches
    pub error_mode: ErrorMode,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the content container selectors.
    pub fn with_selectors<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content_selectors = selectors.into_iter().map(Into::into).collect();
        self
    }

    /// Try an additional selector before the configured ones.
    pub fn with_preferred_selector(mut self, selector: impl Into<String>) -> Self {
        self.content_selectors.insert(0, selector.into());
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (fall back to `<body>` when no container matches).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            content_selectors: vec![
                "[class*=\"prose\"]".to_string(),
                "article".to_string(),
                "main".to_string(),
            ],
            error_mode: ErrorMode::Strict,
        }
    }
}

/// Error handling mode when the content container is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail with a missing-content error
    #[default]
    Strict,
    /// Use the document body instead
    Lenient,
}
