//! Error types for unwiki library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for unwiki operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while exporting documentation pages.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The page could not be fetched or rendered.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// The rendered page has no content container.
    #[error("Content container not found: {0}")]
    MissingContent(String),

    /// The converted page is too short to be real content.
    #[error("Content too short: {length} characters (minimum {minimum})")]
    ContentTooShort {
        /// Length of the converted Markdown
        length: usize,
        /// Configured minimum length
        minimum: usize,
    },

    /// Error parsing HTML markup or a page list.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Error during rendering (Markdown, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// The output sink failed to create a directory or write a file.
    #[error("Cannot write {}: {source}", path.display())]
    Sink {
        /// Path that could not be written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Invalid configuration or page list.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error only affects the page being processed.
    ///
    /// Page-local errors are logged and counted; everything else aborts the run.
    pub fn is_page_local(&self) -> bool {
        matches!(
            self,
            Error::Fetch(_) | Error::MissingContent(_) | Error::ContentTooShort { .. } | Error::Parse(_)
        )
    }

    pub(crate) fn sink(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Sink {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Fetch(err.to_string())
    }
}
