//! Rendering options and configuration.

use super::CleanupOptions;

/// Default in-band marker for diagrams whose source is resolved later.
pub const DEFAULT_PLACEHOLDER: &str = "<!-- unwiki:diagram -->";

/// Options for converting a content tree to Markdown.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Marker inserted where a diagram was drawn
    pub placeholder: String,

    /// Class name fragments identifying diagram containers (e.g., "mermaid")
    pub diagram_class_markers: Vec<String>,

    /// Text prefixes of diagram stylesheets leaked into the content (e.g., "#mermaid-")
    pub stylesheet_prefixes: Vec<String>,

    /// Text fragments of leaked stylesheets (e.g., "font-family:")
    pub stylesheet_markers: Vec<String>,

    /// Text cleanup options
    pub cleanup: Option<CleanupOptions>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder marker.
    pub fn with_placeholder(mut self, marker: impl Into<String>) -> Self {
        self.placeholder = marker.into();
        self
    }

    /// Add a class fragment identifying diagram containers.
    pub fn with_diagram_class(mut self, marker: impl Into<String>) -> Self {
        self.diagram_class_markers.push(marker.into());
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = Some(cleanup);
        self
    }

    /// Disable the cleanup pipeline.
    pub fn without_cleanup(mut self) -> Self {
        self.cleanup = None;
        self
    }

    /// Check whether text is a diagram stylesheet that leaked into the content.
    pub fn is_leaked_stylesheet(&self, text: &str) -> bool {
        let text = text.trim_start();
        self.stylesheet_prefixes.iter().any(|p| text.starts_with(p.as_str()))
            || self.stylesheet_markers.iter().any(|m| text.contains(m.as_str()))
    }

    /// Check whether a class name marks a diagram container.
    pub fn is_diagram_class(&self, class: &str) -> bool {
        let class = class.to_ascii_lowercase();
        self.diagram_class_markers
            .iter()
            .any(|m| class.contains(&m.to_ascii_lowercase()))
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            diagram_class_markers: vec!["mermaid".to_string()],
            stylesheet_prefixes: vec!["#mermaid-".to_string()],
            stylesheet_markers: vec!["font-family:".to_string()],
            cleanup: Some(CleanupOptions::default()),
        }
    }
}
