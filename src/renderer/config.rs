//! Output options for the SVG renderer

/// How the store map SVG is written out
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Write a standalone document: XML declaration plus one element per line.
    /// When off, the map is a single-line fragment for inlining into HTML.
    pub standalone: bool,

    /// Prepended to every CSS class (`sl-` gives `sl-cell`, `sl-success`)
    pub class_prefix: String,

    /// Whether to draw the `Store Layout - <name>` title
    pub show_title: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            standalone: true,
            class_prefix: "sl-".to_string(),
            show_title: true,
        }
    }
}

impl SvgConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-line fragment without the XML declaration
    pub fn inline() -> Self {
        Self {
            standalone: false,
            ..Self::default()
        }
    }

    /// Set the CSS class prefix; an empty prefix leaves class names bare
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    /// Set whether the store title is drawn
    pub fn with_title(mut self, show: bool) -> Self {
        self.show_title = show;
        self
    }
}
