//! Store Layout - floor-plan geometry for store maps
//!
//! This library loads a declarative store layout (aisles, trolley bays and
//! product sections on a unit grid), places every element in pixel space,
//! and renders the result as SVG. It also tracks the hover and selection
//! state of an interactive map.
//!
//! # Example
//!
//! ```rust
//! use store_layout::render;
//!
//! let svg = render(r#"{"storeName": "Store 001", "elements": []}"#).unwrap();
//! assert!(svg.contains("<svg"));
//! ```

pub mod error;
pub mod layout;
pub mod model;
pub mod renderer;
pub mod selection;
pub mod status;

pub use error::LoadError;
pub use layout::{
    compute, EmptyReason, LayoutConfig, LayoutOutcome, LayoutResult, SectionPlacement,
};
pub use model::{parse_layout, Layout};
pub use renderer::{render_empty_svg, render_svg, SvgConfig};
pub use selection::{DetailView, SelectionState};
pub use status::Palette;

use thiserror::Error;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// The layout document could not be read
    #[error("load error: {0}")]
    Load(#[from] LoadError),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Layout configuration
    pub layout: LayoutConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Colors for status categories and map chrome
    pub palette: Palette,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout configuration
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the palette
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}

/// Render a JSON layout document to SVG with default configuration
///
/// A `null` document, or one without an element list, renders the
/// empty-state picture rather than failing.
pub fn render(source: &str) -> Result<String, RenderError> {
    render_with_config(source, RenderConfig::default())
}

/// Render a JSON layout document to SVG with custom configuration
///
/// # Example
///
/// ```rust
/// use store_layout::{render_with_config, LayoutConfig, RenderConfig, SvgConfig};
///
/// let config = RenderConfig::new()
///     .with_layout(LayoutConfig::default().with_cell_size(40.0))
///     .with_svg(SvgConfig::default().with_title(false));
///
/// let svg = render_with_config(
///     r#"{"storeName": "S", "elements": [{"type": "aisle", "id": "a1", "number": 1,
///         "posX": 0, "posY": 0, "width": 4, "height": 1}]}"#,
///     config,
/// )
/// .unwrap();
/// assert!(svg.contains("Aisle 1"));
/// ```
pub fn render_with_config(source: &str, config: RenderConfig) -> Result<String, RenderError> {
    let layout = parse_layout(source)?;

    let svg = match compute(layout.as_ref(), &config.layout) {
        LayoutOutcome::Placed(result) => render_svg(&result, &config.svg, &config.palette),
        LayoutOutcome::Empty(reason) => render_empty_svg(
            reason,
            config.layout.canvas_width_px,
            config.layout.canvas_height_px,
            &config.svg,
            &config.palette,
        ),
    };

    Ok(svg)
}
