//! SVG renderer for placed store layouts
//!
//! This module takes a LayoutResult and produces a static SVG picture of
//! the floor plan, with CSS classes per status category for styling.

pub mod config;
pub mod svg;

pub use config::SvgConfig;
pub use svg::{render_empty_svg, render_svg};
