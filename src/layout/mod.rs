//! Layout engine for computing element positions and sizes
//!
//! This module takes a store [`Layout`](crate::model::Layout) and computes
//! the placed floor plan: grid extents, absolute grid positions, and pixel
//! boxes for every element and cell.

pub mod config;
pub mod engine;
pub mod extent;
pub mod lint;
pub mod pixel;
pub mod placement;
pub mod types;

pub use config::{ConfigError, LayoutConfig, PixelMetrics, SectionPlacement};
pub use engine::compute;
pub use extent::resolve_extent;
pub use lint::{LintCategory, LintWarning};
pub use pixel::{cell_pixel_box, header_pixel_box, to_pixel_box};
pub use placement::{resolve_position, AnchorBounds};
pub use types::*;
