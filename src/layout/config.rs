//! Configuration for the layout engine

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// How sections are positioned relative to aisles and trolley bays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionPlacement {
    /// Use the declared position verbatim
    Declared,
    /// Push sections declared inside the anchor bound past its far corner
    #[default]
    AvoidAnchors,
}

impl FromStr for SectionPlacement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "declared" => Ok(SectionPlacement::Declared),
            "avoid-anchors" => Ok(SectionPlacement::AvoidAnchors),
            other => Err(format!(
                "unknown section placement '{}' (expected 'declared' or 'avoid-anchors')",
                other
            )),
        }
    }
}

impl fmt::Display for SectionPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionPlacement::Declared => f.write_str("declared"),
            SectionPlacement::AvoidAnchors => f.write_str("avoid-anchors"),
        }
    }
}

/// Configuration options for layout computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Pixel size of one grid unit
    pub cell_size_px: f64,

    /// Canvas margin added to every placed element
    pub padding_px: f64,

    /// Height of the header band atop each section
    pub label_band_px: f64,

    /// Margin shrinking each cell's box on every side
    pub cell_inset_px: f64,

    pub canvas_width_px: f64,

    pub canvas_height_px: f64,

    pub section_placement: SectionPlacement,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cell_size_px: 60.0,
            padding_px: 20.0,
            label_band_px: 30.0,
            cell_inset_px: 2.0,
            canvas_width_px: 1200.0,
            canvas_height_px: 500.0,
            section_placement: SectionPlacement::default(),
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string; missing keys keep their defaults
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the pixel size of a grid unit
    pub fn with_cell_size(mut self, size: f64) -> Self {
        self.cell_size_px = size;
        self
    }

    /// Set the canvas padding
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding_px = padding;
        self
    }

    /// Set the section header band height
    pub fn with_label_band(mut self, height: f64) -> Self {
        self.label_band_px = height;
        self
    }

    /// Set the per-cell inset
    pub fn with_cell_inset(mut self, inset: f64) -> Self {
        self.cell_inset_px = inset;
        self
    }

    /// Set the canvas size
    pub fn with_canvas(mut self, width: f64, height: f64) -> Self {
        self.canvas_width_px = width;
        self.canvas_height_px = height;
        self
    }

    /// Set the section placement policy
    pub fn with_section_placement(mut self, placement: SectionPlacement) -> Self {
        self.section_placement = placement;
        self
    }

    /// The scale factors used by the grid-to-pixel mapper
    pub fn metrics(&self) -> PixelMetrics {
        PixelMetrics {
            cell_size: self.cell_size_px,
            padding: self.padding_px,
            label_band: self.label_band_px,
            cell_inset: self.cell_inset_px,
        }
    }
}

/// Grid-to-pixel scale factors
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelMetrics {
    pub cell_size: f64,
    pub padding: f64,
    pub label_band: f64,
    pub cell_inset: f64,
}

impl Default for PixelMetrics {
    fn default() -> Self {
        LayoutConfig::default().metrics()
    }
}
