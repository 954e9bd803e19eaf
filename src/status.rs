//! Stock status interpretation and the color palette
//!
//! Status strings are matched case-insensitively against the three known
//! values. Anything else, including an empty or missing status, is the
//! neutral "unknown" state. Fill colors come from a [`Palette`], which can be
//! overridden from a TOML file.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Interpreted stock status of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    Undetermined,
    OutOfStock,
    Unknown,
}

impl StockStatus {
    /// Interpret a raw status string
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::to_ascii_lowercase).as_deref() {
            Some("in-stock") => StockStatus::InStock,
            Some("undetermined") => StockStatus::Undetermined,
            Some("out-of-stock") => StockStatus::OutOfStock,
            _ => StockStatus::Unknown,
        }
    }

    pub fn category(self) -> StatusCategory {
        match self {
            StockStatus::InStock => StatusCategory::Success,
            StockStatus::Undetermined => StatusCategory::Warning,
            StockStatus::OutOfStock => StatusCategory::Danger,
            StockStatus::Unknown => StatusCategory::Neutral,
        }
    }

    /// Text shown to shoppers in the detail panel
    pub fn text(self) -> &'static str {
        match self {
            StockStatus::InStock => "Available in store",
            StockStatus::Undetermined => "Stock status unknown",
            StockStatus::OutOfStock => "Currently unavailable",
            StockStatus::Unknown => "No status available",
        }
    }
}

/// Visual category a status maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCategory {
    Success,
    Warning,
    Danger,
    Neutral,
}

impl StatusCategory {
    /// Class name used by the rendering layer
    pub fn as_str(self) -> &'static str {
        match self {
            StatusCategory::Success => "success",
            StatusCategory::Warning => "warning",
            StatusCategory::Danger => "danger",
            StatusCategory::Neutral => "neutral",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category for a raw status string
pub fn status_category(raw: Option<&str>) -> StatusCategory {
    StockStatus::from_raw(raw).category()
}

/// Shopper-facing text for a raw status string
pub fn status_text(raw: Option<&str>) -> &'static str {
    StockStatus::from_raw(raw).text()
}

/// Errors that can occur when loading or parsing palettes
#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("Failed to read palette file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse palette TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Color tokens: the four status categories plus map chrome
#[derive(Debug, Clone)]
pub struct Palette {
    pub name: Option<String>,
    /// Token name -> CSS color
    pub colors: HashMap<String, String>,
}

/// TOML structure for deserializing palettes
#[derive(Deserialize)]
struct TomlPalette {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
}

const DEFAULT_COLORS: &[(&str, &str)] = &[
    ("success", "#10B981"),
    ("warning", "#F59E0B"),
    ("danger", "#EF4444"),
    ("neutral", "#374151"),
    ("background", "#111827"),
    ("header", "#1F2937"),
    ("border", "#4B5563"),
    ("text", "#F3F4F6"),
    ("caption", "#9CA3AF"),
    ("muted", "#6B7280"),
];

impl Palette {
    /// Load palette from TOML file
    pub fn from_file(path: &Path) -> Result<Self, PaletteError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load palette from TOML string. Tokens left out keep their defaults.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, PaletteError> {
        let parsed: TomlPalette = toml::from_str(content)?;

        let mut palette = Self::default();
        palette.name = parsed.metadata.and_then(|m| m.name);
        palette.colors.extend(parsed.colors);
        Ok(palette)
    }

    /// Color for a token, if defined
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Color for a token, falling back to the neutral fill
    pub fn resolve_or_default(&self, token: &str) -> &str {
        self.resolve(token)
            .or_else(|| self.resolve(StatusCategory::Neutral.as_str()))
            .unwrap_or("#374151")
    }

    /// Fill color for a status category
    pub fn fill(&self, category: StatusCategory) -> &str {
        self.resolve_or_default(category.as_str())
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            name: None,
            colors: DEFAULT_COLORS
                .iter()
                .map(|(token, color)| (token.to_string(), color.to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_case_insensitive() {
        assert_eq!(status_category(Some("IN-STOCK")), status_category(Some("in-stock")));
        assert_eq!(status_category(Some("Out-Of-Stock")), StatusCategory::Danger);
        assert_eq!(status_category(Some("UNDETERMINED")), StatusCategory::Warning);
    }

    #[test]
    fn test_status_fallback_is_neutral() {
        assert_eq!(status_category(Some("")), StatusCategory::Neutral);
        assert_eq!(status_category(None), StatusCategory::Neutral);
        assert_eq!(status_category(Some("bogus")), StatusCategory::Neutral);
        assert_eq!(status_text(Some("")), "No status available");
        assert_eq!(status_text(None), "No status available");
    }

    #[test]
    fn test_status_texts() {
        assert_eq!(status_text(Some("in-stock")), "Available in store");
        assert_eq!(status_text(Some("undetermined")), "Stock status unknown");
        assert_eq!(status_text(Some("out-of-stock")), "Currently unavailable");
    }

    #[test]
    fn test_surrounding_whitespace_is_not_trimmed() {
        assert_eq!(StockStatus::from_raw(Some(" in-stock")), StockStatus::Unknown);
    }

    #[test]
    fn test_default_fills() {
        let palette = Palette::default();
        assert_eq!(palette.fill(StatusCategory::Success), "#10B981");
        assert_eq!(palette.fill(StatusCategory::Warning), "#F59E0B");
        assert_eq!(palette.fill(StatusCategory::Danger), "#EF4444");
        assert_eq!(palette.fill(StatusCategory::Neutral), "#374151");
    }

    #[test]
    fn test_parse_toml_overrides() {
        let toml_str = r##"
[metadata]
name = "High contrast"

[colors]
success = "#00ff00"
"##;
        let palette = Palette::from_str(toml_str).expect("Should parse");
        assert_eq!(palette.name, Some("High contrast".to_string()));
        assert_eq!(palette.fill(StatusCategory::Success), "#00ff00");
        assert_eq!(palette.fill(StatusCategory::Danger), "#EF4444");
    }

    #[test]
    fn test_unknown_token_falls_back_to_neutral() {
        let palette = Palette::default();
        assert_eq!(palette.resolve("nonexistent"), None);
        assert_eq!(palette.resolve_or_default("nonexistent"), "#374151");
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = Palette::from_str("this is not valid toml {{{{");
        assert!(result.is_err());
    }
}
