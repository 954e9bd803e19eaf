//! Lint checks over a placed layout.
//!
//! Runs after placement to report what the engine tolerates but a store
//! planner would want to fix: sections overlapping anchors or each other,
//! elements spilling off the canvas, and elements identified by position.

use std::fmt;

use super::types::{KeyFallback, LayoutResult, PlacedElement};

/// A lint warning about a layout defect
#[derive(Debug, Clone, PartialEq)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)
    }
}

/// Category of lint defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    Overlap,
    Canvas,
    Identity,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::Overlap => write!(f, "overlap"),
            LintCategory::Canvas => write!(f, "canvas"),
            LintCategory::Identity => write!(f, "identity"),
        }
    }
}

/// Run all lint checks on a placed layout.
pub fn check(result: &LayoutResult) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    check_overlaps(result, &mut warnings);
    check_canvas(result, &mut warnings);
    check_identity(result, &mut warnings);
    warnings
}

fn display_name(element: &PlacedElement) -> String {
    format!("{} \"{}\"", element.kind, element.key)
}

/// Sections must not overlap anchors or other sections. Anchors may overlap
/// each other; aisles inside a trolley bay area are normal.
fn check_overlaps(result: &LayoutResult, warnings: &mut Vec<LintWarning>) {
    let elements = &result.elements;
    for (i, a) in elements.iter().enumerate() {
        for b in &elements[i + 1..] {
            if !(a.is_section() || b.is_section()) {
                continue;
            }
            if a.bounds.intersects(&b.bounds) {
                warnings.push(LintWarning {
                    category: LintCategory::Overlap,
                    message: format!("{} overlaps {}", display_name(a), display_name(b)),
                });
            }
        }
    }
}

fn check_canvas(result: &LayoutResult, warnings: &mut Vec<LintWarning>) {
    for element in &result.elements {
        let b = &element.bounds;
        if b.right() > result.canvas_width || b.bottom() > result.canvas_height {
            warnings.push(LintWarning {
                category: LintCategory::Canvas,
                message: format!(
                    "{} extends to ({}, {}), beyond the {}x{} canvas",
                    display_name(element),
                    b.right(),
                    b.bottom(),
                    result.canvas_width,
                    result.canvas_height
                ),
            });
        }
    }
}

fn check_identity(result: &LayoutResult, warnings: &mut Vec<LintWarning>) {
    for element in &result.elements {
        let reason = match element.key_fallback {
            Some(KeyFallback::MissingId) => "has no id",
            Some(KeyFallback::DuplicateId) => "repeats an id used earlier",
            None => continue,
        };
        warnings.push(LintWarning {
            category: LintCategory::Identity,
            message: format!(
                "{} at index {} {}; identified by position",
                element.kind, element.index, reason
            ),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::config::{LayoutConfig, SectionPlacement};
    use crate::layout::engine::compute;
    use crate::model::{Aisle, Cell, Element, Layout, Section, TrolleyBay};

    fn bay() -> Element {
        Element::TrolleyBay(TrolleyBay {
            id: Some("bay".to_string()),
            width: 10,
            height: 6,
            ..Default::default()
        })
    }

    fn section(id: &str, pos_x: u32, pos_y: u32) -> Element {
        Element::Section(Section {
            id: Some(id.to_string()),
            name: id.to_string(),
            pos_x,
            pos_y,
            cells: vec![Cell::stock("Shelf", Some("in-stock"), 0, 0, 3, 2)],
        })
    }

    fn lint(layout: &Layout, config: &LayoutConfig) -> Vec<LintWarning> {
        let outcome = compute(Some(layout), config);
        check(outcome.placed().expect("layout should place"))
    }

    fn count(warnings: &[LintWarning], category: LintCategory) -> usize {
        warnings.iter().filter(|w| w.category == category).count()
    }

    #[test]
    fn test_declared_section_over_anchor_is_flagged() {
        let layout = Layout::new("S", vec![bay(), section("frozen", 9, 0)]);
        let config = LayoutConfig::default().with_section_placement(SectionPlacement::Declared);
        let warnings = lint(&layout, &config);
        assert_eq!(count(&warnings, LintCategory::Overlap), 1);
        assert!(warnings[0].message.contains("\"frozen\""));
    }

    #[test]
    fn test_avoided_section_is_clean() {
        let layout = Layout::new("S", vec![bay(), section("frozen", 9, 0)]);
        let config = LayoutConfig::default().with_canvas(2000.0, 2000.0);
        assert!(lint(&layout, &config).is_empty());
    }

    #[test]
    fn test_overlapping_anchors_are_allowed() {
        let aisle = Element::Aisle(Aisle {
            id: Some("aisle-1".to_string()),
            pos_x: 1,
            pos_y: 2,
            width: 6,
            height: 1,
            number: 1,
        });
        let layout = Layout::new("S", vec![bay(), aisle]);
        assert_eq!(count(&lint(&layout, &LayoutConfig::default()), LintCategory::Overlap), 0);
    }

    #[test]
    fn test_overlapping_sections_are_flagged() {
        let layout = Layout::new("S", vec![section("a", 0, 0), section("b", 1, 1)]);
        let warnings = lint(&layout, &LayoutConfig::default());
        assert_eq!(count(&warnings, LintCategory::Overlap), 1);
    }

    #[test]
    fn test_canvas_overflow() {
        let layout = Layout::new("S", vec![section("far", 30, 0)]);
        let warnings = lint(&layout, &LayoutConfig::default());
        assert_eq!(count(&warnings, LintCategory::Canvas), 1);
        assert_eq!(
            warnings[0].to_string(),
            "[canvas] section \"far\" extends to (2000, 170), beyond the 1200x500 canvas"
        );
    }

    #[test]
    fn test_positional_keys_are_flagged() {
        let layout = Layout::new(
            "S",
            vec![section("a", 0, 0), section("a", 10, 0), Element::Section(Section::default())],
        );
        let config = LayoutConfig::default().with_canvas(5000.0, 5000.0);
        let warnings = lint(&layout, &config);
        assert_eq!(count(&warnings, LintCategory::Identity), 2);
    }
}
