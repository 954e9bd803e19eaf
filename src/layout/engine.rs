//! Layout computation: resolve extents, resolve positions, map to pixels

use std::collections::HashSet;

use crate::model::{Element, ElementKind, Layout, Section};
use crate::status::status_category;

use super::config::{LayoutConfig, PixelMetrics};
use super::extent::resolve_extent;
use super::pixel::{cell_pixel_box, header_pixel_box, to_pixel_box};
use super::placement::{resolve_position_with, AnchorBounds};
use super::types::{
    BoundingBox, EmptyReason, GridExtent, GridPoint, KeyFallback, LayoutOutcome, LayoutResult,
    PlacedCell, PlacedElement,
};

/// Run the full pipeline over a layout.
///
/// A missing layout, or one without placeable elements, yields
/// [`LayoutOutcome::Empty`]. Nothing in here fails: malformed input has
/// already been clamped at load time, unknown element types are skipped and
/// missing or duplicate ids fall back to positional keys.
pub fn compute(layout: Option<&Layout>, config: &LayoutConfig) -> LayoutOutcome {
    let Some(layout) = layout else {
        tracing::debug!("no layout supplied");
        return LayoutOutcome::Empty(EmptyReason::NoData);
    };

    let metrics = config.metrics();
    let anchors = AnchorBounds::of(layout);
    tracing::debug!(
        store = %layout.store_name,
        elements = layout.elements.len(),
        placement = %config.section_placement,
        ?anchors,
        "computing store layout"
    );

    let mut result = LayoutResult::new(
        layout.store_name.clone(),
        config.canvas_width_px,
        config.canvas_height_px,
    )
    .with_metrics(metrics);
    let mut seen_ids = HashSet::new();

    for (index, element) in layout.elements.iter().enumerate() {
        let Some(kind) = element.kind() else {
            tracing::warn!(index, "skipping element of unknown type");
            continue;
        };

        let (key, key_fallback) = assign_key(element, index, &mut seen_ids);
        let grid_position = resolve_position_with(element, anchors, config.section_placement);
        let grid_extent = resolve_extent(element);
        let bounds = to_pixel_box(grid_position, grid_extent, kind, &metrics);

        let (header, cells) = match element {
            Element::Section(section) => (
                Some(header_pixel_box(&bounds, &metrics)),
                place_cells(section, &bounds, &metrics),
            ),
            _ => (None, vec![]),
        };

        if kind == ElementKind::Section {
            let (x, y) = element.declared_position();
            if (x, y) != (grid_position.x, grid_position.y) {
                tracing::debug!(
                    key = %key,
                    from = ?(x, y),
                    to = ?(grid_position.x, grid_position.y),
                    "moved section clear of anchors"
                );
            }
        }

        result.elements.push(PlacedElement {
            key,
            key_fallback,
            index,
            kind,
            caption: element.caption(),
            grid_position,
            grid_extent,
            bounds,
            header,
            cells,
        });
    }

    if result.elements.is_empty() {
        return LayoutOutcome::Empty(EmptyReason::NoElements);
    }
    LayoutOutcome::Placed(result)
}

/// Element id when present and not yet taken, otherwise a positional key.
///
/// Every key handed out, positional ones included, is recorded in `seen`, so
/// keys stay unique even when a declared id looks like `#<index>`.
fn assign_key(
    element: &Element,
    index: usize,
    seen: &mut HashSet<String>,
) -> (String, Option<KeyFallback>) {
    let fallback = match element.id() {
        Some(id) if seen.insert(id.to_string()) => return (id.to_string(), None),
        Some(id) => {
            tracing::warn!(id, index, "duplicate element id, using positional key");
            KeyFallback::DuplicateId
        }
        None => {
            tracing::warn!(index, "element has no id, using positional key");
            KeyFallback::MissingId
        }
    };
    (positional_key(index, seen), Some(fallback))
}

/// `#<index>`, with extra `#`s prepended until it is free
fn positional_key(index: usize, seen: &mut HashSet<String>) -> String {
    let mut key = format!("#{}", index);
    while !seen.insert(key.clone()) {
        key.insert(0, '#');
    }
    key
}

fn place_cells(section: &Section, bounds: &BoundingBox, metrics: &PixelMetrics) -> Vec<PlacedCell> {
    section
        .cells
        .iter()
        .enumerate()
        .map(|(index, cell)| PlacedCell {
            index,
            product: cell.product.clone(),
            status: cell.status.clone(),
            category: status_category(cell.status.as_deref()),
            kind: cell.kind,
            grid_position: GridPoint::new(cell.pos_x, cell.pos_y),
            grid_extent: GridExtent::new(cell.width, cell.height),
            bounds: cell_pixel_box(cell, bounds, metrics),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::config::SectionPlacement;
    use crate::model::{Aisle, Cell, TrolleyBay};
    use crate::status::StatusCategory;
    use pretty_assertions::assert_eq;

    fn frozen(pos_x: u32, pos_y: u32) -> Element {
        Element::Section(Section {
            id: Some("frozen-section".to_string()),
            name: "Frozen".to_string(),
            pos_x,
            pos_y,
            cells: vec![Cell::stock("Shelf 1", Some("in-stock"), 0, 0, 2, 1)],
        })
    }

    fn aisle(id: Option<&str>, number: u32) -> Element {
        Element::Aisle(Aisle {
            id: id.map(str::to_string),
            number,
            pos_x: 1,
            pos_y: 2,
            width: 6,
            height: 1,
        })
    }

    #[test]
    fn test_single_section_scenario() {
        let layout = Layout::new("Store 001", vec![frozen(9, 0)]);
        let outcome = compute(Some(&layout), &LayoutConfig::default());
        let result = outcome.placed().expect("should place");

        let section = result.get("frozen-section").unwrap();
        assert_eq!(section.grid_extent, GridExtent::new(2, 1));
        assert_eq!(section.grid_position, GridPoint::new(9, 0));
        assert_eq!(section.bounds, BoundingBox::new(560.0, 20.0, 120.0, 90.0));
        assert_eq!(section.header, Some(BoundingBox::new(560.0, 20.0, 120.0, 30.0)));
        assert_eq!(section.cells.len(), 1);
        assert_eq!(section.cells[0].category, StatusCategory::Success);
        assert_eq!(section.cells[0].bounds, BoundingBox::new(562.0, 52.0, 116.0, 56.0));
    }

    #[test]
    fn test_no_layout_is_no_data() {
        assert_eq!(
            compute(None, &LayoutConfig::default()),
            LayoutOutcome::Empty(EmptyReason::NoData)
        );
    }

    #[test]
    fn test_empty_layout_is_empty_state() {
        let layout = Layout::new("Store 001", vec![]);
        assert_eq!(
            compute(Some(&layout), &LayoutConfig::default()),
            LayoutOutcome::Empty(EmptyReason::NoElements)
        );
    }

    #[test]
    fn test_only_unknown_elements_is_empty_state() {
        let layout = Layout::new("Store 001", vec![Element::Unknown, Element::Unknown]);
        assert!(compute(Some(&layout), &LayoutConfig::default()).is_empty());
    }

    #[test]
    fn test_unknown_elements_are_skipped() {
        let layout = Layout::new("S", vec![Element::Unknown, aisle(Some("aisle-1"), 1)]);
        let outcome = compute(Some(&layout), &LayoutConfig::default());
        let result = outcome.placed().unwrap();
        assert_eq!(result.elements.len(), 1);
        assert_eq!(result.elements[0].key, "aisle-1");
        assert_eq!(result.elements[0].index, 1);
    }

    #[test]
    fn test_duplicate_and_missing_ids_use_positional_keys() {
        let layout = Layout::new(
            "S",
            vec![aisle(Some("a"), 1), aisle(Some("a"), 2), aisle(None, 3)],
        );
        let outcome = compute(Some(&layout), &LayoutConfig::default());
        let result = outcome.placed().unwrap();
        let keys: Vec<_> = result.elements.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "#1", "#2"]);
        assert_eq!(result.elements[0].key_fallback, None);
        assert_eq!(result.elements[1].key_fallback, Some(KeyFallback::DuplicateId));
        assert_eq!(result.elements[2].key_fallback, Some(KeyFallback::MissingId));
    }

    #[test]
    fn test_positional_keys_never_collide_with_ids() {
        let layout = Layout::new(
            "S",
            vec![
                aisle(Some("#1"), 1),
                aisle(None, 2),
                aisle(None, 3),
                aisle(Some("#2"), 4),
            ],
        );
        let outcome = compute(Some(&layout), &LayoutConfig::default());
        let result = outcome.placed().unwrap();
        let keys: Vec<_> = result.elements.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["#1", "##1", "#2", "#3"]);
        assert_eq!(result.get("#1").unwrap().index, 0);
        assert_eq!(result.get("#2").unwrap().index, 2);
        assert_eq!(result.elements[3].key_fallback, Some(KeyFallback::DuplicateId));
    }

    #[test]
    fn test_sections_avoid_anchors_by_default() {
        let bay = Element::TrolleyBay(TrolleyBay {
            id: Some("bay".to_string()),
            width: 10,
            height: 6,
            ..Default::default()
        });
        let layout = Layout::new("S", vec![bay, frozen(9, 0)]);

        let avoided = compute(Some(&layout), &LayoutConfig::default());
        let section = avoided.placed().unwrap().get("frozen-section").unwrap();
        assert_eq!(section.grid_position, GridPoint::new(11, 7));

        let declared = compute(
            Some(&layout),
            &LayoutConfig::default().with_section_placement(SectionPlacement::Declared),
        );
        let section = declared.placed().unwrap().get("frozen-section").unwrap();
        assert_eq!(section.grid_position, GridPoint::new(9, 0));
    }

    #[test]
    fn test_anchor_has_no_header_or_cells() {
        let layout = Layout::new("S", vec![aisle(Some("aisle-1"), 1)]);
        let outcome = compute(Some(&layout), &LayoutConfig::default());
        let placed = &outcome.placed().unwrap().elements[0];
        assert_eq!(placed.header, None);
        assert!(placed.cells.is_empty());
        assert_eq!(placed.caption, "Aisle 1");
    }

    #[test]
    fn test_recompute_is_identical() {
        let layout = Layout::new("S", vec![aisle(Some("aisle-1"), 1), frozen(0, 0)]);
        let config = LayoutConfig::default();
        assert_eq!(compute(Some(&layout), &config), compute(Some(&layout), &config));
    }
}
