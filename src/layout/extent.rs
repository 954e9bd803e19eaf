//! Grid extent of elements
//!
//! Aisles and trolley bays declare their size. A section's size is the far
//! corner of its cells, since cells are positioned relative to the section
//! origin.

use crate::model::{Cell, Element};

use super::types::GridExtent;

/// Width and height of an element in grid units
pub fn resolve_extent(element: &Element) -> GridExtent {
    match element {
        Element::Aisle(a) => GridExtent::new(a.width, a.height),
        Element::TrolleyBay(t) => GridExtent::new(t.width, t.height),
        Element::Section(s) => cells_extent(&s.cells),
        Element::Unknown => GridExtent::zero(),
    }
}

/// Max right edge and max bottom edge over a set of section-relative cells
pub fn cells_extent(cells: &[Cell]) -> GridExtent {
    cells.iter().fold(GridExtent::zero(), |acc, cell| {
        GridExtent::new(
            acc.width.max(cell.pos_x.saturating_add(cell.width)),
            acc.height.max(cell.pos_y.saturating_add(cell.height)),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Aisle, Section, TrolleyBay};

    fn section(cells: Vec<Cell>) -> Element {
        Element::Section(Section {
            name: "Test".to_string(),
            cells,
            ..Default::default()
        })
    }

    #[test]
    fn test_anchor_extent_is_declared() {
        let aisle = Element::Aisle(Aisle {
            width: 6,
            height: 5,
            ..Default::default()
        });
        assert_eq!(resolve_extent(&aisle), GridExtent::new(6, 5));

        let bay = Element::TrolleyBay(TrolleyBay {
            width: 10,
            height: 6,
            pos_x: 3,
            ..Default::default()
        });
        assert_eq!(resolve_extent(&bay), GridExtent::new(10, 6));
    }

    #[test]
    fn test_section_extent_is_far_corner_of_cells() {
        let frozen = section(vec![
            Cell::stock("Shelf 1", Some("in-stock"), 0, 0, 2, 1),
            Cell::stock("Shelf 2", Some("out-of-stock"), 2, 0, 1, 2),
            Cell::stock("Shelf 3", Some("in-stock"), 0, 1, 2, 1),
        ]);
        assert_eq!(resolve_extent(&frozen), GridExtent::new(3, 2));

        let sweets = section(vec![
            Cell::stock("Shelf 1", Some("in-stock"), 0, 0, 2, 2),
            Cell::stock("Shelf 2", Some("undetermined"), 2, 0, 1, 1),
            Cell::stock("Shelf 3", Some(""), 2, 1, 2, 2),
        ]);
        assert_eq!(resolve_extent(&sweets), GridExtent::new(4, 3));
    }

    #[test]
    fn test_single_cell_section() {
        let s = section(vec![Cell::stock("Shelf 1", Some("in-stock"), 0, 0, 2, 1)]);
        assert_eq!(resolve_extent(&s), GridExtent::new(2, 1));
    }

    #[test]
    fn test_empty_section_has_zero_extent() {
        assert_eq!(resolve_extent(&section(vec![])), GridExtent::zero());
    }

    #[test]
    fn test_zero_sized_cells_still_count_their_offset() {
        let s = section(vec![Cell::stock("Ghost", None, 4, 3, 0, 0)]);
        assert_eq!(resolve_extent(&s), GridExtent::new(4, 3));
    }

    #[test]
    fn test_unknown_element_has_zero_extent() {
        assert_eq!(resolve_extent(&Element::Unknown), GridExtent::zero());
    }

    #[test]
    fn test_extent_saturates() {
        let s = section(vec![Cell::stock("Huge", None, u32::MAX, 0, 5, 1)]);
        assert_eq!(resolve_extent(&s).width, u32::MAX);
    }
}
