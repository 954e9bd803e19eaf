//! Grid-to-pixel mapping
//!
//! All functions here are total and stateless. Cell boxes are mapped from
//! section-relative grid units into the section's pixel box, which is the
//! only place the two coordinate spaces meet.

use crate::model::{Cell, ElementKind};

use super::config::PixelMetrics;
use super::types::{BoundingBox, GridExtent, GridPoint};

/// Pixel box of a top-level element.
///
/// Sections reserve a header band of `label_band` pixels above their cells;
/// anchors draw their caption inline and get no extra height.
pub fn to_pixel_box(
    position: GridPoint,
    extent: GridExtent,
    kind: ElementKind,
    metrics: &PixelMetrics,
) -> BoundingBox {
    let band = match kind {
        ElementKind::Section => metrics.label_band,
        ElementKind::Aisle | ElementKind::TrolleyBay => 0.0,
    };
    BoundingBox::new(
        f64::from(position.x) * metrics.cell_size + metrics.padding,
        f64::from(position.y) * metrics.cell_size + metrics.padding,
        f64::from(extent.width) * metrics.cell_size,
        f64::from(extent.height) * metrics.cell_size + band,
    )
}

/// Header band of a section box
pub fn header_pixel_box(section: &BoundingBox, metrics: &PixelMetrics) -> BoundingBox {
    BoundingBox::new(
        section.x,
        section.y,
        section.width,
        metrics.label_band.min(section.height),
    )
}

/// Absolute pixel box of a cell inside a section box.
///
/// The cell is shifted below the header band and shrunk by `cell_inset` on
/// every side; sizes never go negative.
pub fn cell_pixel_box(cell: &Cell, section: &BoundingBox, metrics: &PixelMetrics) -> BoundingBox {
    let inset = metrics.cell_inset;
    BoundingBox::new(
        section.x + f64::from(cell.pos_x) * metrics.cell_size + inset,
        section.y + metrics.label_band + f64::from(cell.pos_y) * metrics.cell_size + inset,
        (f64::from(cell.width) * metrics.cell_size - 2.0 * inset).max(0.0),
        (f64::from(cell.height) * metrics.cell_size - 2.0 * inset).max(0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_box_includes_label_band() {
        let metrics = PixelMetrics::default();
        let bb = to_pixel_box(
            GridPoint::new(9, 0),
            GridExtent::new(2, 1),
            ElementKind::Section,
            &metrics,
        );
        assert_eq!(bb, BoundingBox::new(560.0, 20.0, 120.0, 90.0));
    }

    #[test]
    fn test_anchor_box_has_no_label_band() {
        let metrics = PixelMetrics::default();
        let bb = to_pixel_box(
            GridPoint::new(1, 3),
            GridExtent::new(6, 5),
            ElementKind::Aisle,
            &metrics,
        );
        assert_eq!(bb, BoundingBox::new(80.0, 200.0, 360.0, 300.0));

        let bay = to_pixel_box(
            GridPoint::new(0, 0),
            GridExtent::new(10, 6),
            ElementKind::TrolleyBay,
            &metrics,
        );
        assert_eq!(bay, BoundingBox::new(20.0, 20.0, 600.0, 360.0));
    }

    #[test]
    fn test_mapping_is_linear() {
        let metrics = PixelMetrics::default();
        let extent = GridExtent::new(1, 1);
        for x in 0..20 {
            let a = to_pixel_box(GridPoint::new(x, 2), extent, ElementKind::Aisle, &metrics);
            let b = to_pixel_box(GridPoint::new(x + 1, 2), extent, ElementKind::Aisle, &metrics);
            assert_eq!(b.x - a.x, metrics.cell_size);
            assert_eq!(a.y, b.y);
        }
    }

    #[test]
    fn test_mapping_is_repeatable() {
        let metrics = PixelMetrics::default();
        let (position, extent) = (GridPoint::new(3, 4), GridExtent::new(2, 2));
        let first = to_pixel_box(position, extent, ElementKind::Section, &metrics);
        let second = to_pixel_box(position, extent, ElementKind::Section, &metrics);
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_metrics() {
        let metrics = PixelMetrics {
            cell_size: 10.0,
            padding: 5.0,
            label_band: 12.0,
            cell_inset: 1.0,
        };
        let bb = to_pixel_box(
            GridPoint::new(2, 3),
            GridExtent::new(4, 1),
            ElementKind::Section,
            &metrics,
        );
        assert_eq!(bb, BoundingBox::new(25.0, 35.0, 40.0, 22.0));
    }

    #[test]
    fn test_cell_box_offset_and_inset() {
        let metrics = PixelMetrics::default();
        let section = BoundingBox::new(560.0, 20.0, 180.0, 150.0);
        let cell = Cell::stock("Shelf 2", Some("out-of-stock"), 2, 0, 1, 2);
        assert_eq!(
            cell_pixel_box(&cell, &section, &metrics),
            BoundingBox::new(682.0, 52.0, 56.0, 116.0)
        );
    }

    #[test]
    fn test_cells_never_overlap_header() {
        let metrics = PixelMetrics::default();
        let section = BoundingBox::new(20.0, 20.0, 120.0, 90.0);
        let header = header_pixel_box(&section, &metrics);
        let cell = Cell::stock("Shelf 1", None, 0, 0, 2, 1);
        let bb = cell_pixel_box(&cell, &section, &metrics);
        assert!(bb.y > header.bottom());
        assert!(!bb.intersects(&header));
    }

    #[test]
    fn test_zero_sized_cell_clamps() {
        let metrics = PixelMetrics::default();
        let cell = Cell::stock("Ghost", None, 1, 1, 0, 0);
        let bb = cell_pixel_box(&cell, &BoundingBox::zero(), &metrics);
        assert_eq!((bb.width, bb.height), (0.0, 0.0));
    }

    #[test]
    fn test_header_box() {
        let metrics = PixelMetrics::default();
        let header = header_pixel_box(&BoundingBox::new(20.0, 20.0, 120.0, 90.0), &metrics);
        assert_eq!(header, BoundingBox::new(20.0, 20.0, 120.0, 30.0));
    }
}
