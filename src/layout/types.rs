//! Core types for the layout engine
//!
//! Two coordinate spaces meet here: grid units (`GridPoint`, `GridExtent`),
//! which come straight from the layout description, and pixels
//! (`BoundingBox`, `Point`), which the grid-to-pixel mapper produces.

use std::fmt::Write as _;

use serde::Serialize;

use crate::model::{CellKind, ElementKind};
use crate::status::StatusCategory;

use super::config::PixelMetrics;

/// A position in grid units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GridPoint {
    pub x: u32,
    pub y: u32,
}

impl GridPoint {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in grid units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GridExtent {
    pub width: u32,
    pub height: u32,
}

impl GridExtent {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self::new(0, 0)
    }
}

/// A point in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A pixel-space box
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a zero-sized bounding box at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the bounding box
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Check if this bounding box contains a point (edges inclusive)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Check if this bounding box overlaps another with positive area.
    /// Boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Compute the union of two bounding boxes (smallest box containing both)
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::new(x, y, right - x, bottom - y)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

/// Why an element is identified by position rather than by its id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyFallback {
    MissingId,
    DuplicateId,
}

/// A cell mapped into pixel space
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedCell {
    /// Position of the cell within its section's cell list
    pub index: usize,
    pub product: String,
    /// Raw status as supplied
    pub status: Option<String>,
    pub category: StatusCategory,
    pub kind: CellKind,
    /// Section-relative grid position
    pub grid_position: GridPoint,
    pub grid_extent: GridExtent,
    /// Absolute pixel box, inset on every side
    pub bounds: BoundingBox,
}

/// A top-level element mapped into pixel space
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedElement {
    /// Element id, or `#<index>` when the id is missing or duplicated
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_fallback: Option<KeyFallback>,
    /// Index in the layout's element list
    pub index: usize,
    pub kind: ElementKind,
    /// Section name, `Aisle <n>` or `Trolley bay`
    pub caption: String,
    /// Absolute grid position after placement
    pub grid_position: GridPoint,
    pub grid_extent: GridExtent,
    pub bounds: BoundingBox,
    /// Header band of a section, the click target for the section itself
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<BoundingBox>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cells: Vec<PlacedCell>,
}

impl PlacedElement {
    pub fn is_section(&self) -> bool {
        self.kind == ElementKind::Section
    }

    pub fn is_anchor(&self) -> bool {
        self.kind.is_anchor()
    }
}

/// What lies under a pixel-space point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit<'a> {
    /// A section's header band
    Header(&'a PlacedElement),
    /// A cell inside a section
    Cell(&'a PlacedElement, &'a PlacedCell),
}

/// The complete result of layout computation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    pub store_name: String,
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Scale factors the boxes were mapped with
    pub metrics: PixelMetrics,
    /// Placed elements in document order
    pub elements: Vec<PlacedElement>,
}

impl LayoutResult {
    /// Create an empty layout result
    pub fn new(store_name: impl Into<String>, canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            store_name: store_name.into(),
            canvas_width,
            canvas_height,
            metrics: PixelMetrics::default(),
            elements: vec![],
        }
    }

    /// Record the scale factors used to map this result
    pub fn with_metrics(mut self, metrics: PixelMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Get an element by key
    pub fn get(&self, key: &str) -> Option<&PlacedElement> {
        self.elements.iter().find(|e| e.key == key)
    }

    pub fn sections(&self) -> impl Iterator<Item = &PlacedElement> {
        self.elements.iter().filter(|e| e.is_section())
    }

    pub fn anchors(&self) -> impl Iterator<Item = &PlacedElement> {
        self.elements.iter().filter(|e| e.is_anchor())
    }

    /// The canvas as a pixel box anchored at the origin
    pub fn canvas(&self) -> BoundingBox {
        BoundingBox::new(0.0, 0.0, self.canvas_width, self.canvas_height)
    }

    /// Union of all placed element boxes
    pub fn content_bounds(&self) -> BoundingBox {
        let mut boxes = self.elements.iter().map(|e| e.bounds);
        match boxes.next() {
            Some(first) => boxes.fold(first, |acc, b| acc.union(&b)),
            None => BoundingBox::zero(),
        }
    }

    /// Find the section header or stock cell under a point.
    ///
    /// Paint order is sections, then anchors. Anchors are not selectable but
    /// hide whatever lies beneath them, so a point on an aisle or trolley bay
    /// hits nothing. Among sections, later ones are on top and searched
    /// first. Label cells are captions and never hit.
    pub fn hit_test(&self, point: Point) -> Option<Hit<'_>> {
        if self.anchors().any(|a| a.bounds.contains(point)) {
            return None;
        }
        for element in self.elements.iter().rev().filter(|e| e.is_section()) {
            if let Some(cell) = element
                .cells
                .iter()
                .rev()
                .find(|c| c.kind == CellKind::Stock && c.bounds.contains(point))
            {
                return Some(Hit::Cell(element, cell));
            }
            if element.header.is_some_and(|h| h.contains(point)) {
                return Some(Hit::Header(element));
            }
        }
        None
    }

    /// Indented text dump of the placed tree, one line per element and cell
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for element in &self.elements {
            let _ = writeln!(
                out,
                "[{}] {} grid=({},{}) {}x{} px=({},{}) {}x{}",
                element.key,
                element.kind,
                element.grid_position.x,
                element.grid_position.y,
                element.grid_extent.width,
                element.grid_extent.height,
                element.bounds.x,
                element.bounds.y,
                element.bounds.width,
                element.bounds.height,
            );
            for cell in &element.cells {
                let _ = writeln!(
                    out,
                    "  {} {} px=({},{}) {}x{}",
                    cell.product,
                    cell.category,
                    cell.bounds.x,
                    cell.bounds.y,
                    cell.bounds.width,
                    cell.bounds.height,
                );
            }
        }
        out
    }
}

/// Why there is nothing to place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyReason {
    /// No layout was supplied, or it had no element list
    NoData,
    /// The layout has no placeable elements
    NoElements,
}

/// Outcome of running the layout pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutOutcome {
    /// Render the empty state instead of a map
    Empty(EmptyReason),
    Placed(LayoutResult),
}

impl LayoutOutcome {
    pub fn is_empty(&self) -> bool {
        matches!(self, LayoutOutcome::Empty(_))
    }

    pub fn placed(&self) -> Option<&LayoutResult> {
        match self {
            LayoutOutcome::Placed(result) => Some(result),
            LayoutOutcome::Empty(_) => None,
        }
    }
}
