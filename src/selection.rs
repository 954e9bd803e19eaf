//! Hover and selection state for the interactive map
//!
//! Two independent slots: the hovered cell drives the tooltip, the selected
//! cell drives the detail panel. The rendering layer owns one
//! [`SelectionState`] per mounted map, feeds it pointer events, and calls
//! [`SelectionState::reset`] whenever a new layout arrives.

use crate::layout::{Hit, LayoutResult, PlacedCell, PlacedElement, Point};
use crate::status::{StatusCategory, StockStatus};

/// A cell as shown in the tooltip and detail panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellInfo {
    pub product: String,
    pub status: Option<String>,
    /// Section-relative grid position
    pub pos_x: u32,
    pub pos_y: u32,
    pub width: u32,
    pub height: u32,
}

impl CellInfo {
    pub fn from_placed(cell: &PlacedCell) -> Self {
        Self {
            product: cell.product.clone(),
            status: cell.status.clone(),
            pos_x: cell.grid_position.x,
            pos_y: cell.grid_position.y,
            width: cell.grid_extent.width,
            height: cell.grid_extent.height,
        }
    }

    /// Pseudo-cell standing for a whole section when its header is clicked
    pub fn header(section: &PlacedElement) -> Self {
        Self {
            product: section.caption.clone(),
            status: None,
            pos_x: 0,
            pos_y: 0,
            width: section.grid_extent.width,
            height: 1,
        }
    }
}

/// The hovered cell, kept for tooltip display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoveredCell {
    pub cell: CellInfo,
}

impl HoveredCell {
    /// `"<product>: <status>"`, with the raw status text
    pub fn tooltip(&self) -> String {
        format!(
            "{}: {}",
            self.cell.product,
            self.cell.status.as_deref().unwrap_or_default()
        )
    }
}

/// A selected cell plus the name of its section, captured at selection time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub cell: CellInfo,
    pub section: String,
}

impl Selection {
    pub fn new(cell: CellInfo, section: impl Into<String>) -> Self {
        Self {
            cell,
            section: section.into(),
        }
    }

    /// Selection for a hit-test result
    pub fn from_hit(hit: Hit<'_>) -> Self {
        match hit {
            Hit::Cell(section, cell) => Self::new(CellInfo::from_placed(cell), &section.caption),
            Hit::Header(section) => Self::new(CellInfo::header(section), &section.caption),
        }
    }
}

/// Display fields of the detail panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub section: String,
    /// `"<width>x<height>"`
    pub size: String,
    /// `"(<x>, <y>)"`
    pub position: String,
    pub status_text: &'static str,
    pub status_class: StatusCategory,
}

impl From<&Selection> for DetailView {
    fn from(selection: &Selection) -> Self {
        let cell = &selection.cell;
        let status = StockStatus::from_raw(cell.status.as_deref());
        Self {
            title: cell.product.clone(),
            section: selection.section.clone(),
            size: format!("{}x{}", cell.width, cell.height),
            position: format!("({}, {})", cell.pos_x, cell.pos_y),
            status_text: status.text(),
            status_class: status.category(),
        }
    }
}

/// Hover and selection slots, plus detail panel visibility
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    hovered: Option<HoveredCell>,
    selected: Option<Selection>,
    visible: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<&HoveredCell> {
        self.hovered.as_ref()
    }

    pub fn selected(&self) -> Option<&Selection> {
        self.selected.as_ref()
    }

    /// Whether the detail panel is open
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_hovered(&mut self, hovered: Option<HoveredCell>) {
        self.hovered = hovered;
    }

    pub fn set_selected(&mut self, selected: Option<Selection>) {
        self.selected = selected;
    }

    /// Select and show the detail panel
    pub fn open(&mut self, selection: Selection) {
        self.set_selected(Some(selection));
        self.visible = true;
    }

    /// Hide the detail panel. The selection is kept so the panel can still
    /// render its content while closing.
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Back to the initial empty state
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The detail panel's content, when it is open
    pub fn detail(&self) -> Option<DetailView> {
        if !self.visible {
            return None;
        }
        self.selected.as_ref().map(DetailView::from)
    }

    /// Pointer moved to `point`: hover the stock cell under it, if any
    pub fn pointer_moved(&mut self, result: &LayoutResult, point: Point) {
        let hovered = match result.hit_test(point) {
            Some(Hit::Cell(_, cell)) => Some(HoveredCell {
                cell: CellInfo::from_placed(cell),
            }),
            _ => None,
        };
        self.set_hovered(hovered);
    }

    /// Pointer left the map
    pub fn pointer_left(&mut self) {
        self.set_hovered(None);
    }

    /// Click or tap at `point`: open the detail panel for whatever is there.
    /// Returns whether anything was selected.
    pub fn clicked(&mut self, result: &LayoutResult, point: Point) -> bool {
        match result.hit_test(point) {
            Some(hit) => {
                self.open(Selection::from_hit(hit));
                true
            }
            None => false,
        }
    }
}
