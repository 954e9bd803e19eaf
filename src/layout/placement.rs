//! Absolute grid placement of top-level elements
//!
//! Anchors (aisles and trolley bays) are placed at their declared position.
//! Sections follow the configured [`SectionPlacement`]. Under
//! `AvoidAnchors`, each axis is resolved on its own: a declared coordinate
//! beyond the far corner of the anchor union is kept, otherwise it becomes
//! one unit past that corner. A section that clears the bound on one axis is
//! therefore still pushed on the other.

use crate::model::{Element, Layout};

use super::config::SectionPlacement;
use super::extent::resolve_extent;
use super::types::GridPoint;

/// Far corner of the union of all anchor elements, in grid units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorBounds {
    pub max_x: u32,
    pub max_y: u32,
}

impl AnchorBounds {
    /// Bound over every anchor in the layout; `None` when there are none
    pub fn of(layout: &Layout) -> Option<Self> {
        Self::from_anchors(layout.anchors())
    }

    pub fn from_anchors<'a>(anchors: impl IntoIterator<Item = &'a Element>) -> Option<Self> {
        anchors
            .into_iter()
            .filter(|e| e.is_anchor())
            .map(|anchor| {
                let (x, y) = anchor.declared_position();
                let extent = resolve_extent(anchor);
                AnchorBounds {
                    max_x: x.saturating_add(extent.width),
                    max_y: y.saturating_add(extent.height),
                }
            })
            .reduce(|a, b| AnchorBounds {
                max_x: a.max_x.max(b.max_x),
                max_y: a.max_y.max(b.max_y),
            })
    }

    /// Whether a point lies inside or before the bound on both axes
    pub fn covers(&self, point: GridPoint) -> bool {
        point.x <= self.max_x && point.y <= self.max_y
    }

    /// Push a declared position out of the bound, axis by axis
    pub fn push_out(&self, declared: GridPoint) -> GridPoint {
        GridPoint {
            x: clear_axis(declared.x, self.max_x),
            y: clear_axis(declared.y, self.max_y),
        }
    }
}

fn clear_axis(declared: u32, max: u32) -> u32 {
    if declared > max {
        declared
    } else {
        max.saturating_add(1)
    }
}

/// Absolute grid position of an element within `layout`
pub fn resolve_position(
    element: &Element,
    layout: &Layout,
    policy: SectionPlacement,
) -> GridPoint {
    resolve_position_with(element, AnchorBounds::of(layout), policy)
}

/// Like [`resolve_position`] with the anchor bound computed up front
pub fn resolve_position_with(
    element: &Element,
    anchors: Option<AnchorBounds>,
    policy: SectionPlacement,
) -> GridPoint {
    let (x, y) = element.declared_position();
    let declared = GridPoint::new(x, y);

    match element {
        Element::Section(_) => match (policy, anchors) {
            (SectionPlacement::AvoidAnchors, Some(bounds)) => bounds.push_out(declared),
            _ => declared,
        },
        _ => declared,
    }
}
