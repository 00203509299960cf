//! The layout snapshot consumed by strategies and rendering.

use reflow_geometry::{Point, Size};
use reflow_layout::{Axis, FlexLayout, GridLayout, ItemKey};
use rustc_hash::FxHashMap;

/// An immutable layout snapshot, recomputed wholesale whenever the
/// order, a size, or the layout configuration changes.
#[derive(Clone, Debug, PartialEq)]
pub enum SortableLayout {
    Grid(GridLayout),
    Flex(FlexLayout),
}

impl SortableLayout {
    /// Content-box positions keyed by item.
    pub fn positions(&self) -> &FxHashMap<ItemKey, Point> {
        match self {
            SortableLayout::Grid(grid) => &grid.positions,
            SortableLayout::Flex(flex) => &flex.positions,
        }
    }

    pub fn position_of(&self, key: &ItemKey) -> Option<Point> {
        self.positions().get(key).copied()
    }

    /// Content-box size (without container padding).
    pub fn container_size(&self) -> Size {
        match self {
            SortableLayout::Grid(grid) => grid.container_size,
            SortableLayout::Flex(flex) => flex.container_size,
        }
    }

    /// Axis items flow along before wrapping.
    pub fn flow(&self) -> Axis {
        match self {
            SortableLayout::Grid(grid) => grid.flow,
            SortableLayout::Flex(flex) => flex.axis,
        }
    }

    /// Axis the container scrolls along (orthogonal to item flow).
    pub fn scroll_axis(&self) -> Axis {
        self.flow().cross()
    }
}
