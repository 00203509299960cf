//! Fixed-column / fixed-row grid layout calculator.
//!
//! Every cell shares one main-axis extent derived from the container;
//! cross-axis offsets accumulate per group as a running maximum, which
//! reproduces uneven row heights (bucket packing, not item masonry).

use reflow_geometry::{approx_eq, Point, Size};
use rustc_hash::FxHashMap;

use crate::{Axis, Gaps, ItemKey, SizeLookup};

/// Grid configuration: a fixed number of columns (horizontal flow) or
/// rows (vertical flow) plus gap sizes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    /// Item flow axis. `Horizontal` fills rows left to right.
    pub flow: Axis,
    /// Number of items per group (columns for horizontal flow, rows for
    /// vertical flow). Must be at least 1.
    pub group_size: usize,
    pub gaps: Gaps,
}

impl GridConfig {
    /// A grid with `columns` fixed columns; items flow along rows.
    pub fn columns(columns: usize, gaps: Gaps) -> Self {
        Self {
            flow: Axis::Horizontal,
            group_size: columns,
            gaps,
        }
    }

    /// A grid with `rows` fixed rows; items flow along columns.
    pub fn rows(rows: usize, gaps: Gaps) -> Self {
        Self {
            flow: Axis::Vertical,
            group_size: rows,
            gaps,
        }
    }
}

/// Immutable grid layout snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct GridLayout {
    pub positions: FxHashMap<ItemKey, Point>,
    /// Content-box size; callers add padding when exposing absolute
    /// coordinates.
    pub container_size: Size,
    /// Shared main-axis extent of every cell.
    pub main_group_size: f32,
    /// Cumulative cross-axis offset per group, with one trailing entry
    /// holding the total extent including the trailing gap.
    pub cross_axis_offsets: Vec<f32>,
    pub group_size: usize,
    pub flow: Axis,
    pub gaps: Gaps,
    pub item_count: usize,
}

impl GridLayout {
    /// Group (row for horizontal flow) containing the flattened index.
    #[inline]
    pub fn group_of(&self, index: usize) -> usize {
        index / self.group_size
    }

    /// Intra-group slot of the flattened index.
    #[inline]
    pub fn slot_of(&self, index: usize) -> usize {
        index % self.group_size
    }

    /// Flattened index of a (group, slot) cell.
    #[inline]
    pub fn index_of(&self, group: usize, slot: usize) -> usize {
        group * self.group_size + slot
    }

    /// Number of (possibly partial) groups.
    pub fn group_count(&self) -> usize {
        self.cross_axis_offsets.len().saturating_sub(1)
    }

    /// Main-axis span `(start, end)` of the cell at `slot`.
    pub fn main_span(&self, slot: usize) -> (f32, f32) {
        let start = slot as f32 * (self.main_group_size + self.gaps.main(self.flow));
        (start, start + self.main_group_size)
    }

    /// Cross-axis span `(start, end)` of `group`, excluding the
    /// trailing gap.
    pub fn cross_span(&self, group: usize) -> (f32, f32) {
        let start = self.cross_axis_offsets[group];
        let end = self.cross_axis_offsets[group + 1] - self.gaps.cross(self.flow);
        (start, end.max(start))
    }
}

/// Computes a grid layout, or `None` while any item is unmeasured or a
/// measured main-axis size has not yet settled to the shared cell size.
pub fn calculate_grid(
    index_to_key: &[ItemKey],
    sizes: &impl SizeLookup,
    main_extent: f32,
    config: &GridConfig,
) -> Option<GridLayout> {
    if config.group_size == 0 || !main_extent.is_finite() || main_extent <= 0.0 {
        return None;
    }

    let main_gap = config.gaps.main(config.flow);
    let cross_gap = config.gaps.cross(config.flow);
    let groups = config.group_size as f32;
    let main_group_size = (main_extent + main_gap) / groups - main_gap;
    if main_group_size <= 0.0 {
        return None;
    }

    let group_count = index_to_key.len().div_ceil(config.group_size);
    let mut cross_axis_offsets = vec![0.0_f32; group_count + 1];
    let mut positions =
        FxHashMap::with_capacity_and_hasher(index_to_key.len(), Default::default());

    for (index, key) in index_to_key.iter().enumerate() {
        let size = sizes.size_of(key)?;
        // A deviating main size means a resize is still settling.
        if !approx_eq(config.flow.main_of(size), main_group_size) {
            return None;
        }

        let group = index / config.group_size;
        let slot = index % config.group_size;
        let main = slot as f32 * (main_group_size + main_gap);
        let cross = cross_axis_offsets[group];
        positions.insert(key.clone(), config.flow.point(main, cross));

        let candidate = cross + config.flow.cross_of(size) + cross_gap;
        if candidate > cross_axis_offsets[group + 1] {
            cross_axis_offsets[group + 1] = candidate;
        }
    }

    let total_cross = if index_to_key.is_empty() {
        0.0
    } else {
        (cross_axis_offsets[group_count] - cross_gap).max(0.0)
    };

    Some(GridLayout {
        positions,
        container_size: config.flow.size(main_extent, total_cross),
        main_group_size,
        cross_axis_offsets,
        group_size: config.group_size,
        flow: config.flow,
        gaps: config.gaps,
        item_count: index_to_key.len(),
    })
}

#[cfg(test)]
#[path = "tests/grid_tests.rs"]
mod tests;
