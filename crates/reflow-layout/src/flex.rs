//! Wrapping flex layout calculator.
//!
//! Items are walked in order and greedily packed into lines; a line
//! breaks when the running main-axis extent (items + gaps) would exceed
//! the wrap limit, except that an oversized item alone on a line is
//! never split. Alignment settings distribute leftover space between
//! lines (align-content), within a line's cross extent (align-items),
//! and along the main axis (justify-content).

use reflow_geometry::{Point, Size, EPSILON};
use rustc_hash::FxHashMap;

use crate::{
    AlignContent, AlignItems, Axis, Gaps, ItemKey, JustifyContent, ResolvedBounds, SizeLookup,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlexConfig {
    /// Main axis of item flow (`Horizontal` = row).
    pub axis: Axis,
    /// When false, all items stay on a single line.
    pub wrap: bool,
    pub gaps: Gaps,
    pub align_content: AlignContent,
    pub align_items: AlignItems,
    pub justify_content: JustifyContent,
}

impl Default for FlexConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Horizontal,
            wrap: true,
            gaps: Gaps::default(),
            align_content: AlignContent::default(),
            align_items: AlignItems::default(),
            justify_content: JustifyContent::default(),
        }
    }
}

/// Immutable flex layout snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct FlexLayout {
    pub positions: FxHashMap<ItemKey, Point>,
    /// Content-box size; callers add padding when exposing absolute
    /// coordinates.
    pub container_size: Size,
    /// The wrapped lines; concatenated they reproduce the input order.
    pub item_groups: Vec<Vec<ItemKey>>,
    /// Cross-axis start offset of each line.
    pub cross_axis_group_offsets: Vec<f32>,
    /// Cross-axis extent of each line (including align-content growth).
    pub cross_axis_group_sizes: Vec<f32>,
    /// Main-axis extent available to each line; the wrap limit.
    pub group_size_limit: f32,
    /// Fixed cross-axis bound the layout was computed against, if any.
    pub cross_bound: Option<f32>,
    pub axis: Axis,
    pub gaps: Gaps,
}

impl FlexLayout {
    pub fn group_count(&self) -> usize {
        self.item_groups.len()
    }

    /// Maps a flattened order index to its `(group, slot)` location.
    pub fn location_of(&self, flat_index: usize) -> Option<(usize, usize)> {
        let mut remaining = flat_index;
        for (group, items) in self.item_groups.iter().enumerate() {
            if remaining < items.len() {
                return Some((group, remaining));
            }
            remaining -= items.len();
        }
        None
    }

    /// Maps a `(group, slot)` location back to a flattened order index.
    pub fn flat_index(&self, group: usize, slot: usize) -> usize {
        self.item_groups[..group]
            .iter()
            .map(|items| items.len())
            .sum::<usize>()
            + slot
    }

    /// Cross-axis span `(start, end)` of `group`.
    pub fn cross_span(&self, group: usize) -> (f32, f32) {
        let start = self.cross_axis_group_offsets[group];
        (start, start + self.cross_axis_group_sizes[group])
    }
}

/// Computes a flex layout, or `None` while any item is unmeasured or
/// the main-axis bound is not yet resolved.
pub fn calculate_flex(
    index_to_key: &[ItemKey],
    sizes: &impl SizeLookup,
    bounds: ResolvedBounds,
    config: &FlexConfig,
) -> Option<FlexLayout> {
    let limit = bounds.main;
    if !limit.is_finite() || limit <= 0.0 {
        return None;
    }

    let main_gap = config.gaps.main(config.axis);
    let cross_gap = config.gaps.cross(config.axis);

    let mut item_sizes = Vec::with_capacity(index_to_key.len());
    for key in index_to_key {
        item_sizes.push(sizes.size_of(key)?);
    }

    // Greedy wrap into [start, end) index ranges.
    let mut lines: Vec<(usize, usize)> = Vec::new();
    let mut line_start = 0;
    let mut running = 0.0_f32;
    for (index, size) in item_sizes.iter().enumerate() {
        let main = config.axis.main_of(*size);
        let is_line_empty = index == line_start;
        if is_line_empty {
            running = main;
        } else if !config.wrap || running + main_gap + main <= limit + EPSILON {
            running += main_gap + main;
        } else {
            lines.push((line_start, index));
            line_start = index;
            running = main;
        }
    }
    if !index_to_key.is_empty() {
        lines.push((line_start, index_to_key.len()));
    }

    let line_cross_sizes: Vec<f32> = lines
        .iter()
        .map(|&(start, end)| {
            item_sizes[start..end]
                .iter()
                .map(|size| config.axis.cross_of(*size))
                .fold(0.0_f32, f32::max)
        })
        .collect();

    let content_cross = if lines.is_empty() {
        0.0
    } else {
        line_cross_sizes.iter().sum::<f32>() + cross_gap * (lines.len() as f32 - 1.0)
    };
    let leftover = bounds
        .cross
        .map(|cross| (cross - content_cross).max(0.0))
        .unwrap_or(0.0);
    let distribution = config.align_content.distribute(leftover, lines.len());

    let mut positions =
        FxHashMap::with_capacity_and_hasher(index_to_key.len(), Default::default());
    let mut item_groups = Vec::with_capacity(lines.len());
    let mut cross_axis_group_offsets = Vec::with_capacity(lines.len());
    let mut cross_axis_group_sizes = Vec::with_capacity(lines.len());

    let mut cursor = distribution.start;
    let mut main_positions: Vec<f32> = Vec::new();
    let mut main_sizes: Vec<f32> = Vec::new();
    for (&(start, end), &line_cross) in lines.iter().zip(&line_cross_sizes) {
        let extent = line_cross + distribution.line_growth;
        cross_axis_group_offsets.push(cursor);
        cross_axis_group_sizes.push(extent);

        main_sizes.clear();
        main_sizes.extend(
            item_sizes[start..end]
                .iter()
                .map(|size| config.axis.main_of(*size)),
        );
        main_positions.clear();
        main_positions.resize(main_sizes.len(), 0.0);
        config
            .justify_content
            .arrange(limit, &main_sizes, main_gap, &mut main_positions);

        let mut group_keys = Vec::with_capacity(end - start);
        for (offset, index) in (start..end).enumerate() {
            let item_cross = config.axis.cross_of(item_sizes[index]);
            let cross = cursor + config.align_items.align(extent, item_cross);
            let key = index_to_key[index].clone();
            positions.insert(key.clone(), config.axis.point(main_positions[offset], cross));
            group_keys.push(key);
        }
        item_groups.push(group_keys);

        cursor += extent + cross_gap + distribution.between;
    }

    let content_total = match (
        cross_axis_group_offsets.last(),
        cross_axis_group_sizes.last(),
    ) {
        (Some(offset), Some(size)) => offset + size,
        _ => 0.0,
    };
    let container_cross = bounds.cross.unwrap_or(content_total);

    Some(FlexLayout {
        positions,
        container_size: config.axis.size(limit, container_cross),
        item_groups,
        cross_axis_group_offsets,
        cross_axis_group_sizes,
        group_size_limit: limit,
        cross_bound: bounds.cross,
        axis: config.axis,
        gaps: config.gaps,
    })
}

#[cfg(test)]
#[path = "tests/flex_tests.rs"]
mod tests;
