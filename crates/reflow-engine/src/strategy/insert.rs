//! Insert strategy: open a gap at the pointer by shifting a contiguous
//! run of items.
//!
//! The active item is removed and the remaining items re-flowed; the
//! pointer is then resolved against that hypothetical layout, first to
//! a line (cross axis), then to an insertion slot between the line's
//! item centers (main axis), each with its own dead zone.

use std::cell::RefCell;

use reflow_geometry::Size;
use reflow_layout::{calculate_flex, FlexConfig, FlexLayout, ItemKey, ResolvedBounds};

use super::{resolve_slot, swap_inset, ReorderContext, ReorderStrategy};
use crate::snapshot::SortableLayout;

/// The re-flow of the remaining items, keyed by the inputs that
/// produced it. The remaining order is invariant while the active item
/// moves, so consecutive evaluations of the same drag hit the cache.
struct HypotheticalLayout {
    remaining: Vec<ItemKey>,
    sizes: Vec<Size>,
    bounds: ResolvedBounds,
    layout: FlexLayout,
}

pub struct InsertStrategy {
    flex: FlexConfig,
    cache: RefCell<Option<HypotheticalLayout>>,
}

impl InsertStrategy {
    pub fn new(flex: FlexConfig) -> Self {
        Self {
            flex,
            cache: RefCell::new(None),
        }
    }
}

impl ReorderStrategy for InsertStrategy {
    fn compute_reorder(&self, ctx: &ReorderContext<'_>) -> Option<Vec<ItemKey>> {
        let SortableLayout::Flex(current) = ctx.layout else {
            // Validated away at setup time.
            return None;
        };
        if ctx.order.is_fixed(ctx.active_key) {
            return None;
        }

        let remaining: Vec<ItemKey> = ctx
            .order
            .index_to_key()
            .iter()
            .filter(|key| *key != ctx.active_key)
            .cloned()
            .collect();
        if remaining.is_empty() {
            return None;
        }

        // Re-flow without the active item; the wrap limit is the same
        // one the committed layout was computed against.
        let bounds = ResolvedBounds {
            main: current.group_size_limit,
            cross: current.cross_bound,
        };
        let remaining_sizes: Vec<Size> = remaining
            .iter()
            .map(|key| ctx.sizes.get(key).copied())
            .collect::<Option<_>>()?;
        let stale = {
            let cache = self.cache.borrow();
            !matches!(
                cache.as_ref(),
                Some(entry) if entry.remaining == remaining
                    && entry.sizes == remaining_sizes
                    && entry.bounds == bounds
            )
        };
        if stale {
            let layout = calculate_flex(&remaining, ctx.sizes, bounds, &self.flex)?;
            *self.cache.borrow_mut() = Some(HypotheticalLayout {
                remaining: remaining.clone(),
                sizes: remaining_sizes,
                bounds,
                layout,
            });
        }
        let cache = self.cache.borrow();
        let hypothetical = &cache.as_ref()?.layout;
        let axis = hypothetical.axis;

        // The active item currently occupies insertion slot
        // `active_index` of the remaining order.
        let current_slot = ctx.active_index;

        let group_spans: Vec<(f32, f32)> = (0..hypothetical.group_count())
            .map(|g| hypothetical.cross_span(g))
            .collect();
        let seed_group = hypothetical
            .location_of(current_slot.min(remaining.len() - 1))
            .map(|(group, _)| group)
            .unwrap_or_else(|| hypothetical.group_count().saturating_sub(1));
        let group = resolve_slot(axis.cross_coord(ctx.pointer), seed_group, &group_spans);

        let line = &hypothetical.item_groups[group];
        let line_start = hypothetical.flat_index(group, 0);
        let mut centers = Vec::with_capacity(line.len());
        let mut extents = Vec::with_capacity(line.len());
        for key in line {
            let position = hypothetical.positions.get(key)?;
            let size = ctx.sizes.get(key)?;
            let extent = axis.main_of(*size);
            centers.push(axis.main_coord(*position) + extent / 2.0);
            extents.push(extent);
        }

        let pointer_main = axis.main_coord(ctx.pointer);
        let seed_slot = if current_slot >= line_start && current_slot <= line_start + line.len() {
            current_slot - line_start
        } else {
            // Entering a different line: no previous slot to walk
            // from, so land after every item center the pointer has
            // passed. The cross-axis dead zone already gated entry.
            centers.iter().filter(|center| **center < pointer_main).count()
        };
        let slot = resolve_insertion(pointer_main, seed_slot, &centers, &extents);

        let target = line_start + slot;
        if target == current_slot {
            return None;
        }

        let mut candidate = remaining;
        candidate.insert(target.min(candidate.len()), ctx.active_key.clone());
        if candidate == ctx.order.index_to_key() {
            return None;
        }
        // A shift that would displace a pinned key is refused outright.
        for (index, key) in candidate.iter().enumerate() {
            if ctx.order.is_fixed(key) && ctx.order.index_of(key) != Some(index) {
                return None;
            }
        }
        Some(candidate)
    }
}

/// Resolves an insertion slot (0..=len) between item centers, walking
/// outward from `seed` with a dead zone past each crossed center.
fn resolve_insertion(coord: f32, seed: usize, centers: &[f32], extents: &[f32]) -> usize {
    let mut slot = seed.min(centers.len());
    while slot < centers.len() {
        let threshold = centers[slot] + swap_inset(extents[slot]);
        if coord > threshold {
            slot += 1;
        } else {
            break;
        }
    }
    while slot > 0 {
        let threshold = centers[slot - 1] - swap_inset(extents[slot - 1]);
        if coord < threshold {
            slot -= 1;
        } else {
            break;
        }
    }
    slot
}
