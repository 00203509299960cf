//! Reorder strategies: pointer position in, candidate order out.
//!
//! A strategy returns `None` while the pointer stays inside the active
//! item's hysteresis zone; callers treat that as "keep the preview as
//! is". Strategies are idempotent: re-running with an unchanged pointer
//! and order yields `None`.

mod insert;
mod swap;

use std::rc::Rc;

use reflow_geometry::{Point, Size};
use reflow_layout::{FlexConfig, ItemKey};
use rustc_hash::FxHashMap;

use crate::order::ItemOrder;
use crate::snapshot::SortableLayout;

pub use insert::InsertStrategy;
pub use swap::SwapStrategy;

/// Everything a strategy reads for one evaluation. The snapshot is
/// consistent: order, layout, and sizes all belong to the same tick.
pub struct ReorderContext<'a> {
    pub active_key: &'a ItemKey,
    pub active_index: usize,
    pub active_size: Size,
    /// Pointer in content-box coordinates (scroll offset applied).
    pub pointer: Point,
    pub order: &'a ItemOrder,
    pub layout: &'a SortableLayout,
    pub sizes: &'a FxHashMap<ItemKey, Size>,
}

/// Converts the active item's pointer position into a candidate new
/// order, or `None` when no reorder should occur.
pub trait ReorderStrategy {
    fn compute_reorder(&self, ctx: &ReorderContext<'_>) -> Option<Vec<ItemKey>>;
}

/// Closed strategy selection, dispatched once at configuration time.
#[derive(Clone)]
pub enum StrategyKind {
    /// Transpose the active item with the item under the pointer.
    Swap,
    /// Open a gap by shifting a contiguous run of items (flex only).
    Insert,
    Custom(Rc<dyn ReorderStrategy>),
}

impl std::fmt::Debug for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Swap => write!(f, "Swap"),
            StrategyKind::Insert => write!(f, "Insert"),
            StrategyKind::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl StrategyKind {
    /// Resolves the concrete strategy object. `flex` carries the flex
    /// configuration the insert strategy re-wraps with.
    pub(crate) fn resolve(&self, flex: Option<FlexConfig>) -> Rc<dyn ReorderStrategy> {
        match self {
            StrategyKind::Swap => Rc::new(SwapStrategy),
            StrategyKind::Insert => Rc::new(InsertStrategy::new(flex.unwrap_or_default())),
            StrategyKind::Custom(strategy) => strategy.clone(),
        }
    }
}

/// Cap on the dead-zone inset at a cell boundary.
pub(crate) const MAX_SWAP_OFFSET: f32 = 10.0;

/// Dead-zone inset derived from the neighboring cell's extent.
#[inline]
pub(crate) fn swap_inset(neighbor_extent: f32) -> f32 {
    (neighbor_extent / 5.0).min(MAX_SWAP_OFFSET).max(0.0)
}

/// Resolves which span contains `coord`, walking outward from the
/// `active` span and crossing each boundary only once the coordinate
/// passes the boundary midpoint by the dead-zone inset.
///
/// Spans are `(start, end)` intervals in ascending order, possibly
/// separated by gaps.
pub(crate) fn resolve_slot(coord: f32, active: usize, spans: &[(f32, f32)]) -> usize {
    if spans.is_empty() {
        return 0;
    }
    let mut slot = active.min(spans.len() - 1);

    while slot + 1 < spans.len() {
        let (_, end) = spans[slot];
        let (next_start, next_end) = spans[slot + 1];
        let threshold = (end + next_start) / 2.0 + swap_inset(next_end - next_start);
        if coord > threshold {
            slot += 1;
        } else {
            break;
        }
    }
    while slot > 0 {
        let (start, _) = spans[slot];
        let (prev_start, prev_end) = spans[slot - 1];
        let threshold = (prev_end + start) / 2.0 - swap_inset(prev_end - prev_start);
        if coord < threshold {
            slot -= 1;
        } else {
            break;
        }
    }
    slot
}

/// Index of the span whose midpoint is nearest to `coord`; seeds the
/// outward walk when the active item enters a group it was not in.
pub(crate) fn nearest_slot(coord: f32, spans: &[(f32, f32)]) -> usize {
    let mut best = 0;
    let mut best_distance = f32::INFINITY;
    for (index, &(start, end)) in spans.iter().enumerate() {
        let distance = (coord - (start + end) / 2.0).abs();
        if distance < best_distance {
            best_distance = distance;
            best = index;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two 100-wide cells with a 10 gap: A = [0, 100], B = [110, 210].
    const SPANS: [(f32, f32); 2] = [(0.0, 100.0), (110.0, 210.0)];

    #[test]
    fn midpoint_dead_zone_blocks_the_crossing() {
        // Midpoint at 105, inset 10: anything up to 115 stays put.
        assert_eq!(resolve_slot(104.0, 0, &SPANS), 0);
        assert_eq!(resolve_slot(114.9, 0, &SPANS), 0);
        assert_eq!(resolve_slot(115.1, 0, &SPANS), 1);
    }

    #[test]
    fn reverse_crossing_has_its_own_dead_zone() {
        assert_eq!(resolve_slot(106.0, 1, &SPANS), 1);
        assert_eq!(resolve_slot(95.1, 1, &SPANS), 1);
        assert_eq!(resolve_slot(94.9, 1, &SPANS), 0);
    }

    #[test]
    fn walks_multiple_cells_in_one_call() {
        let spans = [(0.0, 100.0), (110.0, 210.0), (220.0, 320.0)];
        assert_eq!(resolve_slot(300.0, 0, &spans), 2);
        assert_eq!(resolve_slot(10.0, 2, &spans), 0);
    }

    #[test]
    fn inset_is_capped_for_large_cells() {
        assert_eq!(swap_inset(1000.0), MAX_SWAP_OFFSET);
        assert_eq!(swap_inset(25.0), 5.0);
    }

    #[test]
    fn nearest_slot_picks_closest_midpoint() {
        assert_eq!(nearest_slot(40.0, &SPANS), 0);
        assert_eq!(nearest_slot(170.0, &SPANS), 1);
    }
}
