//! Swap strategy: transpose the active item with the item whose cell
//! contains the pointer.

use reflow_layout::{FlexLayout, GridLayout, ItemKey};

use super::{nearest_slot, resolve_slot, ReorderContext, ReorderStrategy};
use crate::snapshot::SortableLayout;

/// Per-axis bounded search over the current cell geometry, with a
/// dead zone at every cell boundary.
pub struct SwapStrategy;

impl ReorderStrategy for SwapStrategy {
    fn compute_reorder(&self, ctx: &ReorderContext<'_>) -> Option<Vec<ItemKey>> {
        let target = match ctx.layout {
            SortableLayout::Grid(grid) => resolve_grid_target(ctx, grid)?,
            SortableLayout::Flex(flex) => resolve_flex_target(ctx, flex)?,
        };
        if target == ctx.active_index {
            return None;
        }
        let target_key = ctx.order.key_at(target)?;
        if ctx.order.is_fixed(target_key) || ctx.order.is_fixed(ctx.active_key) {
            return None;
        }
        let mut candidate = ctx.order.index_to_key().to_vec();
        candidate.swap(ctx.active_index, target);
        Some(candidate)
    }
}

fn resolve_grid_target(ctx: &ReorderContext<'_>, grid: &GridLayout) -> Option<usize> {
    if grid.item_count == 0 {
        return None;
    }
    let flow = grid.flow;
    let pointer_main = flow.main_coord(ctx.pointer);
    let pointer_cross = flow.cross_coord(ctx.pointer);

    let group_spans: Vec<(f32, f32)> =
        (0..grid.group_count()).map(|g| grid.cross_span(g)).collect();
    let active_group = grid.group_of(ctx.active_index);
    let group = resolve_slot(pointer_cross, active_group, &group_spans);

    // The trailing group may be partial.
    let slots_in_group = if (group + 1) * grid.group_size > grid.item_count {
        grid.item_count - group * grid.group_size
    } else {
        grid.group_size
    };
    let slot_spans: Vec<(f32, f32)> = (0..slots_in_group).map(|s| grid.main_span(s)).collect();

    // Cell geometry repeats per group, so the active slot seeds the
    // walk even across a group change.
    let seed = grid.slot_of(ctx.active_index).min(slots_in_group.saturating_sub(1));
    let slot = resolve_slot(pointer_main, seed, &slot_spans);

    Some(grid.index_of(group, slot).min(grid.item_count - 1))
}

fn resolve_flex_target(ctx: &ReorderContext<'_>, flex: &FlexLayout) -> Option<usize> {
    if flex.group_count() == 0 {
        return None;
    }
    let axis = flex.axis;
    let pointer_main = axis.main_coord(ctx.pointer);
    let pointer_cross = axis.cross_coord(ctx.pointer);

    let group_spans: Vec<(f32, f32)> =
        (0..flex.group_count()).map(|g| flex.cross_span(g)).collect();
    let (active_group, active_slot) = flex.location_of(ctx.active_index)?;
    let group = resolve_slot(pointer_cross, active_group, &group_spans);

    let spans: Vec<(f32, f32)> = flex.item_groups[group]
        .iter()
        .map(|key| {
            let position = flex.positions.get(key)?;
            let size = ctx.sizes.get(key)?;
            let start = axis.main_coord(*position);
            Some((start, start + axis.main_of(*size)))
        })
        .collect::<Option<Vec<_>>>()?;

    let seed = if group == active_group {
        active_slot
    } else {
        let active_position = flex.positions.get(ctx.active_key)?;
        let active_center =
            axis.main_coord(*active_position) + axis.main_of(ctx.active_size) / 2.0;
        nearest_slot(active_center, &spans)
    };
    let slot = resolve_slot(pointer_main, seed, &spans);

    Some(flex.flat_index(group, slot))
}

#[cfg(test)]
mod tests {
    use reflow_geometry::{Point, Size};
    use reflow_layout::{calculate_grid, Gaps, GridConfig, UniformSize};
    use rustc_hash::FxHashMap;

    use super::*;
    use crate::order::ItemOrder;

    fn keys(names: &[&str]) -> Vec<ItemKey> {
        names.iter().map(|name| ItemKey::from(*name)).collect()
    }

    fn grid_fixture() -> (ItemOrder, SortableLayout, FxHashMap<ItemKey, Size>) {
        let order = ItemOrder::from_keys(keys(&["A", "B", "C", "D", "E", "F"]));
        let size = Size::new(100.0, 50.0);
        let config = GridConfig::columns(3, Gaps::uniform(10.0));
        let layout =
            calculate_grid(order.index_to_key(), &UniformSize(size), 320.0, &config).unwrap();
        let mut sizes = FxHashMap::default();
        for key in order.index_to_key() {
            sizes.insert(key.clone(), size);
        }
        (order, SortableLayout::Grid(layout), sizes)
    }

    fn ctx<'a>(
        order: &'a ItemOrder,
        layout: &'a SortableLayout,
        sizes: &'a FxHashMap<ItemKey, Size>,
        active: &'a ItemKey,
        pointer: Point,
    ) -> ReorderContext<'a> {
        ReorderContext {
            active_key: active,
            active_index: order.index_of(active).unwrap(),
            active_size: sizes[active],
            pointer,
            order,
            layout,
            sizes,
        }
    }

    #[test]
    fn stays_put_inside_own_cell() {
        let (order, layout, sizes) = grid_fixture();
        let active = ItemKey::from("A");
        let result = SwapStrategy.compute_reorder(&ctx(
            &order,
            &layout,
            &sizes,
            &active,
            Point::new(50.0, 25.0),
        ));
        assert!(result.is_none());
    }

    #[test]
    fn swaps_with_the_horizontal_neighbor_past_the_dead_zone() {
        let (order, layout, sizes) = grid_fixture();
        let active = ItemKey::from("A");
        // Boundary midpoint at x=105, inset 10: x=116 crosses into B.
        let candidate = SwapStrategy
            .compute_reorder(&ctx(
                &order,
                &layout,
                &sizes,
                &active,
                Point::new(116.0, 25.0),
            ))
            .expect("swap expected");
        assert_eq!(candidate, keys(&["B", "A", "C", "D", "E", "F"]));
    }

    #[test]
    fn pointer_inside_dead_zone_does_not_swap() {
        let (order, layout, sizes) = grid_fixture();
        let active = ItemKey::from("A");
        let result = SwapStrategy.compute_reorder(&ctx(
            &order,
            &layout,
            &sizes,
            &active,
            Point::new(114.0, 25.0),
        ));
        assert!(result.is_none());
    }

    #[test]
    fn swaps_across_rows() {
        let (order, layout, sizes) = grid_fixture();
        let active = ItemKey::from("A");
        // Row boundary midpoint at y=55, inset 10: y=70 lands in row 1.
        let candidate = SwapStrategy
            .compute_reorder(&ctx(
                &order,
                &layout,
                &sizes,
                &active,
                Point::new(50.0, 70.0),
            ))
            .expect("swap expected");
        assert_eq!(candidate, keys(&["D", "B", "C", "A", "E", "F"]));
    }

    #[test]
    fn is_idempotent_for_a_stationary_pointer() {
        let (mut order, layout, sizes) = grid_fixture();
        let active = ItemKey::from("A");
        let pointer = Point::new(116.0, 25.0);
        let candidate = SwapStrategy
            .compute_reorder(&ctx(&order, &layout, &sizes, &active, pointer))
            .expect("first call swaps");
        assert!(order.apply(candidate));
        // Same pointer, updated order: the active item already owns the
        // resolved cell.
        let second = SwapStrategy.compute_reorder(&ctx(&order, &layout, &sizes, &active, pointer));
        assert!(second.is_none());
    }

    #[test]
    fn refuses_to_swap_with_a_fixed_item() {
        let (mut order, layout, sizes) = grid_fixture();
        order.set_fixed(&ItemKey::from("B"), true);
        let active = ItemKey::from("A");
        let result = SwapStrategy.compute_reorder(&ctx(
            &order,
            &layout,
            &sizes,
            &active,
            Point::new(116.0, 25.0),
        ));
        assert!(result.is_none());
    }

    #[test]
    fn partial_last_row_clamps_to_existing_items() {
        let order = ItemOrder::from_keys(keys(&["A", "B", "C", "D"]));
        let size = Size::new(100.0, 50.0);
        let config = GridConfig::columns(3, Gaps::uniform(10.0));
        let layout = SortableLayout::Grid(
            calculate_grid(order.index_to_key(), &UniformSize(size), 320.0, &config).unwrap(),
        );
        let mut sizes = FxHashMap::default();
        for key in order.index_to_key() {
            sizes.insert(key.clone(), size);
        }
        let active = ItemKey::from("C");
        // Pointer deep in row 1, which only holds D at slot 0.
        let candidate = SwapStrategy
            .compute_reorder(&ctx(&order, &layout, &sizes, &active, Point::new(30.0, 85.0)))
            .expect("swap expected");
        assert_eq!(candidate, keys(&["A", "B", "D", "C"]));
    }
}
