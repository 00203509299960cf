use reflow_geometry::{Point, Size};
use rustc_hash::FxHashMap;

use super::{calculate_flex, FlexConfig};
use crate::{
    AlignContent, AlignItems, Gaps, ItemKey, JustifyContent, ResolvedBounds, UniformSize,
};

fn keys(names: &[&str]) -> Vec<ItemKey> {
    names.iter().map(|name| ItemKey::from(*name)).collect()
}

fn bounds(main: f32) -> ResolvedBounds {
    ResolvedBounds { main, cross: None }
}

#[test]
fn wraps_at_the_line_limit() {
    let order = keys(&["A", "B", "C"]);
    let sizes = UniformSize(Size::new(100.0, 50.0));
    let config = FlexConfig {
        gaps: Gaps::uniform(10.0),
        ..Default::default()
    };

    let layout = calculate_flex(&order, &sizes, bounds(250.0), &config).expect("layout ready");

    // 100 + 10 + 100 = 210 fits; adding the third (320) would not.
    assert_eq!(layout.group_count(), 2);
    assert_eq!(layout.item_groups[0], keys(&["A", "B"]));
    assert_eq!(layout.item_groups[1], keys(&["C"]));
    assert_eq!(layout.positions[&ItemKey::from("B")], Point::new(110.0, 0.0));
    assert_eq!(layout.positions[&ItemKey::from("C")], Point::new(0.0, 60.0));
    assert_eq!(layout.container_size, Size::new(250.0, 110.0));
}

#[test]
fn oversized_item_keeps_its_own_line() {
    let order = keys(&["A", "B"]);
    let mut sizes: FxHashMap<ItemKey, Size> = FxHashMap::default();
    sizes.insert(ItemKey::from("A"), Size::new(300.0, 50.0));
    sizes.insert(ItemKey::from("B"), Size::new(100.0, 50.0));
    let config = FlexConfig {
        gaps: Gaps::uniform(10.0),
        ..Default::default()
    };

    let layout = calculate_flex(&order, &sizes, bounds(250.0), &config).expect("layout ready");

    assert_eq!(layout.item_groups[0], keys(&["A"]));
    assert_eq!(layout.item_groups[1], keys(&["B"]));
}

#[test]
fn groups_concatenate_to_input_order() {
    let order = keys(&["A", "B", "C", "D", "E"]);
    let mut sizes: FxHashMap<ItemKey, Size> = FxHashMap::default();
    for (key, width) in [("A", 80.0), ("B", 120.0), ("C", 60.0), ("D", 90.0), ("E", 40.0)] {
        sizes.insert(ItemKey::from(key), Size::new(width, 30.0));
    }
    let config = FlexConfig {
        gaps: Gaps::uniform(8.0),
        ..Default::default()
    };

    let layout = calculate_flex(&order, &sizes, bounds(220.0), &config).expect("layout ready");

    let flattened: Vec<ItemKey> = layout.item_groups.iter().flatten().cloned().collect();
    assert_eq!(flattened, order);
    for (index, _) in order.iter().enumerate() {
        let (group, slot) = layout.location_of(index).expect("in range");
        assert_eq!(layout.flat_index(group, slot), index);
    }
}

#[test]
fn nowrap_keeps_a_single_line() {
    let order = keys(&["A", "B", "C"]);
    let sizes = UniformSize(Size::new(100.0, 50.0));
    let config = FlexConfig {
        wrap: false,
        gaps: Gaps::uniform(10.0),
        ..Default::default()
    };

    let layout = calculate_flex(&order, &sizes, bounds(250.0), &config).expect("layout ready");
    assert_eq!(layout.group_count(), 1);
    assert_eq!(layout.positions[&ItemKey::from("C")], Point::new(220.0, 0.0));
}

#[test]
fn align_items_centers_within_tallest_line_member() {
    let order = keys(&["A", "B"]);
    let mut sizes: FxHashMap<ItemKey, Size> = FxHashMap::default();
    sizes.insert(ItemKey::from("A"), Size::new(100.0, 60.0));
    sizes.insert(ItemKey::from("B"), Size::new(100.0, 30.0));
    let config = FlexConfig {
        align_items: AlignItems::Center,
        gaps: Gaps::uniform(10.0),
        ..Default::default()
    };

    let layout = calculate_flex(&order, &sizes, bounds(250.0), &config).expect("layout ready");
    assert_eq!(layout.positions[&ItemKey::from("A")], Point::new(0.0, 0.0));
    assert_eq!(layout.positions[&ItemKey::from("B")], Point::new(110.0, 15.0));
}

#[test]
fn align_content_centers_lines_in_fixed_cross_extent() {
    let order = keys(&["A", "B"]);
    let sizes = UniformSize(Size::new(100.0, 50.0));
    let config = FlexConfig {
        align_content: AlignContent::Center,
        gaps: Gaps::uniform(10.0),
        ..Default::default()
    };
    let bounds = ResolvedBounds {
        main: 150.0,
        cross: Some(200.0),
    };

    let layout = calculate_flex(&order, &sizes, bounds, &config).expect("layout ready");

    // Two lines of 50 with a 10 gap in 200 of cross space: start at 45.
    assert_eq!(layout.cross_axis_group_offsets, vec![45.0, 105.0]);
    assert_eq!(layout.container_size.height, 200.0);
}

#[test]
fn justify_content_applies_per_line() {
    let order = keys(&["A", "B", "C"]);
    let sizes = UniformSize(Size::new(100.0, 50.0));
    let config = FlexConfig {
        justify_content: JustifyContent::SpaceBetween,
        gaps: Gaps::uniform(10.0),
        ..Default::default()
    };

    let layout = calculate_flex(&order, &sizes, bounds(250.0), &config).expect("layout ready");

    // Line 1 has leftover 40 pushed between A and B; C sits alone.
    assert_eq!(layout.positions[&ItemKey::from("A")], Point::new(0.0, 0.0));
    assert_eq!(layout.positions[&ItemKey::from("B")], Point::new(150.0, 0.0));
    assert_eq!(layout.positions[&ItemKey::from("C")], Point::new(0.0, 60.0));
}

#[test]
fn unmeasured_item_defers_layout() {
    let order = keys(&["A", "B"]);
    let mut sizes: FxHashMap<ItemKey, Size> = FxHashMap::default();
    sizes.insert(ItemKey::from("A"), Size::new(100.0, 50.0));

    assert!(calculate_flex(&order, &sizes, bounds(250.0), &FlexConfig::default()).is_none());
}

#[test]
fn unresolved_main_extent_defers_layout() {
    let order = keys(&["A"]);
    let sizes = UniformSize(Size::new(100.0, 50.0));

    assert!(
        calculate_flex(&order, &sizes, bounds(f32::INFINITY), &FlexConfig::default()).is_none()
    );
}
