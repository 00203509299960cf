use reflow_geometry::{Point, Size};
use rustc_hash::FxHashMap;

use super::{calculate_grid, GridConfig};
use crate::{Gaps, ItemKey, UniformSize};

fn keys(names: &[&str]) -> Vec<ItemKey> {
    names.iter().map(|name| ItemKey::from(*name)).collect()
}

#[test]
fn three_column_grid_positions() {
    let order = keys(&["A", "B", "C", "D", "E", "F"]);
    let sizes = UniformSize(Size::new(100.0, 50.0));
    let config = GridConfig::columns(3, Gaps::new(10.0, 10.0));

    let layout = calculate_grid(&order, &sizes, 320.0, &config).expect("layout ready");

    assert_eq!(layout.main_group_size, 100.0);
    let expected = [
        ("A", 0.0, 0.0),
        ("B", 110.0, 0.0),
        ("C", 220.0, 0.0),
        ("D", 0.0, 60.0),
        ("E", 110.0, 60.0),
        ("F", 220.0, 60.0),
    ];
    for (name, x, y) in expected {
        assert_eq!(
            layout.positions[&ItemKey::from(name)],
            Point::new(x, y),
            "position of {name}"
        );
    }
    assert_eq!(layout.container_size, Size::new(320.0, 110.0));
    assert_eq!(layout.group_count(), 2);
}

#[test]
fn uneven_item_heights_grow_the_row() {
    let order = keys(&["A", "B", "C", "D"]);
    let mut sizes: FxHashMap<ItemKey, Size> = FxHashMap::default();
    sizes.insert(ItemKey::from("A"), Size::new(100.0, 50.0));
    sizes.insert(ItemKey::from("B"), Size::new(100.0, 80.0));
    sizes.insert(ItemKey::from("C"), Size::new(100.0, 40.0));
    sizes.insert(ItemKey::from("D"), Size::new(100.0, 50.0));
    let config = GridConfig::columns(3, Gaps::new(10.0, 10.0));

    let layout = calculate_grid(&order, &sizes, 320.0, &config).expect("layout ready");

    // Row 0 is as tall as its tallest member.
    assert_eq!(layout.positions[&ItemKey::from("D")], Point::new(0.0, 90.0));
    assert_eq!(layout.cross_span(0), (0.0, 80.0));
    assert_eq!(layout.container_size.height, 140.0);
}

#[test]
fn unmeasured_item_defers_layout() {
    let order = keys(&["A", "B"]);
    let mut sizes: FxHashMap<ItemKey, Size> = FxHashMap::default();
    sizes.insert(ItemKey::from("A"), Size::new(100.0, 50.0));
    let config = GridConfig::columns(3, Gaps::new(10.0, 10.0));

    assert!(calculate_grid(&order, &sizes, 320.0, &config).is_none());
}

#[test]
fn unsettled_cell_width_defers_layout() {
    let order = keys(&["A"]);
    // 90 wide in a grid whose cells must all be 100 wide.
    let sizes = UniformSize(Size::new(90.0, 50.0));
    let config = GridConfig::columns(3, Gaps::new(10.0, 10.0));

    assert!(calculate_grid(&order, &sizes, 320.0, &config).is_none());
}

#[test]
fn fixed_rows_flow_vertically() {
    let order = keys(&["A", "B", "C"]);
    let sizes = UniformSize(Size::new(40.0, 100.0));
    let config = GridConfig::rows(2, Gaps::new(10.0, 10.0));

    let layout = calculate_grid(&order, &sizes, 210.0, &config).expect("layout ready");

    assert_eq!(layout.main_group_size, 100.0);
    assert_eq!(layout.positions[&ItemKey::from("A")], Point::new(0.0, 0.0));
    assert_eq!(layout.positions[&ItemKey::from("B")], Point::new(0.0, 110.0));
    assert_eq!(layout.positions[&ItemKey::from("C")], Point::new(50.0, 0.0));
    assert_eq!(layout.container_size, Size::new(90.0, 210.0));
}

#[test]
fn empty_grid_is_ready_with_zero_cross_extent() {
    let order: Vec<ItemKey> = Vec::new();
    let sizes = UniformSize(Size::new(100.0, 50.0));
    let config = GridConfig::columns(3, Gaps::uniform(10.0));

    let layout = calculate_grid(&order, &sizes, 320.0, &config).expect("layout ready");
    assert_eq!(layout.container_size.height, 0.0);
    assert!(layout.positions.is_empty());
}
