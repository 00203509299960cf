use super::{AlignContent, AlignItems, JustifyContent};

#[test]
fn space_evenly_distributes_gaps() {
    let justify = JustifyContent::SpaceEvenly;
    let sizes = vec![10.0, 10.0, 10.0];
    let mut positions = vec![0.0; sizes.len()];
    justify.arrange(100.0, &sizes, 0.0, &mut positions);
    assert_eq!(positions, vec![17.5, 45.0, 72.5]);
}

#[test]
fn flex_end_pushes_line_to_trailing_edge() {
    let justify = JustifyContent::FlexEnd;
    let sizes = vec![10.0, 10.0];
    let mut positions = vec![0.0; sizes.len()];
    justify.arrange(50.0, &sizes, 5.0, &mut positions);
    assert_eq!(positions, vec![25.0, 40.0]);
}

#[test]
fn space_between_keeps_configured_gap_as_minimum() {
    let justify = JustifyContent::SpaceBetween;
    let sizes = vec![10.0, 10.0, 10.0];
    let mut positions = vec![0.0; sizes.len()];
    justify.arrange(60.0, &sizes, 5.0, &mut positions);
    // 20 leftover after children + gaps, split across the two joints.
    assert_eq!(positions, vec![0.0, 25.0, 50.0]);
}

#[test]
fn overfull_line_falls_back_to_flex_start() {
    let justify = JustifyContent::Center;
    let sizes = vec![40.0, 40.0];
    let mut positions = vec![0.0; sizes.len()];
    justify.arrange(50.0, &sizes, 0.0, &mut positions);
    assert_eq!(positions, vec![0.0, 40.0]);
}

#[test]
fn align_items_center_offsets_shorter_children() {
    assert_eq!(AlignItems::Center.align(50.0, 30.0), 10.0);
    assert_eq!(AlignItems::FlexEnd.align(50.0, 30.0), 20.0);
    assert_eq!(AlignItems::FlexStart.align(50.0, 30.0), 0.0);
    assert_eq!(AlignItems::Stretch.align(50.0, 30.0), 0.0);
}

#[test]
fn align_content_stretch_grows_lines() {
    let distribution = AlignContent::Stretch.distribute(30.0, 3);
    assert_eq!(distribution.line_growth, 10.0);
    assert_eq!(distribution.start, 0.0);
    assert_eq!(distribution.between, 0.0);
}

#[test]
fn align_content_space_between_single_line_is_noop() {
    let distribution = AlignContent::SpaceBetween.distribute(30.0, 1);
    assert_eq!(distribution, Default::default());
}
