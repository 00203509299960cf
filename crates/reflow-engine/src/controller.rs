//! Drag session lifecycle and active-item position derivation.

use reflow_geometry::{Point, Size, Vector};
use reflow_layout::{Axis, ItemKey};

use crate::config::SortableConfig;
use crate::scheduler::TimerId;
use crate::timeline::{lerp, Timeline};

/// Finite states of one touch gesture. `Dropping` is the tail of the
/// active state: the drop animation must settle before the session is
/// fully cleared and a new drag may begin.
#[derive(Clone, Debug, Default)]
pub(crate) enum DragPhase {
    #[default]
    Inactive,
    Touched(TouchedSession),
    Active(ActiveSession),
    Dropping(DroppingSession),
}

impl DragPhase {
    pub(crate) fn active_key(&self) -> Option<&ItemKey> {
        match self {
            DragPhase::Active(session) => Some(&session.key),
            _ => None,
        }
    }
}

/// Touch-down recorded; waiting for the activation delay.
#[derive(Clone, Debug)]
pub(crate) struct TouchedSession {
    pub key: ItemKey,
    pub pointer_down: Point,
    pub pointer: Point,
    pub timestamp_ms: f64,
    pub activation_timer: TimerId,
}

/// A recognized drag in progress.
#[derive(Clone, Debug)]
pub(crate) struct ActiveSession {
    pub key: ItemKey,
    pub drag_start_index: usize,
    pub item_size: Size,
    /// Pointer position minus the item's top-left at activation.
    pub touch_offset: Vector,
    pub pointer: Point,
    pub timestamp_ms: f64,
    pub activation: Timeline,
}

/// Drop animation running; the session clears when it settles.
#[derive(Clone, Debug)]
pub(crate) struct DroppingSession {
    pub key: ItemKey,
    pub from_index: usize,
    pub to_index: usize,
    /// Rendered position at release; the item animates from here to
    /// its settled slot as `progress` runs back to zero.
    pub release_position: Point,
    pub progress: Timeline,
}

/// Derives the active item's rendered top-left from the current
/// pointer sample.
///
/// The raw touch offset is interpolated toward the configured snap
/// offset as the activation animation progresses, so enabling snap
/// never jumps the item under the finger. The result is clamped to the
/// container unless over-drag frees the axis.
pub(crate) fn active_item_position(
    session: &ActiveSession,
    config: &SortableConfig,
    container: Size,
    scroll_axis: Axis,
    scroll_delta: f32,
) -> Point {
    let progress = session.activation.value();
    let offset = if config.enable_active_item_snap {
        let snap = Vector::new(
            config.snap_offset_x.resolve(session.item_size.width),
            config.snap_offset_y.resolve(session.item_size.height),
        );
        Vector::new(
            lerp(session.touch_offset.dx, snap.dx, progress),
            lerp(session.touch_offset.dy, snap.dy, progress),
        )
    } else {
        session.touch_offset
    };

    // Pointer samples arrive in viewport coordinates; the scroll delta
    // moves them into the content box.
    let scroll = match scroll_axis {
        Axis::Horizontal => Vector::new(scroll_delta, 0.0),
        Axis::Vertical => Vector::new(0.0, scroll_delta),
    };
    let content_pointer = session.pointer + scroll;
    let mut position = content_pointer - offset;

    if !config.over_drag.allows_horizontal() {
        let max_x = (container.width - session.item_size.width).max(0.0);
        position.x = position.x.clamp(0.0, max_x);
    }
    if !config.over_drag.allows_vertical() {
        let max_y = (container.height - session.item_size.height).max(0.0);
        position.y = position.y.clamp(0.0, max_y);
    }
    position
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GridSpec, OverDrag, SnapOffset, SortableConfig};
    use crate::timeline::Easing;
    use reflow_layout::Gaps;

    fn session(progress: f32) -> ActiveSession {
        ActiveSession {
            key: ItemKey::from("A"),
            drag_start_index: 0,
            item_size: Size::new(100.0, 50.0),
            touch_offset: Vector::new(10.0, 10.0),
            pointer: Point::new(160.0, 80.0),
            timestamp_ms: 0.0,
            activation: Timeline::settled(progress, Easing::Linear),
        }
    }

    fn config() -> SortableConfig {
        SortableConfig::grid(GridSpec::columns(3, Gaps::uniform(10.0)))
    }

    #[test]
    fn raw_offset_applies_before_snap_kicks_in() {
        let mut config = config();
        config.enable_active_item_snap = true;
        config.snap_offset_x = SnapOffset::Fraction(0.5);
        config.snap_offset_y = SnapOffset::Fraction(0.5);
        let position = active_item_position(
            &session(0.0),
            &config,
            Size::new(320.0, 320.0),
            Axis::Vertical,
            0.0,
        );
        assert_eq!(position, Point::new(150.0, 70.0));
    }

    #[test]
    fn snap_centers_the_item_when_fully_activated() {
        let mut config = config();
        config.enable_active_item_snap = true;
        let position = active_item_position(
            &session(1.0),
            &config,
            Size::new(320.0, 320.0),
            Axis::Vertical,
            0.0,
        );
        // Pointer sits at the item midpoint: 160-50, 80-25.
        assert_eq!(position, Point::new(110.0, 55.0));
    }

    #[test]
    fn clamped_to_container_without_over_drag() {
        let mut config = config();
        config.enable_active_item_snap = false;
        let mut session = session(1.0);
        session.pointer = Point::new(-40.0, 500.0);
        let position = active_item_position(
            &session,
            &config,
            Size::new(320.0, 320.0),
            Axis::Vertical,
            0.0,
        );
        assert_eq!(position, Point::new(0.0, 270.0));
    }

    #[test]
    fn over_drag_frees_the_configured_axis() {
        let mut config = config();
        config.enable_active_item_snap = false;
        config.over_drag = OverDrag::Vertical;
        let mut session = session(1.0);
        session.pointer = Point::new(-40.0, 500.0);
        let position = active_item_position(
            &session,
            &config,
            Size::new(320.0, 320.0),
            Axis::Vertical,
            0.0,
        );
        assert_eq!(position, Point::new(0.0, 490.0));
    }

    #[test]
    fn scroll_delta_shifts_the_reference_frame() {
        let mut config = config();
        config.enable_active_item_snap = false;
        let position = active_item_position(
            &session(1.0),
            &config,
            Size::new(320.0, 1000.0),
            Axis::Vertical,
            120.0,
        );
        assert_eq!(position, Point::new(150.0, 190.0));
    }
}
