//! Outbound events and render-state signals.

use std::rc::Rc;

use reflow_geometry::Point;
use reflow_layout::ItemKey;
use rustc_hash::FxHashMap;

/// One pointer sample as forwarded to advisory callbacks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerData {
    pub position: Point,
    pub timestamp_ms: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DragStartEvent {
    pub key: ItemKey,
    pub from_index: usize,
}

/// High-frequency advisory event; fires on every pointer sample while
/// a drag is active.
#[derive(Clone, Debug, PartialEq)]
pub struct DragMoveEvent {
    pub key: ItemKey,
    pub from_index: usize,
    pub pointer: PointerData,
}

/// Fires on every live reorder while dragging.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderChangeEvent {
    pub key: ItemKey,
    pub from_index: usize,
    pub to_index: usize,
    pub index_to_key: Vec<ItemKey>,
    pub key_to_index: FxHashMap<ItemKey, usize>,
}

/// Fires exactly once per drag session, after its order mutations are
/// final.
#[derive(Clone, Debug, PartialEq)]
pub struct DragEndEvent {
    pub key: ItemKey,
    pub from_index: usize,
    pub to_index: usize,
    pub index_to_key: Vec<ItemKey>,
    pub key_to_index: FxHashMap<ItemKey, usize>,
}

/// Host callback slots. Delivery is one-directional and synchronous
/// within the engine tick; callbacks must not reenter the engine.
#[derive(Clone, Default)]
pub struct SortableCallbacks {
    pub on_drag_start: Option<Rc<dyn Fn(&DragStartEvent)>>,
    pub on_drag_move: Option<Rc<dyn Fn(&DragMoveEvent)>>,
    pub on_order_change: Option<Rc<dyn Fn(&OrderChangeEvent)>>,
    pub on_drag_end: Option<Rc<dyn Fn(&DragEndEvent)>>,
    /// Fires once the drop animation fully settles.
    pub on_active_item_dropped: Option<Rc<dyn Fn(&DragEndEvent)>>,
}

impl std::fmt::Debug for SortableCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortableCallbacks")
            .field("on_drag_start", &self.on_drag_start.is_some())
            .field("on_drag_move", &self.on_drag_move.is_some())
            .field("on_order_change", &self.on_order_change.is_some())
            .field("on_drag_end", &self.on_drag_end.is_some())
            .field(
                "on_active_item_dropped",
                &self.on_active_item_dropped.is_some(),
            )
            .finish()
    }
}

/// Continuous per-item signal consumed by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemRenderState {
    /// Absolute position within the container (padding included).
    pub position: Point,
    /// Active item renders above dropping items, which render above
    /// settled ones.
    pub z_index: i32,
    /// 0 for settled items, animating toward 1 while active.
    pub activation_progress: f32,
}
