//! The engine facade: measurement intake, the gesture pipeline, and
//! the per-frame tick that drives timers, layout, auto-scroll, and
//! animation timelines.

use reflow_geometry::{approx_eq, Point, Size, Vector};
use reflow_layout::{calculate_flex, calculate_grid, Axis, FlexConfig, GridConfig, ItemKey};
use rustc_hash::FxHashMap;
use std::rc::Rc;
use web_time::Instant;

use crate::autoscroll::AutoScroll;
use crate::config::{ConfigError, LayoutSpec, ReorderTrigger, SortableConfig};
use crate::controller::{
    active_item_position, ActiveSession, DragPhase, DroppingSession, TouchedSession,
};
use crate::events::{
    DragEndEvent, DragMoveEvent, DragStartEvent, ItemRenderState, OrderChangeEvent, PointerData,
    SortableCallbacks,
};
use crate::order::ItemOrder;
use crate::scheduler::{TickScheduler, TimerId};
use crate::snapshot::SortableLayout;
use crate::strategy::{ReorderContext, ReorderStrategy};
use crate::timeline::{lerp, Easing, Timeline};

/// Re-measurements settle for this long before a layout recompute;
/// the first measurement of a key always applies immediately.
const MEASUREMENT_DEBOUNCE_MS: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerPurpose {
    Activation,
    MeasurementFlush,
}

/// Whether the engine holds a layout snapshot it trusts.
///
/// Gestures are only accepted while `Ready`; a container that has not
/// produced a first layout, or is mid-recompute, refuses new drags
/// rather than starting one against stale geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Readiness {
    /// No layout snapshot has been produced yet.
    Pending,
    /// A snapshot exists but inputs changed since it was computed.
    Transitioning,
    /// The snapshot reflects the latest order, sizes, and container.
    Ready,
}

/// One drag-to-reorder engine per sortable container.
///
/// Single-threaded and cooperative: the host feeds measurements and
/// pointer samples as they arrive and drives [`SortableEngine::tick`]
/// from its frame clock. All outbound callbacks fire synchronously
/// from within those calls and must not reenter the engine.
pub struct SortableEngine {
    config: SortableConfig,
    strategy: Rc<dyn ReorderStrategy>,
    grid_config: Option<GridConfig>,
    flex_config: Option<FlexConfig>,

    order: ItemOrder,
    sizes: FxHashMap<ItemKey, Size>,
    pending_sizes: FxHashMap<ItemKey, Size>,
    debounce_timer: Option<TimerId>,
    container: Option<Size>,
    layout: Option<SortableLayout>,
    layout_dirty: bool,

    scheduler: TickScheduler<TimerPurpose>,
    phase: DragPhase,
    /// Shared decoration signal for the non-dragged items; runs 0 to 1
    /// while a drag is active and back down after the drop.
    inactive_progress: Timeline,
    auto_scroll: AutoScroll,
    scroll_offset: f32,

    callbacks: SortableCallbacks,
    now_ms: f64,
    last_tick_ms: f64,
    clock_origin: Option<Instant>,
}

impl SortableEngine {
    /// Builds an engine from a validated configuration. Every
    /// configuration violation fails here; there is no partially
    /// initialized engine.
    pub fn new(config: SortableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let (grid_config, flex_config) = Self::resolve_layout(&config)?;
        let strategy = config.strategy.resolve(flex_config.clone());
        Ok(Self {
            config,
            strategy,
            grid_config,
            flex_config,
            order: ItemOrder::new(),
            sizes: FxHashMap::default(),
            pending_sizes: FxHashMap::default(),
            debounce_timer: None,
            container: None,
            layout: None,
            layout_dirty: false,
            scheduler: TickScheduler::new(),
            phase: DragPhase::Inactive,
            inactive_progress: Timeline::settled(0.0, Easing::default()),
            auto_scroll: AutoScroll::new(),
            scroll_offset: 0.0,
            callbacks: SortableCallbacks::default(),
            now_ms: 0.0,
            last_tick_ms: 0.0,
            clock_origin: None,
        })
    }

    fn resolve_layout(
        config: &SortableConfig,
    ) -> Result<(Option<GridConfig>, Option<FlexConfig>), ConfigError> {
        match &config.layout {
            LayoutSpec::Grid(spec) => Ok((Some(spec.resolve()?), None)),
            LayoutSpec::Flex(flex) => Ok((None, Some(flex.clone()))),
        }
    }

    pub fn config(&self) -> &SortableConfig {
        &self.config
    }

    pub fn set_callbacks(&mut self, callbacks: SortableCallbacks) {
        self.callbacks = callbacks;
    }

    pub fn callbacks_mut(&mut self) -> &mut SortableCallbacks {
        &mut self.callbacks
    }

    /// Replaces the layout configuration in place. The current order,
    /// measurements, and scroll offset survive; the next tick lays the
    /// same items out under the new configuration.
    pub fn set_layout_config(&mut self, layout: LayoutSpec) -> Result<(), ConfigError> {
        let mut next = self.config.clone();
        next.layout = layout;
        next.validate()?;
        let (grid_config, flex_config) = Self::resolve_layout(&next)?;
        self.config = next;
        self.grid_config = grid_config;
        self.flex_config = flex_config;
        self.strategy = self.config.strategy.resolve(self.flex_config.clone());
        self.layout_dirty = true;
        Ok(())
    }

    // ---- data intake ----------------------------------------------------

    /// Replaces the whole key set. Pins survive for keys still present;
    /// measurements are kept so returning keys need no re-measure.
    pub fn set_order(&mut self, keys: impl IntoIterator<Item = ItemKey>) {
        self.order.reset(keys);
        self.layout_dirty = true;
        self.abort_if_key_vanished();
    }

    /// Appends one key at the end of the order.
    pub fn add_item(&mut self, key: ItemKey) {
        self.order.insert_key(key);
        self.layout_dirty = true;
    }

    /// Removes a key and its measurements. A drag session on the
    /// removed key is aborted without a reorder.
    pub fn report_item_removed(&mut self, key: &ItemKey) {
        self.sizes.remove(key);
        self.pending_sizes.remove(key);
        if self.order.remove_key(key) {
            self.layout_dirty = true;
        }
        self.abort_if_key_vanished();
    }

    /// Pins or unpins a key; strategies refuse any reorder that would
    /// move a pinned key.
    pub fn set_key_fixed(&mut self, key: &ItemKey, fixed: bool) {
        self.order.set_fixed(key, fixed);
    }

    /// Records one item measurement. The first measurement of a key
    /// applies immediately; re-measurements are debounced so a burst of
    /// host relayouts collapses into one recompute.
    pub fn report_item_size(&mut self, key: ItemKey, size: Size) {
        match self.sizes.get(&key) {
            None => {
                self.sizes.insert(key, size);
                self.layout_dirty = true;
            }
            Some(current) if same_size(*current, size) => {
                self.pending_sizes.remove(&key);
            }
            Some(_) => {
                self.pending_sizes.insert(key, size);
                if self.debounce_timer.is_none() {
                    self.debounce_timer = Some(self.scheduler.schedule_after(
                        self.now_ms,
                        MEASUREMENT_DEBOUNCE_MS,
                        TimerPurpose::MeasurementFlush,
                    ));
                }
            }
        }
    }

    /// Records the measured viewport size of the container.
    pub fn report_container_size(&mut self, size: Size) {
        if let Some(current) = self.container {
            if same_size(current, size) {
                return;
            }
        }
        self.container = Some(size);
        self.layout_dirty = true;
    }

    /// Host-driven scroll position along the scroll axis. Auto-scroll
    /// deltas produced by the engine accumulate on top of this.
    pub fn set_scroll_offset(&mut self, offset: f32) {
        self.scroll_offset = offset;
    }

    #[inline]
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Disabling mid-gesture ends the session like a cancelled touch:
    /// reorders already committed stand, the final evaluation is
    /// skipped, and an active item still settles through the drop
    /// animation with its `on_drag_end`.
    pub fn set_sortable_enabled(&mut self, enabled: bool) {
        self.config.sortable_enabled = enabled;
        if !enabled {
            self.touch_cancel(self.now_ms);
        }
    }

    // ---- gestures -------------------------------------------------------

    /// Begins tracking a touch on `key`. Returns whether the gesture is
    /// tracked; refused touches leave the engine untouched so the host
    /// can route the gesture to scrolling instead.
    pub fn touch_down(&mut self, key: &ItemKey, position: Point, timestamp_ms: f64) -> bool {
        if !self.config.sortable_enabled
            || !matches!(self.phase, DragPhase::Inactive)
            || self.readiness() != Readiness::Ready
            || !self.order.contains(key)
            || !self.sizes.contains_key(key)
            || self.item_position(key).is_none()
        {
            return false;
        }
        let activation_timer = self.scheduler.schedule_after(
            timestamp_ms,
            self.config.drag_activation_delay_ms,
            TimerPurpose::Activation,
        );
        self.phase = DragPhase::Touched(TouchedSession {
            key: key.clone(),
            pointer_down: position,
            pointer: position,
            timestamp_ms,
            activation_timer,
        });
        true
    }

    /// Feeds a pointer sample. Before activation, travel beyond the
    /// fail offset silently hands the gesture back to scrolling; after
    /// activation the sample moves the active item.
    pub fn touch_move(&mut self, position: Point, timestamp_ms: f64) {
        match &mut self.phase {
            DragPhase::Touched(touched) => {
                touched.pointer = position;
                touched.timestamp_ms = timestamp_ms;
                let travel = position.offset_from(touched.pointer_down).length();
                if travel > self.config.drag_activation_fail_offset {
                    let timer = touched.activation_timer;
                    self.scheduler.cancel(timer);
                    self.phase = DragPhase::Inactive;
                }
            }
            DragPhase::Active(session) => {
                session.pointer = position;
                session.timestamp_ms = timestamp_ms;
                let event = DragMoveEvent {
                    key: session.key.clone(),
                    from_index: session.drag_start_index,
                    pointer: PointerData {
                        position: session.pointer,
                        timestamp_ms: session.timestamp_ms,
                    },
                };
                if let Some(on_drag_move) = self.callbacks.on_drag_move.clone() {
                    on_drag_move(&event);
                }
            }
            _ => {}
        }
    }

    /// Ends the gesture. An unactivated touch reverts silently; an
    /// active drag runs one final strategy evaluation, fires
    /// `on_drag_end` exactly once, and enters the drop animation.
    pub fn touch_up(&mut self, timestamp_ms: f64) {
        match std::mem::take(&mut self.phase) {
            DragPhase::Inactive => {}
            DragPhase::Touched(touched) => {
                self.scheduler.cancel(touched.activation_timer);
            }
            DragPhase::Active(session) => {
                self.finish_drag(session, timestamp_ms, true);
            }
            dropping @ DragPhase::Dropping(_) => {
                self.phase = dropping;
            }
        }
    }

    /// Like [`SortableEngine::touch_up`] but without the final
    /// strategy evaluation; live reorders already applied stand.
    pub fn touch_cancel(&mut self, timestamp_ms: f64) {
        match std::mem::take(&mut self.phase) {
            DragPhase::Inactive => {}
            DragPhase::Touched(touched) => {
                self.scheduler.cancel(touched.activation_timer);
            }
            DragPhase::Active(session) => {
                self.finish_drag(session, timestamp_ms, false);
            }
            dropping @ DragPhase::Dropping(_) => {
                self.phase = dropping;
            }
        }
    }

    // ---- tick -----------------------------------------------------------

    /// Advances the engine to `now_ms`: fires due timers, recomputes
    /// the layout if inputs changed, integrates auto-scroll, evaluates
    /// the reorder strategy, and advances animation timelines.
    pub fn tick(&mut self, now_ms: f64) {
        let dt_ms = (now_ms - self.last_tick_ms).max(0.0);
        self.last_tick_ms = now_ms;
        self.now_ms = now_ms;

        for (id, purpose) in self.scheduler.advance(now_ms) {
            match purpose {
                TimerPurpose::Activation => {
                    let current =
                        matches!(&self.phase, DragPhase::Touched(t) if t.activation_timer == id);
                    if current {
                        self.activate();
                    }
                }
                TimerPurpose::MeasurementFlush => {
                    if self.debounce_timer == Some(id) {
                        self.flush_pending_sizes();
                    }
                }
            }
        }

        if self.layout_dirty {
            self.recompute_layout();
        }

        if let DragPhase::Active(session) = &self.phase {
            let session = session.clone();
            self.drive_auto_scroll(&session, dt_ms);
            if self.config.trigger == ReorderTrigger::OnMove {
                self.evaluate_reorder_for(&session);
            }
            if let DragPhase::Active(session) = &mut self.phase {
                session.activation.advance(dt_ms);
            }
        }
        self.inactive_progress.advance(dt_ms);

        let settled = match &mut self.phase {
            DragPhase::Dropping(dropping) => {
                dropping.progress.advance(dt_ms);
                dropping
                    .progress
                    .is_finished()
                    .then(|| (dropping.key.clone(), dropping.from_index, dropping.to_index))
            }
            _ => None,
        };
        if let Some((key, from_index, to_index)) = settled {
            self.phase = DragPhase::Inactive;
            let event = DragEndEvent {
                key,
                from_index,
                to_index,
                index_to_key: self.order.index_to_key().to_vec(),
                key_to_index: self.order.key_to_index().clone(),
            };
            if let Some(on_dropped) = self.callbacks.on_active_item_dropped.clone() {
                on_dropped(&event);
            }
        }
    }

    /// [`SortableEngine::tick`] against a monotonic wall clock, for
    /// hosts without their own frame timestamps.
    pub fn tick_now(&mut self) {
        let origin = *self.clock_origin.get_or_insert_with(Instant::now);
        let now_ms = origin.elapsed().as_secs_f64() * 1000.0;
        self.tick(now_ms);
    }

    // ---- outputs --------------------------------------------------------

    #[inline]
    pub fn readiness(&self) -> Readiness {
        if self.layout.is_none() {
            Readiness::Pending
        } else if self.layout_dirty || self.debounce_timer.is_some() {
            Readiness::Transitioning
        } else {
            Readiness::Ready
        }
    }

    #[inline]
    pub fn layout(&self) -> Option<&SortableLayout> {
        self.layout.as_ref()
    }

    #[inline]
    pub fn order(&self) -> &ItemOrder {
        &self.order
    }

    #[inline]
    pub fn active_key(&self) -> Option<&ItemKey> {
        self.phase.active_key()
    }

    /// Decoration progress for the non-dragged items.
    #[inline]
    pub fn inactive_progress(&self) -> f32 {
        self.inactive_progress.value()
    }

    /// Settled position of `key` within the container, padding
    /// included. Independent of any drag decoration.
    pub fn item_position(&self, key: &ItemKey) -> Option<Point> {
        let padding = self.config.constraints.padding;
        let position = self.layout.as_ref()?.position_of(key)?;
        Some(position + Vector::new(padding.left, padding.top))
    }

    /// Per-item render signal: where to draw `key` and at what depth.
    pub fn item_render_state(&self, key: &ItemKey) -> Option<ItemRenderState> {
        match &self.phase {
            DragPhase::Active(session) if session.key == *key => Some(ItemRenderState {
                position: self.active_position_of(session),
                z_index: 2,
                activation_progress: session.activation.value(),
            }),
            DragPhase::Dropping(dropping) if dropping.key == *key => {
                let slot = self.item_position(key)?;
                let progress = dropping.progress.value();
                let position = Point::new(
                    lerp(slot.x, dropping.release_position.x, progress),
                    lerp(slot.y, dropping.release_position.y, progress),
                );
                Some(ItemRenderState {
                    position,
                    z_index: 1,
                    activation_progress: progress,
                })
            }
            _ => Some(ItemRenderState {
                position: self.item_position(key)?,
                z_index: 0,
                activation_progress: 0.0,
            }),
        }
    }

    // ---- internals ------------------------------------------------------

    #[inline]
    fn flow(&self) -> Axis {
        match (&self.grid_config, &self.flex_config) {
            (Some(grid), _) => grid.flow,
            (_, Some(flex)) => flex.axis,
            _ => Axis::Horizontal,
        }
    }

    #[inline]
    fn scroll_axis(&self) -> Axis {
        self.flow().cross()
    }

    /// Pointer sample translated from viewport to container
    /// coordinates (scroll applied, padding still included).
    fn container_pointer(&self, pointer: Point) -> Point {
        match self.scroll_axis() {
            Axis::Horizontal => Point::new(pointer.x + self.scroll_offset, pointer.y),
            Axis::Vertical => Point::new(pointer.x, pointer.y + self.scroll_offset),
        }
    }

    /// Pointer sample in the content-box frame the calculators and
    /// strategies work in.
    fn content_pointer(&self, pointer: Point) -> Point {
        let padding = self.config.constraints.padding;
        let p = self.container_pointer(pointer);
        Point::new(p.x - padding.left, p.y - padding.top)
    }

    /// Bounds the active item is clamped against: the full content
    /// box plus padding, so a scrolled drag can reach every row. The
    /// measured viewport only stands in before a first layout exists.
    fn drag_bounds(&self) -> Size {
        let padding = self.config.constraints.padding;
        match &self.layout {
            Some(layout) => {
                let content = layout.container_size();
                Size::new(
                    content.width + padding.horizontal_sum(),
                    content.height + padding.vertical_sum(),
                )
            }
            None => self.container.unwrap_or(Size::ZERO),
        }
    }

    fn active_position_of(&self, session: &ActiveSession) -> Point {
        active_item_position(
            session,
            &self.config,
            self.drag_bounds(),
            self.scroll_axis(),
            self.scroll_offset,
        )
    }

    fn flush_pending_sizes(&mut self) {
        self.debounce_timer = None;
        if self.pending_sizes.is_empty() {
            return;
        }
        let mut changed = false;
        let sizes = &mut self.sizes;
        for (key, size) in self.pending_sizes.drain() {
            let same = sizes.get(&key).map(|cur| same_size(*cur, size)) == Some(true);
            if !same {
                sizes.insert(key, size);
                changed = true;
            }
        }
        if changed {
            self.layout_dirty = true;
        }
    }

    /// Recomputes the layout snapshot from the current order, sizes,
    /// and container. A failed computation (missing measurements,
    /// degenerate container) keeps the previous snapshot.
    fn recompute_layout(&mut self) {
        let Some(container) = self.container else {
            return;
        };
        let bounds = self.config.constraints.resolve(container, self.flow());
        let next = match (&self.grid_config, &self.flex_config) {
            (Some(grid), _) => {
                calculate_grid(self.order.index_to_key(), &self.sizes, bounds.main, grid)
                    .map(SortableLayout::Grid)
            }
            (_, Some(flex)) => calculate_flex(self.order.index_to_key(), &self.sizes, bounds, flex)
                .map(SortableLayout::Flex),
            _ => None,
        };
        self.layout_dirty = false;
        match next {
            Some(layout) => self.layout = Some(layout),
            None => log::debug!("layout recompute failed; keeping previous snapshot"),
        }
    }

    fn activate(&mut self) {
        let DragPhase::Touched(touched) = &self.phase else {
            return;
        };
        let key = touched.key.clone();
        let pointer = touched.pointer;
        let timestamp_ms = touched.timestamp_ms;

        let index = self.order.index_of(&key);
        let size = self.sizes.get(&key).copied();
        let item_position = self.item_position(&key);
        let (Some(index), Some(size), Some(item_position)) = (index, size, item_position) else {
            self.phase = DragPhase::Inactive;
            return;
        };

        let touch_offset = self.container_pointer(pointer).offset_from(item_position);
        let mut activation = Timeline::settled(0.0, Easing::default());
        activation.animate_to(1.0, self.config.activation_animation_ms);
        self.inactive_progress
            .animate_to(1.0, self.config.activation_animation_ms);
        self.auto_scroll.reset();
        self.phase = DragPhase::Active(ActiveSession {
            key: key.clone(),
            drag_start_index: index,
            item_size: size,
            touch_offset,
            pointer,
            timestamp_ms,
            activation,
        });
        let event = DragStartEvent {
            key,
            from_index: index,
        };
        if let Some(on_drag_start) = self.callbacks.on_drag_start.clone() {
            on_drag_start(&event);
        }
    }

    /// Runs the reorder strategy against the current pointer sample and
    /// applies an accepted candidate. Fires `on_order_change` per
    /// applied reorder.
    fn evaluate_reorder_for(&mut self, session: &ActiveSession) {
        let Some(active_index) = self.order.index_of(&session.key) else {
            return;
        };
        let candidate = {
            let Some(layout) = self.layout.as_ref() else {
                return;
            };
            let Some(active_size) = self.sizes.get(&session.key).copied() else {
                return;
            };
            let ctx = ReorderContext {
                active_key: &session.key,
                active_index,
                active_size,
                pointer: self.content_pointer(session.pointer),
                order: &self.order,
                layout,
                sizes: &self.sizes,
            };
            self.strategy.compute_reorder(&ctx)
        };
        let Some(candidate) = candidate else {
            return;
        };
        if !self.order.apply(candidate) {
            return;
        }
        self.layout_dirty = true;
        self.recompute_layout();
        let to_index = self.order.index_of(&session.key).unwrap_or(active_index);
        let event = OrderChangeEvent {
            key: session.key.clone(),
            from_index: active_index,
            to_index,
            index_to_key: self.order.index_to_key().to_vec(),
            key_to_index: self.order.key_to_index().clone(),
        };
        if let Some(on_order_change) = self.callbacks.on_order_change.clone() {
            on_order_change(&event);
        }
    }

    /// Closes an active session: optional final strategy evaluation,
    /// the single `on_drag_end`, then the drop animation.
    fn finish_drag(&mut self, mut session: ActiveSession, timestamp_ms: f64, evaluate: bool) {
        session.timestamp_ms = timestamp_ms;
        if evaluate {
            self.evaluate_reorder_for(&session);
        }
        let from_index = session.drag_start_index;
        let to_index = self
            .order
            .index_of(&session.key)
            .unwrap_or(from_index);
        let release_position = self.active_position_of(&session);

        let event = DragEndEvent {
            key: session.key.clone(),
            from_index,
            to_index,
            index_to_key: self.order.index_to_key().to_vec(),
            key_to_index: self.order.key_to_index().clone(),
        };
        if let Some(on_drag_end) = self.callbacks.on_drag_end.clone() {
            on_drag_end(&event);
        }

        let mut progress = session.activation.clone();
        progress.animate_to(0.0, self.config.drop_animation_ms);
        self.inactive_progress
            .animate_to(0.0, self.config.drop_animation_ms);
        self.auto_scroll.reset();
        self.phase = DragPhase::Dropping(DroppingSession {
            key: session.key,
            from_index,
            to_index,
            release_position,
            progress,
        });
    }

    fn drive_auto_scroll(&mut self, session: &ActiveSession, dt_ms: f64) {
        let Some(auto) = self.config.auto_scroll else {
            return;
        };
        let (Some(container), Some(layout)) = (self.container, self.layout.as_ref()) else {
            return;
        };
        let axis = self.scroll_axis();
        let padding = self.config.constraints.padding;
        let padding_sum = match axis {
            Axis::Horizontal => padding.horizontal_sum(),
            Axis::Vertical => padding.vertical_sum(),
        };
        let viewport_extent = axis.main_of(container);
        let content_extent = axis.main_of(layout.container_size()) + padding_sum;
        let max_offset = (content_extent - viewport_extent).max(0.0);
        let pointer = axis.main_coord(session.pointer);

        let delta = self.auto_scroll.tick(
            &auto,
            pointer,
            viewport_extent,
            self.scroll_offset,
            max_offset,
            dt_ms,
        );
        self.scroll_offset += delta;
    }

    /// Tears down any touched or active session without firing events.
    fn abort_gesture(&mut self) {
        match std::mem::take(&mut self.phase) {
            DragPhase::Touched(touched) => {
                self.scheduler.cancel(touched.activation_timer);
            }
            DragPhase::Active(_) => {
                self.inactive_progress
                    .animate_to(0.0, self.config.drop_animation_ms);
                self.auto_scroll.reset();
            }
            other => self.phase = other,
        }
    }

    fn abort_if_key_vanished(&mut self) {
        let gone = match &self.phase {
            DragPhase::Touched(touched) => !self.order.contains(&touched.key),
            DragPhase::Active(session) => !self.order.contains(&session.key),
            _ => false,
        };
        if gone {
            self.abort_gesture();
        }
    }
}

#[inline]
fn same_size(a: Size, b: Size) -> bool {
    approx_eq(a.width, b.width) && approx_eq(a.height, b.height)
}
