//! Edge auto-scroll while an item is dragged.
//!
//! While the pointer sits inside an activation band at either end of
//! the scrollable viewport, a velocity proportional to the penetration
//! depth is integrated once per tick, with the per-tick delta capped so
//! a stalled frame cannot jump the content.

/// Auto-scroll tuning for one scrollable container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutoScrollConfig {
    /// Depth of the activation band at each viewport edge, in logical
    /// pixels.
    pub activation_offset: f32,
    /// Scroll speed at full band penetration, in pixels per second.
    pub max_velocity: f32,
    /// Cap applied to a single tick's scroll delta.
    pub max_frame_delta: f32,
    /// How far past the content bounds the offset may go.
    pub max_overscroll: f32,
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            activation_offset: 75.0,
            max_velocity: 1200.0,
            max_frame_delta: 40.0,
            max_overscroll: 0.0,
        }
    }
}

/// Per-session auto-scroll integrator. Lifecycle bound to the drag
/// session: reset at activation, zeroed again at drop.
#[derive(Clone, Debug, Default)]
pub struct AutoScroll {
    total_delta: f32,
}

impl AutoScroll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cumulative scroll offset produced since activation.
    #[inline]
    pub fn total_delta(&self) -> f32 {
        self.total_delta
    }

    /// Clears the session's accumulated offset.
    pub fn reset(&mut self) {
        self.total_delta = 0.0;
    }

    /// Integrates one tick.
    ///
    /// `pointer_in_viewport` is the pointer coordinate along the scroll
    /// axis relative to the viewport start; `current_offset` the
    /// container's scroll offset; `max_offset` the largest in-bounds
    /// offset (content extent minus viewport extent, at least 0).
    /// Returns the delta applied this tick.
    pub fn tick(
        &mut self,
        config: &AutoScrollConfig,
        pointer_in_viewport: f32,
        viewport_extent: f32,
        current_offset: f32,
        max_offset: f32,
        dt_ms: f64,
    ) -> f32 {
        let band = config.activation_offset;
        if band <= 0.0 || viewport_extent <= 0.0 {
            return 0.0;
        }

        let start_penetration = band - pointer_in_viewport;
        let end_penetration = pointer_in_viewport - (viewport_extent - band);
        let fraction = if start_penetration > 0.0 {
            -(start_penetration / band).min(1.0)
        } else if end_penetration > 0.0 {
            (end_penetration / band).min(1.0)
        } else {
            return 0.0;
        };

        let raw = fraction * config.max_velocity * (dt_ms as f32 / 1000.0);
        let capped = raw.clamp(-config.max_frame_delta, config.max_frame_delta);

        let lower = -config.max_overscroll;
        let upper = max_offset + config.max_overscroll;
        let next = (current_offset + capped).clamp(lower, upper);
        let applied = next - current_offset;
        self.total_delta += applied;
        applied
    }
}
