//! Engine configuration and synchronous validation.
//!
//! Configuration errors are the only error class surfaced to the host;
//! everything else (unmeasured items, aborted gestures) is recovered
//! silently.

use std::error::Error;
use std::fmt;

use reflow_layout::{ContainerConstraints, FlexConfig, Gaps, GridConfig};

use crate::autoscroll::AutoScrollConfig;
use crate::strategy::StrategyKind;

/// Declarative layout selection for one sortable container.
#[derive(Clone, Debug)]
pub enum LayoutSpec {
    Grid(GridSpec),
    Flex(FlexConfig),
}

/// Grid axis configuration as supplied by the host. Exactly one of
/// `columns`/`rows` must be set; supplying both (or neither) is a
/// setup-time error.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GridSpec {
    pub columns: Option<usize>,
    pub rows: Option<usize>,
    pub gaps: Gaps,
}

impl GridSpec {
    pub fn columns(columns: usize, gaps: Gaps) -> Self {
        Self {
            columns: Some(columns),
            rows: None,
            gaps,
        }
    }

    pub fn rows(rows: usize, gaps: Gaps) -> Self {
        Self {
            columns: None,
            rows: Some(rows),
            gaps,
        }
    }

    pub(crate) fn resolve(&self) -> Result<GridConfig, ConfigError> {
        match (self.columns, self.rows) {
            (Some(_), Some(_)) => Err(ConfigError::GridAxisConflict),
            (None, None) => Err(ConfigError::GridAxisMissing),
            (Some(0), None) | (None, Some(0)) => Err(ConfigError::GridGroupSizeZero),
            (Some(columns), None) => Ok(GridConfig::columns(columns, self.gaps)),
            (None, Some(rows)) => Ok(GridConfig::rows(rows, self.gaps)),
        }
    }
}

/// Pointer alignment relative to the dragged item's bounding box while
/// snapping is enabled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SnapOffset {
    /// Fraction of the item extent (0.5 = item midpoint under finger).
    Fraction(f32),
    /// Absolute offset from the item's leading edge in pixels.
    Pixels(f32),
}

impl SnapOffset {
    pub fn resolve(&self, extent: f32) -> f32 {
        match *self {
            SnapOffset::Fraction(fraction) => extent * fraction,
            SnapOffset::Pixels(pixels) => pixels,
        }
    }
}

/// Axes on which the active item may leave the container bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OverDrag {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}

impl OverDrag {
    #[inline]
    pub fn allows_horizontal(&self) -> bool {
        matches!(self, OverDrag::Horizontal | OverDrag::Both)
    }

    #[inline]
    pub fn allows_vertical(&self) -> bool {
        matches!(self, OverDrag::Vertical | OverDrag::Both)
    }
}

/// When the reorder strategy resolves: live while dragging, or once on
/// release.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ReorderTrigger {
    #[default]
    OnMove,
    OnRelease,
}

/// Full configuration for one [`crate::SortableEngine`].
#[derive(Clone, Debug)]
pub struct SortableConfig {
    pub layout: LayoutSpec,
    pub constraints: ContainerConstraints,
    pub strategy: StrategyKind,
    pub trigger: ReorderTrigger,
    pub over_drag: OverDrag,
    pub sortable_enabled: bool,
    /// Touch-down to activation delay in milliseconds.
    pub drag_activation_delay_ms: f64,
    /// Pointer travel beyond this radius before the delay elapses
    /// fails the gesture (scroll intents keep scrolling).
    pub drag_activation_fail_offset: f32,
    pub activation_animation_ms: f64,
    pub drop_animation_ms: f64,
    pub enable_active_item_snap: bool,
    pub snap_offset_x: SnapOffset,
    pub snap_offset_y: SnapOffset,
    pub auto_scroll: Option<AutoScrollConfig>,
}

impl SortableConfig {
    pub fn new(layout: LayoutSpec) -> Self {
        Self {
            layout,
            constraints: ContainerConstraints::default(),
            strategy: StrategyKind::Insert,
            trigger: ReorderTrigger::default(),
            over_drag: OverDrag::default(),
            sortable_enabled: true,
            drag_activation_delay_ms: 200.0,
            drag_activation_fail_offset: 8.0,
            activation_animation_ms: 300.0,
            drop_animation_ms: 300.0,
            enable_active_item_snap: true,
            snap_offset_x: SnapOffset::Fraction(0.5),
            snap_offset_y: SnapOffset::Fraction(0.5),
            auto_scroll: None,
        }
    }

    /// Grid preset: swap strategy, as grids have no insert analog.
    pub fn grid(spec: GridSpec) -> Self {
        Self {
            strategy: StrategyKind::Swap,
            ..Self::new(LayoutSpec::Grid(spec))
        }
    }

    pub fn flex(config: FlexConfig) -> Self {
        Self::new(LayoutSpec::Flex(config))
    }

    /// Validates the configuration; every violation is fatal at setup
    /// time, with no partial initialization.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.layout {
            LayoutSpec::Grid(spec) => {
                spec.resolve()?;
                if matches!(self.strategy, StrategyKind::Insert) {
                    return Err(ConfigError::InsertStrategyOnGrid);
                }
                Self::validate_gaps(spec.gaps)?;
            }
            LayoutSpec::Flex(config) => {
                Self::validate_gaps(config.gaps)?;
            }
        }
        if self.drag_activation_delay_ms < 0.0
            || self.activation_animation_ms < 0.0
            || self.drop_animation_ms < 0.0
        {
            return Err(ConfigError::NegativeDuration);
        }
        if self.drag_activation_fail_offset <= 0.0 {
            return Err(ConfigError::NonPositiveFailOffset);
        }
        if let Some(auto_scroll) = &self.auto_scroll {
            if auto_scroll.activation_offset <= 0.0
                || auto_scroll.max_velocity <= 0.0
                || auto_scroll.max_frame_delta <= 0.0
                || auto_scroll.max_overscroll < 0.0
            {
                return Err(ConfigError::InvalidAutoScroll);
            }
        }
        Ok(())
    }

    fn validate_gaps(gaps: Gaps) -> Result<(), ConfigError> {
        if gaps.row < 0.0 || gaps.column < 0.0 {
            Err(ConfigError::NegativeGap)
        } else {
            Ok(())
        }
    }
}

/// Setup-time configuration errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Both `columns` and `rows` were supplied.
    GridAxisConflict,
    /// Neither `columns` nor `rows` was supplied.
    GridAxisMissing,
    GridGroupSizeZero,
    /// The insert strategy only applies to flex layouts.
    InsertStrategyOnGrid,
    NegativeGap,
    NegativeDuration,
    NonPositiveFailOffset,
    InvalidAutoScroll,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::GridAxisConflict => {
                write!(f, "grid config must not set both columns and rows")
            }
            ConfigError::GridAxisMissing => {
                write!(f, "grid config must set either columns or rows")
            }
            ConfigError::GridGroupSizeZero => write!(f, "grid column/row count must be at least 1"),
            ConfigError::InsertStrategyOnGrid => {
                write!(f, "the insert strategy requires a flex layout")
            }
            ConfigError::NegativeGap => write!(f, "gaps must be non-negative"),
            ConfigError::NegativeDuration => write!(f, "durations must be non-negative"),
            ConfigError::NonPositiveFailOffset => {
                write!(f, "drag activation fail offset must be positive")
            }
            ConfigError::InvalidAutoScroll => {
                write!(f, "auto-scroll offsets and velocity must be positive")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contradictory_grid_axes_are_rejected() {
        let spec = GridSpec {
            columns: Some(3),
            rows: Some(2),
            gaps: Gaps::default(),
        };
        let config = SortableConfig::grid(spec);
        assert_eq!(config.validate(), Err(ConfigError::GridAxisConflict));
    }

    #[test]
    fn insert_strategy_on_grid_is_rejected() {
        let mut config = SortableConfig::grid(GridSpec::columns(3, Gaps::default()));
        config.strategy = StrategyKind::Insert;
        assert_eq!(config.validate(), Err(ConfigError::InsertStrategyOnGrid));
    }

    #[test]
    fn default_flex_config_is_valid() {
        let config = SortableConfig::flex(FlexConfig::default());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn negative_gap_is_rejected() {
        let config = SortableConfig::grid(GridSpec::columns(3, Gaps::new(-1.0, 0.0)));
        assert_eq!(config.validate(), Err(ConfigError::NegativeGap));
    }
}
