//! Container constraints and their resolution into layout bounds.

use reflow_geometry::{EdgeInsets, Size};

use crate::Axis;

/// Min/max bounds and padding applied to a measured container size
/// before a layout calculation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerConstraints {
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
    pub padding: EdgeInsets,
}

impl Default for ContainerConstraints {
    fn default() -> Self {
        Self {
            min_width: 0.0,
            max_width: f32::INFINITY,
            min_height: 0.0,
            max_height: f32::INFINITY,
            padding: EdgeInsets::default(),
        }
    }
}

impl ContainerConstraints {
    /// Constraints with exact width and height.
    pub fn tight(width: f32, height: f32) -> Self {
        Self {
            min_width: width,
            max_width: width,
            min_height: height,
            max_height: height,
            padding: EdgeInsets::default(),
        }
    }

    /// Constraints with loose bounds (min = 0, max = given values).
    pub fn loose(max_width: f32, max_height: f32) -> Self {
        Self {
            max_width,
            max_height,
            ..Self::default()
        }
    }

    pub fn with_padding(mut self, padding: EdgeInsets) -> Self {
        self.padding = padding;
        self
    }

    /// Clamps the provided width and height to these constraints.
    pub fn constrain(&self, width: f32, height: f32) -> (f32, f32) {
        (
            width.clamp(self.min_width, self.max_width),
            height.clamp(self.min_height, self.max_height),
        )
    }

    /// Resolves a measured container size into content-box bounds for a
    /// layout whose items flow along `flow`.
    ///
    /// The main extent is always resolved (it is the wrap limit). The
    /// cross extent is `None` when the container is content-sized along
    /// the cross axis, in which case line distribution has no leftover
    /// space to work with.
    pub fn resolve(&self, measured: Size, flow: Axis) -> ResolvedBounds {
        let (width, height) = self.constrain(measured.width, measured.height);
        let content_width = (width - self.padding.horizontal_sum()).max(0.0);
        let content_height = (height - self.padding.vertical_sum()).max(0.0);

        let (main, cross_raw) = match flow {
            Axis::Horizontal => (content_width, content_height),
            Axis::Vertical => (content_height, content_width),
        };
        let cross = (cross_raw > 0.0 && cross_raw.is_finite()).then_some(cross_raw);

        ResolvedBounds { main, cross }
    }
}

/// Content-box bounds a calculator lays items into, expressed on the
/// flow axis. Positions produced against these bounds are relative to
/// the content-box origin; callers add the padding offset back when
/// exposing absolute coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedBounds {
    /// Available main-axis extent; the flex wrap limit.
    pub main: f32,
    /// Fixed cross-axis extent, or `None` for content-sized containers.
    pub cross: Option<f32>,
}
