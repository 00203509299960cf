//! Row/column gap configuration.

use crate::Axis;

/// Spacing inserted between items (`column`) and between wrapped lines
/// or grid rows (`row`).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Gaps {
    /// Gap between rows (vertical spacing).
    pub row: f32,
    /// Gap between columns (horizontal spacing).
    pub column: f32,
}

impl Gaps {
    pub const fn new(row: f32, column: f32) -> Self {
        Self { row, column }
    }

    pub const fn uniform(gap: f32) -> Self {
        Self {
            row: gap,
            column: gap,
        }
    }

    /// Gap between consecutive items along the flow axis.
    #[inline]
    pub fn main(self, flow: Axis) -> f32 {
        match flow {
            Axis::Horizontal => self.column,
            Axis::Vertical => self.row,
        }
    }

    /// Gap between consecutive groups across the flow axis.
    #[inline]
    pub fn cross(self, flow: Axis) -> f32 {
        match flow {
            Axis::Horizontal => self.row,
            Axis::Vertical => self.column,
        }
    }
}
