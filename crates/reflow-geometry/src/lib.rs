//! Geometry primitives and numeric policy for Reflow
//!
//! This crate contains the 2-D primitives (origin top-left, y grows
//! downward) shared by the layout calculators and the reorder engine,
//! plus the epsilon comparison helpers every "has this value materially
//! changed" decision must go through.

mod epsilon;
mod geometry;

pub use epsilon::*;
pub use geometry::*;

pub mod prelude {
    pub use crate::epsilon::{approx_eq, approx_zero, EPSILON};
    pub use crate::geometry::{EdgeInsets, Point, Rect, Size, Vector};
}
