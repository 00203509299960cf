//! Grid and flex layout calculators for Reflow
//!
//! Pure functions from `(ordered keys, item sizes, gaps, bounds, config)`
//! to an immutable [`GridLayout`] / [`FlexLayout`] snapshot. A calculator
//! returns `None` while any size it needs is still unmeasured; callers
//! treat that as "not ready", never as an error.

mod alignment;
mod axis;
mod bounds;
mod flex;
mod gaps;
mod grid;
mod key;
mod size_lookup;

pub use alignment::*;
pub use axis::*;
pub use bounds::*;
pub use flex::*;
pub use gaps::*;
pub use grid::*;
pub use key::*;
pub use size_lookup::*;

pub mod prelude {
    pub use crate::alignment::{AlignContent, AlignItems, JustifyContent};
    pub use crate::axis::Axis;
    pub use crate::bounds::{ContainerConstraints, ResolvedBounds};
    pub use crate::flex::{calculate_flex, FlexConfig, FlexLayout};
    pub use crate::gaps::Gaps;
    pub use crate::grid::{calculate_grid, GridConfig, GridLayout};
    pub use crate::key::ItemKey;
    pub use crate::size_lookup::{SizeLookup, UniformSize};
}
