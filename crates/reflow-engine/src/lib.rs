//! Drag-to-reorder engine for Reflow
//!
//! Owns the order permutation, the reorder strategies (swap/insert),
//! the drag activation state machine, and the auto-scroll controller,
//! assembled behind one [`SortableEngine`] per sortable container.
//!
//! The engine is single-threaded and cooperative: the host drives it
//! from its frame clock via [`SortableEngine::tick`], feeds it pointer
//! samples and measurements, and reads back layout snapshots and
//! per-item render state. Outbound callbacks are fire-and-forget
//! notifications to the host and must not reenter the engine.

mod autoscroll;
mod config;
mod controller;
mod engine;
mod events;
mod order;
mod scheduler;
mod snapshot;
mod strategy;
mod timeline;

pub use autoscroll::*;
pub use config::*;
pub use engine::*;
pub use events::*;
pub use order::*;
pub use scheduler::{TickScheduler, TimerId};
pub use snapshot::*;
pub use strategy::{ReorderContext, ReorderStrategy, StrategyKind};
pub use timeline::{Easing, Timeline};

pub mod prelude {
    pub use crate::autoscroll::AutoScrollConfig;
    pub use crate::config::{
        ConfigError, GridSpec, LayoutSpec, OverDrag, ReorderTrigger, SnapOffset, SortableConfig,
    };
    pub use crate::engine::{Readiness, SortableEngine};
    pub use crate::events::{ItemRenderState, SortableCallbacks};
    pub use crate::order::ItemOrder;
    pub use crate::snapshot::SortableLayout;
    pub use crate::strategy::StrategyKind;
    pub use reflow_geometry::prelude::*;
    pub use reflow_layout::prelude::*;
}
