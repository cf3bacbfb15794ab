//! slotgrid-ui: Selectable slot grids with directional navigation.
//!
//! Two renderers share one navigation engine: [`BoundedGrid`] keeps one view
//! per item in a reusable pool, and [`WindowedGrid`] binds a fixed pool of
//! views to the rows currently scrolled into view. [`GridController`] wires
//! either renderer to key input, hold-to-repeat timing and refresh
//! transitions. Views are supplied by the host through [`SlotTemplate`].

pub mod controller;
pub mod geometry;
pub mod layout;
pub mod navigation;
pub mod pool;
pub mod schedule;
pub mod selectable;
pub mod selection;
pub mod slot;
pub mod transition;
pub mod window;

pub use slotgrid_types::config;
pub use slotgrid_types::error;
pub use slotgrid_types::input;

#[cfg(test)]
pub(crate) mod test_utils;

pub use controller::{GridController, GridSignal};
pub use geometry::GridGeometry;
pub use navigation::{MoveOutcome, NavigationEngine};
pub use pool::BoundedGrid;
pub use selectable::{FocusChange, PanelGrid, RefreshOutcome, SelectableGrid};
pub use slot::{FocusTarget, SlotHandle, SlotTemplate, SlotView};
pub use transition::{TransitionHooks, TransitionTicket};
pub use window::WindowedGrid;
