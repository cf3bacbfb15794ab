//! The selectable-grid contract shared by both renderers.
//!
//! Navigation addresses slots by a logical index: the pool position for a
//! [`BoundedGrid`], the data index for a [`WindowedGrid`]. Each panel picks
//! its renderer at composition time through [`PanelGrid`].

use std::rc::Rc;

use crate::geometry::GridGeometry;
use crate::pool::BoundedGrid;
use crate::slot::{FocusTarget, SlotHandle, SlotTemplate};
use crate::transition::TransitionTicket;
use crate::window::WindowedGrid;

/// Where focus should go after a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusChange {
    /// The previously focused item survived; it now lives here.
    Restored(FocusTarget),
    /// Focus the first selectable slot.
    First(FocusTarget),
    /// Nothing is selectable.
    Cleared,
}

impl FocusChange {
    pub fn target(&self) -> Option<FocusTarget> {
        match self {
            FocusChange::Restored(t) | FocusChange::First(t) => Some(*t),
            FocusChange::Cleared => None,
        }
    }
}

/// Result of pushing a new item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The rebind already happened.
    Applied(FocusChange),
    /// The rebind waits for the exit phase identified by the ticket.
    Deferred(TransitionTicket),
}

/// A grid the navigation engine can move focus through.
pub trait SelectableGrid {
    /// Layout width in cells; 0 while unmeasured.
    fn columns(&self) -> usize;

    /// Number of logical positions navigation can address.
    fn selectable_count(&self) -> usize;

    /// Handles of the active slots, in index order.
    fn selectable_slots(&self) -> Vec<SlotHandle>;

    /// Handle for logical `index`, bringing it into view if needed.
    fn resolve_index(&mut self, index: usize) -> Option<SlotHandle>;

    /// Handle for logical `index` when its slot accepts focus. A grid that
    /// scrolls to answer leaves its view unchanged when the answer is no.
    fn resolve_focusable(&mut self, index: usize) -> Option<SlotHandle> {
        let handle = self.resolve_index(index)?;
        self.is_interactive(handle).then_some(handle)
    }

    /// Logical index currently carried by `handle`.
    fn index_of(&self, handle: SlotHandle) -> Option<usize>;

    /// Whether `handle` is active and accepts focus.
    fn is_interactive(&self, handle: SlotHandle) -> bool;

    /// Data index of the item bound to `handle`.
    fn data_index(&self, handle: SlotHandle) -> Option<usize>;

    /// Focus target for the item at `data_index`, bringing it into view.
    fn select_data_index(&mut self, data_index: usize) -> Option<FocusTarget>;

    /// First slot that shows an item and accepts focus.
    fn first_selectable(&mut self) -> Option<FocusTarget>;

    fn geometry(&self) -> GridGeometry {
        GridGeometry::new(self.columns(), self.selectable_count())
    }
}

/// A panel's renderer, chosen at composition time.
pub enum PanelGrid<T, S: SlotTemplate<T>> {
    Pooled(BoundedGrid<T, S>),
    Windowed(WindowedGrid<T, S>),
}

impl<T, S: SlotTemplate<T>> PanelGrid<T, S> {
    fn as_dyn(&self) -> &dyn SelectableGrid {
        match self {
            PanelGrid::Pooled(g) => g,
            PanelGrid::Windowed(g) => g,
        }
    }

    fn as_dyn_mut(&mut self) -> &mut dyn SelectableGrid {
        match self {
            PanelGrid::Pooled(g) => g,
            PanelGrid::Windowed(g) => g,
        }
    }

    /// Push a new item list. Windowed grids always apply immediately.
    pub fn refresh(
        &mut self,
        items: Vec<Rc<T>>,
        reset_selection: bool,
        direction: i32,
        focused: Option<SlotHandle>,
    ) -> RefreshOutcome {
        match self {
            PanelGrid::Pooled(g) => g.refresh(items, reset_selection, direction, focused),
            PanelGrid::Windowed(g) => {
                RefreshOutcome::Applied(g.set_data(items, reset_selection, focused))
            },
        }
    }

    /// Advance any in-flight refresh transition.
    pub fn tick(&mut self, dt_ms: u32) -> Option<FocusChange> {
        match self {
            PanelGrid::Pooled(g) => g.tick(dt_ms),
            PanelGrid::Windowed(_) => None,
        }
    }

    pub fn complete_exit(&mut self, ticket: TransitionTicket) -> Option<FocusChange> {
        match self {
            PanelGrid::Pooled(g) => g.complete_exit(ticket),
            PanelGrid::Windowed(_) => None,
        }
    }

    pub fn as_pooled(&self) -> Option<&BoundedGrid<T, S>> {
        match self {
            PanelGrid::Pooled(g) => Some(g),
            PanelGrid::Windowed(_) => None,
        }
    }

    pub fn as_windowed(&self) -> Option<&WindowedGrid<T, S>> {
        match self {
            PanelGrid::Windowed(g) => Some(g),
            PanelGrid::Pooled(_) => None,
        }
    }

    pub fn as_windowed_mut(&mut self) -> Option<&mut WindowedGrid<T, S>> {
        match self {
            PanelGrid::Windowed(g) => Some(g),
            PanelGrid::Pooled(_) => None,
        }
    }
}

impl<T, S: SlotTemplate<T>> SelectableGrid for PanelGrid<T, S> {
    fn columns(&self) -> usize {
        self.as_dyn().columns()
    }

    fn selectable_count(&self) -> usize {
        self.as_dyn().selectable_count()
    }

    fn selectable_slots(&self) -> Vec<SlotHandle> {
        self.as_dyn().selectable_slots()
    }

    fn resolve_index(&mut self, index: usize) -> Option<SlotHandle> {
        self.as_dyn_mut().resolve_index(index)
    }

    fn resolve_focusable(&mut self, index: usize) -> Option<SlotHandle> {
        self.as_dyn_mut().resolve_focusable(index)
    }

    fn index_of(&self, handle: SlotHandle) -> Option<usize> {
        self.as_dyn().index_of(handle)
    }

    fn is_interactive(&self, handle: SlotHandle) -> bool {
        self.as_dyn().is_interactive(handle)
    }

    fn data_index(&self, handle: SlotHandle) -> Option<usize> {
        self.as_dyn().data_index(handle)
    }

    fn select_data_index(&mut self, data_index: usize) -> Option<FocusTarget> {
        self.as_dyn_mut().select_data_index(data_index)
    }

    fn first_selectable(&mut self) -> Option<FocusTarget> {
        self.as_dyn_mut().first_selectable()
    }
}
