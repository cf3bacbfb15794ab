//! Slot handles and the display-adapter traits implemented by callers.
//!
//! A slot is a long-lived visual element owned by a pool. The grid core never
//! touches the visual element directly; it talks to a [`SlotView`] produced by
//! a [`SlotTemplate`] and identifies slots through opaque [`SlotHandle`]s.

use std::rc::Rc;

/// Opaque identity of a pool-resident slot.
///
/// Handles are unique within one grid for the grid's lifetime: a handle
/// released by a pool shrink is never reissued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotHandle(u32);

impl SlotHandle {
    /// Raw id, for logging and external lookup tables.
    pub fn id(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SlotHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}

/// Issues fresh handles in creation order.
#[derive(Debug, Default)]
pub(crate) struct HandleAllocator {
    next: u32,
}

impl HandleAllocator {
    pub(crate) fn issue(&mut self) -> SlotHandle {
        let handle = SlotHandle(self.next);
        self.next = self.next.wrapping_add(1);
        handle
    }
}

/// A slot together with its logical navigation index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTarget {
    pub handle: SlotHandle,
    pub index: usize,
}

/// Display adapter for one visual element.
pub trait SlotView<T> {
    /// Show `item`, or render as empty for `None`. The slot stays resident.
    fn bind(&mut self, item: Option<&Rc<T>>);

    /// Show or hide the element.
    fn set_active(&mut self, active: bool);

    /// Place the element inside its scroll content. Only windowed grids
    /// position slots; pooled grids leave placement to the layout system.
    fn set_position(&mut self, _x: f32, _y: f32) {}

    /// Whether the element currently accepts focus.
    fn is_interactive(&self) -> bool {
        true
    }
}

/// Creates and destroys slot views inside a parent container.
pub trait SlotTemplate<T> {
    type View: SlotView<T>;

    /// Instantiate a new element for `handle`.
    fn instantiate(&mut self, handle: SlotHandle) -> Self::View;

    /// Destroy an element removed by a pool shrink.
    fn release(&mut self, _handle: SlotHandle, _view: Self::View) {}
}
