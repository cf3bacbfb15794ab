//! Focus cursor shared by the navigation engine and the owning controller.

use crate::slot::{FocusTarget, SlotHandle};

/// The focused slot and its logical index.
///
/// `(None, 0)` means nothing is selected. A windowed grid may also *park*
/// the selection when the focused row scrolls out of the window: the handle
/// is dropped but the logical index is kept so navigation can resume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    handle: Option<SlotHandle>,
    index: usize,
    parked: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> Option<SlotHandle> {
        self.handle
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The focused slot, if one is attached.
    pub fn target(&self) -> Option<FocusTarget> {
        self.handle.map(|handle| FocusTarget {
            handle,
            index: self.index,
        })
    }

    /// Whether navigation has a position to move from.
    pub fn has_position(&self) -> bool {
        self.handle.is_some() || self.parked
    }

    pub fn is_parked(&self) -> bool {
        self.parked
    }

    pub fn set(&mut self, target: FocusTarget) {
        self.handle = Some(target.handle);
        self.index = target.index;
        self.parked = false;
    }

    /// Drop the handle but remember the index.
    pub fn park(&mut self) {
        if self.handle.take().is_some() {
            self.parked = true;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
