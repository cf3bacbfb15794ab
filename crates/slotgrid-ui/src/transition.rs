//! Exit/enter hooks for animated refreshes.
//!
//! A pooled grid that refreshes with a nonzero direction while slots are
//! visible hands the timing to [`TransitionHooks`]: it starts the exit phase,
//! waits for it to finish, rebinds, then starts the enter phase. What the
//! phases look like is entirely up to the implementor.

use std::rc::Rc;

use crate::schedule::TaskToken;

/// Identifies one in-flight refresh transition.
pub type TransitionTicket = TaskToken;

/// Caller-provided transition timing.
pub trait TransitionHooks {
    /// Start the exit phase for the refresh identified by `ticket`.
    fn begin_exit(&mut self, ticket: TransitionTicket, direction: i32);

    /// Polled once per frame while the exit phase runs. Return true once it
    /// has finished. Hooks that signal completion through
    /// `complete_exit` can keep the default.
    fn poll_exit(&mut self, _dt_ms: u32) -> bool {
        false
    }

    /// Start the enter phase. Called right after the rebind.
    fn begin_enter(&mut self, direction: i32);

    /// The exit phase for `ticket` was superseded by a newer refresh.
    fn cancel(&mut self, _ticket: TransitionTicket) {}
}

/// A refresh waiting for its exit phase to finish.
pub(crate) struct PendingRefresh<T> {
    pub(crate) ticket: TransitionTicket,
    pub(crate) direction: i32,
    pub(crate) items: Vec<Rc<T>>,
    pub(crate) reset_selection: bool,
    pub(crate) captured: Option<Rc<T>>,
}

impl<T> std::fmt::Debug for PendingRefresh<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingRefresh")
            .field("ticket", &self.ticket)
            .field("direction", &self.direction)
            .field("items", &self.items.len())
            .field("reset_selection", &self.reset_selection)
            .finish()
    }
}
