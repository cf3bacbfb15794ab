//! Navigation engine: turns directional input into focus moves.
//!
//! The engine works against any [`SelectableGrid`]. Held input is handled by
//! a [`RepeatTimer`]: after the initial delay the held direction repeats at a
//! fixed interval until released or interrupted.

use slotgrid_types::config::{EdgePolicy, RepeatConfig};
use slotgrid_types::input::{Direction, Interrupt};

use crate::geometry::{RowEdge, Step};
use crate::schedule::{RepeatPhase, RepeatTimer, TaskToken};
use crate::selectable::{FocusChange, SelectableGrid};
use crate::selection::SelectionState;
use crate::slot::FocusTarget;

/// Result of one navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Focus moved to this slot.
    Moved(FocusTarget),
    /// No move: edge under [`EdgePolicy::Clamp`], unmeasured layout, or the
    /// target slot does not accept focus.
    Blocked,
    /// The move left the grid under [`EdgePolicy::Handoff`].
    Edge(Direction),
    /// Nothing is focused, so there is nowhere to move from.
    NoFocus,
    /// Input is locked.
    Locked,
}

/// Directional focus movement over a selectable grid.
#[derive(Debug)]
pub struct NavigationEngine {
    selection: SelectionState,
    timer: RepeatTimer,
    held: Option<Direction>,
    edge_policy: EdgePolicy,
    locked: bool,
}

impl NavigationEngine {
    pub fn new(repeat: &RepeatConfig, edge_policy: EdgePolicy) -> Self {
        Self {
            selection: SelectionState::new(),
            timer: RepeatTimer::new(repeat),
            held: None,
            edge_policy,
            locked: false,
        }
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Direct access for the owning controller (focus transfer, resets).
    pub fn selection_mut(&mut self) -> &mut SelectionState {
        &mut self.selection
    }

    pub fn edge_policy(&self) -> EdgePolicy {
        self.edge_policy
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Direction being repeated, if continuous navigation is running.
    pub fn held_direction(&self) -> Option<Direction> {
        self.held
    }

    pub fn repeat_phase(&self) -> RepeatPhase {
        self.timer.phase()
    }

    /// Move focus one cell in `dir`.
    pub fn move_one_step<G>(&mut self, grid: &mut G, dir: Direction) -> MoveOutcome
    where
        G: SelectableGrid + ?Sized,
    {
        if self.locked {
            return MoveOutcome::Locked;
        }
        if !self.selection.has_position() {
            return MoveOutcome::NoFocus;
        }
        let current = self.selection.index();
        let delta = match grid.geometry().step(dir, current) {
            Step::Move(delta) => delta,
            Step::Stay => return MoveOutcome::Blocked,
            Step::Edge(side) => {
                return match self.edge_policy {
                    EdgePolicy::Clamp => MoveOutcome::Blocked,
                    EdgePolicy::Handoff => MoveOutcome::Edge(side),
                };
            },
        };
        let Some(index) = current.checked_add_signed(delta) else {
            return MoveOutcome::Blocked;
        };
        let Some(handle) = grid.resolve_focusable(index) else {
            log::trace!("Index {index} does not accept focus");
            return MoveOutcome::Blocked;
        };
        let target = FocusTarget { handle, index };
        log::trace!("Focus {dir:?}: {current} -> {index}");
        self.selection.set(target);
        MoveOutcome::Moved(target)
    }

    /// Begin repeating `dir`, replacing any running repeat.
    pub fn start_continuous_navigation(&mut self, dir: Direction) -> TaskToken {
        self.held = Some(dir);
        self.timer.start()
    }

    /// Stop repeating. Safe to call when nothing is running.
    pub fn stop_continuous_navigation(&mut self) {
        if self.timer.cancel() {
            log::trace!("Continuous navigation stopped");
        }
        self.held = None;
    }

    /// Stop repeating only if `token` still identifies the running repeat.
    /// Returns whether it did.
    pub fn cancel_continuous_navigation(&mut self, token: TaskToken) -> bool {
        if !self.timer.is_current(token) {
            return false;
        }
        self.stop_continuous_navigation();
        true
    }

    /// Advance the repeat timer; performs a step when one is due.
    pub fn tick<G>(&mut self, grid: &mut G, dt_ms: u32) -> Option<MoveOutcome>
    where
        G: SelectableGrid + ?Sized,
    {
        let dir = self.held?;
        if !self.timer.tick(dt_ms) {
            return None;
        }
        Some(self.move_one_step(grid, dir))
    }

    /// React to an external interrupt signal.
    pub fn on_interrupt(&mut self, interrupt: Interrupt) {
        if interrupt.stops_navigation() {
            self.stop_continuous_navigation();
        }
        match interrupt {
            Interrupt::InputLockEngaged => self.locked = true,
            Interrupt::InputLockReleased => self.locked = false,
            Interrupt::CommitStarted | Interrupt::ModalOpened => {},
        }
    }

    /// Whether the cursor sits on the last row of `grid`.
    pub fn is_on_last_row<G>(&self, grid: &G) -> bool
    where
        G: SelectableGrid + ?Sized,
    {
        grid.geometry()
            .is_on_boundary_row(self.selection.index(), RowEdge::Last)
    }

    /// Whether the cursor sits on the first row of `grid`.
    pub fn is_on_first_row<G>(&self, grid: &G) -> bool
    where
        G: SelectableGrid + ?Sized,
    {
        grid.geometry()
            .is_on_boundary_row(self.selection.index(), RowEdge::First)
    }

    /// Apply a renderer's post-refresh focus suggestion.
    pub fn apply_focus_change(&mut self, change: FocusChange) -> Option<FocusTarget> {
        match change.target() {
            Some(target) => {
                self.selection.set(target);
                Some(target)
            },
            None => {
                self.selection.clear();
                None
            },
        }
    }
}
