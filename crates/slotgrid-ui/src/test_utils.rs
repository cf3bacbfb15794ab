//! Shared test utilities for slotgrid-ui tests.
//!
//! Provides a [`RecordingTemplate`] whose views record every bind, visibility
//! and placement call, and [`RecordingHooks`] that record transition phases.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::ops::Range;
use std::rc::Rc;

use crate::slot::{SlotHandle, SlotTemplate, SlotView};
use crate::transition::{TransitionHooks, TransitionTicket};

/// Fresh allocations for each value in `range`.
pub fn items(range: Range<u32>) -> Vec<Rc<u32>> {
    range.map(Rc::new).collect()
}

/// A recorded slot call.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotEvent {
    Created(SlotHandle),
    Bound(SlotHandle, Option<u32>),
    Active(SlotHandle, bool),
    Moved(SlotHandle, f32, f32),
    Released(SlotHandle),
}

#[derive(Default)]
struct SlotLog {
    events: Vec<SlotEvent>,
    disabled: HashSet<u32>,
    bound: HashMap<SlotHandle, Option<u32>>,
    active: HashMap<SlotHandle, bool>,
    positions: HashMap<SlotHandle, (f32, f32)>,
}

/// Template whose views write into a shared log.
#[derive(Clone, Default)]
pub struct RecordingTemplate {
    log: Rc<RefCell<SlotLog>>,
}

impl RecordingTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SlotEvent> {
        self.log.borrow().events.clone()
    }

    pub fn clear_events(&self) {
        self.log.borrow_mut().events.clear();
    }

    /// Views showing `value` stop accepting focus.
    pub fn disable_value(&self, value: u32) {
        self.log.borrow_mut().disabled.insert(value);
    }

    /// Value last bound to `handle`.
    pub fn bound_value(&self, handle: SlotHandle) -> Option<u32> {
        self.log.borrow().bound.get(&handle).copied().flatten()
    }

    pub fn is_active(&self, handle: SlotHandle) -> bool {
        self.log
            .borrow()
            .active
            .get(&handle)
            .copied()
            .unwrap_or(false)
    }

    pub fn position(&self, handle: SlotHandle) -> Option<(f32, f32)> {
        self.log.borrow().positions.get(&handle).copied()
    }
}

/// View produced by [`RecordingTemplate`].
pub struct RecordingView {
    handle: SlotHandle,
    value: Option<u32>,
    log: Rc<RefCell<SlotLog>>,
}

impl SlotView<u32> for RecordingView {
    fn bind(&mut self, item: Option<&Rc<u32>>) {
        self.value = item.map(|i| **i);
        let mut log = self.log.borrow_mut();
        log.bound.insert(self.handle, self.value);
        log.events.push(SlotEvent::Bound(self.handle, self.value));
    }

    fn set_active(&mut self, active: bool) {
        let mut log = self.log.borrow_mut();
        log.active.insert(self.handle, active);
        log.events.push(SlotEvent::Active(self.handle, active));
    }

    fn set_position(&mut self, x: f32, y: f32) {
        let mut log = self.log.borrow_mut();
        log.positions.insert(self.handle, (x, y));
        log.events.push(SlotEvent::Moved(self.handle, x, y));
    }

    fn is_interactive(&self) -> bool {
        self.value
            .is_none_or(|v| !self.log.borrow().disabled.contains(&v))
    }
}

impl SlotTemplate<u32> for RecordingTemplate {
    type View = RecordingView;

    fn instantiate(&mut self, handle: SlotHandle) -> RecordingView {
        self.log
            .borrow_mut()
            .events
            .push(SlotEvent::Created(handle));
        RecordingView {
            handle,
            value: None,
            log: Rc::clone(&self.log),
        }
    }

    fn release(&mut self, handle: SlotHandle, _view: RecordingView) {
        let mut log = self.log.borrow_mut();
        log.active.remove(&handle);
        log.events.push(SlotEvent::Released(handle));
    }
}

/// A recorded transition call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    Exit(TransitionTicket, i32),
    Enter(i32),
    Cancel(TransitionTicket),
}

#[derive(Default)]
struct HookLog {
    events: Vec<HookEvent>,
    elapsed_ms: u32,
}

/// Transition hooks that finish the exit phase after a fixed time, or
/// never (`None`) so tests complete it through the ticket.
#[derive(Clone)]
pub struct RecordingHooks {
    exit_ms: Option<u32>,
    log: Rc<RefCell<HookLog>>,
}

impl RecordingHooks {
    pub fn new(exit_ms: Option<u32>) -> Self {
        Self {
            exit_ms,
            log: Rc::default(),
        }
    }

    pub fn events(&self) -> Vec<HookEvent> {
        self.log.borrow().events.clone()
    }
}

impl TransitionHooks for RecordingHooks {
    fn begin_exit(&mut self, ticket: TransitionTicket, direction: i32) {
        let mut log = self.log.borrow_mut();
        log.elapsed_ms = 0;
        log.events.push(HookEvent::Exit(ticket, direction));
    }

    fn poll_exit(&mut self, dt_ms: u32) -> bool {
        let Some(exit_ms) = self.exit_ms else {
            return false;
        };
        let mut log = self.log.borrow_mut();
        log.elapsed_ms += dt_ms;
        log.elapsed_ms >= exit_ms
    }

    fn begin_enter(&mut self, direction: i32) {
        self.log
            .borrow_mut()
            .events
            .push(HookEvent::Enter(direction));
    }

    fn cancel(&mut self, ticket: TransitionTicket) {
        self.log
            .borrow_mut()
            .events
            .push(HookEvent::Cancel(ticket));
    }
}
