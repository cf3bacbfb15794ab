//! Per-panel controller wiring input, refreshes and frame ticks to a grid.
//!
//! The controller owns the panel's renderer and navigation engine and is,
//! together with the engine, the only writer of the selection. It reports
//! what the caller should do through [`GridSignal`]s; applying visual focus
//! and deciding which panel owns focus stay with the caller.

use std::collections::HashMap;
use std::rc::Rc;

use slotgrid_types::config::GridConfig;
use slotgrid_types::error::Result;
use slotgrid_types::input::{Direction, InputEvent};

use crate::navigation::{MoveOutcome, NavigationEngine};
use crate::schedule::TaskToken;
use crate::pool::BoundedGrid;
use crate::selectable::{FocusChange, PanelGrid, RefreshOutcome, SelectableGrid};
use crate::selection::SelectionState;
use crate::slot::{FocusTarget, SlotTemplate};
use crate::transition::{TransitionHooks, TransitionTicket};
use crate::window::WindowedGrid;

/// Instruction for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridSignal {
    /// Apply visual focus to this slot.
    Focus(FocusTarget),
    /// Nothing is selectable; hide anything that depends on a selection.
    NoSelection,
    /// The cursor left the grid; hand focus to the neighbor on this side.
    Handoff(Direction),
}

/// One panel: a renderer plus its navigation engine.
pub struct GridController<T, S: SlotTemplate<T>> {
    grid: PanelGrid<T, S>,
    nav: NavigationEngine,
    /// Repeat started by the latest press of each direction.
    repeats: HashMap<Direction, TaskToken>,
}

impl<T, S: SlotTemplate<T>> GridController<T, S> {
    pub fn new(grid: PanelGrid<T, S>, config: &GridConfig) -> Self {
        Self {
            grid,
            nav: NavigationEngine::new(&config.repeat, config.edge_policy),
            repeats: HashMap::new(),
        }
    }

    /// A bounded-pool panel without refresh transitions.
    pub fn pooled(config: &GridConfig, template: S) -> Result<Self> {
        let grid = BoundedGrid::builder(config.pool.clone())
            .template(template)
            .build()?;
        Ok(Self::new(PanelGrid::Pooled(grid), config))
    }

    /// A bounded-pool panel whose refreshes run through `hooks`.
    pub fn pooled_with_transitions(
        config: &GridConfig,
        template: S,
        hooks: impl TransitionHooks + 'static,
    ) -> Result<Self> {
        let grid = BoundedGrid::builder(config.pool.clone())
            .template(template)
            .transitions(hooks)
            .build()?;
        Ok(Self::new(PanelGrid::Pooled(grid), config))
    }

    /// A windowed panel.
    pub fn windowed(config: &GridConfig, template: S) -> Result<Self> {
        let grid = WindowedGrid::builder(config.window.clone())
            .template(template)
            .build()?;
        Ok(Self::new(PanelGrid::Windowed(grid), config))
    }

    pub fn grid(&self) -> &PanelGrid<T, S> {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut PanelGrid<T, S> {
        &mut self.grid
    }

    pub fn navigation(&self) -> &NavigationEngine {
        &self.nav
    }

    pub fn selection(&self) -> &SelectionState {
        self.nav.selection()
    }

    /// Whether the cursor is on the last row, for downward handoff decisions.
    pub fn is_on_last_row(&self) -> bool {
        self.nav.is_on_last_row(&self.grid)
    }

    pub fn is_on_first_row(&self) -> bool {
        self.nav.is_on_first_row(&self.grid)
    }

    /// Feed one input event.
    pub fn handle_input(&mut self, event: InputEvent) -> Vec<GridSignal> {
        match event {
            InputEvent::Press(dir) => self.press(dir),
            InputEvent::Release(dir) => {
                if let Some(token) = self.repeats.remove(&dir) {
                    self.nav.cancel_continuous_navigation(token);
                }
                Vec::new()
            },
            InputEvent::Interrupt(interrupt) => {
                self.nav.on_interrupt(interrupt);
                Vec::new()
            },
        }
    }

    fn press(&mut self, dir: Direction) -> Vec<GridSignal> {
        let outcome = self.nav.move_one_step(&mut self.grid, dir);
        match outcome {
            MoveOutcome::Locked => Vec::new(),
            MoveOutcome::NoFocus => self.focus_first(),
            MoveOutcome::Edge(_) => {
                self.nav.stop_continuous_navigation();
                self.signals_for(outcome)
            },
            MoveOutcome::Moved(_) | MoveOutcome::Blocked => {
                let token = self.nav.start_continuous_navigation(dir);
                self.repeats.insert(dir, token);
                self.signals_for(outcome)
            },
        }
    }

    /// Advance timers by one frame.
    pub fn tick(&mut self, dt_ms: u32) -> Vec<GridSignal> {
        let mut signals = Vec::new();
        if let Some(change) = self.grid.tick(dt_ms) {
            signals.push(self.apply(change));
        }
        if let Some(outcome) = self.nav.tick(&mut self.grid, dt_ms) {
            if matches!(outcome, MoveOutcome::Edge(_)) {
                self.nav.stop_continuous_navigation();
            }
            signals.extend(self.signals_for(outcome));
        }
        signals
    }

    /// Push a new item list.
    pub fn refresh(
        &mut self,
        items: Vec<Rc<T>>,
        reset_selection: bool,
        direction: i32,
    ) -> Vec<GridSignal> {
        let focused = self.nav.selection().handle();
        match self.grid.refresh(items, reset_selection, direction, focused) {
            RefreshOutcome::Applied(change) => vec![self.apply(change)],
            RefreshOutcome::Deferred(ticket) => {
                log::debug!("Panel refresh waiting on {ticket:?}");
                Vec::new()
            },
        }
    }

    /// Report that the exit phase identified by `ticket` finished.
    pub fn complete_exit(&mut self, ticket: TransitionTicket) -> Vec<GridSignal> {
        match self.grid.complete_exit(ticket) {
            Some(change) => vec![self.apply(change)],
            None => Vec::new(),
        }
    }

    /// Scroll a windowed panel. The selection follows its logical index:
    /// parked while scrolled out, re-attached when it comes back.
    pub fn on_scroll(&mut self, offset: f64) -> Vec<GridSignal> {
        let Some(window) = self.grid.as_windowed_mut() else {
            return Vec::new();
        };
        window.on_scroll(offset);
        let selection = self.nav.selection_mut();
        if !selection.has_position() {
            return Vec::new();
        }
        match window.slot_for_data_index(selection.index()) {
            Some(handle) if selection.handle() != Some(handle) => {
                let target = FocusTarget {
                    handle,
                    index: selection.index(),
                };
                selection.set(target);
                vec![GridSignal::Focus(target)]
            },
            Some(_) => Vec::new(),
            None => {
                selection.park();
                Vec::new()
            },
        }
    }

    /// Focus the item at `data_index`, scrolling it into view.
    pub fn select_data_index(&mut self, data_index: usize) -> Vec<GridSignal> {
        match self.grid.select_data_index(data_index) {
            Some(target) => {
                self.nav.selection_mut().set(target);
                vec![GridSignal::Focus(target)]
            },
            None => Vec::new(),
        }
    }

    /// Take focus at the first selectable slot (e.g. on focus handoff into
    /// this panel).
    pub fn focus_first(&mut self) -> Vec<GridSignal> {
        let change = match self.grid.first_selectable() {
            Some(target) => FocusChange::First(target),
            None => FocusChange::Cleared,
        };
        vec![self.apply(change)]
    }

    /// Give focus away: stop repeating and clear the selection.
    pub fn release_focus(&mut self) {
        self.nav.stop_continuous_navigation();
        self.nav.selection_mut().clear();
    }

    fn apply(&mut self, change: FocusChange) -> GridSignal {
        match self.nav.apply_focus_change(change) {
            Some(target) => GridSignal::Focus(target),
            None => GridSignal::NoSelection,
        }
    }

    fn signals_for(&self, outcome: MoveOutcome) -> Vec<GridSignal> {
        match outcome {
            MoveOutcome::Moved(target) => vec![GridSignal::Focus(target)],
            MoveOutcome::Edge(dir) => vec![GridSignal::Handoff(dir)],
            MoveOutcome::Blocked | MoveOutcome::NoFocus | MoveOutcome::Locked => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{RecordingHooks, RecordingTemplate, items};
    use slotgrid_types::config::{EdgePolicy, PoolConfig, WindowConfig};
    use slotgrid_types::input::Interrupt;

    fn config(policy: EdgePolicy) -> GridConfig {
        GridConfig {
            edge_policy: policy,
            pool: PoolConfig {
                columns: 5,
                trailing_buffer: 2,
                placeholders_selectable: false,
            },
            window: WindowConfig {
                columns: 5,
                buffer_rows: 2,
                cell_width: 90.0,
                cell_height: 90.0,
                spacing_x: 10.0,
                spacing_y: 10.0,
                viewport_height: 400.0,
            },
            ..GridConfig::default()
        }
    }

    fn pooled(policy: EdgePolicy) -> GridController<u32, RecordingTemplate> {
        GridController::pooled(&config(policy), RecordingTemplate::new()).unwrap()
    }

    fn windowed() -> GridController<u32, RecordingTemplate> {
        windowed_recording().0
    }

    fn windowed_recording() -> (GridController<u32, RecordingTemplate>, RecordingTemplate) {
        let template = RecordingTemplate::new();
        let c = GridController::windowed(&config(EdgePolicy::Clamp), template.clone()).unwrap();
        (c, template)
    }

    fn focused_index(signals: &[GridSignal]) -> Option<usize> {
        signals.iter().find_map(|s| match s {
            GridSignal::Focus(t) => Some(t.index),
            _ => None,
        })
    }

    #[test]
    fn refresh_with_reset_focuses_first_item() {
        let mut c = pooled(EdgePolicy::Clamp);
        let signals = c.refresh(items(0..12), true, 0);
        assert_eq!(focused_index(&signals), Some(0));
        assert_eq!(c.selection().index(), 0);
    }

    #[test]
    fn empty_refresh_signals_no_selection() {
        let mut c = pooled(EdgePolicy::Clamp);
        c.refresh(items(0..3), true, 0);
        let signals = c.refresh(Vec::new(), false, 0);
        assert_eq!(signals, vec![GridSignal::NoSelection]);
        assert_eq!(*c.selection(), SelectionState::default());
    }

    #[test]
    fn shrink_that_removes_focus_falls_back_to_first() {
        let mut c = pooled(EdgePolicy::Clamp);
        c.refresh(items(0..12), true, 0);
        c.select_data_index(11);
        let signals = c.refresh(items(0..3), false, 0);
        assert_eq!(focused_index(&signals), Some(0));
    }

    #[test]
    fn press_moves_and_hold_repeats() {
        let mut c = pooled(EdgePolicy::Clamp);
        c.refresh(items(0..12), true, 0);
        let signals = c.handle_input(InputEvent::Press(Direction::Right));
        assert_eq!(focused_index(&signals), Some(1));
        assert!(c.tick(299).is_empty());
        assert_eq!(focused_index(&c.tick(1)), Some(2));
        assert_eq!(focused_index(&c.tick(100)), Some(3));

        c.handle_input(InputEvent::Release(Direction::Right));
        assert!(c.tick(1_000).is_empty());
    }

    #[test]
    fn release_of_other_direction_keeps_repeat() {
        let mut c = pooled(EdgePolicy::Clamp);
        c.refresh(items(0..12), true, 0);
        c.handle_input(InputEvent::Press(Direction::Right));
        c.handle_input(InputEvent::Release(Direction::Down));
        assert_eq!(focused_index(&c.tick(300)), Some(2));
    }

    #[test]
    fn releasing_superseded_press_keeps_newer_repeat() {
        let mut c = pooled(EdgePolicy::Clamp);
        c.refresh(items(0..12), true, 0);
        c.handle_input(InputEvent::Press(Direction::Right));
        c.handle_input(InputEvent::Press(Direction::Down));
        c.handle_input(InputEvent::Release(Direction::Right));
        assert_eq!(c.navigation().held_direction(), Some(Direction::Down));
        assert_eq!(focused_index(&c.tick(300)), Some(11));

        c.handle_input(InputEvent::Release(Direction::Down));
        assert!(c.navigation().held_direction().is_none());
    }

    #[test]
    fn commit_interrupt_stops_repeat() {
        let mut c = pooled(EdgePolicy::Clamp);
        c.refresh(items(0..12), true, 0);
        c.handle_input(InputEvent::Press(Direction::Right));
        c.handle_input(InputEvent::Interrupt(Interrupt::CommitStarted));
        assert!(c.tick(1_000).is_empty());
    }

    #[test]
    fn press_without_focus_takes_first_slot() {
        let mut c = pooled(EdgePolicy::Clamp);
        c.refresh(items(0..4), true, 0);
        c.release_focus();
        let signals = c.handle_input(InputEvent::Press(Direction::Down));
        assert_eq!(focused_index(&signals), Some(0));
    }

    #[test]
    fn handoff_at_bottom_edge() {
        let mut c = pooled(EdgePolicy::Handoff);
        c.refresh(items(0..12), true, 0);
        c.select_data_index(10);
        assert!(c.is_on_last_row());
        let signals = c.handle_input(InputEvent::Press(Direction::Down));
        assert_eq!(signals, vec![GridSignal::Handoff(Direction::Down)]);
        assert!(c.navigation().held_direction().is_none());
    }

    #[test]
    fn deferred_refresh_signals_after_exit() {
        let hooks = RecordingHooks::new(Some(120));
        let mut c = GridController::pooled_with_transitions(
            &config(EdgePolicy::Clamp),
            RecordingTemplate::new(),
            hooks,
        )
        .unwrap();
        c.refresh(items(0..4), true, 0);
        assert!(c.refresh(items(0..9), true, 1).is_empty());
        assert!(c.tick(100).is_empty());
        assert_eq!(focused_index(&c.tick(20)), Some(0));
        assert_eq!(c.grid().as_pooled().map(|g| g.pool_len()), Some(11));
    }

    #[test]
    fn windowed_navigation_scrolls_the_window() {
        let mut c = windowed();
        c.refresh(items(0..1_000), true, 0);
        for _ in 0..10 {
            c.handle_input(InputEvent::Press(Direction::Down));
            c.handle_input(InputEvent::Release(Direction::Down));
        }
        assert_eq!(c.selection().index(), 50);
        let window = c.grid().as_windowed().unwrap();
        let handle = c.selection().handle().unwrap();
        assert_eq!(window.data_index(handle), Some(50));
        assert!(window.scroll_offset() > 0.0);
    }

    #[test]
    fn windowed_select_far_index() {
        let mut c = windowed();
        c.refresh(items(0..10_000), true, 0);
        let signals = c.select_data_index(9_998);
        assert_eq!(focused_index(&signals), Some(9_998));
        let window = c.grid().as_windowed().unwrap();
        assert_eq!(window.data_index(c.selection().handle().unwrap()), Some(9_998));
        assert!(c.is_on_last_row());
    }

    #[test]
    fn scrolling_parks_and_restores_selection() {
        let mut c = windowed();
        c.refresh(items(0..1_000), true, 0);
        c.select_data_index(3);

        assert!(c.on_scroll(50_000.0).is_empty());
        assert!(c.selection().is_parked());
        assert_eq!(c.selection().index(), 3);

        let signals = c.on_scroll(0.0);
        assert_eq!(focused_index(&signals), Some(3));
        assert!(!c.selection().is_parked());
    }

    #[test]
    fn parked_selection_still_navigates() {
        let mut c = windowed();
        c.refresh(items(0..1_000), true, 0);
        c.select_data_index(3);
        c.on_scroll(50_000.0);
        let signals = c.handle_input(InputEvent::Press(Direction::Down));
        assert_eq!(focused_index(&signals), Some(8));
    }

    #[test]
    fn blocked_windowed_move_keeps_focus_on_its_item() {
        let (mut c, template) = windowed_recording();
        c.refresh(items(0..1_000), true, 0);
        c.select_data_index(17);
        template.disable_value(22);

        let signals = c.handle_input(InputEvent::Press(Direction::Down));
        assert!(signals.is_empty());
        assert_eq!(c.selection().index(), 17);
        let window = c.grid().as_windowed().unwrap();
        let handle = c.selection().handle().unwrap();
        assert_eq!(window.data_index(handle), Some(17));
        assert_eq!(window.scroll_offset(), 0.0);
    }

    #[test]
    fn trailing_placeholders_do_not_hide_the_last_item_row() {
        let mut settings = config(EdgePolicy::Handoff);
        settings.pool.trailing_buffer = 5;
        let mut c = GridController::pooled(&settings, RecordingTemplate::new()).unwrap();
        c.refresh(items(0..5), true, 0);
        c.select_data_index(2);
        assert!(c.is_on_last_row());
        let signals = c.handle_input(InputEvent::Press(Direction::Down));
        assert_eq!(signals, vec![GridSignal::Handoff(Direction::Down)]);
    }

    #[test]
    fn scroll_is_ignored_by_pooled_panels() {
        let mut c = pooled(EdgePolicy::Clamp);
        c.refresh(items(0..4), true, 0);
        assert!(c.on_scroll(100.0).is_empty());
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Press(Direction),
            Scroll(f64),
            Select(usize),
        }

        fn arb_op() -> impl Strategy<Value = Op> {
            prop_oneof![
                4 => proptest::sample::select(Direction::ALL.to_vec()).prop_map(Op::Press),
                1 => (0.0f64..20_000.0).prop_map(Op::Scroll),
                1 => (0usize..1_000).prop_map(Op::Select),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn windowed_focus_tracks_selected_index(
                ops in proptest::collection::vec(arb_op(), 1..40),
            ) {
                let (mut c, template) = windowed_recording();
                for value in (0..1_000).step_by(7) {
                    template.disable_value(value);
                }
                c.refresh(items(0..1_000), true, 0);
                for op in ops {
                    match op {
                        Op::Press(dir) => {
                            c.handle_input(InputEvent::Press(dir));
                            c.handle_input(InputEvent::Release(dir));
                        },
                        Op::Scroll(offset) => {
                            c.on_scroll(offset);
                        },
                        Op::Select(index) => {
                            c.select_data_index(index);
                        },
                    }
                    let selection = *c.selection();
                    let window = c.grid().as_windowed().unwrap();
                    match selection.handle() {
                        Some(handle) => {
                            prop_assert_eq!(window.data_index(handle), Some(selection.index()));
                        },
                        None => {
                            prop_assert!(selection.is_parked());
                            prop_assert!(window.slot_for_data_index(selection.index()).is_none());
                        },
                    }
                }
            }
        }
    }
}
