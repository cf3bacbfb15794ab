//! Slot views and transition hooks that report to the log instead of a
//! screen.

use std::rc::Rc;

use slotgrid_ui::slot::{SlotHandle, SlotTemplate, SlotView};
use slotgrid_ui::transition::{TransitionHooks, TransitionTicket};

/// Item shown by the demo panels.
#[derive(Debug)]
pub struct Tile {
    pub label: String,
    pub enabled: bool,
}

impl Tile {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enabled: true,
        }
    }

    pub fn disabled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enabled: false,
        }
    }
}

/// Build `count` tiles named after `prefix`.
pub fn tiles(prefix: &str, count: usize) -> Vec<Rc<Tile>> {
    (0..count)
        .map(|i| Rc::new(Tile::new(format!("{prefix} {i}"))))
        .collect()
}

pub struct ConsoleView {
    panel: &'static str,
    handle: SlotHandle,
    tile: Option<Rc<Tile>>,
}

impl SlotView<Tile> for ConsoleView {
    fn bind(&mut self, item: Option<&Rc<Tile>>) {
        self.tile = item.map(Rc::clone);
        match &self.tile {
            Some(tile) => log::trace!("[{}] {} <- {}", self.panel, self.handle, tile.label),
            None => log::trace!("[{}] {} <- placeholder", self.panel, self.handle),
        }
    }

    fn set_active(&mut self, active: bool) {
        log::trace!("[{}] {} active={active}", self.panel, self.handle);
    }

    fn set_position(&mut self, x: f32, y: f32) {
        log::trace!("[{}] {} at ({x}, {y})", self.panel, self.handle);
    }

    fn is_interactive(&self) -> bool {
        self.tile.as_ref().is_none_or(|t| t.enabled)
    }
}

/// Template that names its views after the owning panel.
pub struct ConsoleTemplate {
    panel: &'static str,
    created: usize,
}

impl ConsoleTemplate {
    pub fn new(panel: &'static str) -> Self {
        Self { panel, created: 0 }
    }
}

impl SlotTemplate<Tile> for ConsoleTemplate {
    type View = ConsoleView;

    fn instantiate(&mut self, handle: SlotHandle) -> ConsoleView {
        self.created += 1;
        log::debug!(
            "[{}] instantiate {handle} ({} views so far)",
            self.panel,
            self.created
        );
        ConsoleView {
            panel: self.panel,
            handle,
            tile: None,
        }
    }

    fn release(&mut self, handle: SlotHandle, _view: ConsoleView) {
        log::debug!("[{}] release {handle}", self.panel);
    }
}

/// Fade-style transition that finishes its exit phase after a fixed time.
pub struct FadeHooks {
    exit_ms: u32,
    elapsed_ms: u32,
}

impl FadeHooks {
    pub fn new(exit_ms: u32) -> Self {
        Self {
            exit_ms,
            elapsed_ms: 0,
        }
    }
}

impl TransitionHooks for FadeHooks {
    fn begin_exit(&mut self, ticket: TransitionTicket, direction: i32) {
        self.elapsed_ms = 0;
        log::info!("fade out {ticket:?} (direction {direction})");
    }

    fn poll_exit(&mut self, dt_ms: u32) -> bool {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
        self.elapsed_ms >= self.exit_ms
    }

    fn begin_enter(&mut self, direction: i32) {
        log::info!("fade in (direction {direction})");
    }

    fn cancel(&mut self, ticket: TransitionTicket) {
        log::info!("fade {ticket:?} superseded");
    }
}
