//! Scripted input replay, one frame at a time.

use std::rc::Rc;

use slotgrid_types::input::{Direction, InputEvent, Interrupt};
use slotgrid_ui::controller::{GridController, GridSignal};
use slotgrid_ui::slot::SlotTemplate;

use crate::console::Tile;

/// Frame length used when replaying a script.
pub const FRAME_MS: u32 = 16;

/// One scripted action.
#[derive(Debug)]
pub enum Step {
    Input(InputEvent),
    /// Let `ms` of frames elapse.
    Wait(u32),
    Refresh {
        items: Vec<Rc<Tile>>,
        reset_selection: bool,
        direction: i32,
    },
    Scroll(f64),
    Select(usize),
}

impl Step {
    pub fn press(dir: Direction) -> Self {
        Step::Input(InputEvent::Press(dir))
    }

    pub fn release(dir: Direction) -> Self {
        Step::Input(InputEvent::Release(dir))
    }

    pub fn interrupt(interrupt: Interrupt) -> Self {
        Step::Input(InputEvent::Interrupt(interrupt))
    }

    /// Press, hold for `ms`, release.
    pub fn hold(dir: Direction, ms: u32) -> [Self; 3] {
        [Step::press(dir), Step::Wait(ms), Step::release(dir)]
    }
}

/// Counters gathered while replaying.
#[derive(Debug, Default)]
pub struct Summary {
    pub frames: u32,
    pub focus_moves: usize,
    pub handoffs: usize,
    pub cleared: usize,
}

impl Summary {
    fn record(&mut self, panel: &str, signals: Vec<GridSignal>) {
        for signal in signals {
            match signal {
                GridSignal::Focus(target) => {
                    self.focus_moves += 1;
                    log::info!(
                        "[{panel}] focus {} (index {})",
                        target.handle,
                        target.index
                    );
                },
                GridSignal::NoSelection => {
                    self.cleared += 1;
                    log::info!("[{panel}] no selection");
                },
                GridSignal::Handoff(dir) => {
                    self.handoffs += 1;
                    log::info!("[{panel}] hand focus {dir:?}");
                },
            }
        }
    }
}

/// Run `steps` against `controller`.
pub fn replay<S: SlotTemplate<Tile>>(
    panel: &str,
    controller: &mut GridController<Tile, S>,
    steps: Vec<Step>,
) -> Summary {
    let mut summary = Summary::default();
    for step in steps {
        log::debug!("[{panel}] {step:?}");
        let signals = match step {
            Step::Input(event) => controller.handle_input(event),
            Step::Wait(ms) => {
                let mut signals = Vec::new();
                let mut left = ms;
                while left > 0 {
                    let dt = left.min(FRAME_MS);
                    left -= dt;
                    summary.frames += 1;
                    signals.extend(controller.tick(dt));
                }
                signals
            },
            Step::Refresh {
                items,
                reset_selection,
                direction,
            } => controller.refresh(items, reset_selection, direction),
            Step::Scroll(offset) => controller.on_scroll(offset),
            Step::Select(index) => controller.select_data_index(index),
        };
        summary.record(panel, signals);
    }
    summary
}
