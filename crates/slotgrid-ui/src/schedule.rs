//! Frame-clock scheduling: cancellation tokens and the held-input repeat timer.
//!
//! Nothing here blocks. A per-frame driver calls `tick` with the elapsed
//! milliseconds; suspended work resumes when enough time has accumulated.

use slotgrid_types::config::RepeatConfig;

/// Identifies one scheduled task. A task whose token is no longer current
/// has been cancelled or superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskToken(u64);

/// Issues monotonically increasing tokens.
#[derive(Debug, Default)]
pub(crate) struct TokenSource {
    next: u64,
}

impl TokenSource {
    pub(crate) fn issue(&mut self) -> TaskToken {
        self.next += 1;
        TaskToken(self.next)
    }
}

/// Timer phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatPhase {
    Idle,
    InitialDelay,
    Interval,
}

/// Repeat-fire timer for held input.
///
/// After [`start`](Self::start) the timer fires once `initial_delay_ms` has
/// elapsed, then every `interval_ms` until cancelled. At most one fire is
/// reported per tick, matching one step per frame.
#[derive(Debug)]
pub struct RepeatTimer {
    initial_delay_ms: u32,
    interval_ms: u32,
    phase: RepeatPhase,
    elapsed_ms: u32,
    current: Option<TaskToken>,
    tokens: TokenSource,
}

impl RepeatTimer {
    pub fn new(config: &RepeatConfig) -> Self {
        Self {
            initial_delay_ms: config.initial_delay_ms,
            interval_ms: config.interval_ms.max(1),
            phase: RepeatPhase::Idle,
            elapsed_ms: 0,
            current: None,
            tokens: TokenSource::default(),
        }
    }

    /// Start (or restart) the timer, cancelling any running schedule.
    pub fn start(&mut self) -> TaskToken {
        self.cancel();
        let token = self.tokens.issue();
        self.phase = RepeatPhase::InitialDelay;
        self.current = Some(token);
        token
    }

    /// Cancel the schedule. Returns whether anything was running.
    pub fn cancel(&mut self) -> bool {
        let was_running = self.current.take().is_some();
        self.phase = RepeatPhase::Idle;
        self.elapsed_ms = 0;
        was_running
    }

    pub fn phase(&self) -> RepeatPhase {
        self.phase
    }

    /// Whether `token` identifies the running schedule.
    pub fn is_current(&self, token: TaskToken) -> bool {
        self.current == Some(token)
    }

    /// Advance by `dt_ms`. Returns true when a repeat step is due.
    pub fn tick(&mut self, dt_ms: u32) -> bool {
        let due_after = match self.phase {
            RepeatPhase::Idle => return false,
            RepeatPhase::InitialDelay => self.initial_delay_ms,
            RepeatPhase::Interval => self.interval_ms,
        };
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
        if self.elapsed_ms < due_after {
            return false;
        }
        self.elapsed_ms = (self.elapsed_ms - due_after).min(self.interval_ms - 1);
        self.phase = RepeatPhase::Interval;
        true
    }
}
