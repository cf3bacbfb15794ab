//! Platform-agnostic input event types consumed by grid controllers.
//!
//! Input-device binding happens elsewhere; a backend maps its native input
//! to these enums and the grid core never sees raw platform input.

use serde::{Deserialize, Serialize};

/// One of the four navigation directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// External signals that unconditionally stop continuous navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interrupt {
    /// Global input lock engaged; moves are ignored until released.
    InputLockEngaged,
    /// Global input lock released.
    InputLockReleased,
    /// A commit/confirm action started on the focused slot.
    CommitStarted,
    /// A competing modal input surface opened.
    ModalOpened,
}

impl Interrupt {
    /// Whether receiving this signal cancels a running repeat timer.
    pub fn stops_navigation(self) -> bool {
        !matches!(self, Interrupt::InputLockReleased)
    }
}

/// An input event delivered to a grid controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A direction was pressed (the start of a potential hold).
    Press(Direction),
    /// A held direction was released.
    Release(Direction),
    /// An interrupt signal from a collaborator.
    Interrupt(Interrupt),
}
