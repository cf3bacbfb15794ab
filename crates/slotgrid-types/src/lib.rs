//! Foundation types for slotgrid.
//!
//! Platform-agnostic types shared by every slotgrid crate: directional input
//! events and interrupt signals, per-grid configuration, and error types.

pub mod config;
pub mod error;
pub mod input;
