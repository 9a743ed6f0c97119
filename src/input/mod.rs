//! System event input
//!
//! Drag start and end arrive through an in-context WinEvent hook.

#[cfg(windows)]
pub mod winevent;

#[cfg(windows)]
pub use winevent::{HookError, SnapHook};
