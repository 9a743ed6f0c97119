//! Platform access for the snap engine
//!
//! The session never calls Win32 directly. Everything it needs from the
//! window system goes through [`WindowSystem`], implemented for real windows
//! in [`windows`] and by an in-memory desktop in tests.

#[cfg(test)]
pub mod fake;
#[cfg(windows)]
pub mod subclass;
#[cfg(windows)]
pub mod windows;

use crate::app::controller::SnapError;
use crate::app::registry::{HandlerRef, WindowId};
use crate::domain::core::{Point, Rect};

/// Error types for window system operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    /// Failed to read the window's rectangle
    #[error("Failed to get rectangle of window {0}")]
    WindowRect(WindowId),
    /// Failed to read the cursor position
    #[error("Failed to get cursor position")]
    CursorPosition,
    /// Failed to read the work area
    #[error("Failed to get work area")]
    WorkArea,
    /// Failed to move or resize the window
    #[error("Failed to position window {0}")]
    Placement(WindowId),
    /// The window refused a procedure swap
    #[error("Failed to swap message procedure of window {0}")]
    HandlerSwap(WindowId),
}

bitflags::bitflags! {
    /// Options for [`WindowSystem::set_window_rect`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PlacementFlags: u32 {
        /// Keep the window's Z-order position
        const NO_Z_ORDER_CHANGE = 1 << 0;
        /// Keep the owner window's Z-order position
        const NO_OWNER_Z_ORDER_CHANGE = 1 << 1;
        /// Only apply the size; the window stays where it is
        const PRESERVE_ORIGIN = 1 << 2;
    }
}

impl PlacementFlags {
    /// Flags for committing a snap: move and resize, leave stacking alone
    pub const COMMIT: Self = Self::NO_Z_ORDER_CHANGE.union(Self::NO_OWNER_Z_ORDER_CHANGE);
    /// Flags for reasserting a size after release
    pub const RESIZE_IN_PLACE: Self = Self::COMMIT.union(Self::PRESERVE_ORIGIN);
}

/// Window system operations the snap engine depends on
pub trait WindowSystem {
    /// Returns true if the window has a sizing border
    fn has_resizable_frame(&self, window: WindowId) -> bool;

    /// Current window rectangle in screen coordinates
    fn window_rect(&self, window: WindowId) -> Result<Rect, WindowError>;

    fn cursor_position(&self) -> Result<Point, WindowError>;

    /// Usable desktop area, excluding taskbars
    fn work_area(&self) -> Result<Rect, WindowError>;

    fn set_window_rect(&mut self, window: WindowId, rect: Rect, flags: PlacementFlags) -> Result<(), WindowError>;

    /// Installs the snap interceptor as the window's procedure
    ///
    /// # Returns
    /// The procedure that was installed before
    fn install_interceptor(&mut self, window: WindowId) -> Result<HandlerRef, WindowError>;

    /// Puts `handler` back as the window's procedure
    fn restore_handler(&mut self, window: WindowId, handler: HandlerRef) -> Result<(), WindowError>;

    /// Surfaces a failure through the shell's diagnostic channel
    fn report(&mut self, error: &SnapError);
}
