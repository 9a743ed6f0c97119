//! Live move interception
//!
//! While a window is being dragged, its message procedure is replaced and
//! every "about to move" notification is routed here before the move takes
//! effect. The proposed rectangle is rewritten in place to show the snap
//! preview, or to pop the window back to its natural size under the cursor.
//! All other messages go to the procedure saved at drag start.

use log::debug;

use crate::app::controller::{SnapError, SnapSession};
use crate::app::registry::{HandlerRef, WindowId};
use crate::domain::core::Rect;
use crate::domain::snap::{compute_edge_snap_with_threshold, compute_follow_cursor_rect, SnapResult};
use crate::platform::WindowSystem;

/// How a proposed move was treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveAdjustment {
    /// Cursor is in an edge zone; the move was replaced by the snap rectangle
    Preview(Rect),
    /// Window left a preview or a snapped position and returns to its saved size
    PopBack(Rect),
    /// Ordinary move, recorded as the size to restore to later
    Tracked,
}

impl SnapSession {
    /// Handles a proposed move of `window`, rewriting `proposed` in place
    ///
    /// # Arguments
    /// * `window` - Window being dragged
    /// * `proposed` - Rectangle the OS is about to apply
    /// * `system` - Source of the live cursor position
    ///
    /// # Returns
    /// What was done to the rectangle, or `MissingOriginalHandler` if the
    /// window is not tracked (the caller should pass the message through)
    pub fn on_proposed_move<W: WindowSystem + ?Sized>(
        &mut self,
        window: WindowId,
        proposed: &mut Rect,
        system: &W,
    ) -> Result<MoveAdjustment, SnapError> {
        let state = self
            .registry
            .find_mut(window)
            .ok_or(SnapError::MissingOriginalHandler(window))?;
        let cursor = system.cursor_position()?;
        state.needs_size_revert = true;

        let snap = compute_edge_snap_with_threshold(
            cursor,
            self.preview.work_area,
            self.config.edge_threshold,
        );

        match snap {
            SnapResult::Snap(target) => {
                if self.preview.target() != Some(target) {
                    debug!("Window {} previewing snap to {:?}", window, target);
                }
                self.preview.show(target);
                *proposed = target;
                Ok(MoveAdjustment::Preview(target))
            }
            SnapResult::NoSnap => {
                let restore_size = if self.preview.take().is_some() {
                    state.saved_rect.size()
                } else if state.is_snapped {
                    state.is_snapped = false;
                    state.original_rect.size()
                } else {
                    state.saved_rect = *proposed;
                    return Ok(MoveAdjustment::Tracked);
                };

                let rect = compute_follow_cursor_rect(restore_size, state.drag_offset, cursor);
                state.saved_rect = rect;
                *proposed = rect;
                Ok(MoveAdjustment::PopBack(rect))
            }
        }
    }

    /// Procedure to forward non-move messages of `window` to
    pub fn original_handler(&self, window: WindowId) -> Result<HandlerRef, SnapError> {
        self.registry
            .find(window)
            .and_then(|state| state.original_handler)
            .ok_or(SnapError::MissingOriginalHandler(window))
    }
}
