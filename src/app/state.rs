//! Drag state management
//!
//! Defines the per-window drag state machine and the transient snap
//! preview that lives for the duration of a single drag.

use crate::app::registry::WindowId;
use crate::domain::core::Rect;

/// Per-window drag phase - either idle or being dragged with the interceptor installed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// No drag in progress, the window runs its own procedure
    #[default]
    Idle,
    /// Between drag-start and drag-end, the snap interceptor is installed
    Dragging,
}

/// Window lifecycle notifications forwarded by the shell's hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    /// The user started moving or resizing the window
    DragStart(WindowId),
    /// The user released the window
    DragEnd(WindowId),
}

impl HookEvent {
    /// Returns the window the event refers to
    pub fn window(&self) -> WindowId {
        match self {
            HookEvent::DragStart(window) | HookEvent::DragEnd(window) => *window,
        }
    }
}

impl DragPhase {
    /// Processes a hook event and returns the new phase
    ///
    /// A drag-start while already dragging keeps the window in `Dragging`;
    /// a drag-end while idle keeps it `Idle`.
    pub fn on_event(self, event: &HookEvent) -> DragPhase {
        match (self, event) {
            (DragPhase::Idle, HookEvent::DragStart(_)) => DragPhase::Dragging,
            (DragPhase::Dragging, HookEvent::DragEnd(_)) => DragPhase::Idle,
            (phase, _) => phase,
        }
    }
}

/// Transient snap state shared by whichever window is being dragged
///
/// Only one window can be dragged at a time on a message thread, so a single
/// preview serves every tracked window. It is reset at each drag-start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SnapPreview {
    /// Work area captured at the last drag-start
    pub work_area: Rect,
    /// Rectangle being previewed, present only while the cursor is in an edge zone
    target: Option<Rect>,
}

impl SnapPreview {
    /// Starts a new drag against a freshly queried work area
    pub fn reset(&mut self, work_area: Rect) {
        self.work_area = work_area;
        self.target = None;
    }

    /// Returns true if the most recent move placed the cursor in an edge zone
    pub fn in_edge_zone(&self) -> bool {
        self.target.is_some()
    }

    /// Returns the rectangle currently previewed
    pub fn target(&self) -> Option<Rect> {
        self.target
    }

    pub fn show(&mut self, target: Rect) {
        self.target = Some(target);
    }

    /// Clears the preview, returning what was previewed
    pub fn take(&mut self) -> Option<Rect> {
        self.target.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_phase_is_idle() {
        assert_eq!(DragPhase::default(), DragPhase::Idle);
    }

    #[test]
    fn drag_start_then_end_returns_to_idle() {
        let window = WindowId(7);
        let phase = DragPhase::Idle.on_event(&HookEvent::DragStart(window));
        assert_eq!(phase, DragPhase::Dragging);
        assert_eq!(phase.on_event(&HookEvent::DragEnd(window)), DragPhase::Idle);
    }

    #[test]
    fn repeated_events_are_ignored() {
        let window = WindowId(7);
        assert_eq!(
            DragPhase::Dragging.on_event(&HookEvent::DragStart(window)),
            DragPhase::Dragging
        );
        assert_eq!(DragPhase::Idle.on_event(&HookEvent::DragEnd(window)), DragPhase::Idle);
    }

    #[test]
    fn preview_reset_clears_edge_zone() {
        let mut preview = SnapPreview::default();
        preview.reset(Rect::new(0, 0, 1920, 1040));
        preview.show(Rect::new(0, 0, 960, 1040));
        assert!(preview.in_edge_zone());

        preview.reset(Rect::new(0, 0, 1280, 720));
        assert!(!preview.in_edge_zone());
        assert_eq!(preview.work_area, Rect::new(0, 0, 1280, 720));
    }

    #[test]
    fn take_consumes_preview() {
        let mut preview = SnapPreview::default();
        preview.show(Rect::new(0, 0, 960, 1040));
        assert_eq!(preview.take(), Some(Rect::new(0, 0, 960, 1040)));
        assert_eq!(preview.take(), None);
        assert_eq!(preview.target(), None);
    }
}
