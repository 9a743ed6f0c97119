//! Fixed-capacity table of tracked windows
//!
//! Every window that has started a drag gets one slot holding its saved
//! procedure and geometry. Slots are never evicted: a window keeps its slot
//! for the life of the hook, and a full table leaves new windows unmanaged.

use crate::app::state::DragPhase;
use crate::domain::core::{Point, Rect};

/// Maximum number of windows tracked at once
pub const REGISTRY_CAPACITY: usize = 16;

/// Opaque handle of a top-level window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub isize);

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Opaque reference to a window's message procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerRef(pub isize);

/// Raised when every slot is taken by another window
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("window table full ({capacity} windows tracked), leaving window {window} unmanaged")]
pub struct RegistryFull {
    pub window: WindowId,
    pub capacity: usize,
}

/// Snap bookkeeping for one window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowState {
    window: WindowId,
    /// Procedure the window had before the interceptor was installed
    pub original_handler: Option<HandlerRef>,
    /// Whether the interceptor is currently installed
    pub phase: DragPhase,
    /// Geometry to return to when a snapped window is dragged away
    pub original_rect: Rect,
    /// Set when the last drag ended in an edge zone
    pub is_snapped: bool,
    /// Cursor position relative to the window's top-left at drag start
    pub drag_offset: Point,
    /// Last geometry observed away from any edge during the current drag
    pub saved_rect: Rect,
    /// Set once any move notification arrives during the current drag
    pub needs_size_revert: bool,
}

impl WindowState {
    fn new(window: WindowId) -> Self {
        Self {
            window,
            original_handler: None,
            phase: DragPhase::Idle,
            original_rect: Rect::default(),
            is_snapped: false,
            drag_offset: Point::default(),
            saved_rect: Rect::default(),
            needs_size_revert: false,
        }
    }

    pub fn window(&self) -> WindowId {
        self.window
    }
}

/// Flat pool of [`REGISTRY_CAPACITY`] window slots, searched linearly
#[derive(Debug, Clone)]
pub struct WindowRegistry {
    slots: [Option<WindowState>; REGISTRY_CAPACITY],
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self {
            slots: [const { None }; REGISTRY_CAPACITY],
        }
    }

    fn position(&self, window: WindowId) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|state| state.window == window))
    }

    /// Looks up the state of a tracked window
    pub fn find(&self, window: WindowId) -> Option<&WindowState> {
        self.position(window).and_then(|index| self.slots[index].as_ref())
    }

    pub fn find_mut(&mut self, window: WindowId) -> Option<&mut WindowState> {
        let index = self.position(window)?;
        self.slots[index].as_mut()
    }

    /// Returns the state of `window`, claiming a free slot on first use
    ///
    /// # Returns
    /// The window's state, or `RegistryFull` if the window is new and every
    /// slot already belongs to another window
    pub fn get_or_create(&mut self, window: WindowId) -> Result<&mut WindowState, RegistryFull> {
        let index = self
            .position(window)
            .or_else(|| self.slots.iter().position(Option::is_none))
            .ok_or(RegistryFull {
                window,
                capacity: REGISTRY_CAPACITY,
            })?;

        Ok(self.slots[index].get_or_insert_with(|| WindowState::new(window)))
    }

    /// Number of tracked windows
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut WindowState> {
        self.slots.iter_mut().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_on_empty_registry_is_none() {
        let registry = WindowRegistry::new();
        assert!(registry.find(WindowId(1)).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn get_or_create_returns_same_slot() {
        let mut registry = WindowRegistry::new();
        registry.get_or_create(WindowId(1)).unwrap().is_snapped = true;

        let state = registry.get_or_create(WindowId(1)).unwrap();
        assert!(state.is_snapped);
        assert_eq!(state.window(), WindowId(1));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn new_state_starts_idle_and_unsnapped() {
        let mut registry = WindowRegistry::new();
        let state = registry.get_or_create(WindowId(3)).unwrap();
        assert_eq!(state.phase, DragPhase::Idle);
        assert!(!state.is_snapped);
        assert!(state.original_handler.is_none());
    }

    #[test]
    fn seventeenth_window_is_rejected() {
        let mut registry = WindowRegistry::new();
        for id in 1..=REGISTRY_CAPACITY as isize {
            registry.get_or_create(WindowId(id)).unwrap();
        }
        assert_eq!(registry.len(), REGISTRY_CAPACITY);

        let err = registry.get_or_create(WindowId(100)).unwrap_err();
        assert_eq!(
            err,
            RegistryFull {
                window: WindowId(100),
                capacity: REGISTRY_CAPACITY
            }
        );
        assert!(registry.find(WindowId(100)).is_none());
    }

    #[test]
    fn full_registry_still_serves_known_windows() {
        let mut registry = WindowRegistry::new();
        for id in 1..=REGISTRY_CAPACITY as isize {
            registry.get_or_create(WindowId(id)).unwrap();
        }
        assert!(registry.get_or_create(WindowId(5)).is_ok());
    }

    #[test]
    fn window_id_displays_as_hex() {
        assert_eq!(WindowId(0x1a2b).to_string(), "0x1a2b");
    }
}
