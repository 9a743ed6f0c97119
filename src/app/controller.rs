//! Drag session controller
//!
//! The controller owns the window registry and the snap preview, and drives
//! the per-window `Idle -> Dragging -> Idle` transitions from the hook's
//! drag-start and drag-end notifications. Live move notifications in between
//! are handled by the interceptor (see `app::interceptor`).

use log::{debug, info, warn};

use crate::app::registry::{RegistryFull, WindowId, WindowRegistry};
use crate::app::state::{DragPhase, HookEvent, SnapPreview};
use crate::config::SnapConfig;
use crate::domain::core::Rect;
use crate::platform::{PlacementFlags, WindowError, WindowSystem};

/// Errors surfaced by the snap session
///
/// None of these are fatal: the affected window is left alone for the
/// current drag and every other window keeps snapping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapError {
    #[error(transparent)]
    RegistryFull(#[from] RegistryFull),

    #[error("No original procedure recorded for window {0}")]
    MissingOriginalHandler(WindowId),

    #[error("Failed to install snap handler on window {window}: {source}")]
    HandlerInstallFailure {
        window: WindowId,
        #[source]
        source: WindowError,
    },

    #[error("Failed to restore original handler on window {window}: {source}")]
    HandlerRestoreFailure {
        window: WindowId,
        #[source]
        source: WindowError,
    },

    #[error("Window system error: {0}")]
    Platform(#[from] WindowError),
}

/// What a drag-end did to the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Released in an edge zone, window moved to the snap rectangle
    Snapped(Rect),
    /// Released elsewhere after moving; the saved size was applied again
    SizeReasserted(Rect),
    /// Nothing to do (no move happened, or the drag was never intercepted)
    Unchanged,
    /// The window has no registry entry
    Untracked,
}

/// Snap state for all windows of one message thread
///
/// The shell constructs one session per thread and routes every hook event
/// and intercepted move through it.
#[derive(Debug, Clone)]
pub struct SnapSession {
    pub(crate) config: SnapConfig,
    pub(crate) registry: WindowRegistry,
    pub(crate) preview: SnapPreview,
    full_reported: bool,
}

impl Default for SnapSession {
    fn default() -> Self {
        Self::new(SnapConfig::default())
    }
}

impl SnapSession {
    pub fn new(config: SnapConfig) -> Self {
        Self {
            config,
            registry: WindowRegistry::new(),
            preview: SnapPreview::default(),
            full_reported: false,
        }
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn preview(&self) -> &SnapPreview {
        &self.preview
    }

    /// Current drag phase of `window`; untracked windows are idle
    pub fn phase(&self, window: WindowId) -> DragPhase {
        self.registry
            .find(window)
            .map_or(DragPhase::Idle, |state| state.phase)
    }

    /// Entry point for hook notifications
    ///
    /// Windows without a sizing border are ignored. Failures are logged and
    /// reported through the window system, never returned. A full registry
    /// is reported the first time only.
    ///
    /// # Returns
    /// What a successful drag-end did; `None` for drag-starts, ignored
    /// windows and failures
    pub fn handle_event<W: WindowSystem + ?Sized>(&mut self, event: HookEvent, system: &mut W) -> Option<DragOutcome> {
        let window = event.window();
        if !system.has_resizable_frame(window) {
            return None;
        }

        let result = match event {
            HookEvent::DragStart(window) => self.begin_drag(window, system).map(|()| None),
            HookEvent::DragEnd(window) => self.end_drag(window, system).map(|outcome| {
                debug!("Drag of window {} ended: {:?}", window, outcome);
                Some(outcome)
            }),
        };

        match result {
            Ok(outcome) => outcome,
            Err(SnapError::RegistryFull(full)) if self.full_reported => {
                debug!("{}", full);
                None
            }
            Err(err) => {
                warn!("{}", err);
                self.full_reported |= matches!(err, SnapError::RegistryFull(_));
                system.report(&err);
                None
            }
        }
    }

    /// Handles a drag-start: record the baseline and install the interceptor
    pub fn begin_drag<W: WindowSystem + ?Sized>(&mut self, window: WindowId, system: &mut W) -> Result<(), SnapError> {
        let state = self.registry.get_or_create(window)?;

        // Query everything first so a failure leaves the window untouched
        let rect = system.window_rect(window)?;
        let cursor = system.cursor_position()?;
        let work_area = system.work_area()?;

        let offset = cursor.relative_to(rect.origin());
        if state.is_snapped {
            // The offset must land inside the pre-snap size the window returns to
            state.drag_offset = offset.clamped_within(state.original_rect.size());
        } else {
            state.original_rect = rect;
            state.saved_rect = rect;
            state.drag_offset = offset;
        }
        state.needs_size_revert = false;
        self.preview.reset(work_area);

        if state.phase == DragPhase::Dragging {
            debug!("Window {} already intercepted, keeping its saved procedure", window);
            return Ok(());
        }

        let handler = system
            .install_interceptor(window)
            .map_err(|source| SnapError::HandlerInstallFailure { window, source })?;
        state.original_handler = Some(handler);
        state.phase = state.phase.on_event(&HookEvent::DragStart(window));

        debug!(
            "Drag of window {} started at {:?} (snapped: {})",
            window, rect, state.is_snapped
        );
        Ok(())
    }

    /// Handles a drag-end: restore the procedure, then commit a snap or reassert the size
    pub fn end_drag<W: WindowSystem + ?Sized>(&mut self, window: WindowId, system: &mut W) -> Result<DragOutcome, SnapError> {
        let Some(state) = self.registry.find_mut(window) else {
            debug!("Drag-end for untracked window {}", window);
            return Ok(DragOutcome::Untracked);
        };

        if state.phase != DragPhase::Dragging {
            return Ok(DragOutcome::Unchanged);
        }

        let handler = state
            .original_handler
            .ok_or(SnapError::MissingOriginalHandler(window))?;

        // A failed restore leaves the interceptor in place; stay in Dragging so
        // the next drag-end retries instead of a drag-start reinstalling over it
        let restored = system.restore_handler(window, handler);
        if restored.is_ok() {
            state.phase = state.phase.on_event(&HookEvent::DragEnd(window));
        }

        let committed = if let Some(target) = self.preview.take() {
            system
                .set_window_rect(window, target, PlacementFlags::COMMIT)
                .map(|()| {
                    state.original_rect = state.saved_rect;
                    state.is_snapped = true;
                    info!("Snapped window {} to {:?}", window, target);
                    DragOutcome::Snapped(target)
                })
        } else if state.needs_size_revert {
            system
                .set_window_rect(window, state.saved_rect, PlacementFlags::RESIZE_IN_PLACE)
                .map(|()| DragOutcome::SizeReasserted(state.saved_rect))
        } else {
            Ok(DragOutcome::Unchanged)
        };

        restored.map_err(|source| SnapError::HandlerRestoreFailure { window, source })?;
        committed.map_err(SnapError::from)
    }

    /// Restores the original procedure of every window still intercepted
    ///
    /// Called when the owning thread's session is torn down. Windows whose
    /// restore fails stay in `Dragging`; the first failure is returned after
    /// all windows were tried.
    pub fn release_all<W: WindowSystem + ?Sized>(&mut self, system: &mut W) -> Result<(), SnapError> {
        let mut first_error = None;
        for state in self.registry.iter_mut() {
            if state.phase != DragPhase::Dragging {
                continue;
            }
            let Some(handler) = state.original_handler else {
                first_error.get_or_insert(SnapError::MissingOriginalHandler(state.window()));
                continue;
            };
            match system.restore_handler(state.window(), handler) {
                Ok(()) => state.phase = DragPhase::Idle,
                Err(source) => {
                    first_error.get_or_insert(SnapError::HandlerRestoreFailure {
                        window: state.window(),
                        source,
                    });
                }
            }
        }
        self.preview.take();

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
