//! In-memory window system for tests
//!
//! `FakeDesktop` keeps window rectangles and procedures in a map and mimics
//! the OS move loop: each cursor move offsets the current drag rectangle by
//! the cursor delta, hands it to the session as a proposed move, and carries
//! the possibly rewritten rectangle forward as the window's live geometry.

use std::collections::HashMap;

use crate::app::controller::{DragOutcome, SnapError, SnapSession};
use crate::app::registry::{HandlerRef, WindowId};
use crate::app::state::HookEvent;
use crate::domain::core::{Point, Rect};
use crate::platform::{PlacementFlags, WindowError, WindowSystem};

#[derive(Debug, Clone, Copy)]
struct FakeWindow {
    rect: Rect,
    resizable: bool,
    handler: HandlerRef,
}

#[derive(Debug)]
pub struct FakeDesktop {
    work_area: Rect,
    cursor: Point,
    windows: HashMap<WindowId, FakeWindow>,
    drag_rect: Option<Rect>,
    pub placements: Vec<(WindowId, Rect, PlacementFlags)>,
    pub reports: Vec<SnapError>,
    pub install_count: usize,
    pub restore_count: usize,
    pub fail_install: bool,
    pub fail_restore: bool,
    pub fail_work_area: bool,
}

impl FakeDesktop {
    /// Procedure value standing in for the snap interceptor
    pub const INTERCEPTOR: isize = -1;

    pub fn new(work_area: Rect) -> Self {
        Self {
            work_area,
            cursor: Point::default(),
            windows: HashMap::new(),
            drag_rect: None,
            placements: Vec::new(),
            reports: Vec::new(),
            install_count: 0,
            restore_count: 0,
            fail_install: false,
            fail_restore: false,
            fail_work_area: false,
        }
    }

    /// Procedure a window is created with
    pub fn default_handler(window: WindowId) -> HandlerRef {
        HandlerRef(0x1000 + window.0)
    }

    pub fn add_window(&mut self, window: WindowId, rect: Rect) {
        self.insert(window, rect, true);
    }

    /// Adds a window without a sizing border
    pub fn add_fixed_window(&mut self, window: WindowId, rect: Rect) {
        self.insert(window, rect, false);
    }

    fn insert(&mut self, window: WindowId, rect: Rect, resizable: bool) {
        self.windows.insert(
            window,
            FakeWindow {
                rect,
                resizable,
                handler: Self::default_handler(window),
            },
        );
    }

    pub fn rect_of(&self, window: WindowId) -> Rect {
        self.windows[&window].rect
    }

    pub fn handler_of(&self, window: WindowId) -> HandlerRef {
        self.windows[&window].handler
    }

    pub fn is_intercepted(&self, window: WindowId) -> bool {
        self.handler_of(window) == HandlerRef(Self::INTERCEPTOR)
    }

    /// Puts the cursor at `at` and starts dragging `window`
    pub fn press(&mut self, session: &mut SnapSession, window: WindowId, at: Point) {
        self.cursor = at;
        self.drag_rect = Some(self.rect_of(window));
        session.handle_event(HookEvent::DragStart(window), self);
    }

    /// Moves the cursor during a drag, delivering a proposed move when intercepted
    pub fn move_cursor(&mut self, session: &mut SnapSession, window: WindowId, to: Point) -> Rect {
        let (dx, dy) = (to.x - self.cursor.x, to.y - self.cursor.y);
        self.cursor = to;
        let mut proposed = self.drag_rect.unwrap_or_else(|| self.rect_of(window)).offset(dx, dy);

        if self.is_intercepted(window) {
            if let Err(err) = session.on_proposed_move(window, &mut proposed, &*self) {
                self.reports.push(err);
            }
        }

        self.drag_rect = Some(proposed);
        if let Some(state) = self.windows.get_mut(&window) {
            state.rect = proposed;
        }
        proposed
    }

    /// Ends the drag the way the hook would, returning what the session did
    pub fn release(&mut self, session: &mut SnapSession, window: WindowId) -> Option<DragOutcome> {
        self.drag_rect = None;
        session.handle_event(HookEvent::DragEnd(window), self)
    }

    /// Replaces the work area returned to later drag-starts
    pub fn set_work_area(&mut self, work_area: Rect) {
        self.work_area = work_area;
    }

    fn window(&self, window: WindowId) -> Result<&FakeWindow, WindowError> {
        self.windows.get(&window).ok_or(WindowError::WindowRect(window))
    }
}

impl WindowSystem for FakeDesktop {
    fn has_resizable_frame(&self, window: WindowId) -> bool {
        self.windows.get(&window).is_some_and(|w| w.resizable)
    }

    fn window_rect(&self, window: WindowId) -> Result<Rect, WindowError> {
        Ok(self.window(window)?.rect)
    }

    fn cursor_position(&self) -> Result<Point, WindowError> {
        Ok(self.cursor)
    }

    fn work_area(&self) -> Result<Rect, WindowError> {
        if self.fail_work_area {
            return Err(WindowError::WorkArea);
        }
        Ok(self.work_area)
    }

    fn set_window_rect(&mut self, window: WindowId, rect: Rect, flags: PlacementFlags) -> Result<(), WindowError> {
        let state = self.windows.get_mut(&window).ok_or(WindowError::Placement(window))?;
        state.rect = if flags.contains(PlacementFlags::PRESERVE_ORIGIN) {
            Rect::at(state.rect.origin(), rect.size())
        } else {
            rect
        };
        self.placements.push((window, rect, flags));
        Ok(())
    }

    fn install_interceptor(&mut self, window: WindowId) -> Result<HandlerRef, WindowError> {
        if self.fail_install {
            return Err(WindowError::HandlerSwap(window));
        }
        let state = self.windows.get_mut(&window).ok_or(WindowError::HandlerSwap(window))?;
        self.install_count += 1;
        Ok(std::mem::replace(&mut state.handler, HandlerRef(Self::INTERCEPTOR)))
    }

    fn restore_handler(&mut self, window: WindowId, handler: HandlerRef) -> Result<(), WindowError> {
        if self.fail_restore {
            return Err(WindowError::HandlerSwap(window));
        }
        let state = self.windows.get_mut(&window).ok_or(WindowError::HandlerSwap(window))?;
        state.handler = handler;
        self.restore_count += 1;
        Ok(())
    }

    fn report(&mut self, error: &SnapError) {
        self.reports.push(error.clone());
    }
}
