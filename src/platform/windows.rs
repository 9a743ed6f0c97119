//! Win32 implementation of the window system
//!
//! Queries go straight to Win32. Placements and error dialogs send messages
//! to window procedures, which may route back into the snap session, so they
//! are queued and only run by [`Win32Desktop::flush`] once the caller has
//! released the session.

use log::{error, warn};
use windows::Win32::Foundation::{HWND, POINT, RECT};
use windows::Win32::UI::WindowsAndMessaging::{
    GetCursorPos, GetWindowLongPtrW, GetWindowLongW, GetWindowRect, MessageBoxW, SetWindowLongPtrW,
    SetWindowPos, SystemParametersInfoW, GWLP_WNDPROC, GWL_STYLE, MB_ICONERROR, MB_OK,
    SET_WINDOW_POS_FLAGS, SPI_GETWORKAREA, SWP_NOMOVE, SWP_NOOWNERZORDER, SWP_NOZORDER,
    SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS, WINDOW_STYLE, WS_THICKFRAME,
};
use windows::core::PCWSTR;

use crate::app::controller::SnapError;
use crate::app::registry::{HandlerRef, WindowId};
use crate::domain::core::{Point, Rect};
use crate::platform::subclass::intercept_proc;
use crate::platform::{PlacementFlags, WindowError, WindowSystem};

/// Converts a domain rectangle to Windows RECT structure
pub fn rect_to_win32_rect(rect: &Rect) -> RECT {
    RECT {
        left: rect.x,
        top: rect.y,
        right: rect.right(),
        bottom: rect.bottom(),
    }
}

/// Converts a Windows RECT to domain rectangle
pub fn win32_rect_to_rect(rect: &RECT) -> Rect {
    Rect::from_edges(rect.left, rect.top, rect.right, rect.bottom)
}

pub(crate) fn hwnd(window: WindowId) -> HWND {
    HWND(window.0)
}

fn placement_flags(flags: PlacementFlags) -> SET_WINDOW_POS_FLAGS {
    let mut swp = SET_WINDOW_POS_FLAGS(0);
    if flags.contains(PlacementFlags::NO_Z_ORDER_CHANGE) {
        swp = swp | SWP_NOZORDER;
    }
    if flags.contains(PlacementFlags::NO_OWNER_Z_ORDER_CHANGE) {
        swp = swp | SWP_NOOWNERZORDER;
    }
    if flags.contains(PlacementFlags::PRESERVE_ORIGIN) {
        swp = swp | SWP_NOMOVE;
    }
    swp
}

/// Side effect queued until the session borrow is released
#[derive(Debug)]
enum Deferred {
    Place {
        window: WindowId,
        rect: Rect,
        flags: PlacementFlags,
    },
    Report(String),
}

/// Window system backed by the calling thread's Win32 windows
#[derive(Debug, Default)]
pub struct Win32Desktop {
    deferred: Vec<Deferred>,
}

impl Win32Desktop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the queued placements and error dialogs
    pub fn flush(self) {
        for call in self.deferred {
            match call {
                Deferred::Place { window, rect, flags } => {
                    let result = unsafe {
                        SetWindowPos(
                            hwnd(window),
                            HWND(0), // Ignored due to SWP_NOZORDER flag
                            rect.x,
                            rect.y,
                            rect.w,
                            rect.h,
                            placement_flags(flags),
                        )
                    };
                    if result.is_err() {
                        warn!("{}", WindowError::Placement(window));
                    }
                }
                Deferred::Report(text) => show_error(&text),
            }
        }
    }
}

/// Shows a modal error box, the diagnostic channel of the hook
fn show_error(text: &str) {
    let wide: Vec<u16> = text.encode_utf16().chain(std::iter::once(0)).collect();
    unsafe {
        let _ = MessageBoxW(HWND(0), PCWSTR(wide.as_ptr()), PCWSTR::null(), MB_ICONERROR | MB_OK);
    }
}

impl WindowSystem for Win32Desktop {
    fn has_resizable_frame(&self, window: WindowId) -> bool {
        if window.0 == 0 {
            return false;
        }
        let style = WINDOW_STYLE(unsafe { GetWindowLongW(hwnd(window), GWL_STYLE) } as u32);
        (style & WS_THICKFRAME) != WINDOW_STYLE(0)
    }

    fn window_rect(&self, window: WindowId) -> Result<Rect, WindowError> {
        let mut rect = RECT::default();
        unsafe { GetWindowRect(hwnd(window), &mut rect) }.map_err(|_| WindowError::WindowRect(window))?;
        Ok(win32_rect_to_rect(&rect))
    }

    fn cursor_position(&self) -> Result<Point, WindowError> {
        let mut point = POINT::default();
        unsafe { GetCursorPos(&mut point) }.map_err(|_| WindowError::CursorPosition)?;
        Ok(Point::new(point.x, point.y))
    }

    fn work_area(&self) -> Result<Rect, WindowError> {
        let mut work_area = RECT::default();
        unsafe {
            SystemParametersInfoW(
                SPI_GETWORKAREA,
                0,
                Some(&mut work_area as *mut _ as *mut _),
                SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
            )
        }
        .map_err(|_| WindowError::WorkArea)?;
        Ok(win32_rect_to_rect(&work_area))
    }

    fn set_window_rect(&mut self, window: WindowId, rect: Rect, flags: PlacementFlags) -> Result<(), WindowError> {
        self.deferred.push(Deferred::Place { window, rect, flags });
        Ok(())
    }

    fn install_interceptor(&mut self, window: WindowId) -> Result<HandlerRef, WindowError> {
        let target = hwnd(window);
        let interceptor = intercept_proc as usize as isize;
        unsafe {
            // Never save the interceptor as its own original procedure
            if GetWindowLongPtrW(target, GWLP_WNDPROC) == interceptor {
                return Err(WindowError::HandlerSwap(window));
            }
            match SetWindowLongPtrW(target, GWLP_WNDPROC, interceptor) {
                0 => Err(WindowError::HandlerSwap(window)),
                previous => Ok(HandlerRef(previous)),
            }
        }
    }

    fn restore_handler(&mut self, window: WindowId, handler: HandlerRef) -> Result<(), WindowError> {
        match unsafe { SetWindowLongPtrW(hwnd(window), GWLP_WNDPROC, handler.0) } {
            0 => Err(WindowError::HandlerSwap(window)),
            _ => Ok(()),
        }
    }

    fn report(&mut self, err: &SnapError) {
        match err {
            // A sequencing bug, not something the user can act on
            SnapError::MissingOriginalHandler(_) => error!("{}", err),
            _ => self.deferred.push(Deferred::Report(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_conversion_round_trips_edges() {
        let rect = Rect::new(-1920, 40, 1920, 1040);
        let win32 = rect_to_win32_rect(&rect);
        assert_eq!((win32.left, win32.top, win32.right, win32.bottom), (-1920, 40, 0, 1080));
        assert_eq!(win32_rect_to_rect(&win32), rect);
    }

    #[test]
    fn placement_flags_map_to_swp() {
        assert_eq!(
            placement_flags(PlacementFlags::COMMIT),
            SWP_NOZORDER | SWP_NOOWNERZORDER
        );
        assert_eq!(
            placement_flags(PlacementFlags::RESIZE_IN_PLACE),
            SWP_NOZORDER | SWP_NOOWNERZORDER | SWP_NOMOVE
        );
    }

    #[test]
    fn null_window_is_not_resizable() {
        assert!(!Win32Desktop::new().has_resizable_frame(WindowId(0)));
    }
}
