//! Replacement window procedure installed for the length of a drag
//!
//! `WM_MOVING` is handed to the thread's snap session, which may rewrite the
//! proposed rectangle before the move happens. Every other message goes to
//! the procedure the window had at drag start; the session borrow is always
//! released before calling it, so the original procedure may re-enter freely.

use log::warn;
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{CallWindowProcW, DefWindowProcW, WM_MOVING, WNDPROC};

use crate::app::registry::WindowId;
use crate::input::winevent::with_session;
use crate::platform::windows::{rect_to_win32_rect, win32_rect_to_rect, Win32Desktop};

/// Window procedure of intercepted windows
pub(crate) unsafe extern "system" fn intercept_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let window = WindowId(hwnd.0);

    if msg == WM_MOVING && lparam.0 != 0 {
        // lParam points at the drag rectangle the system is about to apply
        let proposed = unsafe { &mut *(lparam.0 as *mut RECT) };
        let mut rect = win32_rect_to_rect(proposed);
        let desktop = Win32Desktop::new();

        match with_session(|session| session.on_proposed_move(window, &mut rect, &desktop)) {
            Some(Ok(_)) => {
                *proposed = rect_to_win32_rect(&rect);
                return LRESULT(1);
            }
            Some(Err(err)) => warn!("Passing WM_MOVING through: {}", err),
            None => warn!("Snap session busy, passing WM_MOVING through"),
        }
    }

    forward(window, hwnd, msg, wparam, lparam)
}

fn forward(window: WindowId, hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    match with_session(|session| session.original_handler(window)) {
        Some(Ok(handler)) => unsafe {
            let original = std::mem::transmute::<isize, WNDPROC>(handler.0);
            CallWindowProcW(original, hwnd, msg, wparam, lparam)
        },
        other => {
            if let Some(Err(err)) = other {
                warn!("{}", err);
            }
            unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
        }
    }
}
