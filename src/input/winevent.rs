//! WinEvent hook for drag start/end notifications
//!
//! This module covers both sides of the in-context hook:
//! - `snaphook_event_proc` is exported from `snaphook.dll` and runs inside
//!   whichever process owns the window being dragged, on that window's thread
//! - [`SnapHook`] lives in the shell process and registers that export for
//!   `EVENT_SYSTEM_MOVESIZESTART..EVENT_SYSTEM_MOVESIZEEND`
//!
//! Each message thread gets its own [`SnapSession`]. Hook callbacks and the
//! interceptor's window procedure both run on the window's thread, so the
//! session is never shared across threads.

use std::cell::RefCell;

use log::{debug, info, warn};
use windows::Win32::Foundation::{HMODULE, HWND};
use windows::Win32::System::LibraryLoader::{FreeLibrary, GetProcAddress, LoadLibraryW};
use windows::Win32::UI::Accessibility::{HWINEVENTHOOK, SetWinEventHook, UnhookWinEvent, WINEVENTPROC};
use windows::Win32::UI::WindowsAndMessaging::{
    EVENT_SYSTEM_MOVESIZEEND, EVENT_SYSTEM_MOVESIZESTART, WINEVENT_INCONTEXT,
};
use windows::core::{PCSTR, PCWSTR, s, w};

use crate::app::controller::SnapSession;
use crate::app::registry::WindowId;
use crate::app::state::HookEvent;
use crate::config::SnapConfig;
use crate::platform::windows::Win32Desktop;

/// Library the shell loads to find the hook procedure
const HOOK_LIBRARY: PCWSTR = w!("snaphook.dll");
/// Exported name of [`snaphook_event_proc`]
const HOOK_PROCEDURE: PCSTR = s!("snaphook_event_proc");
/// Environment variable overriding the edge threshold in hooked processes
pub const THRESHOLD_ENV: &str = "SNAPXP_EDGE_THRESHOLD";

/// Errors that can occur while activating or deactivating the hook
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("Failed to load library snaphook.dll")]
    LibraryLoadFailed,
    #[error("Failed to load function snaphook_event_proc from snaphook.dll")]
    ProcedureNotFound,
    #[error("Failed to set event hook")]
    InstallFailed,
    #[error("Failed to remove event hook")]
    UninstallFailed,
}

/// Session owned by one message thread
///
/// Dropped when the thread exits; any window still intercepted at that point
/// gets its original procedure back. This is the only place the hooked side
/// releases windows: `SnapHook::disable` in the shell unregisters the event
/// hook but cannot reach sessions living in other processes.
struct ThreadSession {
    session: RefCell<SnapSession>,
}

impl Drop for ThreadSession {
    fn drop(&mut self) {
        let Ok(mut session) = self.session.try_borrow_mut() else {
            return;
        };
        let mut desktop = Win32Desktop::new();
        if let Err(err) = session.release_all(&mut desktop) {
            warn!("{}", err);
        }
    }
}

thread_local! {
    static SESSION: ThreadSession = ThreadSession {
        session: RefCell::new(SnapSession::new(config_from_env())),
    };
}

/// Reads the edge threshold override of the hooked process, if any
pub fn config_from_env() -> SnapConfig {
    let raw = std::env::var(THRESHOLD_ENV).ok();
    SnapConfig::from_threshold_str(raw.as_deref()).unwrap_or_else(|err| {
        warn!("{}, using defaults", err);
        SnapConfig::default()
    })
}

/// Runs `f` on this thread's session
///
/// Returns `None` if the session is already borrowed further up the stack
/// or the thread is shutting down.
pub(crate) fn with_session<R>(f: impl FnOnce(&mut SnapSession) -> R) -> Option<R> {
    SESSION
        .try_with(|cell| {
            let mut session = cell.session.try_borrow_mut().ok()?;
            Some(f(&mut session))
        })
        .ok()
        .flatten()
}

/// Maps a WinEvent id to the hook event it represents
pub fn hook_event(event: u32, window: WindowId) -> Option<HookEvent> {
    match event {
        EVENT_SYSTEM_MOVESIZESTART => Some(HookEvent::DragStart(window)),
        EVENT_SYSTEM_MOVESIZEEND => Some(HookEvent::DragEnd(window)),
        _ => None,
    }
}

/// WinEvent callback exported from the hook DLL
///
/// Runs in the context of the process that owns `hwnd`.
#[unsafe(no_mangle)]
pub unsafe extern "system" fn snaphook_event_proc(
    _hook: HWINEVENTHOOK,
    event: u32,
    hwnd: HWND,
    _id_object: i32,
    _id_child: i32,
    _event_thread: u32,
    _event_time: u32,
) {
    if hwnd.0 == 0 {
        return;
    }
    let Some(event) = hook_event(event, WindowId(hwnd.0)) else {
        return;
    };

    let mut desktop = Win32Desktop::new();
    if with_session(|session| session.handle_event(event, &mut desktop)).is_none() {
        warn!("Snap session busy, dropping {:?}", event);
    }
    desktop.flush();
}

/// Shell-side handle that keeps the in-context hook registered
#[derive(Debug, Default)]
pub struct SnapHook {
    library: Option<HMODULE>,
    hook: Option<HWINEVENTHOOK>,
}

impl SnapHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the hook DLL and subscribes to move/size start and end events
    pub fn enable(&mut self) -> Result<(), HookError> {
        if self.hook.is_some() {
            return Ok(());
        }

        unsafe {
            let library = LoadLibraryW(HOOK_LIBRARY).map_err(|_| HookError::LibraryLoadFailed)?;

            let Some(procedure) = GetProcAddress(library, HOOK_PROCEDURE) else {
                let _ = FreeLibrary(library);
                return Err(HookError::ProcedureNotFound);
            };
            let callback: WINEVENTPROC = std::mem::transmute(procedure);

            let hook = SetWinEventHook(
                EVENT_SYSTEM_MOVESIZESTART,
                EVENT_SYSTEM_MOVESIZEEND,
                library,
                callback,
                0,
                0,
                WINEVENT_INCONTEXT,
            );
            if hook.0 == 0 {
                let _ = FreeLibrary(library);
                return Err(HookError::InstallFailed);
            }

            self.library = Some(library);
            self.hook = Some(hook);
        }

        info!("Snap hook enabled");
        Ok(())
    }

    /// Removes the event hook and unloads the hook DLL from this process
    ///
    /// Hooked processes get no callback from this. A window caught mid-drag
    /// keeps the interceptor until its thread exits and the thread's session
    /// releases it.
    pub fn disable(&mut self) -> Result<(), HookError> {
        if let Some(hook) = self.hook.take() {
            if !unsafe { UnhookWinEvent(hook) }.as_bool() {
                self.hook = Some(hook);
                return Err(HookError::UninstallFailed);
            }
            info!("Snap hook disabled");
        }

        if let Some(library) = self.library.take() {
            if unsafe { FreeLibrary(library) }.is_err() {
                debug!("snaphook.dll was already unloaded");
            }
        }
        Ok(())
    }

    pub fn is_enabled(&self) -> bool {
        self.hook.is_some()
    }
}

impl Drop for SnapHook {
    fn drop(&mut self) {
        // Guaranteed cleanup
        let _ = self.disable();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_size_events_map_to_hook_events() {
        let window = WindowId(0x42);
        assert_eq!(
            hook_event(EVENT_SYSTEM_MOVESIZESTART, window),
            Some(HookEvent::DragStart(window))
        );
        assert_eq!(
            hook_event(EVENT_SYSTEM_MOVESIZEEND, window),
            Some(HookEvent::DragEnd(window))
        );
        assert_eq!(hook_event(0x8000, window), None);
    }

    #[test]
    fn new_hook_is_disabled() {
        let mut hook = SnapHook::new();
        assert!(!hook.is_enabled());
        assert!(hook.disable().is_ok());
    }

    #[test]
    fn session_is_reachable_from_hook_thread() {
        let threshold = with_session(|session| session.config().edge_threshold);
        assert!(threshold.is_some());
    }
}
