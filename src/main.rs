//! snapxp shell
//!
//! Registers the snap hook and keeps a message loop running until Ctrl+C or
//! logoff. All snapping happens inside the hooked processes.

use std::process::ExitCode;

#[cfg(windows)]
fn main() -> ExitCode {
    use log::{error, info};
    use snaphook::input::SnapHook;

    init_logging();

    let mut hook = SnapHook::new();
    if let Err(err) = hook.enable() {
        error!("{}", err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = shell::install_ctrl_handler() {
        error!("{}", err);
        return ExitCode::FAILURE;
    }

    info!("snapxp running, press Ctrl+C to quit");
    shell::run_message_loop();

    match hook.disable() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(windows))]
fn main() -> ExitCode {
    init_logging();
    log::error!("snapxp only runs on Windows");
    ExitCode::FAILURE
}

fn init_logging() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

#[cfg(windows)]
mod shell {
    use std::sync::atomic::{AtomicU32, Ordering};

    use windows::Win32::Foundation::{BOOL, LPARAM, TRUE, WPARAM};
    use windows::Win32::System::Console::SetConsoleCtrlHandler;
    use windows::Win32::System::Threading::GetCurrentThreadId;
    use windows::Win32::UI::WindowsAndMessaging::{
        DispatchMessageW, GetMessageW, PostThreadMessageW, TranslateMessage, MSG, WM_QUIT,
    };

    /// Thread running the message loop, target of the quit message
    static MAIN_THREAD: AtomicU32 = AtomicU32::new(0);

    unsafe extern "system" fn on_console_ctrl(_ctrl_type: u32) -> BOOL {
        let thread = MAIN_THREAD.load(Ordering::Acquire);
        match unsafe { PostThreadMessageW(thread, WM_QUIT, WPARAM(0), LPARAM(0)) } {
            Ok(()) => TRUE,
            Err(_) => BOOL(0),
        }
    }

    pub fn install_ctrl_handler() -> windows::core::Result<()> {
        MAIN_THREAD.store(unsafe { GetCurrentThreadId() }, Ordering::Release);
        unsafe { SetConsoleCtrlHandler(Some(on_console_ctrl), TRUE) }
    }

    /// Pumps messages until `WM_QUIT`
    pub fn run_message_loop() {
        let mut msg = MSG::default();
        unsafe {
            // 0 means WM_QUIT, -1 means failure
            while GetMessageW(&mut msg, None, 0, 0).0 > 0 {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
    }
}
