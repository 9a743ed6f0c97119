//! Application orchestration layer
//!
//! This module ties hook events, live move interception and the per-window
//! registry into one snap session. It never talks to Win32 directly.

pub mod controller;
pub mod interceptor;
pub mod registry;
pub mod state;
