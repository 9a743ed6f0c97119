//! Edge snapping for dragged windows
//!
//! Built as `snaphook.dll`, this library is loaded into every process that
//! owns a window being dragged. While the drag lasts the window's message
//! procedure is swapped for one that rewrites each proposed move: with the
//! cursor near a work-area edge the window previews the matching half of the
//! screen, and on release the preview is committed.
//!
//! - [`domain`] holds the geometry
//! - [`app`] holds the per-thread session and its registry
//! - [`platform`] puts the window system behind a trait
//! - [`input`] receives drag start and end from the OS

pub mod app;
pub mod config;
pub mod domain;
pub mod input;
pub mod platform;
