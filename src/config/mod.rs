//! Configuration module for snapxp
//!
//! Holds the tunables of the snap engine together with their validation
//! rules. Hooked processes read an optional edge threshold override from
//! `SNAPXP_EDGE_THRESHOLD` and otherwise run with the defaults.

pub mod snap;

pub use snap::{SnapConfig, SnapConfigError};
