//! Logging utilities.
//!
//! This module centralizes logger initialization and keeps the crate on the
//! standard `log` facade; renderer code never talks to a backend directly.

mod init;

pub use init::{init_logging, LoggingConfig};
