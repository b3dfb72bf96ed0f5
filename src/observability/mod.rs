//! Logging and diagnostics.

pub mod logging;
