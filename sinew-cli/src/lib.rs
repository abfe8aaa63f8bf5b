//! Support library for the `sinew` binary.
//!
//! Exposes the command pipeline and logging set-up so tests and doctests can
//! drive a generation without spawning a subprocess.

pub mod cli;
pub mod logging;
