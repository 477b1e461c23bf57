//! Support library for the `ba-pns` binary.
//!
//! Exposes the command pipeline and logging setup so tests and doctests can
//! drive a simulation without spawning a subprocess.

pub mod cli;
pub mod logging;
