//! Application runtime: terminal lifecycle, background workers and the event loop.

/// Runtime event loop and background workers.
mod runtime;
/// Terminal setup and restoration utilities.
mod terminal;

pub use runtime::{RunOptions, StartupError, run};
