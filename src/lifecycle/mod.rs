//! Process lifecycle: signal handling and coordinated shutdown.
//!
//! The launcher has exactly two states, not-started and running; shutdown
//! always arrives externally via signal. This module turns that signal into
//! a broadcast the server and the delegated child both observe, bounded by
//! the configured drain window.

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
