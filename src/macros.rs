//! Diagnostics plumbing.
//!
//! With the `tracing` feature the crate emits `trace!` events from its slow
//! paths; without it the macro expands to nothing.

#[cfg(feature = "tracing")]
pub(crate) use tracing::trace;

/// Forwards to tracing::trace when the tracing feature is enabled
#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($tt:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use trace;
