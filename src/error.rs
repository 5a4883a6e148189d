use thiserror::Error;

/// Returned when reference-returning typed access asks for an alternative
/// that is not the live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("bad variant access: requested alternative {requested}, but alternative {active} is active")]
pub struct BadAccess {
    requested: usize,
    active: usize,
}

impl BadAccess {
    pub(crate) const fn new(requested: usize, active: usize) -> Self {
        Self { requested, active }
    }

    /// Position of the alternative that was asked for.
    pub const fn requested(&self) -> usize {
        self.requested
    }

    /// Position of the alternative that was live at the time.
    pub const fn active(&self) -> usize {
        self.active
    }
}
