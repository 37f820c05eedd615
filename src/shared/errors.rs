use thiserror::Error;

use crate::domain::schedule::conflict::Conflict;

/// Guard violations on reservation state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("Reservation is not active")]
    NotActive,

    #[error("Reservation is already checked in")]
    AlreadyCheckedIn,

    #[error("Reservation has not ended yet")]
    NotYetElapsed,
}

#[derive(Debug, Clone, Error)]
pub enum BookingError {
    /// Time string does not parse to HH:MM or is not aligned to the slot grid.
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Validation: {0}")]
    Validation(String),

    /// One or more overlapping reservations/closures; carries the full list.
    #[error("Scheduling conflict: {} overlapping entries", .0.len())]
    Conflict(Vec<Conflict>),

    /// A late conflict reported by the persistence boundary after a clean
    /// local check. Rendered through the same path as [`BookingError::Conflict`].
    #[error("Write rejected by store: {} overlapping entries", .0.len())]
    StaleWrite(Vec<Conflict>),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

impl BookingError {
    /// The overlap list, for both pre-flight and stale-write conflicts.
    ///
    /// Callers render conflicts from either source through one path, so a
    /// stale rejection from the store never shows up as a generic failure.
    pub fn conflicts(&self) -> Option<&[Conflict]> {
        match self {
            Self::Conflict(list) | Self::StaleWrite(list) => Some(list),
            _ => None,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Result type for booking operations
pub type BookingResult<T> = Result<T, BookingError>;
