//! Court closure (blackout) entity

use chrono::{NaiveDate, NaiveTime};

use crate::domain::schedule::time_grid::TimeGrid;

/// Which court a closure covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosureCourt {
    /// Every court in the facility
    All,
    Court(u8),
}

impl ClosureCourt {
    pub fn applies_to(&self, court: u8) -> bool {
        match self {
            Self::All => true,
            Self::Court(n) => *n == court,
        }
    }

    /// Parse the external form: `"all"` or a court number.
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("all") {
            Some(Self::All)
        } else {
            s.parse::<u8>().ok().map(Self::Court)
        }
    }
}

impl std::fmt::Display for ClosureCourt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Court(n) => write!(f, "{}", n),
        }
    }
}

/// Administrative blackout of a court (or all courts) for part or all of a
/// day. Closures constrain new reservations; they never conflict with each
/// other.
#[derive(Debug, Clone)]
pub struct Closure {
    pub id: String,
    pub date: NaiveDate,
    pub court: ClosureCourt,
    /// Missing times mean the closure spans the whole operating window
    pub time_start: Option<NaiveTime>,
    pub time_end: Option<NaiveTime>,
    pub reason: String,
    pub is_active: bool,
}

impl Closure {
    pub fn applies_to(&self, court: u8) -> bool {
        self.court.applies_to(court)
    }

    /// The blocked interval, defaulting to the full operating window when no
    /// explicit times are set.
    pub fn span(&self, grid: &TimeGrid) -> (NaiveTime, NaiveTime) {
        (
            self.time_start.unwrap_or(grid.open),
            self.time_end.unwrap_or(grid.close),
        )
    }
}

// ── Tests ──────────────────────────────────────────────────────
