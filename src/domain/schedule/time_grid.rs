//! Slot grid for the facility's operating day
//!
//! Every time handled by the scheduling core is an `HH:MM` wall-clock value
//! aligned to the grid step (30 minutes by default) inside the operating
//! window `[open, close)`. Misaligned or malformed input is rejected, never
//! rounded.

use chrono::{NaiveDate, NaiveTime, Timelike};
use rust_decimal::Decimal;

use crate::config::FacilityConfig;
use crate::shared::errors::{BookingError, BookingResult};

/// Discrete slot grid over the facility operating window
#[derive(Debug, Clone)]
pub struct TimeGrid {
    /// First bookable time of day
    pub open: NaiveTime,
    /// End of the operating window (exclusive)
    pub close: NaiveTime,
    /// Slot granularity in minutes
    pub step_minutes: u32,
    /// Default reservation length in minutes
    pub default_duration_minutes: u32,
    /// Earliest bookable calendar day, when configured
    pub earliest_date: Option<NaiveDate>,
}

impl TimeGrid {
    /// Build the grid from facility configuration.
    pub fn from_config(cfg: &FacilityConfig) -> BookingResult<Self> {
        let open = parse_hhmm(&cfg.open_time)?;
        let close = parse_hhmm(&cfg.close_time)?;
        if open >= close {
            return Err(BookingError::validation(format!(
                "Operating window is empty: open {} >= close {}",
                cfg.open_time, cfg.close_time
            )));
        }
        if cfg.slot_minutes == 0 {
            return Err(BookingError::validation("Slot size must be non-zero"));
        }
        let earliest_date = if cfg.earliest_date.is_empty() {
            None
        } else {
            Some(
                cfg.earliest_date
                    .parse::<NaiveDate>()
                    .map_err(|_| {
                        BookingError::validation(format!(
                            "Bad earliest_date: {:?}",
                            cfg.earliest_date
                        ))
                    })?,
            )
        };
        Ok(Self {
            open,
            close,
            step_minutes: cfg.slot_minutes,
            default_duration_minutes: cfg.default_duration_minutes,
            earliest_date,
        })
    }

    /// Parse a strict `HH:MM` string aligned to the grid step.
    ///
    /// Rejects anything else with [`BookingError::InvalidTime`]; callers must
    /// surface the error rather than round.
    pub fn parse_time(&self, s: &str) -> BookingResult<NaiveTime> {
        let t = parse_hhmm(s)?;
        if !self.is_aligned(t) {
            return Err(BookingError::InvalidTime(format!(
                "{} is not on the {}-minute grid",
                s, self.step_minutes
            )));
        }
        Ok(t)
    }

    /// Format a time as `HH:MM`.
    pub fn format_time(t: NaiveTime) -> String {
        format!("{:02}:{:02}", t.hour(), t.minute())
    }

    /// Whether a time sits on a grid boundary.
    pub fn is_aligned(&self, t: NaiveTime) -> bool {
        t.second() == 0 && minutes_of_day(t) % self.step_minutes == 0
    }

    /// All valid reservation start times, in order.
    pub fn start_times(&self) -> Vec<NaiveTime> {
        (minutes_of_day(self.open)..minutes_of_day(self.close))
            .step_by(self.step_minutes as usize)
            .filter_map(time_from_minutes)
            .collect()
    }

    /// Default end time for a reservation starting at `start`:
    /// `start + default_duration`, clamped to close.
    pub fn default_end(&self, start: NaiveTime) -> NaiveTime {
        let end = minutes_of_day(start) + self.default_duration_minutes;
        let end = end.min(minutes_of_day(self.close));
        time_from_minutes(end).unwrap_or(self.close)
    }

    /// Duration between two grid times, in hours (e.g. 90 minutes → 1.5).
    pub fn hours_between(&self, start: NaiveTime, end: NaiveTime) -> Decimal {
        let minutes = minutes_of_day(end) as i64 - minutes_of_day(start) as i64;
        Decimal::from(minutes) / Decimal::from(60)
    }

    /// Validate a half-open reservation interval against the grid.
    pub fn validate_range(&self, start: NaiveTime, end: NaiveTime) -> BookingResult<()> {
        if !self.is_aligned(start) || !self.is_aligned(end) {
            return Err(BookingError::InvalidTime(format!(
                "{}-{} is not on the {}-minute grid",
                Self::format_time(start),
                Self::format_time(end),
                self.step_minutes
            )));
        }
        if start >= end {
            return Err(BookingError::validation(format!(
                "Start {} must be before end {}",
                Self::format_time(start),
                Self::format_time(end)
            )));
        }
        if start < self.open || end > self.close {
            return Err(BookingError::validation(format!(
                "{}-{} is outside operating hours {}-{}",
                Self::format_time(start),
                Self::format_time(end),
                Self::format_time(self.open),
                Self::format_time(self.close)
            )));
        }
        Ok(())
    }

    /// Validate a reservation date against the configured earliest day.
    pub fn validate_date(&self, date: NaiveDate) -> BookingResult<()> {
        if let Some(earliest) = self.earliest_date {
            if date < earliest {
                return Err(BookingError::validation(format!(
                    "Date {} is before the schedule start {}",
                    date, earliest
                )));
            }
        }
        Ok(())
    }
}

fn minutes_of_day(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

fn time_from_minutes(m: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(m / 60, m % 60, 0)
}

/// Strict `HH:MM` parse: exactly five characters, zero-padded, 24-hour.
pub(crate) fn parse_hhmm(s: &str) -> BookingResult<NaiveTime> {
    let bytes = s.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[2] == b':'
        && bytes[0].is_ascii_digit()
        && bytes[1].is_ascii_digit()
        && bytes[3].is_ascii_digit()
        && bytes[4].is_ascii_digit();
    if !well_formed {
        return Err(BookingError::InvalidTime(format!("Expected HH:MM, got {:?}", s)));
    }
    NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|_| BookingError::InvalidTime(format!("Expected HH:MM, got {:?}", s)))
}

// ── Tests ──────────────────────────────────────────────────────
