//! Reservation identifier codes
//!
//! Booking codes are deterministic `DDCC-HHMM` strings (day-of-month, court,
//! start time) meant to be read over the phone by front-desk staff. The code
//! repeats across months by design; the reservation date always travels with
//! it, so the pair stays unique. Group codes tag the rows of one multi-court
//! or multi-day submission and carry no uniqueness guarantee.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use rand::Rng;

use crate::domain::schedule::time_grid::TimeGrid;
use crate::shared::errors::{BookingError, BookingResult};

/// Fields recovered from a `DDCC-HHMM` booking code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedBookingId {
    pub day: u32,
    pub court: u8,
    pub hour: u32,
    pub minute: u32,
}

/// Derive the `DDCC-HHMM` booking code for a slot.
pub fn generate_id(date: NaiveDate, court: u8, time_start: NaiveTime) -> String {
    format!(
        "{:02}{:02}-{:02}{:02}",
        date.day(),
        court,
        time_start.hour(),
        time_start.minute()
    )
}

/// Parse a `DDCC-HHMM` booking code back into its parts.
///
/// Inverts [`generate_id`] for any code it produced. Accepts only
/// well-formed codes: nine characters, all digits around the dash,
/// day 01-31, hour 00-23, minute 00 or 30.
pub fn parse_id(code: &str) -> BookingResult<ParsedBookingId> {
    let bytes = code.as_bytes();
    let well_formed = bytes.len() == 9
        && bytes[4] == b'-'
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[5..].iter().all(u8::is_ascii_digit);
    if !well_formed {
        return Err(BookingError::validation(format!(
            "Bad booking code: {:?}",
            code
        )));
    }

    let digit = |i: usize| (bytes[i] - b'0') as u32;
    let day = digit(0) * 10 + digit(1);
    let court = (digit(2) * 10 + digit(3)) as u8;
    let hour = digit(5) * 10 + digit(6);
    let minute = digit(7) * 10 + digit(8);

    if !(1..=31).contains(&day) {
        return Err(BookingError::validation(format!(
            "Bad day in booking code: {:?}",
            code
        )));
    }
    if hour > 23 || !(minute == 0 || minute == 30) {
        return Err(BookingError::validation(format!(
            "Bad time in booking code: {:?}",
            code
        )));
    }

    Ok(ParsedBookingId {
        day,
        court,
        hour,
        minute,
    })
}

/// Strict validity check: well-formed, court within the facility's range,
/// start time within the operating window.
pub fn validate_id(code: &str, grid: &TimeGrid, court_count: u8) -> bool {
    let Ok(parsed) = parse_id(code) else {
        return false;
    };
    if parsed.court == 0 || parsed.court > court_count {
        return false;
    }
    match NaiveTime::from_hms_opt(parsed.hour, parsed.minute, 0) {
        Some(start) => start >= grid.open && start < grid.close,
        None => false,
    }
}

/// Generate a `GRP-MMDD-XXX` batch tag with a random disambiguator.
pub fn generate_group_id(date: NaiveDate) -> String {
    let disambiguator: u16 = rand::thread_rng().gen_range(0..1000);
    format!(
        "GRP-{:02}{:02}-{:03}",
        date.month(),
        date.day(),
        disambiguator
    )
}

// ── Tests ──────────────────────────────────────────────────────
