//! Refund-suggestion policy for cancellations
//!
//! Maps a cancellation reason and the time remaining before the reservation
//! starts to a suggested refund disposition. The suggestion never mutates
//! anything; staff record the final disposition on the reservation at cancel
//! time and may override it.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::config::RefundConfig;

/// Why a reservation was cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    CustomerRequested,
    Weather,
    FacilityCaused,
    NoShow,
    Other,
}

impl CancelReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CustomerRequested => "customer-requested",
            Self::Weather => "weather",
            Self::FacilityCaused => "facility-caused",
            Self::NoShow => "no-show",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "customer-requested" => Some(Self::CustomerRequested),
            "weather" => Some(Self::Weather),
            "facility-caused" => Some(Self::FacilityCaused),
            "no-show" => Some(Self::NoShow),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for CancelReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Suggested refund outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefundDisposition {
    Full,
    Partial,
    None,
}

impl RefundDisposition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Partial => "partial",
            Self::None => "none",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "full" => Some(Self::Full),
            "partial" => Some(Self::Partial),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

impl std::fmt::Display for RefundDisposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A suggestion plus the policy line that produced it
#[derive(Debug, Clone)]
pub struct RefundSuggestion {
    pub disposition: RefundDisposition,
    pub explanation: String,
}

/// Refund policy boundaries; configurable, not hard-coded
#[derive(Debug, Clone)]
pub struct RefundPolicy {
    /// Customer cancellations at least this far ahead get a full refund
    pub full_refund_lead_hours: i64,
    /// Customer cancellations inside this window (or after start) get none
    pub grace_minutes: i64,
}

impl Default for RefundPolicy {
    fn default() -> Self {
        Self::from_config(&RefundConfig::default())
    }
}

impl RefundPolicy {
    pub fn from_config(cfg: &RefundConfig) -> Self {
        Self {
            full_refund_lead_hours: cfg.full_refund_lead_hours,
            grace_minutes: cfg.grace_minutes,
        }
    }

    /// Suggest a refund disposition for cancelling the given slot now.
    pub fn suggest(
        &self,
        reason: CancelReason,
        date: NaiveDate,
        time_start: NaiveTime,
        now: NaiveDateTime,
    ) -> RefundSuggestion {
        match reason {
            CancelReason::FacilityCaused => RefundSuggestion {
                disposition: RefundDisposition::Full,
                explanation: "Facility-caused cancellations are always fully refunded".to_string(),
            },
            CancelReason::Weather => RefundSuggestion {
                disposition: RefundDisposition::Full,
                explanation: "Weather cancellations are always fully refunded".to_string(),
            },
            CancelReason::NoShow => RefundSuggestion {
                disposition: RefundDisposition::None,
                explanation: "No-shows are not refunded".to_string(),
            },
            CancelReason::Other => RefundSuggestion {
                disposition: RefundDisposition::Partial,
                explanation: "No automatic policy for this reason; use staff judgment".to_string(),
            },
            CancelReason::CustomerRequested => self.suggest_customer(date, time_start, now),
        }
    }

    fn suggest_customer(
        &self,
        date: NaiveDate,
        time_start: NaiveTime,
        now: NaiveDateTime,
    ) -> RefundSuggestion {
        let start = date.and_time(time_start);
        let lead = start - now;
        if lead >= Duration::hours(self.full_refund_lead_hours) {
            RefundSuggestion {
                disposition: RefundDisposition::Full,
                explanation: format!(
                    "Cancelled at least {} hours before start",
                    self.full_refund_lead_hours
                ),
            }
        } else if lead <= Duration::minutes(self.grace_minutes) {
            // Covers both "already started" and "inside the grace window".
            RefundSuggestion {
                disposition: RefundDisposition::None,
                explanation: format!(
                    "Cancelled within {} minutes of start (or after start)",
                    self.grace_minutes
                ),
            }
        } else {
            RefundSuggestion {
                disposition: RefundDisposition::Partial,
                explanation: format!(
                    "Cancelled less than {} hours before start",
                    self.full_refund_lead_hours
                ),
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RefundPolicy {
        RefundPolicy::default()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn now(h: u32, m: u32) -> NaiveDateTime {
        d(2024, 6, 14).and_time(t(h, m))
    }

    #[test]
    fn facility_caused_is_always_full() {
        let p = policy();
        // even when cancelled after the slot has started
        let s = p.suggest(CancelReason::FacilityCaused, d(2024, 6, 14), t(9, 0), now(10, 0));
        assert_eq!(s.disposition, RefundDisposition::Full);
    }

    #[test]
    fn weather_is_always_full() {
        let p = policy();
        let s = p.suggest(CancelReason::Weather, d(2024, 6, 14), t(9, 0), now(8, 59));
        assert_eq!(s.disposition, RefundDisposition::Full);
    }

    #[test]
    fn no_show_is_never_refunded() {
        let p = policy();
        let s = p.suggest(CancelReason::NoShow, d(2024, 7, 1), t(9, 0), now(9, 0));
        assert_eq!(s.disposition, RefundDisposition::None);
    }

    #[test]
    fn other_suggests_partial_for_staff_judgment() {
        let p = policy();
        let s = p.suggest(CancelReason::Other, d(2024, 7, 1), t(9, 0), now(9, 0));
        assert_eq!(s.disposition, RefundDisposition::Partial);
    }

    #[test]
    fn customer_full_refund_at_24_hours() {
        let p = policy();
        // start 2024-06-15 10:00, now 2024-06-14 10:00 → exactly 24h
        let s = p.suggest(CancelReason::CustomerRequested, d(2024, 6, 15), t(10, 0), now(10, 0));
        assert_eq!(s.disposition, RefundDisposition::Full);
    }

    #[test]
    fn customer_partial_inside_24_hours() {
        let p = policy();
        // start tomorrow 09:00, now 10:00 → 23h lead
        let s = p.suggest(CancelReason::CustomerRequested, d(2024, 6, 15), t(9, 0), now(10, 0));
        assert_eq!(s.disposition, RefundDisposition::Partial);
    }

    #[test]
    fn customer_none_inside_grace_window() {
        let p = policy();
        // start today 10:00, now 09:30 → 30-minute lead, inside 60-minute grace
        let s = p.suggest(CancelReason::CustomerRequested, d(2024, 6, 14), t(10, 0), now(9, 30));
        assert_eq!(s.disposition, RefundDisposition::None);
    }

    #[test]
    fn customer_none_after_start() {
        let p = policy();
        let s = p.suggest(CancelReason::CustomerRequested, d(2024, 6, 14), t(9, 0), now(11, 0));
        assert_eq!(s.disposition, RefundDisposition::None);
    }

    #[test]
    fn boundaries_come_from_config() {
        let p = RefundPolicy {
            full_refund_lead_hours: 48,
            grace_minutes: 0,
        };
        // 24h ahead: full under default policy, partial under 48h policy
        let s = p.suggest(CancelReason::CustomerRequested, d(2024, 6, 15), t(10, 0), now(10, 0));
        assert_eq!(s.disposition, RefundDisposition::Partial);
    }

    #[test]
    fn reason_string_roundtrip() {
        for reason in [
            CancelReason::CustomerRequested,
            CancelReason::Weather,
            CancelReason::FacilityCaused,
            CancelReason::NoShow,
            CancelReason::Other,
        ] {
            assert_eq!(CancelReason::parse(reason.as_str()), Some(reason));
        }
        assert_eq!(CancelReason::parse("unknown"), None);
    }
}
