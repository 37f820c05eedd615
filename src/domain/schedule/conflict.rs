//! Conflict detection
//!
//! Scans caller-supplied snapshots of reservations and closures for overlaps
//! with a batch of candidate slots. Intervals are half-open: touching
//! endpoints never conflict. The detector reports every overlap it finds and
//! resolves nothing; abandoning, adjusting, or skipping is the caller's call.
//!
//! The snapshot may be stale, so this result is advisory. The persistence
//! boundary re-checks at write time; a rejection from there funnels back
//! through [`crate::shared::errors::BookingError::StaleWrite`].

use chrono::{NaiveDate, NaiveTime};

use crate::domain::closure::Closure;
use crate::domain::reservation::Reservation;
use crate::domain::schedule::time_grid::TimeGrid;

/// A proposed (date, court, interval) slot to check
#[derive(Debug, Clone)]
pub struct SlotCandidate {
    pub date: NaiveDate,
    pub court: u8,
    pub time_start: NaiveTime,
    pub time_end: NaiveTime,
    /// Reservation to ignore while scanning (the one being edited)
    pub exclude_id: Option<String>,
}

/// What a candidate collided with
#[derive(Debug, Clone)]
pub enum ConflictSource {
    /// An existing active reservation
    Reservation {
        booking_id: String,
        time_start: NaiveTime,
        time_end: NaiveTime,
        customer_name: Option<String>,
    },
    /// An active closure
    Closure {
        closure_id: String,
        time_start: NaiveTime,
        time_end: NaiveTime,
        reason: String,
    },
    /// Another candidate in the same submission occupies the same slot;
    /// renderable without any peer data
    InternalDuplicate { other_index: usize },
}

/// One detected overlap, tagged with the candidate that caused it
#[derive(Debug, Clone)]
pub struct Conflict {
    pub candidate_index: usize,
    pub date: NaiveDate,
    pub court: u8,
    pub source: ConflictSource,
}

/// Half-open interval overlap test.
pub fn overlaps(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Check a batch of candidates against each other and against the snapshot.
///
/// Returns the full set of conflicts, not just the first. Intra-batch
/// duplicates (same date, court, and start) are reported first so a bad
/// submission fails before any external comparison matters.
pub fn find_conflicts(
    candidates: &[SlotCandidate],
    reservations: &[Reservation],
    closures: &[Closure],
    grid: &TimeGrid,
) -> Vec<Conflict> {
    let mut found = Vec::new();

    for (i, candidate) in candidates.iter().enumerate() {
        for (j, earlier) in candidates.iter().enumerate().take(i) {
            let duplicate = candidate.date == earlier.date
                && candidate.court == earlier.court
                && candidate.time_start == earlier.time_start;
            if duplicate {
                found.push(Conflict {
                    candidate_index: i,
                    date: candidate.date,
                    court: candidate.court,
                    source: ConflictSource::InternalDuplicate { other_index: j },
                });
            }
        }
    }

    for (i, candidate) in candidates.iter().enumerate() {
        for existing in reservations {
            if !existing.is_active()
                || existing.date != candidate.date
                || existing.court != candidate.court
            {
                continue;
            }
            if candidate.exclude_id.as_deref() == Some(existing.id.as_str()) {
                continue;
            }
            if overlaps(
                candidate.time_start,
                candidate.time_end,
                existing.time_start,
                existing.time_end,
            ) {
                found.push(Conflict {
                    candidate_index: i,
                    date: candidate.date,
                    court: candidate.court,
                    source: ConflictSource::Reservation {
                        booking_id: existing.id.clone(),
                        time_start: existing.time_start,
                        time_end: existing.time_end,
                        customer_name: existing.customer_name.clone(),
                    },
                });
            }
        }

        for closure in closures {
            if !closure.is_active
                || closure.date != candidate.date
                || !closure.applies_to(candidate.court)
            {
                continue;
            }
            let (blocked_start, blocked_end) = closure.span(grid);
            if overlaps(
                candidate.time_start,
                candidate.time_end,
                blocked_start,
                blocked_end,
            ) {
                found.push(Conflict {
                    candidate_index: i,
                    date: candidate.date,
                    court: candidate.court,
                    source: ConflictSource::Closure {
                        closure_id: closure.id.clone(),
                        time_start: blocked_start,
                        time_end: blocked_end,
                        reason: closure.reason.clone(),
                    },
                });
            }
        }
    }

    found
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FacilityConfig;
    use crate::domain::closure::ClosureCourt;
    use crate::domain::reservation::BookingCategory;
    use crate::domain::schedule::refunds::CancelReason;

    fn grid() -> TimeGrid {
        TimeGrid::from_config(&FacilityConfig::default()).unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn reservation(id: &str, date: NaiveDate, court: u8, start: NaiveTime, end: NaiveTime) -> Reservation {
        Reservation::new(
            id,
            date,
            court,
            start,
            end,
            BookingCategory::OpenPlay,
            "desk",
            d(2024, 5, 1).and_time(t(12, 0)),
        )
    }

    fn candidate(date: NaiveDate, court: u8, start: NaiveTime, end: NaiveTime) -> SlotCandidate {
        SlotCandidate {
            date,
            court,
            time_start: start,
            time_end: end,
            exclude_id: None,
        }
    }

    fn closure(id: &str, date: NaiveDate, court: ClosureCourt) -> Closure {
        Closure {
            id: id.to_string(),
            date,
            court,
            time_start: None,
            time_end: None,
            reason: "maintenance".to_string(),
            is_active: true,
        }
    }

    #[test]
    fn overlapping_reservation_is_reported() {
        // Reservation A 09:00-10:30 on court 5; candidate 10:00-11:00 overlaps
        let existing = vec![reservation("0105-0900", d(2024, 6, 1), 5, t(9, 0), t(10, 30))];
        let candidates = vec![candidate(d(2024, 6, 1), 5, t(10, 0), t(11, 0))];
        let conflicts = find_conflicts(&candidates, &existing, &[], &grid());
        assert_eq!(conflicts.len(), 1);
        assert!(matches!(
            &conflicts[0].source,
            ConflictSource::Reservation { booking_id, .. } if booking_id == "0105-0900"
        ));
    }

    #[test]
    fn touching_endpoints_do_not_conflict() {
        let existing = vec![reservation("0105-0900", d(2024, 6, 1), 5, t(9, 0), t(10, 30))];
        let candidates = vec![candidate(d(2024, 6, 1), 5, t(10, 30), t(11, 30))];
        assert!(find_conflicts(&candidates, &existing, &[], &grid()).is_empty());
    }

    #[test]
    fn other_court_or_date_does_not_conflict() {
        let existing = vec![reservation("0105-0900", d(2024, 6, 1), 5, t(9, 0), t(10, 30))];
        let other_court = vec![candidate(d(2024, 6, 1), 6, t(9, 0), t(10, 30))];
        let other_date = vec![candidate(d(2024, 6, 2), 5, t(9, 0), t(10, 30))];
        assert!(find_conflicts(&other_court, &existing, &[], &grid()).is_empty());
        assert!(find_conflicts(&other_date, &existing, &[], &grid()).is_empty());
    }

    #[test]
    fn cancelled_reservations_are_ignored() {
        let mut r = reservation("0105-0900", d(2024, 6, 1), 5, t(9, 0), t(10, 30));
        r.cancel(
            CancelReason::CustomerRequested,
            None,
            None,
            None,
            "desk",
            d(2024, 5, 20).and_time(t(9, 0)),
        )
        .unwrap();
        let candidates = vec![candidate(d(2024, 6, 1), 5, t(9, 0), t(10, 30))];
        assert!(find_conflicts(&candidates, &[r], &[], &grid()).is_empty());
    }

    #[test]
    fn exclude_id_skips_the_edited_reservation() {
        let existing = vec![reservation("0105-0900", d(2024, 6, 1), 5, t(9, 0), t(10, 30))];
        let mut c = candidate(d(2024, 6, 1), 5, t(9, 30), t(11, 0));
        c.exclude_id = Some("0105-0900".to_string());
        assert!(find_conflicts(&[c], &existing, &[], &grid()).is_empty());
    }

    #[test]
    fn all_day_all_courts_closure_blocks_everything() {
        let closures = vec![closure("CL-1", d(2024, 6, 1), ClosureCourt::All)];
        let candidates = vec![candidate(d(2024, 6, 1), 12, t(9, 0), t(10, 30))];
        let conflicts = find_conflicts(&candidates, &[], &closures, &grid());
        assert_eq!(conflicts.len(), 1);
        assert!(matches!(
            &conflicts[0].source,
            ConflictSource::Closure { closure_id, .. } if closure_id == "CL-1"
        ));
    }

    #[test]
    fn single_court_closure_spares_other_courts() {
        let closures = vec![closure("CL-1", d(2024, 6, 1), ClosureCourt::Court(5))];
        let on_closed = vec![candidate(d(2024, 6, 1), 5, t(9, 0), t(10, 30))];
        let on_open = vec![candidate(d(2024, 6, 1), 6, t(9, 0), t(10, 30))];
        assert_eq!(find_conflicts(&on_closed, &[], &closures, &grid()).len(), 1);
        assert!(find_conflicts(&on_open, &[], &closures, &grid()).is_empty());
    }

    #[test]
    fn timed_closure_only_blocks_its_window() {
        let mut cl = closure("CL-1", d(2024, 6, 1), ClosureCourt::Court(5));
        cl.time_start = Some(t(12, 0));
        cl.time_end = Some(t(14, 0));
        let before = vec![candidate(d(2024, 6, 1), 5, t(10, 0), t(12, 0))];
        let inside = vec![candidate(d(2024, 6, 1), 5, t(13, 0), t(14, 30))];
        assert!(find_conflicts(&before, &[], &[cl.clone()], &grid()).is_empty());
        assert_eq!(find_conflicts(&inside, &[], &[cl], &grid()).len(), 1);
    }

    #[test]
    fn inactive_closures_are_ignored() {
        let mut cl = closure("CL-1", d(2024, 6, 1), ClosureCourt::All);
        cl.is_active = false;
        let candidates = vec![candidate(d(2024, 6, 1), 5, t(9, 0), t(10, 30))];
        assert!(find_conflicts(&candidates, &[], &[cl], &grid()).is_empty());
    }

    #[test]
    fn duplicate_slots_within_a_batch_are_internal_conflicts() {
        let candidates = vec![
            candidate(d(2024, 6, 1), 5, t(9, 0), t(10, 30)),
            candidate(d(2024, 6, 1), 5, t(9, 0), t(10, 0)),
        ];
        let conflicts = find_conflicts(&candidates, &[], &[], &grid());
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].candidate_index, 1);
        assert!(matches!(
            conflicts[0].source,
            ConflictSource::InternalDuplicate { other_index: 0 }
        ));
    }

    #[test]
    fn every_overlap_is_reported_not_just_the_first() {
        let existing = vec![
            reservation("0105-0900", d(2024, 6, 1), 5, t(9, 0), t(10, 0)),
            reservation("0105-1000", d(2024, 6, 1), 5, t(10, 0), t(11, 0)),
        ];
        let closures = vec![closure("CL-1", d(2024, 6, 1), ClosureCourt::Court(5))];
        let candidates = vec![candidate(d(2024, 6, 1), 5, t(9, 0), t(11, 0))];
        let conflicts = find_conflicts(&candidates, &existing, &closures, &grid());
        assert_eq!(conflicts.len(), 3);
    }
}
