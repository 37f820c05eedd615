//! Booking planner service
//!
//! Turns one submitted request into the set of reservation records the
//! caller writes as a single atomic batch: expand weekly repeats and court
//! lists into candidates, check every candidate against the snapshot, price
//! each record, and assign booking/group codes. The planner never writes
//! anything itself; partial application of a returned plan is a caller-side
//! failure state.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::config::FacilityConfig;
use crate::domain::closure::Closure;
use crate::domain::entity::LinkedEntity;
use crate::domain::reservation::{PaymentStatus, Reservation};
use crate::domain::schedule::conflict::{find_conflicts, Conflict, SlotCandidate};
use crate::domain::schedule::identifier::{generate_group_id, generate_id};
use crate::domain::schedule::rates::RateEngine;
use crate::domain::schedule::time_grid::TimeGrid;
use crate::domain::BookingCategory;
use crate::shared::errors::{BookingError, BookingResult};

/// Weekly repeats are capped to keep one submission to a bounded batch.
const MAX_WEEKLY_OCCURRENCES: u32 = 52;

/// One submitted booking request, possibly multi-court and/or recurring
#[derive(Debug, Clone)]
pub struct BookingRequest {
    /// First (or only) reservation date
    pub date: NaiveDate,
    pub courts: Vec<u8>,
    pub time_start: NaiveTime,
    pub time_end: NaiveTime,
    pub category: BookingCategory,
    pub entity_id: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub notes: Option<String>,
    pub participant_count: u32,
    pub is_youth: bool,
    /// Total weekly occurrences; 1 = no repeat
    pub weekly_repeat: u32,
    pub created_by: String,
}

/// Read-only collections supplied by the persistence collaborator.
///
/// A snapshot may be stale; the store re-validates at write time and a late
/// rejection comes back as [`BookingError::StaleWrite`].
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub reservations: &'a [Reservation],
    pub closures: &'a [Closure],
}

/// What to do when candidates conflict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictResolution {
    /// Fail the whole batch, reporting every conflict
    Reject,
    /// Drop conflicting candidates and keep the rest; never overrides them
    SkipConflicting,
}

/// The records to hand to the store as one write
#[derive(Debug, Clone)]
pub struct BookingPlan {
    /// Shared batch tag; `None` for a single-slot booking
    pub group_id: Option<String>,
    pub reservations: Vec<Reservation>,
    pub total_amount: Decimal,
    /// Conflicts of candidates dropped under `SkipConflicting`
    pub skipped: Vec<Conflict>,
}

/// Stateless planning service over facility configuration
#[derive(Debug, Clone)]
pub struct BookingPlanner {
    grid: TimeGrid,
    rates: RateEngine,
    court_count: u8,
}

impl BookingPlanner {
    pub fn new(cfg: &FacilityConfig) -> BookingResult<Self> {
        Ok(Self {
            grid: TimeGrid::from_config(cfg)?,
            rates: RateEngine::from_config(&cfg.rates)?,
            court_count: cfg.court_count,
        })
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn rates(&self) -> &RateEngine {
        &self.rates
    }

    /// Plan a batch: validate, expand, conflict-check, price, assign ids.
    ///
    /// `entity` is the linked contractor/team/tournament rate card, when the
    /// request names one. `now` stamps `created_at`.
    pub fn plan(
        &self,
        request: &BookingRequest,
        snapshot: Snapshot<'_>,
        entity: Option<&LinkedEntity>,
        now: NaiveDateTime,
        resolution: ConflictResolution,
    ) -> BookingResult<BookingPlan> {
        self.validate(request, entity)?;

        let candidates = self.expand(request)?;
        let conflicts = find_conflicts(
            &candidates,
            snapshot.reservations,
            snapshot.closures,
            &self.grid,
        );

        let (kept, skipped) = match resolution {
            ConflictResolution::Reject => {
                if !conflicts.is_empty() {
                    warn!(
                        candidates = candidates.len(),
                        conflicts = conflicts.len(),
                        "Booking batch rejected"
                    );
                    return Err(BookingError::Conflict(conflicts));
                }
                ((0..candidates.len()).collect::<Vec<_>>(), Vec::new())
            }
            ConflictResolution::SkipConflicting => {
                let kept: Vec<usize> = (0..candidates.len())
                    .filter(|i| conflicts.iter().all(|c| c.candidate_index != *i))
                    .collect();
                if kept.is_empty() {
                    // nothing left to write; surface the conflicts instead
                    return Err(BookingError::Conflict(conflicts));
                }
                (kept, conflicts)
            }
        };

        let group_id = (candidates.len() > 1).then(|| generate_group_id(request.date));

        let mut reservations = Vec::with_capacity(kept.len());
        let mut total_amount = Decimal::ZERO;
        for index in kept {
            let slot = &candidates[index];
            let (amount, payment_status) = self.price_slot(request, entity, slot);
            total_amount += amount;

            let mut record = Reservation::new(
                generate_id(slot.date, slot.court, slot.time_start),
                slot.date,
                slot.court,
                slot.time_start,
                slot.time_end,
                request.category,
                request.created_by.clone(),
                now,
            );
            record.group_id = group_id.clone();
            record.entity_id = request.entity_id.clone();
            record.customer_name = request.customer_name.clone();
            record.customer_phone = request.customer_phone.clone();
            record.notes = request.notes.clone();
            record.participant_count = request.participant_count;
            record.is_youth = request.is_youth;
            record.payment_status = payment_status;
            record.payment_amount = amount;
            reservations.push(record);
        }

        info!(
            count = reservations.len(),
            skipped = skipped.len(),
            group_id = group_id.as_deref().unwrap_or("-"),
            category = request.category.as_str(),
            total = %total_amount,
            "Booking batch planned"
        );

        Ok(BookingPlan {
            group_id,
            reservations,
            total_amount,
            skipped,
        })
    }

    /// Pre-flight check for a single slot, e.g. while editing an existing
    /// reservation (`exclude_id` ignores the record being moved).
    pub fn check_slot(
        &self,
        date: NaiveDate,
        court: u8,
        time_start: NaiveTime,
        time_end: NaiveTime,
        exclude_id: Option<&str>,
        snapshot: Snapshot<'_>,
    ) -> BookingResult<Vec<Conflict>> {
        self.grid.validate_date(date)?;
        self.grid.validate_range(time_start, time_end)?;
        self.validate_court(court)?;
        let candidate = SlotCandidate {
            date,
            court,
            time_start,
            time_end,
            exclude_id: exclude_id.map(str::to_string),
        };
        Ok(find_conflicts(
            std::slice::from_ref(&candidate),
            snapshot.reservations,
            snapshot.closures,
            &self.grid,
        ))
    }

    /// Wrap a conflict rejection reported by the persistence boundary after
    /// a clean local check, so it renders through the same path as a
    /// pre-flight conflict.
    pub fn stale_write_rejection(conflicts: Vec<Conflict>) -> BookingError {
        BookingError::StaleWrite(conflicts)
    }

    fn validate(&self, request: &BookingRequest, entity: Option<&LinkedEntity>) -> BookingResult<()> {
        self.grid.validate_date(request.date)?;
        self.grid
            .validate_range(request.time_start, request.time_end)?;
        if request.courts.is_empty() {
            return Err(BookingError::validation("At least one court is required"));
        }
        for &court in &request.courts {
            self.validate_court(court)?;
        }
        if request.weekly_repeat == 0 || request.weekly_repeat > MAX_WEEKLY_OCCURRENCES {
            return Err(BookingError::validation(format!(
                "Weekly repeat must be 1-{}, got {}",
                MAX_WEEKLY_OCCURRENCES, request.weekly_repeat
            )));
        }
        if request.created_by.trim().is_empty() {
            return Err(BookingError::validation("created_by is required"));
        }
        if let (Some(id), Some(entity)) = (&request.entity_id, entity) {
            if *id != entity.id {
                return Err(BookingError::validation(format!(
                    "Entity mismatch: request names {}, rate card is {}",
                    id, entity.id
                )));
            }
        }
        Ok(())
    }

    fn validate_court(&self, court: u8) -> BookingResult<()> {
        if court == 0 || court > self.court_count {
            return Err(BookingError::validation(format!(
                "Court {} is outside 1-{}",
                court, self.court_count
            )));
        }
        Ok(())
    }

    fn expand(&self, request: &BookingRequest) -> BookingResult<Vec<SlotCandidate>> {
        let mut candidates =
            Vec::with_capacity(request.courts.len() * request.weekly_repeat as usize);
        for week in 0..request.weekly_repeat {
            let date = request
                .date
                .checked_add_signed(Duration::weeks(week as i64))
                .ok_or_else(|| BookingError::validation("Repeat extends past calendar range"))?;
            for &court in &request.courts {
                candidates.push(SlotCandidate {
                    date,
                    court,
                    time_start: request.time_start,
                    time_end: request.time_end,
                    exclude_id: None,
                });
            }
        }
        Ok(candidates)
    }

    /// Per-record price. Waivers are checked first so a free category stays
    /// free even when a rate card is attached; metered categories without a
    /// rate card fall back to the flat general rate.
    fn price_slot(
        &self,
        request: &BookingRequest,
        entity: Option<&LinkedEntity>,
        slot: &SlotCandidate,
    ) -> (Decimal, PaymentStatus) {
        if request.category.is_free() {
            return (Decimal::ZERO, PaymentStatus::Waived);
        }
        if request.category.uses_entity_rate() {
            if let Some(entity) = entity {
                let amount =
                    self.rates
                        .hourly_total(slot.time_start, slot.time_end, entity.court_rate, 1);
                return (amount, PaymentStatus::Pending);
            }
        }
        let amount = self
            .rates
            .base_rate(slot.date, slot.time_start, request.category);
        (amount, PaymentStatus::Pending)
    }
}

// ── Tests ──────────────────────────────────────────────────────
