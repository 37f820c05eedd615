//! Reservation domain entity

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use crate::domain::schedule::refunds::{CancelReason, RefundDisposition};
use crate::shared::errors::LifecycleError;

/// Booking category; a closed set, dispatched in exactly one place each by
/// the rate engine and the lifecycle guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingCategory {
    OpenPlay,
    Contractor,
    TeamUsta,
    TeamHighSchool,
    TeamCollege,
    TeamOther,
    Tournament,
    Maintenance,
    AdministrativeHold,
}

impl BookingCategory {
    pub const ALL: [Self; 9] = [
        Self::OpenPlay,
        Self::Contractor,
        Self::TeamUsta,
        Self::TeamHighSchool,
        Self::TeamCollege,
        Self::TeamOther,
        Self::Tournament,
        Self::Maintenance,
        Self::AdministrativeHold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenPlay => "open-play",
            Self::Contractor => "contractor",
            Self::TeamUsta => "team-usta",
            Self::TeamHighSchool => "team-high-school",
            Self::TeamCollege => "team-college",
            Self::TeamOther => "team-other",
            Self::Tournament => "tournament",
            Self::Maintenance => "maintenance",
            Self::AdministrativeHold => "administrative-hold",
        }
    }

    /// Parse the external string form. Unknown strings are `None`: a
    /// misspelled category must be rejected at the boundary, never defaulted
    /// into a (possibly free) one.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open-play" => Some(Self::OpenPlay),
            "contractor" => Some(Self::Contractor),
            "team-usta" => Some(Self::TeamUsta),
            "team-high-school" => Some(Self::TeamHighSchool),
            "team-college" => Some(Self::TeamCollege),
            "team-other" => Some(Self::TeamOther),
            "tournament" => Some(Self::Tournament),
            "maintenance" => Some(Self::Maintenance),
            "administrative-hold" => Some(Self::AdministrativeHold),
            _ => None,
        }
    }

    /// Policy-waived categories that always price at zero.
    pub fn is_free(&self) -> bool {
        matches!(
            self,
            Self::Maintenance | Self::AdministrativeHold | Self::TeamHighSchool
        )
    }

    /// Categories billed through a linked entity's per-hour court rate
    /// rather than the flat block rate.
    pub fn uses_entity_rate(&self) -> bool {
        matches!(
            self,
            Self::Contractor
                | Self::TeamUsta
                | Self::TeamHighSchool
                | Self::TeamCollege
                | Self::TeamOther
                | Self::Tournament
        )
    }
}

impl std::fmt::Display for BookingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    Active,
    Cancelled,
    NoShow,
    /// Derived for queries only; never stored by this core
    Completed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
            Self::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "cancelled" => Some(Self::Cancelled),
            "no_show" => Some(Self::NoShow),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment state of a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Waived,
    Invoiced,
    Refunded,
    NotApplicable,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Waived => "waived",
            Self::Invoiced => "invoiced",
            Self::Refunded => "refunded",
            Self::NotApplicable => "not-applicable",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            "waived" => Some(Self::Waived),
            "invoiced" => Some(Self::Invoiced),
            "refunded" => Some(Self::Refunded),
            "not-applicable" => Some(Self::NotApplicable),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A booked slot on one court for one date
#[derive(Debug, Clone)]
pub struct Reservation {
    /// `DDCC-HHMM` booking code; unique together with `date`
    pub id: String,
    /// Shared tag for rows created as one batch
    pub group_id: Option<String>,
    pub date: NaiveDate,
    pub court: u8,
    /// Half-open interval on the slot grid
    pub time_start: NaiveTime,
    pub time_end: NaiveTime,
    pub category: BookingCategory,
    /// Linked contractor/team/tournament record, when any
    pub entity_id: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub payment_status: PaymentStatus,
    pub payment_amount: Decimal,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub participant_count: u32,
    pub is_youth: bool,
    pub status: ReservationStatus,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    pub modified_at: Option<NaiveDateTime>,
    pub checked_in: bool,
    pub checked_in_by: Option<String>,
    pub checked_in_at: Option<NaiveDateTime>,
    pub cancel_reason: Option<CancelReason>,
    pub cancelled_by: Option<String>,
    pub cancelled_at: Option<NaiveDateTime>,
    pub refund_status: Option<RefundDisposition>,
    pub refund_amount: Option<Decimal>,
    pub refund_note: Option<String>,
}

impl Reservation {
    /// Create an active reservation with empty commercial/participation
    /// fields; the planner fills those in.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        court: u8,
        time_start: NaiveTime,
        time_end: NaiveTime,
        category: BookingCategory,
        created_by: impl Into<String>,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            group_id: None,
            date,
            court,
            time_start,
            time_end,
            category,
            entity_id: None,
            customer_name: None,
            customer_phone: None,
            payment_status: PaymentStatus::Pending,
            payment_amount: Decimal::ZERO,
            payment_method: None,
            notes: None,
            participant_count: 0,
            is_youth: false,
            status: ReservationStatus::Active,
            created_by: created_by.into(),
            created_at,
            modified_at: None,
            checked_in: false,
            checked_in_by: None,
            checked_in_at: None,
            cancel_reason: None,
            cancelled_by: None,
            cancelled_at: None,
            refund_status: None,
            refund_amount: None,
            refund_note: None,
        }
    }

    pub fn start_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time_start)
    }

    pub fn end_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time_end)
    }

    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Active
    }

    /// Status as reported to queries: an active reservation whose end has
    /// passed reads as completed. Nothing ever writes `Completed`.
    pub fn derived_status(&self, now: NaiveDateTime) -> ReservationStatus {
        if self.status == ReservationStatus::Active && now >= self.end_at() {
            ReservationStatus::Completed
        } else {
            self.status
        }
    }

    /// Record staff check-in.
    pub fn check_in(&mut self, by: &str, now: NaiveDateTime) -> Result<(), LifecycleError> {
        if !self.is_active() {
            return Err(LifecycleError::NotActive);
        }
        if self.checked_in {
            return Err(LifecycleError::AlreadyCheckedIn);
        }
        self.checked_in = true;
        self.checked_in_by = Some(by.to_string());
        self.checked_in_at = Some(now);
        self.modified_at = Some(now);
        Ok(())
    }

    /// Cancel this reservation. No time restriction; the refund fields carry
    /// whatever disposition staff decided (see the refund policy for the
    /// suggestion).
    pub fn cancel(
        &mut self,
        reason: CancelReason,
        refund_status: Option<RefundDisposition>,
        refund_amount: Option<Decimal>,
        refund_note: Option<String>,
        actor: &str,
        now: NaiveDateTime,
    ) -> Result<(), LifecycleError> {
        if !self.is_active() {
            return Err(LifecycleError::NotActive);
        }
        self.status = ReservationStatus::Cancelled;
        self.cancel_reason = Some(reason);
        self.cancelled_by = Some(actor.to_string());
        self.cancelled_at = Some(now);
        self.refund_status = refund_status;
        self.refund_amount = refund_amount;
        self.refund_note = refund_note;
        self.modified_at = Some(now);
        Ok(())
    }

    /// Mark a lapsed reservation as a no-show. Only allowed once the slot's
    /// end time has passed; a still-upcoming slot cannot be a no-show.
    pub fn mark_no_show(&mut self, actor: &str, now: NaiveDateTime) -> Result<(), LifecycleError> {
        if !self.is_active() {
            return Err(LifecycleError::NotActive);
        }
        if now <= self.end_at() {
            return Err(LifecycleError::NotYetElapsed);
        }
        self.status = ReservationStatus::NoShow;
        self.cancel_reason = Some(CancelReason::NoShow);
        self.cancelled_by = Some(actor.to_string());
        self.modified_at = Some(now);
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
