//! # Courtbook Scheduling Core
//!
//! Decision logic for court reservations at a sports facility: slot grid,
//! conflict detection, pricing, identifier codes, lifecycle transitions, and
//! the refund-suggestion policy.
//!
//! The crate is a pure function set over snapshots supplied by the caller.
//! It never persists state, never talks to a network, and never reads the
//! clock; the owning persistence layer calls in with its collections and
//! `now`, and writes the returned plans atomically.
//!
//! ## Architecture
//!
//! - **domain**: Core business entities, the slot grid, and the scheduling
//!   calculators (conflicts, rates, identifiers, refunds)
//! - **application**: The booking planner pipeline (expand → check → price →
//!   assign ids)
//! - **infrastructure**: Normalization boundary for the spreadsheet-backed
//!   store's loosely-typed rows
//! - **shared**: Error taxonomy

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use config::{default_config_path, FacilityConfig};

// Re-export the operational surface for easy access
pub use application::services::{
    BookingPlan, BookingPlanner, BookingRequest, ConflictResolution, Snapshot,
};
pub use domain::schedule::{
    find_conflicts, generate_group_id, generate_id, parse_id, validate_id, CancelReason, Conflict,
    ConflictSource, RateEngine, RefundDisposition, RefundPolicy, RefundSuggestion, SlotCandidate,
    TimeGrid,
};
pub use domain::{
    BookingCategory, Closure, ClosureCourt, Court, CourtStatus, EntityKind, LinkedEntity,
    PaymentStatus, Reservation, ReservationStatus,
};
pub use shared::errors::{BookingError, BookingResult, LifecycleError};
