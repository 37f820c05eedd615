//! Core business entities and scheduling rules

pub mod closure;
pub mod court;
pub mod entity;
pub mod reservation;
pub mod schedule;

pub use closure::{Closure, ClosureCourt};
pub use court::{Court, CourtStatus};
pub use entity::{EntityKind, LinkedEntity};
pub use reservation::{BookingCategory, PaymentStatus, Reservation, ReservationStatus};
