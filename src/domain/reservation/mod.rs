//! Reservation aggregate
//!
//! Contains the Reservation entity, its category/status types, and the
//! lifecycle transitions.

pub mod model;

pub use model::{BookingCategory, PaymentStatus, Reservation, ReservationStatus};
