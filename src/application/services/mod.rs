//! Application services

pub mod planner;

pub use planner::{
    BookingPlan, BookingPlanner, BookingRequest, ConflictResolution, Snapshot,
};
