//! Court reference data

pub mod model;

pub use model::{Court, CourtStatus};
