//! Closure aggregate

pub mod model;

pub use model::{Closure, ClosureCourt};
