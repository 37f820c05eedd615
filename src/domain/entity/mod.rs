//! Linked booking entities

pub mod model;

pub use model::{EntityKind, LinkedEntity};
