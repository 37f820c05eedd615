//! Pure scheduling calculators
//!
//! The slot grid, identifier codes, pricing rules, conflict detection, and
//! the refund-suggestion policy. Everything here is a pure function of its
//! arguments plus facility configuration; `now` is always passed in.

pub mod conflict;
pub mod identifier;
pub mod rates;
pub mod refunds;
pub mod time_grid;

pub use conflict::{find_conflicts, Conflict, ConflictSource, SlotCandidate};
pub use identifier::{generate_group_id, generate_id, parse_id, validate_id, ParsedBookingId};
pub use rates::{is_free_booking, RateEngine};
pub use refunds::{CancelReason, RefundDisposition, RefundPolicy, RefundSuggestion};
pub use time_grid::TimeGrid;
