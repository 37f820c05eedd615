//! Linked booking entities (contractors, teams, tournaments)
//!
//! Read-only rate cards owned by the external store. The scheduling core
//! consults `court_rate` for the metered pricing flow and nothing else.

use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Contractor,
    Team,
    Tournament,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contractor => "contractor",
            Self::Team => "team",
            Self::Tournament => "tournament",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "contractor" => Some(Self::Contractor),
            "team" => Some(Self::Team),
            "tournament" => Some(Self::Tournament),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// External record a reservation may link to via `entity_id`
#[derive(Debug, Clone)]
pub struct LinkedEntity {
    pub id: String,
    pub name: String,
    pub kind: EntityKind,
    /// Negotiated per-hour court rate used by the metered pricing flow
    pub court_rate: Decimal,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub is_active: bool,
}
