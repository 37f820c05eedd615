//! Court reference data

/// Operational status shown on the schedule board. Informational only:
/// closures, not this flag, decide whether a slot can be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourtStatus {
    Open,
    Closed,
    Maintenance,
}

impl CourtStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Maintenance => "maintenance",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            "maintenance" => Some(Self::Maintenance),
            _ => None,
        }
    }
}

impl std::fmt::Display for CourtStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A physical court
#[derive(Debug, Clone)]
pub struct Court {
    pub number: u8,
    pub name: String,
    pub status: CourtStatus,
}

impl Court {
    pub fn new(number: u8, name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
            status: CourtStatus::Open,
        }
    }
}
