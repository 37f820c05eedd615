//! Facility configuration
//!
//! Loaded from a TOML file (~/.config/courtbook/config.toml by default),
//! with built-in defaults for every field. Rates and refund boundaries are
//! policy constants that live here rather than in code.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Facility-wide scheduling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FacilityConfig {
    /// First bookable time of day, `HH:MM`
    pub open_time: String,
    /// End of the operating window, `HH:MM` (exclusive)
    pub close_time: String,
    /// Slot granularity in minutes
    pub slot_minutes: u32,
    /// Default reservation length in minutes
    pub default_duration_minutes: u32,
    /// Courts are numbered `1..=court_count`
    pub court_count: u8,
    /// Earliest bookable calendar day, `YYYY-MM-DD`; empty = unrestricted
    pub earliest_date: String,
    pub rates: RateConfig,
    pub refunds: RefundConfig,
}

impl Default for FacilityConfig {
    fn default() -> Self {
        Self {
            open_time: "06:00".to_string(),
            close_time: "22:00".to_string(),
            slot_minutes: 30,
            default_duration_minutes: 90,
            court_count: 20,
            earliest_date: String::new(),
            rates: RateConfig::default(),
            refunds: RefundConfig::default(),
        }
    }
}

impl FacilityConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }
}

/// Court rental pricing constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateConfig {
    /// Per-block rate during prime time
    pub prime: Decimal,
    /// Per-block rate outside prime time
    pub non_prime: Decimal,
    /// Weekday time of day at which prime pricing starts, `HH:MM`
    pub prime_weekday_start: String,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            prime: Decimal::new(1200, 2),     // 12.00
            non_prime: Decimal::new(1000, 2), // 10.00
            prime_weekday_start: "17:00".to_string(),
        }
    }
}

/// Refund-suggestion policy boundaries
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefundConfig {
    /// Customer cancellations at least this many hours before start
    /// suggest a full refund
    pub full_refund_lead_hours: i64,
    /// Customer cancellations within this many minutes of start (or after
    /// start) suggest no refund
    pub grace_minutes: i64,
}

impl Default for RefundConfig {
    fn default() -> Self {
        Self {
            full_refund_lead_hours: 24,
            grace_minutes: 60,
        }
    }
}

/// Default configuration file location (~/.config/courtbook/config.toml)
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("courtbook")
        .join("config.toml")
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = FacilityConfig::default();
        assert_eq!(cfg.open_time, "06:00");
        assert_eq!(cfg.close_time, "22:00");
        assert_eq!(cfg.slot_minutes, 30);
        assert_eq!(cfg.default_duration_minutes, 90);
        assert_eq!(cfg.court_count, 20);
        assert_eq!(cfg.rates.prime, Decimal::new(1200, 2));
        assert_eq!(cfg.rates.non_prime, Decimal::new(1000, 2));
        assert_eq!(cfg.refunds.full_refund_lead_hours, 24);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let cfg: FacilityConfig = toml::from_str(
            r#"
            court_count = 8
            [rates]
            prime = "15.00"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.court_count, 8);
        assert_eq!(cfg.rates.prime, Decimal::new(1500, 2));
        // untouched fields keep defaults
        assert_eq!(cfg.rates.non_prime, Decimal::new(1000, 2));
        assert_eq!(cfg.open_time, "06:00");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = FacilityConfig::load(Path::new("/nonexistent/courtbook.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
