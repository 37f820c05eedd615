//! Court rental pricing
//!
//! Two deliberately separate calculations:
//!
//! - the general flow prices a flat per-block rate (prime or non-prime)
//!   multiplied by the court count, regardless of duration;
//! - team and tournament rentals are metered: hours × the linked entity's
//!   per-hour court rate × court count.
//!
//! Reports reconstruct historical totals with the hourly form, so the two
//! must stay independently callable and must never be merged.

use chrono::{Datelike, NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::config::RateConfig;
use crate::domain::reservation::BookingCategory;
use crate::domain::schedule::time_grid::parse_hhmm;
use crate::shared::errors::BookingResult;

/// Pricing rules built from facility configuration
#[derive(Debug, Clone)]
pub struct RateEngine {
    pub prime_rate: Decimal,
    pub non_prime_rate: Decimal,
    /// Weekday time of day at which prime pricing starts
    pub prime_weekday_start: NaiveTime,
}

impl RateEngine {
    pub fn from_config(cfg: &RateConfig) -> BookingResult<Self> {
        Ok(Self {
            prime_rate: cfg.prime,
            non_prime_rate: cfg.non_prime,
            prime_weekday_start: parse_hhmm(&cfg.prime_weekday_start)?,
        })
    }

    /// Prime time is all of Saturday and Sunday, plus weekday evenings from
    /// the configured start (17:00 by default).
    pub fn is_prime_time(&self, date: NaiveDate, time_start: NaiveTime) -> bool {
        let weekend = matches!(date.weekday(), chrono::Weekday::Sat | chrono::Weekday::Sun);
        weekend || time_start >= self.prime_weekday_start
    }

    /// Flat per-block rate for one court.
    ///
    /// The waived categories price at zero through an explicit policy branch,
    /// not a missing-price default: an unpriced category never silently
    /// becomes free.
    pub fn base_rate(
        &self,
        date: NaiveDate,
        time_start: NaiveTime,
        category: BookingCategory,
    ) -> Decimal {
        if category.is_free() {
            return Decimal::ZERO;
        }
        if self.is_prime_time(date, time_start) {
            self.prime_rate
        } else {
            self.non_prime_rate
        }
    }

    /// General-flow total: flat base rate × court count.
    ///
    /// Duration is intentionally not factored beyond the base block; open
    /// play is flat-rate. The time range is accepted so the signature matches
    /// the metered form, but only the start matters here.
    pub fn total_rate(
        &self,
        date: NaiveDate,
        time_start: NaiveTime,
        _time_end: NaiveTime,
        category: BookingCategory,
        court_count: u32,
    ) -> Decimal {
        self.base_rate(date, time_start, category) * Decimal::from(court_count)
    }

    /// Metered team/tournament total: hours × per-hour entity rate × courts.
    pub fn hourly_total(
        &self,
        time_start: NaiveTime,
        time_end: NaiveTime,
        court_rate: Decimal,
        court_count: u32,
    ) -> Decimal {
        let minutes = (time_end - time_start).num_minutes();
        let hours = Decimal::from(minutes) / Decimal::from(60);
        hours * court_rate * Decimal::from(court_count)
    }
}

/// Whether a category is waived (maintenance, administrative hold,
/// high-school teams).
pub fn is_free_booking(category: BookingCategory) -> bool {
    category.is_free()
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> RateEngine {
        RateEngine::from_config(&RateConfig::default()).unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    // 2024-06-15 is a Saturday, 2024-06-17 a Monday.

    #[test]
    fn weekends_are_prime_all_day() {
        let e = engine();
        assert!(e.is_prime_time(d(2024, 6, 15), t(6, 0)));
        assert!(e.is_prime_time(d(2024, 6, 16), t(12, 0)));
    }

    #[test]
    fn weekdays_are_prime_from_five_pm() {
        let e = engine();
        assert!(!e.is_prime_time(d(2024, 6, 17), t(9, 0)));
        assert!(!e.is_prime_time(d(2024, 6, 17), t(16, 30)));
        assert!(e.is_prime_time(d(2024, 6, 17), t(17, 0)));
        assert!(e.is_prime_time(d(2024, 6, 17), t(21, 30)));
    }

    #[test]
    fn base_rate_selects_prime_tier() {
        let e = engine();
        let open = BookingCategory::OpenPlay;
        assert_eq!(e.base_rate(d(2024, 6, 17), t(9, 0), open), Decimal::new(1000, 2));
        assert_eq!(e.base_rate(d(2024, 6, 17), t(18, 0), open), Decimal::new(1200, 2));
        assert_eq!(e.base_rate(d(2024, 6, 15), t(9, 0), open), Decimal::new(1200, 2));
    }

    #[test]
    fn waived_categories_price_zero_even_at_prime() {
        let e = engine();
        for category in [
            BookingCategory::Maintenance,
            BookingCategory::AdministrativeHold,
            BookingCategory::TeamHighSchool,
        ] {
            assert_eq!(e.base_rate(d(2024, 6, 15), t(18, 0), category), Decimal::ZERO);
        }
    }

    #[test]
    fn free_booking_set_is_exact() {
        let free = [
            BookingCategory::Maintenance,
            BookingCategory::AdministrativeHold,
            BookingCategory::TeamHighSchool,
        ];
        for category in BookingCategory::ALL {
            assert_eq!(is_free_booking(category), free.contains(&category));
        }
    }

    #[test]
    fn total_rate_multiplies_courts_not_duration() {
        let e = engine();
        // non-prime weekday morning, 1 court → 10.00 regardless of length
        let short = e.total_rate(d(2024, 6, 17), t(9, 0), t(10, 0), BookingCategory::OpenPlay, 1);
        let long = e.total_rate(d(2024, 6, 17), t(9, 0), t(13, 0), BookingCategory::OpenPlay, 1);
        assert_eq!(short, Decimal::new(1000, 2));
        assert_eq!(long, Decimal::new(1000, 2));

        let two_courts =
            e.total_rate(d(2024, 6, 17), t(9, 0), t(10, 0), BookingCategory::OpenPlay, 2);
        assert_eq!(two_courts, Decimal::new(2000, 2));
    }

    #[test]
    fn hourly_total_is_metered() {
        let e = engine();
        // 1.5 hours × 15/hour × 2 courts = 45.00
        let total = e.hourly_total(t(18, 0), t(19, 30), Decimal::from(15), 2);
        assert_eq!(total, Decimal::new(4500, 2));
    }
}
