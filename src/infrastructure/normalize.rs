//! Normalization boundary for the spreadsheet-backed store
//!
//! The external datastore hands back loosely-typed rows: booleans as
//! `"TRUE"`/`true`/`"1"`, inconsistent field names (`name` vs `team_name`),
//! numbers as strings. Everything is mapped into the strict domain structs
//! exactly once, here; the core never re-interprets raw fields. The reverse
//! direction emits the exact external field names.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use crate::domain::closure::{Closure, ClosureCourt};
use crate::domain::entity::{EntityKind, LinkedEntity};
use crate::domain::reservation::{
    BookingCategory, PaymentStatus, Reservation, ReservationStatus,
};
use crate::domain::schedule::refunds::{CancelReason, RefundDisposition};
use crate::domain::schedule::time_grid::parse_hhmm;
use crate::shared::errors::{BookingError, BookingResult};

/// Map a raw reservation row into the strict domain struct.
pub fn reservation_from_row(row: &Value) -> BookingResult<Reservation> {
    let id = require_str(row, &["booking_id", "id"])?;
    let date = require_date(row, "date")?;
    let court = require_court(row)?;
    let time_start = require_time(row, "time_start")?;
    let time_end = require_time(row, "time_end")?;

    let category_raw = require_str(row, &["booking_type", "category"])?;
    let category = BookingCategory::parse(&category_raw).ok_or_else(|| {
        BookingError::validation(format!("Unknown booking_type: {:?}", category_raw))
    })?;

    let status = match opt_str(row, &["status"]) {
        Some(s) => ReservationStatus::parse(&s)
            .ok_or_else(|| BookingError::validation(format!("Unknown status: {:?}", s)))?,
        None => ReservationStatus::Active,
    };

    let payment_status = match opt_str(row, &["payment_status"]) {
        Some(s) => PaymentStatus::parse(&s)
            .ok_or_else(|| BookingError::validation(format!("Unknown payment_status: {:?}", s)))?,
        None => PaymentStatus::Pending,
    };

    Ok(Reservation {
        id,
        group_id: opt_str(row, &["group_id"]),
        date,
        court,
        time_start,
        time_end,
        category,
        entity_id: opt_str(row, &["entity_id"]),
        customer_name: opt_str(row, &["customer_name", "customer", "name"]),
        customer_phone: opt_str(row, &["customer_phone", "phone"]),
        payment_status,
        payment_amount: opt_decimal(row, "payment_amount")?.unwrap_or(Decimal::ZERO),
        payment_method: opt_str(row, &["payment_method"]),
        notes: opt_str(row, &["notes"]),
        participant_count: opt_u32(row, "participant_count")?.unwrap_or(0),
        is_youth: opt_bool(row, "is_youth").unwrap_or(false),
        status,
        created_by: opt_str(row, &["created_by"]).unwrap_or_default(),
        created_at: opt_datetime(row, "created_at")?.unwrap_or_else(|| date.and_time(time_start)),
        modified_at: opt_datetime(row, "modified_at")?,
        checked_in: opt_bool(row, "checked_in").unwrap_or(false),
        checked_in_by: opt_str(row, &["checked_in_by"]),
        checked_in_at: opt_datetime(row, "checked_in_at")?,
        cancel_reason: match opt_str(row, &["cancel_reason"]) {
            Some(s) => Some(CancelReason::parse(&s).ok_or_else(|| {
                BookingError::validation(format!("Unknown cancel_reason: {:?}", s))
            })?),
            None => None,
        },
        cancelled_by: opt_str(row, &["cancelled_by"]),
        cancelled_at: opt_datetime(row, "cancelled_at")?,
        refund_status: opt_str(row, &["refund_status"]).and_then(|s| RefundDisposition::parse(&s)),
        refund_amount: opt_decimal(row, "refund_amount")?,
        refund_note: opt_str(row, &["refund_note"]),
    })
}

/// Emit a reservation as an external row with the documented field names.
pub fn reservation_to_row(r: &Reservation) -> Value {
    json!({
        "booking_id": r.id,
        "group_id": r.group_id,
        "date": r.date.to_string(),
        "court": r.court,
        "time_start": fmt_time(r.time_start),
        "time_end": fmt_time(r.time_end),
        "booking_type": r.category.as_str(),
        "entity_id": r.entity_id,
        "customer_name": r.customer_name,
        "customer_phone": r.customer_phone,
        "payment_status": r.payment_status.as_str(),
        "payment_amount": r.payment_amount.to_string(),
        "payment_method": r.payment_method,
        "notes": r.notes,
        "participant_count": r.participant_count,
        "is_youth": r.is_youth,
        "status": r.status.as_str(),
        "created_by": r.created_by,
        "created_at": fmt_datetime(r.created_at),
        "modified_at": r.modified_at.map(fmt_datetime),
        "checked_in": r.checked_in,
        "checked_in_by": r.checked_in_by,
        "checked_in_at": r.checked_in_at.map(fmt_datetime),
        "cancel_reason": r.cancel_reason.map(|c| c.as_str()),
        "cancelled_by": r.cancelled_by,
        "cancelled_at": r.cancelled_at.map(fmt_datetime),
        "refund_status": r.refund_status.map(|s| s.as_str()),
        "refund_amount": r.refund_amount.map(|a| a.to_string()),
        "refund_note": r.refund_note,
    })
}

/// Map a raw closure row into the strict domain struct.
pub fn closure_from_row(row: &Value) -> BookingResult<Closure> {
    let court_raw = require_str(row, &["court"])?;
    let court = ClosureCourt::parse(&court_raw)
        .ok_or_else(|| BookingError::validation(format!("Bad closure court: {:?}", court_raw)))?;
    Ok(Closure {
        id: require_str(row, &["closure_id", "id"])?,
        date: require_date(row, "date")?,
        court,
        time_start: opt_time(row, "time_start")?,
        time_end: opt_time(row, "time_end")?,
        reason: opt_str(row, &["reason"]).unwrap_or_default(),
        is_active: opt_bool(row, "is_active").unwrap_or(true),
    })
}

/// Emit a closure as an external row.
pub fn closure_to_row(c: &Closure) -> Value {
    json!({
        "closure_id": c.id,
        "date": c.date.to_string(),
        "court": c.court.to_string(),
        "time_start": c.time_start.map(fmt_time),
        "time_end": c.time_end.map(fmt_time),
        "reason": c.reason,
        "is_active": c.is_active,
    })
}

/// Map a raw contractor/team/tournament row into a rate card.
pub fn entity_from_row(row: &Value) -> BookingResult<LinkedEntity> {
    let kind_raw = require_str(row, &["kind", "entity_type"])?;
    let kind = EntityKind::parse(&kind_raw)
        .ok_or_else(|| BookingError::validation(format!("Unknown entity kind: {:?}", kind_raw)))?;
    Ok(LinkedEntity {
        id: require_str(row, &["entity_id", "id"])?,
        name: require_str(row, &["name", "team_name"])?,
        kind,
        court_rate: opt_decimal(row, "court_rate")?.unwrap_or(Decimal::ZERO),
        contact_name: opt_str(row, &["contact_name", "contact"]),
        contact_phone: opt_str(row, &["contact_phone"]),
        is_active: opt_bool(row, "is_active").unwrap_or(true),
    })
}

// ── Field helpers ──────────────────────────────────────────────

fn field<'a>(row: &'a Value, key: &str) -> Option<&'a Value> {
    match row.get(key) {
        Some(Value::Null) | None => None,
        Some(v) => Some(v),
    }
}

/// First non-empty string among the alternate keys.
fn opt_str(row: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(v) = field(row, key) {
            let s = match v {
                Value::String(s) => s.trim().to_string(),
                other => other.to_string(),
            };
            if !s.is_empty() {
                return Some(s);
            }
        }
    }
    None
}

fn require_str(row: &Value, keys: &[&str]) -> BookingResult<String> {
    opt_str(row, keys)
        .ok_or_else(|| BookingError::validation(format!("Missing required field {:?}", keys[0])))
}

/// Loose boolean: accepts `true`, `"TRUE"`, `"true"`, `"1"`, `"yes"`.
fn opt_bool(row: &Value, key: &str) -> Option<bool> {
    match field(row, key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" | "" => Some(false),
            _ => None,
        },
        Value::Number(n) => Some(n.as_i64() != Some(0)),
        _ => None,
    }
}

fn opt_decimal(row: &Value, key: &str) -> BookingResult<Option<Decimal>> {
    let Some(v) = field(row, key) else {
        return Ok(None);
    };
    let parsed = match v {
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => s.trim().parse::<Decimal>().ok(),
        Value::Number(n) => n.to_string().parse::<Decimal>().ok(),
        _ => None,
    };
    parsed.map(Some).ok_or_else(|| {
        BookingError::validation(format!("Bad decimal in {:?}: {}", key, v))
    })
}

fn opt_u32(row: &Value, key: &str) -> BookingResult<Option<u32>> {
    let Some(v) = field(row, key) else {
        return Ok(None);
    };
    let parsed = match v {
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        _ => None,
    };
    parsed
        .map(Some)
        .ok_or_else(|| BookingError::validation(format!("Bad count in {:?}: {}", key, v)))
}

fn require_court(row: &Value) -> BookingResult<u8> {
    let raw = require_str(row, &["court"])?;
    raw.parse::<u8>()
        .map_err(|_| BookingError::validation(format!("Bad court number: {:?}", raw)))
}

fn require_date(row: &Value, key: &str) -> BookingResult<NaiveDate> {
    let raw = require_str(row, &[key])?;
    raw.parse::<NaiveDate>()
        .map_err(|_| BookingError::validation(format!("Bad date in {:?}: {:?}", key, raw)))
}

fn opt_time(row: &Value, key: &str) -> BookingResult<Option<NaiveTime>> {
    match opt_str(row, &[key]) {
        Some(raw) => parse_hhmm(&raw).map(Some),
        None => Ok(None),
    }
}

fn require_time(row: &Value, key: &str) -> BookingResult<NaiveTime> {
    opt_time(row, key)?
        .ok_or_else(|| BookingError::validation(format!("Missing required field {:?}", key)))
}

fn opt_datetime(row: &Value, key: &str) -> BookingResult<Option<NaiveDateTime>> {
    let Some(raw) = opt_str(row, &[key]) else {
        return Ok(None);
    };
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&raw, format) {
            return Ok(Some(dt));
        }
    }
    Err(BookingError::validation(format!(
        "Bad timestamp in {:?}: {:?}",
        key, raw
    )))
}

fn fmt_time(t: NaiveTime) -> String {
    crate::domain::schedule::time_grid::TimeGrid::format_time(t)
}

fn fmt_datetime(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> Value {
        json!({
            "booking_id": "1505-0900",
            "date": "2024-06-15",
            "court": "5",
            "time_start": "09:00",
            "time_end": "10:30",
            "booking_type": "open-play",
            "customer_name": "Jordan Lee",
            "payment_status": "paid",
            "payment_amount": "12.00",
            "participant_count": "4",
            "is_youth": "TRUE",
            "status": "active",
            "created_by": "desk",
            "created_at": "2024-06-10 12:00:00",
            "checked_in": "FALSE",
        })
    }

    #[test]
    fn reservation_from_loose_row() {
        let r = reservation_from_row(&sample_row()).unwrap();
        assert_eq!(r.id, "1505-0900");
        assert_eq!(r.court, 5);
        assert_eq!(r.category, BookingCategory::OpenPlay);
        assert_eq!(r.payment_status, PaymentStatus::Paid);
        assert_eq!(r.payment_amount, Decimal::new(1200, 2));
        assert_eq!(r.participant_count, 4);
        assert!(r.is_youth);
        assert!(!r.checked_in);
    }

    #[test]
    fn numeric_and_boolean_json_types_are_accepted_too() {
        let mut row = sample_row();
        row["court"] = json!(5);
        row["payment_amount"] = json!(12.0);
        row["is_youth"] = json!(true);
        row["participant_count"] = json!(4);
        let r = reservation_from_row(&row).unwrap();
        assert_eq!(r.court, 5);
        assert_eq!(r.payment_amount, Decimal::from(12));
        assert!(r.is_youth);
    }

    #[test]
    fn alternate_name_keys_are_tolerated() {
        let mut row = sample_row();
        let obj = row.as_object_mut().unwrap();
        obj.remove("customer_name");
        obj.insert("name".to_string(), json!("Sam Ng"));
        let r = reservation_from_row(&row).unwrap();
        assert_eq!(r.customer_name.as_deref(), Some("Sam Ng"));
    }

    #[test]
    fn unknown_booking_type_is_rejected_not_defaulted() {
        let mut row = sample_row();
        row["booking_type"] = json!("open play");
        let err = reservation_from_row(&row).unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
    }

    #[test]
    fn missing_required_field_is_a_validation_error() {
        let mut row = sample_row();
        row.as_object_mut().unwrap().remove("date");
        assert!(reservation_from_row(&row).is_err());
    }

    #[test]
    fn to_row_uses_external_names_and_hhmm_times() {
        let r = reservation_from_row(&sample_row()).unwrap();
        let row = reservation_to_row(&r);
        assert_eq!(row["booking_id"], "1505-0900");
        assert_eq!(row["booking_type"], "open-play");
        assert_eq!(row["time_start"], "09:00");
        assert_eq!(row["time_end"], "10:30");
        assert_eq!(row["payment_amount"], "12.00");
        assert_eq!(row["status"], "active");
    }

    #[test]
    fn row_roundtrip_preserves_the_reservation() {
        let r = reservation_from_row(&sample_row()).unwrap();
        let back = reservation_from_row(&reservation_to_row(&r)).unwrap();
        assert_eq!(back.id, r.id);
        assert_eq!(back.date, r.date);
        assert_eq!(back.time_start, r.time_start);
        assert_eq!(back.payment_amount, r.payment_amount);
        assert_eq!(back.status, r.status);
    }

    #[test]
    fn closure_row_accepts_all_courts_and_missing_times() {
        let c = closure_from_row(&json!({
            "closure_id": "CL-7",
            "date": "2024-06-15",
            "court": "all",
            "reason": "resurfacing",
            "is_active": "TRUE",
        }))
        .unwrap();
        assert_eq!(c.court, ClosureCourt::All);
        assert!(c.time_start.is_none());
        assert!(c.is_active);
        assert_eq!(closure_to_row(&c)["court"], "all");
    }

    #[test]
    fn entity_row_tolerates_team_name() {
        let e = entity_from_row(&json!({
            "entity_id": "TEAM-01",
            "team_name": "Northside",
            "kind": "team",
            "court_rate": "15.00",
        }))
        .unwrap();
        assert_eq!(e.name, "Northside");
        assert_eq!(e.court_rate, Decimal::new(1500, 2));
        assert!(e.is_active);
    }
}
