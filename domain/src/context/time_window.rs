//! Timestamp normalization and time-window filtering for calendar/task records.
//!
//! All comparisons happen in UTC. Records that cannot be read are reported in
//! [`Filtered::skipped`] instead of failing the batch; callers decide how to
//! log them.

use crate::core::error::DomainError;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// A record that was dropped, with its position in the input and the reason
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    pub index: usize,
    pub error: DomainError,
}

/// Result of filtering a batch of records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filtered {
    pub kept: Vec<Value>,
    pub skipped: Vec<SkippedRecord>,
}

/// Parse an ISO-8601 timestamp and normalize it to UTC.
///
/// Offsets (including `Z`) are honored; timestamps without an offset are
/// taken as UTC. A bare date means midnight UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, DomainError> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        && let Some(midnight) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(midnight.and_utc());
    }
    Err(DomainError::InvalidTimestamp {
        value: value.to_string(),
        reason: "not an ISO-8601 date-time".to_string(),
    })
}

/// Start time of a calendar event (`start.dateTime`)
pub fn event_start(event: &Value) -> Result<DateTime<Utc>, DomainError> {
    let raw = event
        .get("start")
        .and_then(|s| s.get("dateTime"))
        .and_then(Value::as_str)
        .ok_or_else(|| DomainError::MissingField("start.dateTime".to_string()))?;
    parse_timestamp(raw)
}

/// Keep events with `now <= start <= now + days`
pub fn filter_upcoming_events(events: &[Value], now: DateTime<Utc>, days: u32) -> Filtered {
    let horizon = now + Duration::days(i64::from(days));
    let mut out = Filtered::default();
    for (index, event) in events.iter().enumerate() {
        match event_start(event) {
            Ok(start) if start >= now && start <= horizon => out.kept.push(event.clone()),
            Ok(_) => {}
            Err(error) => out.skipped.push(SkippedRecord { index, error }),
        }
    }
    out
}

/// Keep tasks with `status == "needsAction"` whose `due` is in the future.
///
/// Kept tasks gain a `due_datetime` field holding the normalized RFC 3339 UTC
/// due time.
pub fn filter_active_tasks(tasks: &[Value], now: DateTime<Utc>) -> Filtered {
    let mut out = Filtered::default();
    for (index, task) in tasks.iter().enumerate() {
        match active_task(task, now) {
            Ok(Some(task)) => out.kept.push(task),
            Ok(None) => {}
            Err(error) => out.skipped.push(SkippedRecord { index, error }),
        }
    }
    out
}

fn active_task(task: &Value, now: DateTime<Utc>) -> Result<Option<Value>, DomainError> {
    let raw_due = task
        .get("due")
        .and_then(Value::as_str)
        .ok_or_else(|| DomainError::MissingField("due".to_string()))?;
    let due = parse_timestamp(raw_due)?;
    let status = task
        .get("status")
        .and_then(Value::as_str)
        .ok_or_else(|| DomainError::MissingField("status".to_string()))?;

    if status != "needsAction" || due <= now {
        return Ok(None);
    }

    let mut task = task.clone();
    if let Some(map) = task.as_object_mut() {
        map.insert(
            "due_datetime".to_string(),
            Value::String(due.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
    }
    Ok(Some(task))
}
