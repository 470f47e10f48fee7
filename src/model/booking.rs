use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::ApiError;

/// Wire format for booking timestamps, strict UTC with a literal `Z`.
const SLOT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub place_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl Booking {
    /// Half-open overlap: `[start, end)` windows that merely touch do not
    /// conflict, so a booking may start exactly when another ends.
    pub fn conflicts_with(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_time < end && self.end_time > start
    }
}

#[derive(Debug, Deserialize)]
pub struct BookRequest {
    pub place_id: i64,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub place_id: i64,
    pub start_time: String,
    pub end_time: String,
}

/// Parses a slot timestamp, accepting exactly `YYYY-MM-DDTHH:MM:SSZ`.
pub fn parse_slot_time(value: &str) -> Result<DateTime<Utc>, ApiError> {
    NaiveDateTime::parse_from_str(value, SLOT_TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| ApiError::Validation(format!("Invalid timestamp: {value}")))
}

pub fn format_slot_time(value: DateTime<Utc>) -> String {
    value.format(SLOT_TIME_FORMAT).to_string()
}
