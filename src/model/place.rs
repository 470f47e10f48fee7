use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::ApiError;

/// Format for operating hours on the wire, both directions.
const TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DiningPlace {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone_no: String,
    pub website: Option<String>,
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
}

#[derive(Debug, Deserialize)]
pub struct CreatePlaceRequest {
    pub name: String,
    pub address: String,
    pub phone_no: String,
    pub website: Option<String>,
    pub operational_hours: OperationalHoursInput,
}

#[derive(Debug, Deserialize)]
pub struct OperationalHoursInput {
    pub open_time: String,
    pub close_time: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub name: Option<String>,
}

// Response untuk search (frontend expects formatted times)
#[derive(Debug, Serialize)]
pub struct PlaceSummary {
    pub place_id: i64,
    pub name: String,
    pub address: String,
    pub phone_no: String,
    pub website: Option<String>,
    pub operational_hours: OperationalHours,
}

#[derive(Debug, Serialize)]
pub struct OperationalHours {
    pub open_time: String,
    pub close_time: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<PlaceSummary>,
}

impl From<DiningPlace> for PlaceSummary {
    fn from(place: DiningPlace) -> Self {
        Self {
            place_id: place.id,
            name: place.name,
            address: place.address,
            phone_no: place.phone_no,
            website: place.website,
            operational_hours: OperationalHours {
                open_time: place.open_time.format(TIME_FORMAT).to_string(),
                close_time: place.close_time.format(TIME_FORMAT).to_string(),
            },
        }
    }
}

/// Parses an operating-hours time of day, strictly `HH:MM:SS`.
pub fn parse_operating_time(value: &str) -> Result<NaiveTime, ApiError> {
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .map_err(|_| ApiError::Validation(format!("Invalid time format: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_operating_time() {
        let open = parse_operating_time("09:00:00").unwrap();
        assert_eq!(open, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn rejects_bad_operating_time() {
        assert!(parse_operating_time("9am").is_err());
        assert!(parse_operating_time("25:00:00").is_err());
        assert!(parse_operating_time("09:00").is_err());
    }

    #[test]
    fn summary_formats_hours() {
        let place = DiningPlace {
            id: 1,
            name: "Gatsby".to_string(),
            address: "123 Main St".to_string(),
            phone_no: "1234567890".to_string(),
            website: None,
            open_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            close_time: NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
        };
        let summary = PlaceSummary::from(place);
        assert_eq!(summary.operational_hours.open_time, "09:00:00");
        assert_eq!(summary.operational_hours.close_time, "17:30:00");
    }
}
