//! Common validation utilities.

use chrono::NaiveDate;
use validator::ValidationError;

/// Day-first format accepted for trip dates, e.g. `25/12/2024`.
const DAY_FIRST_FORMAT: &str = "%d/%m/%Y";

/// Parses a trip date given as `dd/mm/yyyy` or ISO-8601.
///
/// Empty input yields `Ok(None)` so that clients can clear a date.
/// Full ISO timestamps are accepted and truncated to their date part.
pub fn parse_trip_date(input: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if trimmed.contains('/') {
        return NaiveDate::parse_from_str(trimmed, DAY_FIRST_FORMAT)
            .map(Some)
            .map_err(|_| date_error());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(Some(date));
    }

    chrono::DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| Some(dt.date_naive()))
        .map_err(|_| date_error())
}

fn date_error() -> ValidationError {
    let mut err = ValidationError::new("date_format");
    err.message = Some("Date must be dd/mm/yyyy or ISO-8601".into());
    err
}
