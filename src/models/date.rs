//! Calendar date parsing shared by every input path

use chrono::NaiveDate;

use crate::error::{AppError, AppResult};

/// Accepted wire format for dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` calendar date.
///
/// `field` names the input in the validation message so the caller can
/// tell which value was rejected.
pub fn parse_calendar_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        AppError::Validation(format!(
            "{} must be a valid date in YYYY-MM-DD format, got '{}'",
            field, value
        ))
    })
}
