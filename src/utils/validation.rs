use chrono::{DateTime, NaiveDate};

use crate::error::{FieldError, HrError, HrResult};
use crate::model::attendance::ClockTime;

pub type FieldResult<T> = Result<T, FieldError>;

/// Precondition check for core operations: `value` must hold non-blank text.
pub fn require(field: &str, value: &str) -> HrResult<()> {
    if value.trim().is_empty() {
        return Err(HrError::invalid(field, format!("{field} is required")));
    }
    Ok(())
}

/// Builds a validation error from every failed field, in order.
pub fn rejected<const N: usize>(errors: [Option<FieldError>; N]) -> HrError {
    HrError::Validation(errors.into_iter().flatten().collect())
}

pub fn required_text(field: &str, value: Option<&str>, message: &str) -> FieldResult<String> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(FieldError::new(field, message)),
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp (its date part is kept).
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

pub fn required_date(field: &str, value: Option<&str>, message: &str) -> FieldResult<NaiveDate> {
    value
        .and_then(parse_date)
        .ok_or_else(|| FieldError::new(field, message))
}

/// Absent or blank is `None`; anything else must be a date.
pub fn optional_date(field: &str, value: Option<&str>) -> FieldResult<Option<NaiveDate>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_date(raw)
            .map(Some)
            .ok_or_else(|| FieldError::new(field, format!("{field} must be a valid date"))),
    }
}

pub fn required_clock_time(
    field: &str,
    value: Option<&str>,
    message: &str,
) -> FieldResult<ClockTime> {
    value
        .map(str::trim)
        .and_then(ClockTime::parse)
        .ok_or_else(|| FieldError::new(field, message))
}

/// Blank query parameters behave as if they were not sent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
