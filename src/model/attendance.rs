use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use utoipa::ToSchema;

const CLOCK_FORMAT: &str = "%H:%M";

/// Time of day on the attendance sheet, `HH:MM` (24h) on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// `clock_out` value of a session that has not been closed yet.
    pub const OPEN: ClockTime = ClockTime(NaiveTime::MIN);

    /// Strict `HH:MM` parse: two-digit hour 00-23, two-digit minute 00-59.
    pub fn parse(value: &str) -> Option<Self> {
        let bytes = value.as_bytes();
        let shaped = bytes.len() == 5
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| if i == 2 { *b == b':' } else { b.is_ascii_digit() });
        if !shaped {
            return None;
        }
        NaiveTime::parse_from_str(value, CLOCK_FORMAT)
            .ok()
            .map(ClockTime)
    }

    pub fn is_open(self) -> bool {
        self == Self::OPEN
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CLOCK_FORMAT))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ClockTime::parse(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid clock time `{raw}`, expected HH:MM")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "0b6c3c55-4f7e-4c1b-9d0e-2f1d8f3b9a10",
        "employee_id": "E1",
        "date": "2025-01-01",
        "clock_in": "08:00",
        "clock_out": "17:00",
        "created_at": "2025-01-01T06:00:00Z"
    })
)]
pub struct AttendanceRecord {
    pub id: String,

    #[schema(example = "E1")]
    pub employee_id: String,

    #[schema(example = "2025-01-01", format = "date", value_type = String)]
    pub date: NaiveDate,

    #[schema(example = "08:00", value_type = String)]
    pub clock_in: ClockTime,

    /// `00:00` while the session is still open
    #[schema(example = "17:00", value_type = String)]
    pub clock_out: ClockTime,

    #[schema(example = "2025-01-01T06:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl AttendanceRecord {
    pub fn is_open(&self) -> bool {
        self.clock_out.is_open()
    }

    /// Open session belonging to `employee_id` on `date`.
    pub fn is_open_for(&self, employee_id: &str, date: NaiveDate) -> bool {
        self.employee_id == employee_id && self.date == date && self.is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_time_accepts_only_two_digit_24h_values() {
        assert_eq!(ClockTime::parse("08:05").map(|t| t.to_string()), Some("08:05".into()));
        assert_eq!(ClockTime::parse("23:59").map(|t| t.to_string()), Some("23:59".into()));
        assert!(ClockTime::parse("8:05").is_none());
        assert!(ClockTime::parse("24:00").is_none());
        assert!(ClockTime::parse("12:60").is_none());
        assert!(ClockTime::parse("+8:00").is_none());
        assert!(ClockTime::parse("").is_none());
    }

    #[test]
    fn midnight_is_the_open_sentinel() {
        assert_eq!(ClockTime::parse("00:00"), Some(ClockTime::OPEN));
        assert!(ClockTime::OPEN.is_open());
        assert!(!ClockTime::parse("00:01").unwrap().is_open());
    }

    #[test]
    fn record_serializes_times_as_hh_mm() {
        let record = AttendanceRecord {
            id: "a1".into(),
            employee_id: "E1".into(),
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            clock_in: ClockTime::parse("08:00").unwrap(),
            clock_out: ClockTime::OPEN,
            created_at: "2025-01-01T06:00:00Z".parse().unwrap(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2025-01-01");
        assert_eq!(json["clock_in"], "08:00");
        assert_eq!(json["clock_out"], "00:00");

        let back: AttendanceRecord = serde_json::from_value(json).unwrap();
        assert!(back.is_open_for("E1", record.date));
    }
}
