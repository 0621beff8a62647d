//! Attendance ledger: daily clock-in / clock-out pairs per employee.
//!
//! A record whose `clock_out` is [`ClockTime::OPEN`] is an open session. An employee
//! has at most one open session per date; checkout closes the most recently opened one.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{HrError, HrResult};
use crate::model::attendance::{AttendanceRecord, ClockTime};
use crate::service::{clock::Clock, newest_first};
use crate::store::DocumentStore;
use crate::utils::validation::require;

#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    pub employee_id: Option<String>,
    pub date: Option<NaiveDate>,
    /// Inclusive lower date bound
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound
    pub to: Option<NaiveDate>,
}

impl AttendanceFilter {
    fn matches(&self, record: &AttendanceRecord) -> bool {
        self.employee_id
            .as_deref()
            .is_none_or(|id| record.employee_id == id)
            && self.date.is_none_or(|d| record.date == d)
            && self.from.is_none_or(|d| record.date >= d)
            && self.to.is_none_or(|d| record.date <= d)
    }
}

#[derive(Clone)]
pub struct AttendanceLedger {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
}

impl AttendanceLedger {
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Opens a session. Fails with `Conflict` while another session is open
    /// for the same employee and date.
    pub fn check_in(
        &self,
        employee_id: &str,
        date: NaiveDate,
        clock_in: ClockTime,
    ) -> HrResult<AttendanceRecord> {
        require("employee_id", employee_id)?;

        let mut dataset = self.store.read_all()?;

        if dataset
            .attendance_records
            .iter()
            .any(|r| r.is_open_for(employee_id, date))
        {
            warn!(employee_id, %date, "Check-in rejected, session already open");
            return Err(HrError::Conflict(format!(
                "Employee {employee_id} is already checked in on {date}"
            )));
        }

        let record = AttendanceRecord {
            id: Uuid::new_v4().to_string(),
            employee_id: employee_id.to_string(),
            date,
            clock_in,
            clock_out: ClockTime::OPEN,
            created_at: self.clock.now(),
        };

        dataset.attendance_records.push(record.clone());
        self.store.write_all(&dataset)?;

        info!(employee_id, %date, %clock_in, record_id = %record.id, "Checked in");
        Ok(record)
    }

    /// Closes the most recently opened session for the employee and date.
    pub fn check_out(
        &self,
        employee_id: &str,
        date: NaiveDate,
        clock_out: ClockTime,
    ) -> HrResult<AttendanceRecord> {
        require("employee_id", employee_id)?;
        if clock_out.is_open() {
            return Err(HrError::invalid(
                "clock_out",
                "Clock Out cannot be 00:00, which marks an open session",
            ));
        }

        let mut dataset = self.store.read_all()?;

        // latest created_at wins, equal timestamps go to the later insertion
        let position = dataset
            .attendance_records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_open_for(employee_id, date))
            .max_by_key(|(index, r)| (r.created_at, *index))
            .map(|(index, _)| index);

        let Some(index) = position else {
            warn!(employee_id, %date, "Check-out without an open session");
            return Err(HrError::NotFound(
                "No matching record found for check-out".to_string(),
            ));
        };

        let record = &mut dataset.attendance_records[index];
        record.clock_out = clock_out;
        let record = record.clone();

        self.store.write_all(&dataset)?;

        info!(employee_id, %date, %clock_out, record_id = %record.id, "Checked out");
        Ok(record)
    }

    /// Appends a complete log line. An entry still marked open goes through
    /// [`check_in`](Self::check_in) so the one-open-session rule holds.
    pub fn record_entry(
        &self,
        employee_id: &str,
        date: NaiveDate,
        clock_in: ClockTime,
        clock_out: ClockTime,
    ) -> HrResult<AttendanceRecord> {
        if clock_out.is_open() {
            return self.check_in(employee_id, date, clock_in);
        }
        require("employee_id", employee_id)?;

        let mut dataset = self.store.read_all()?;

        let record = AttendanceRecord {
            id: Uuid::new_v4().to_string(),
            employee_id: employee_id.to_string(),
            date,
            clock_in,
            clock_out,
            created_at: self.clock.now(),
        };

        dataset.attendance_records.push(record.clone());
        self.store.write_all(&dataset)?;

        info!(employee_id, %date, record_id = %record.id, "Attendance entry recorded");
        Ok(record)
    }

    /// Matching records, newest first.
    pub fn list_records(&self, filter: &AttendanceFilter) -> HrResult<Vec<AttendanceRecord>> {
        let dataset = self.store.read_all()?;

        let mut records: Vec<_> = dataset
            .attendance_records
            .into_iter()
            .filter(|r| filter.matches(r))
            .collect();
        newest_first(&mut records, |r| r.created_at);

        debug!(?filter, count = records.len(), "Attendance records listed");
        Ok(records)
    }

    /// Records dated on the clock's current day.
    pub fn today(&self, employee_id: Option<String>) -> HrResult<Vec<AttendanceRecord>> {
        let filter = AttendanceFilter {
            employee_id,
            date: Some(self.clock.today()),
            ..AttendanceFilter::default()
        };
        self.list_records(&filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::clock::SteppingClock;
    use crate::store::{Dataset, MemoryStore};

    fn day(value: &str) -> NaiveDate {
        value.parse().unwrap()
    }

    fn at(value: &str) -> ClockTime {
        ClockTime::parse(value).unwrap()
    }

    fn ledger_over(dataset: Dataset) -> (AttendanceLedger, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new(dataset));
        let clock = Arc::new(SteppingClock::starting_at("2025-01-01T06:00:00Z"));
        (AttendanceLedger::new(store.clone(), clock), store)
    }

    fn ledger() -> (AttendanceLedger, Arc<MemoryStore>) {
        ledger_over(Dataset::seeded())
    }

    fn open_record(id: &str, created_at: &str) -> AttendanceRecord {
        AttendanceRecord {
            id: id.to_string(),
            employee_id: "E1".to_string(),
            date: day("2025-01-01"),
            clock_in: at("08:00"),
            clock_out: ClockTime::OPEN,
            created_at: created_at.parse().unwrap(),
        }
    }

    #[test]
    fn check_in_then_check_out_closes_the_session() {
        let (ledger, store) = ledger();

        let opened = ledger.check_in("E1", day("2025-01-01"), at("08:00")).unwrap();
        assert!(opened.is_open());

        let closed = ledger.check_out("E1", day("2025-01-01"), at("17:00")).unwrap();
        assert_eq!(closed.id, opened.id);
        assert_eq!(closed.employee_id, "E1");
        assert_eq!(closed.date, day("2025-01-01"));
        assert_eq!(closed.clock_in, at("08:00"));
        assert_eq!(closed.clock_out, at("17:00"));

        let stored = store.read_all().unwrap().attendance_records;
        assert_eq!(stored, vec![closed]);
    }

    #[test]
    fn second_check_in_on_the_same_day_conflicts() {
        let (ledger, store) = ledger();
        ledger.check_in("E1", day("2025-01-01"), at("08:00")).unwrap();

        let err = ledger.check_in("E1", day("2025-01-01"), at("09:00")).unwrap_err();
        assert!(matches!(err, HrError::Conflict(_)));
        assert_eq!(store.read_all().unwrap().attendance_records.len(), 1);
    }

    #[test]
    fn check_in_is_allowed_again_after_check_out() {
        let (ledger, _) = ledger();
        ledger.check_in("E1", day("2025-01-01"), at("08:00")).unwrap();
        ledger.check_out("E1", day("2025-01-01"), at("12:00")).unwrap();

        let reopened = ledger.check_in("E1", day("2025-01-01"), at("13:00")).unwrap();
        assert!(reopened.is_open());
    }

    #[test]
    fn open_sessions_are_scoped_per_employee_and_date() {
        let (ledger, _) = ledger();
        ledger.check_in("E1", day("2025-01-01"), at("08:00")).unwrap();

        assert!(ledger.check_in("E2", day("2025-01-01"), at("08:00")).is_ok());
        assert!(ledger.check_in("E1", day("2025-01-02"), at("08:00")).is_ok());
    }

    #[test]
    fn check_out_without_open_session_is_not_found() {
        let (ledger, _) = ledger();
        let err = ledger.check_out("E1", day("2025-01-01"), at("17:00")).unwrap_err();
        assert!(matches!(err, HrError::NotFound(_)));
    }

    #[test]
    fn check_out_rejects_the_open_sentinel() {
        let (ledger, _) = ledger();
        ledger.check_in("E1", day("2025-01-01"), at("08:00")).unwrap();

        let err = ledger.check_out("E1", day("2025-01-01"), ClockTime::OPEN).unwrap_err();
        assert!(matches!(err, HrError::Validation(_)));
    }

    #[test]
    fn check_out_picks_the_latest_of_duplicate_open_sessions() {
        let mut dataset = Dataset::seeded();
        dataset.attendance_records = vec![
            open_record("late", "2025-01-01T07:00:00Z"),
            open_record("early", "2025-01-01T06:00:00Z"),
        ];
        let (ledger, store) = ledger_over(dataset);

        let closed = ledger.check_out("E1", day("2025-01-01"), at("17:00")).unwrap();
        assert_eq!(closed.id, "late");

        let stored = store.read_all().unwrap().attendance_records;
        assert!(stored.iter().find(|r| r.id == "early").unwrap().is_open());
    }

    #[test]
    fn check_out_tie_goes_to_the_last_inserted_session() {
        let mut dataset = Dataset::seeded();
        dataset.attendance_records = vec![
            open_record("first", "2025-01-01T06:00:00Z"),
            open_record("second", "2025-01-01T06:00:00Z"),
        ];
        let (ledger, _) = ledger_over(dataset);

        let closed = ledger.check_out("E1", day("2025-01-01"), at("17:00")).unwrap();
        assert_eq!(closed.id, "second");
    }

    #[test]
    fn blank_employee_id_is_rejected() {
        let (ledger, _) = ledger();
        let err = ledger.check_in("  ", day("2025-01-01"), at("08:00")).unwrap_err();
        assert!(matches!(err, HrError::Validation(_)));
    }

    #[test]
    fn list_filters_and_orders_newest_first() {
        let (ledger, _) = ledger();
        let a = ledger.check_in("E1", day("2025-01-01"), at("08:00")).unwrap();
        let b = ledger.check_in("E2", day("2025-01-01"), at("08:10")).unwrap();
        let c = ledger.check_in("E1", day("2025-01-02"), at("08:20")).unwrap();

        let all = ledger.list_records(&AttendanceFilter::default()).unwrap();
        let ids: Vec<_> = all.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, [c.id.as_str(), b.id.as_str(), a.id.as_str()]);

        let e1 = ledger
            .list_records(&AttendanceFilter {
                employee_id: Some("E1".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(e1.len(), 2);

        let jan_first = ledger
            .list_records(&AttendanceFilter {
                date: Some(day("2025-01-01")),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(jan_first.len(), 2);

        let ranged = ledger
            .list_records(&AttendanceFilter {
                from: Some(day("2025-01-02")),
                to: Some(day("2025-01-31")),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(ranged, vec![c]);
    }

    #[test]
    fn closed_entries_are_appended_and_open_ones_obey_check_in_rules() {
        let (ledger, _) = ledger();

        let closed = ledger
            .record_entry("E1", day("2025-01-01"), at("08:00"), at("12:00"))
            .unwrap();
        assert!(!closed.is_open());

        ledger
            .record_entry("E1", day("2025-01-01"), at("13:00"), ClockTime::OPEN)
            .unwrap();
        let err = ledger
            .record_entry("E1", day("2025-01-01"), at("14:00"), ClockTime::OPEN)
            .unwrap_err();
        assert!(matches!(err, HrError::Conflict(_)));
    }

    #[test]
    fn today_uses_the_clock_date() {
        let (ledger, _) = ledger();
        ledger.check_in("E1", day("2025-01-01"), at("08:00")).unwrap();
        ledger.check_in("E1", day("2024-12-31"), at("08:00")).unwrap();

        let today = ledger.today(None).unwrap();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].date, day("2025-01-01"));
        assert!(ledger.today(Some("E2".into())).unwrap().is_empty());
    }
}
