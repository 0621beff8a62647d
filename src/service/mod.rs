pub mod accounts;
pub mod attendance;
pub mod branches;
pub mod clock;
pub mod contracts;
pub mod employees;
pub mod leave;
pub mod salaries;
pub mod staff;

use chrono::{DateTime, Utc};

/// Sorts by `created_at` descending; records sharing a timestamp keep
/// newest-inserted first.
pub(crate) fn newest_first<T>(records: &mut [T], created_at: impl Fn(&T) -> DateTime<Utc>) {
    records.reverse();
    records.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_timestamps_list_the_later_insertion_first() {
        let t1: DateTime<Utc> = "2025-01-01T08:00:00Z".parse().unwrap();
        let t2: DateTime<Utc> = "2025-01-01T09:00:00Z".parse().unwrap();
        let mut rows = vec![("a", t1), ("b", t2), ("c", t1)];

        newest_first(&mut rows, |r| r.1);

        let order: Vec<_> = rows.iter().map(|r| r.0).collect();
        assert_eq!(order, ["b", "c", "a"]);
    }
}
