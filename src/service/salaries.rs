use tracing::info;
use uuid::Uuid;

use crate::error::HrResult;
use crate::model::salary::{SalaryRecord, SalaryStatus};
use crate::service::{clock::Clock, newest_first};
use crate::store::DocumentStore;
use crate::utils::validation::require;

#[derive(Debug, Clone)]
pub struct NewSalary {
    pub employee_id: String,
    pub amount: f64,
    pub month: String,
    pub paid_by: String,
    pub status: SalaryStatus,
}

#[derive(Debug, Clone, Default)]
pub struct SalaryFilter {
    pub employee_id: Option<String>,
    pub month: Option<String>,
}

pub fn record(
    store: &dyn DocumentStore,
    clock: &dyn Clock,
    salary: NewSalary,
) -> HrResult<SalaryRecord> {
    require("employee_id", &salary.employee_id)?;
    require("paid_by", &salary.paid_by)?;

    let mut dataset = store.read_all()?;

    let entry = SalaryRecord {
        id: Uuid::new_v4().to_string(),
        employee_id: salary.employee_id,
        amount: salary.amount,
        month: salary.month,
        paid_by: salary.paid_by,
        status: salary.status,
        created_at: clock.now(),
    };

    dataset.salaries.push(entry.clone());
    store.write_all(&dataset)?;

    info!(salary_id = %entry.id, employee_id = %entry.employee_id, month = %entry.month, "Salary recorded");
    Ok(entry)
}

pub fn list(store: &dyn DocumentStore, filter: &SalaryFilter) -> HrResult<Vec<SalaryRecord>> {
    let dataset = store.read_all()?;

    let mut salaries: Vec<_> = dataset
        .salaries
        .into_iter()
        .filter(|s| {
            filter
                .employee_id
                .as_deref()
                .is_none_or(|id| s.employee_id == id)
                && filter.month.as_deref().is_none_or(|m| s.month == m)
        })
        .collect();
    newest_first(&mut salaries, |s| s.created_at);

    Ok(salaries)
}
