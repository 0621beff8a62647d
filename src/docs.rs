use crate::api::accounts::{LoginRequest, LoginResponse};
use crate::api::attendance::AttendanceInput;
use crate::api::branches::EntryInput;
use crate::api::contracts::ContractInput;
use crate::api::employees::{DocumentInput, EmployeeInput};
use crate::api::leave_request::{CancelLeave, DecideLeave, SubmitLeave};
use crate::api::salaries::SalaryInput;
use crate::error::FieldError;
use crate::model::attendance::AttendanceRecord;
use crate::model::branch::{Branch, BranchEntry, BranchName};
use crate::model::contract::{Contract, ContractType};
use crate::model::employee::{Employee, EmployeeDocument};
use crate::model::leave_request::{LeaveRequest, LeaveStatus, StatusChange};
use crate::model::salary::{SalaryRecord, SalaryStatus};
use crate::model::user::UserSummary;
use crate::service::leave::LeavePage;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HR Records API",
        version = "1.0.0",
        description = r#"
## HR Records Service

Keeps the records of a water utility's human resources office in a single JSON document.

### Key Features
- **Attendance**
  - Clock-in / clock-out pairing, at most one open session per employee and day
  - Full log entries, range queries and a "today" view
- **Leave**
  - Submission, approval/rejection with an append-only status history
  - Cancellation is a soft delete: cancelled requests stay on file
- **Directory**
  - Employees with attached document metadata
  - Branch role tables, staff roster, contracts and salary records

### Response Format
- Writes return `{ "message", "data" }`
- Errors return `{ "error" }`; validation errors add `details: [{ field, message }]`

### Security
Login compares plaintext credentials and hands back an opaque session marker.
No endpoint checks it.
"#,
    ),
    paths(
        crate::api::accounts::login,
        crate::api::accounts::list_users,

        crate::api::attendance::add_entry,
        crate::api::attendance::check_in,
        crate::api::attendance::check_out,
        crate::api::attendance::list_records,
        crate::api::attendance::today,

        crate::api::leave_request::submit_leave,
        crate::api::leave_request::leave_list,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::update_leave_status,
        crate::api::leave_request::cancel_leave,

        crate::api::employees::init_employees,
        crate::api::employees::list_employees,
        crate::api::employees::get_employee,
        crate::api::employees::create_employee,
        crate::api::employees::update_employee,
        crate::api::employees::delete_employee,
        crate::api::employees::add_document,

        crate::api::branches::init_branches,
        crate::api::branches::seed_staff_roles,
        crate::api::branches::list_branches,
        crate::api::branches::get_branch,
        crate::api::branches::add_entry,
        crate::api::branches::update_entry,
        crate::api::branches::delete_entry,

        crate::api::contracts::create_contract,
        crate::api::contracts::list_contracts,

        crate::api::salaries::record_salary,
        crate::api::salaries::list_salaries,

        crate::api::staff::list_staff,
        crate::api::staff::get_staff
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            UserSummary,
            AttendanceInput,
            AttendanceRecord,
            SubmitLeave,
            DecideLeave,
            CancelLeave,
            LeaveRequest,
            LeaveStatus,
            StatusChange,
            LeavePage,
            EmployeeInput,
            DocumentInput,
            Employee,
            EmployeeDocument,
            EntryInput,
            Branch,
            BranchEntry,
            BranchName,
            ContractInput,
            Contract,
            ContractType,
            SalaryInput,
            SalaryRecord,
            SalaryStatus,
            FieldError
        )
    ),
    tags(
        (name = "Auth", description = "Login and account listing"),
        (name = "Attendance", description = "Clock-in / clock-out ledger"),
        (name = "Leave", description = "Leave requests and review decisions"),
        (name = "Employee", description = "Employee directory"),
        (name = "Branch", description = "Branch role tables"),
        (name = "Contract", description = "Employment contracts"),
        (name = "Salary", description = "Salary payments"),
        (name = "Staff", description = "Read-only staff roster"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/api/attendance/checkin",
            "/api/attendance/checkout",
            "/api/leaves/{id}",
            "/api/branches/{branch}/{table}/{entry_id}",
            "/api/login",
        ] {
            assert!(paths.contains_key(path), "{path} missing from the OpenAPI document");
        }
    }
}
