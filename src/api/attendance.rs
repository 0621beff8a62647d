use actix_web::{HttpResponse, Responder, http::StatusCode, web};
use serde::Deserialize;
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::api::{blocking, written};
use crate::service::attendance::{AttendanceFilter, AttendanceLedger};
use crate::utils::validation::{
    non_blank, optional_date, rejected, required_clock_time, required_date, required_text,
};

const EMPLOYEE_REQUIRED: &str = "Employee ID is required";
const DATE_FORMAT: &str = "Date must be in YYYY-MM-DD format";
const CLOCK_IN_FORMAT: &str = "Clock In must be in HH:MM format";
const CLOCK_OUT_FORMAT: &str = "Clock Out must be in HH:MM format";

/// Body of every attendance write. Fields not used by an endpoint are ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AttendanceInput {
    #[schema(example = "E1")]
    pub employee_id: Option<String>,
    #[schema(example = "2025-01-01")]
    pub date: Option<String>,
    #[schema(example = "08:00")]
    pub clock_in: Option<String>,
    #[schema(example = "17:00")]
    pub clock_out: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AttendanceQuery {
    /// Exact employee id
    pub employee_id: Option<String>,
    /// Exact date, YYYY-MM-DD
    pub date: Option<String>,
    /// First date of an inclusive range
    pub start: Option<String>,
    /// Last date of an inclusive range
    pub end: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TodayQuery {
    pub employee_id: Option<String>,
}

/// Full log entry endpoint
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = AttendanceInput,
    responses(
        (status = 201, description = "Attendance log added", body = Object, example = json!({
            "message": "Attendance log added successfully",
            "data": {
                "id": "2b1c3d4e-0000-4000-8000-000000000001",
                "employee_id": "E1",
                "date": "2025-01-01",
                "clock_in": "08:00",
                "clock_out": "17:00",
                "created_at": "2025-01-01T06:00:00Z"
            }
        })),
        (status = 400, description = "Validation failed or session already open"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn add_entry(
    ledger: web::Data<AttendanceLedger>,
    payload: web::Json<AttendanceInput>,
) -> actix_web::Result<impl Responder> {
    let input = payload.into_inner();

    let fields = (
        required_text("employee_id", input.employee_id.as_deref(), EMPLOYEE_REQUIRED),
        required_date("date", input.date.as_deref(), DATE_FORMAT),
        required_clock_time("clock_in", input.clock_in.as_deref(), CLOCK_IN_FORMAT),
        required_clock_time("clock_out", input.clock_out.as_deref(), CLOCK_OUT_FORMAT),
    );
    let (employee_id, date, clock_in, clock_out) = match fields {
        (Ok(e), Ok(d), Ok(i), Ok(o)) => (e, d, i, o),
        (e, d, i, o) => return Err(rejected([e.err(), d.err(), i.err(), o.err()]).into()),
    };

    let record = blocking(move || ledger.record_entry(&employee_id, date, clock_in, clock_out)).await?;

    Ok(written(StatusCode::CREATED, "Attendance log added successfully", record))
}

/// Check-in endpoint
#[utoipa::path(
    post,
    path = "/api/attendance/checkin",
    request_body(
        content = AttendanceInput,
        description = "`employee_id`, `date` and `clock_in`; `clock_out` is ignored",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Checked in", body = Object, example = json!({
            "message": "Checked in successfully",
            "data": {
                "id": "2b1c3d4e-0000-4000-8000-000000000001",
                "employee_id": "E1",
                "date": "2025-01-01",
                "clock_in": "08:00",
                "clock_out": "00:00",
                "created_at": "2025-01-01T06:00:00Z"
            }
        })),
        (status = 400, description = "Validation failed or already checked in", body = Object, example = json!({
            "error": "Employee E1 is already checked in on 2025-01-01"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn check_in(
    ledger: web::Data<AttendanceLedger>,
    payload: web::Json<AttendanceInput>,
) -> actix_web::Result<impl Responder> {
    let input = payload.into_inner();

    let fields = (
        required_text("employee_id", input.employee_id.as_deref(), EMPLOYEE_REQUIRED),
        required_date("date", input.date.as_deref(), DATE_FORMAT),
        required_clock_time("clock_in", input.clock_in.as_deref(), CLOCK_IN_FORMAT),
    );
    let (employee_id, date, clock_in) = match fields {
        (Ok(e), Ok(d), Ok(i)) => (e, d, i),
        (e, d, i) => return Err(rejected([e.err(), d.err(), i.err()]).into()),
    };

    let record = blocking(move || ledger.check_in(&employee_id, date, clock_in)).await?;

    Ok(written(StatusCode::CREATED, "Checked in successfully", record))
}

/// Check-out endpoint, closes the latest open session
#[utoipa::path(
    post,
    path = "/api/attendance/checkout",
    request_body(
        content = AttendanceInput,
        description = "`employee_id`, `date` and `clock_out`; `clock_in` is ignored",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Checked out", body = Object, example = json!({
            "message": "Checked out successfully",
            "data": {
                "id": "2b1c3d4e-0000-4000-8000-000000000001",
                "employee_id": "E1",
                "date": "2025-01-01",
                "clock_in": "08:00",
                "clock_out": "17:00",
                "created_at": "2025-01-01T06:00:00Z"
            }
        })),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "No open session", body = Object, example = json!({
            "error": "No matching record found for check-out"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn check_out(
    ledger: web::Data<AttendanceLedger>,
    payload: web::Json<AttendanceInput>,
) -> actix_web::Result<impl Responder> {
    let input = payload.into_inner();

    let fields = (
        required_text("employee_id", input.employee_id.as_deref(), EMPLOYEE_REQUIRED),
        required_date("date", input.date.as_deref(), DATE_FORMAT),
        required_clock_time("clock_out", input.clock_out.as_deref(), CLOCK_OUT_FORMAT),
    );
    let (employee_id, date, clock_out) = match fields {
        (Ok(e), Ok(d), Ok(o)) => (e, d, o),
        (e, d, o) => return Err(rejected([e.err(), d.err(), o.err()]).into()),
    };

    let record = blocking(move || ledger.check_out(&employee_id, date, clock_out)).await?;

    Ok(written(StatusCode::OK, "Checked out successfully", record))
}

#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Matching records, newest first", body = [crate::model::attendance::AttendanceRecord]),
        (status = 400, description = "A date parameter is malformed"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn list_records(
    ledger: web::Data<AttendanceLedger>,
    query: web::Query<AttendanceQuery>,
) -> actix_web::Result<impl Responder> {
    let query = query.into_inner();

    let dates = (
        optional_date("date", query.date.as_deref()),
        optional_date("start", query.start.as_deref()),
        optional_date("end", query.end.as_deref()),
    );
    let filter = match dates {
        (Ok(date), Ok(from), Ok(to)) => AttendanceFilter {
            employee_id: non_blank(query.employee_id),
            date,
            from,
            to,
        },
        (d, s, e) => return Err(rejected([d.err(), s.err(), e.err()]).into()),
    };
    debug!(?filter, "Listing attendance");

    let records = blocking(move || ledger.list_records(&filter)).await?;
    Ok(HttpResponse::Ok().json(records))
}

#[utoipa::path(
    get,
    path = "/api/attendance/today",
    params(TodayQuery),
    responses(
        (status = 200, description = "Records dated today (UTC+02:00 by default)", body = [crate::model::attendance::AttendanceRecord]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn today(
    ledger: web::Data<AttendanceLedger>,
    query: web::Query<TodayQuery>,
) -> actix_web::Result<impl Responder> {
    let employee_id = non_blank(query.into_inner().employee_id);
    let records = blocking(move || ledger.today(employee_id)).await?;
    Ok(HttpResponse::Ok().json(records))
}
