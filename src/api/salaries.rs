use std::str::FromStr;

use actix_web::{HttpResponse, Responder, http::StatusCode, web};
use serde::Deserialize;
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::api::{blocking, written};
use crate::error::FieldError;
use crate::model::salary::SalaryStatus;
use crate::service::{
    clock::Clock,
    salaries::{self, NewSalary, SalaryFilter},
};
use crate::store::DocumentStore;
use crate::utils::validation::{FieldResult, non_blank, rejected, required_text};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SalaryInput {
    #[schema(example = "E1")]
    pub employee_id: Option<String>,
    /// Number, or a string holding one
    #[schema(value_type = f64, example = 350000)]
    pub amount: Option<Value>,
    #[schema(example = "2025-01")]
    pub month: Option<String>,
    #[schema(example = "ACC1")]
    pub paid_by: Option<String>,
    /// paid (default) or pending
    #[schema(example = "paid")]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SalaryQuery {
    pub employee_id: Option<String>,
    pub month: Option<String>,
}

fn amount(value: Option<&Value>) -> FieldResult<f64> {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|a| a.is_finite())
        .ok_or_else(|| FieldError::new("amount", "Amount must be a number"))
}

fn status(value: Option<String>) -> FieldResult<SalaryStatus> {
    match non_blank(value) {
        None => Ok(SalaryStatus::default()),
        Some(raw) => SalaryStatus::from_str(&raw).map_err(|_| FieldError::new("status", "Invalid status")),
    }
}

#[utoipa::path(
    post,
    path = "/api/salaries",
    request_body = SalaryInput,
    responses(
        (status = 201, description = "Salary recorded", body = Object, example = json!({
            "message": "Salary recorded successfully",
            "data": {
                "id": "8e1f0c3a-6a3e-4c0f-9a77-2b0d1c4e5f60",
                "employee_id": "E1",
                "amount": 350000.0,
                "month": "2025-01",
                "paid_by": "ACC1",
                "status": "paid",
                "created_at": "2025-01-31T10:00:00Z"
            }
        })),
        (status = 400, description = "Validation failed")
    ),
    tag = "Salary"
)]
pub async fn record_salary(
    store: web::Data<dyn DocumentStore>,
    clock: web::Data<dyn Clock>,
    payload: web::Json<SalaryInput>,
) -> actix_web::Result<impl Responder> {
    let input = payload.into_inner();

    let fields = (
        required_text("employee_id", input.employee_id.as_deref(), "Employee ID is required"),
        amount(input.amount.as_ref()),
        required_text("month", input.month.as_deref(), "Month must be a string"),
        required_text("paid_by", input.paid_by.as_deref(), "Paid by is required"),
        status(input.status),
    );
    let salary = match fields {
        (Ok(employee_id), Ok(amount), Ok(month), Ok(paid_by), Ok(status)) => NewSalary {
            employee_id,
            amount,
            month,
            paid_by,
            status,
        },
        (e, a, m, p, s) => {
            return Err(rejected([e.err(), a.err(), m.err(), p.err(), s.err()]).into());
        }
    };

    let record = blocking(move || salaries::record(store.get_ref(), clock.get_ref(), salary)).await?;
    Ok(written(StatusCode::CREATED, "Salary recorded successfully", record))
}

#[utoipa::path(
    get,
    path = "/api/salaries",
    params(SalaryQuery),
    responses(
        (status = 200, description = "Matching salary records, newest first", body = [crate::model::salary::SalaryRecord])
    ),
    tag = "Salary"
)]
pub async fn list_salaries(
    store: web::Data<dyn DocumentStore>,
    query: web::Query<SalaryQuery>,
) -> actix_web::Result<impl Responder> {
    let query = query.into_inner();
    let filter = SalaryFilter {
        employee_id: non_blank(query.employee_id),
        month: non_blank(query.month),
    };

    let list = blocking(move || salaries::list(store.get_ref(), &filter)).await?;
    Ok(HttpResponse::Ok().json(list))
}
