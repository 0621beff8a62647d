use std::str::FromStr;

use actix_web::{HttpResponse, Responder, http::StatusCode, web};
use serde::Deserialize;
use tracing::{info, warn};
use utoipa::{IntoParams, ToSchema};

use crate::api::{blocking, written};
use crate::error::{FieldError, HrError};
use crate::model::leave_request::LeaveStatus;
use crate::service::leave::{
    DEFAULT_LIMIT, DEFAULT_PAGE, LeaveFilter, LeaveWorkflow, NewLeaveRequest,
};
use crate::utils::validation::{FieldResult, non_blank, rejected, required_date, required_text};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SubmitLeave {
    #[schema(example = "E1")]
    pub employee_id: Option<String>,
    #[serde(rename = "type")]
    #[schema(example = "annual")]
    pub leave_type: Option<String>,
    #[schema(example = "2025-02-01")]
    pub start_date: Option<String>,
    #[schema(example = "2025-02-05")]
    pub end_date: Option<String>,
    #[schema(example = "Family visit")]
    pub reason: Option<String>,
    #[schema(example = "E1")]
    pub submitted_by: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct LeaveQuery {
    /// Filter by employee ID
    pub employee_id: Option<String>,
    /// pending, approved or rejected (any case)
    pub status: Option<String>,
    /// Pagination page number (start with 1)
    pub page: Option<String>,
    /// Items per page
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DecideLeave {
    #[schema(example = "approved")]
    pub status: Option<String>,
    #[schema(example = "MGR1")]
    pub changed_by: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CancelLeave {
    #[schema(example = "E1")]
    pub deleted_by: Option<String>,
}

fn positive(field: &str, value: Option<&str>, default: u32, message: &str) -> FieldResult<u32> {
    match value.map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => raw
            .parse::<u32>()
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| FieldError::new(field, message)),
    }
}

fn status_filter(value: Option<String>) -> FieldResult<Option<LeaveStatus>> {
    match non_blank(value) {
        None => Ok(None),
        Some(raw) => LeaveStatus::from_str(&raw)
            .map(Some)
            .map_err(|_| FieldError::new("status", "Invalid status")),
    }
}

/* =========================
Submit leave request
========================= */
#[utoipa::path(
    post,
    path = "/api/leaves",
    request_body(
        content = SubmitLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Leave request submitted", body = Object, example = json!({
            "message": "Leave request submitted successfully",
            "data": {
                "id": "4d7f5b2e-8a51-4c55-b0f4-3b8f7b0e2c11",
                "employee_id": "E1",
                "type": "annual",
                "start_date": "2025-02-01",
                "end_date": "2025-02-05",
                "reason": "Family visit",
                "submitted_by": "E1",
                "status": "pending",
                "status_history": [
                    { "status": "pending", "changed_by": "E1", "changed_at": "2025-01-15T08:00:00Z" }
                ],
                "deleted": false,
                "created_at": "2025-01-15T08:00:00Z"
            }
        })),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "error": "VALIDATION_ERROR",
            "details": [{ "field": "type", "message": "Leave type is required" }]
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Leave"
)]
pub async fn submit_leave(
    workflow: web::Data<LeaveWorkflow>,
    payload: web::Json<SubmitLeave>,
) -> actix_web::Result<impl Responder> {
    let input = payload.into_inner();

    let fields = (
        required_text("employee_id", input.employee_id.as_deref(), "Employee ID is required"),
        required_text("type", input.leave_type.as_deref(), "Leave type is required"),
        required_date("start_date", input.start_date.as_deref(), "Start date must be a valid date"),
        required_date("end_date", input.end_date.as_deref(), "End date must be a valid date"),
        required_text("submitted_by", input.submitted_by.as_deref(), "Submitter ID is required"),
    );
    let request = match fields {
        (Ok(employee_id), Ok(leave_type), Ok(start_date), Ok(end_date), Ok(submitted_by)) => {
            NewLeaveRequest {
                employee_id,
                leave_type,
                start_date,
                end_date,
                reason: input.reason,
                submitted_by,
            }
        }
        (e, t, s, d, b) => {
            return Err(rejected([e.err(), t.err(), s.err(), d.err(), b.err()]).into());
        }
    };

    let leave = blocking(move || workflow.submit(request)).await?;

    Ok(written(StatusCode::CREATED, "Leave request submitted successfully", leave))
}

/* =========================
List leave requests
========================= */
#[utoipa::path(
    get,
    path = "/api/leaves",
    params(LeaveQuery),
    responses(
        (status = 200, description = "One page of non-deleted requests, newest first", body = crate::service::leave::LeavePage),
        (status = 400, description = "Invalid filter or pagination value"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Leave"
)]
pub async fn leave_list(
    workflow: web::Data<LeaveWorkflow>,
    query: web::Query<LeaveQuery>,
) -> actix_web::Result<impl Responder> {
    let query = query.into_inner();

    let params = (
        status_filter(query.status),
        positive("page", query.page.as_deref(), DEFAULT_PAGE, "Page must be a positive integer"),
        positive("limit", query.limit.as_deref(), DEFAULT_LIMIT, "Limit must be a positive integer"),
    );
    let (filter, page, limit) = match params {
        (Ok(status), Ok(page), Ok(limit)) => (
            LeaveFilter {
                employee_id: non_blank(query.employee_id),
                status,
            },
            page,
            limit,
        ),
        (s, p, l) => return Err(rejected([s.err(), p.err(), l.err()]).into()),
    };

    let page = blocking(move || workflow.list(&filter, page, limit)).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[utoipa::path(
    get,
    path = "/api/leaves/{id}",
    params(
        ("id" = String, Path, description = "Leave request id")
    ),
    responses(
        (status = 200, description = "Leave request", body = crate::model::leave_request::LeaveRequest),
        (status = 404, description = "Not found or cancelled", body = Object, example = json!({
            "error": "Leave request not found"
        }))
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    workflow: web::Data<LeaveWorkflow>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    let leave = blocking(move || workflow.get(&id)).await?;
    Ok(HttpResponse::Ok().json(leave))
}

/* =========================
Approve / reject leave
========================= */
#[utoipa::path(
    patch,
    path = "/api/leaves/{id}",
    params(
        ("id" = String, Path, description = "Leave request id")
    ),
    request_body = DecideLeave,
    responses(
        (status = 200, description = "Decision recorded", body = Object, example = json!({
            "message": "Leave approved",
            "data": {
                "id": "4d7f5b2e-8a51-4c55-b0f4-3b8f7b0e2c11",
                "status": "approved",
                "status_history": [
                    { "status": "pending", "changed_by": "E1", "changed_at": "2025-01-15T08:00:00Z" },
                    { "status": "approved", "changed_by": "MGR1", "changed_at": "2025-01-20T09:30:00Z" }
                ]
            }
        })),
        (status = 400, description = "Invalid status or missing reviewer", body = Object, example = json!({
            "error": "Invalid status value"
        })),
        (status = 404, description = "Leave request not found")
    ),
    tag = "Leave"
)]
pub async fn update_leave_status(
    workflow: web::Data<LeaveWorkflow>,
    path: web::Path<String>,
    payload: web::Json<DecideLeave>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    let input = payload.into_inner();

    let status = input
        .status
        .as_deref()
        .and_then(|s| LeaveStatus::from_str(s.trim()).ok())
        .filter(|s| s.is_decision());
    let Some(status) = status else {
        warn!(leave_id = %id, status = ?input.status, "Rejected leave status");
        return Err(HrError::BadRequest("Invalid status value".to_string()).into());
    };
    let Some(changed_by) = non_blank(input.changed_by) else {
        return Err(HrError::BadRequest("Missing changed_by field".to_string()).into());
    };

    let leave = blocking(move || workflow.update_status(&id, status, &changed_by)).await?;

    Ok(written(StatusCode::OK, &format!("Leave {status}"), leave))
}

/* =========================
Cancel (soft delete) leave
========================= */
#[utoipa::path(
    delete,
    path = "/api/leaves/{id}",
    params(
        ("id" = String, Path, description = "Leave request id")
    ),
    request_body = CancelLeave,
    responses(
        (status = 200, description = "Request hidden from listings, kept on file", body = Object, example = json!({
            "message": "Leave request cancelled",
            "data": {
                "id": "4d7f5b2e-8a51-4c55-b0f4-3b8f7b0e2c11",
                "deleted": true,
                "deleted_by": "E1",
                "deleted_at": "2025-01-16T08:00:00Z"
            }
        })),
        (status = 400, description = "Missing deleted_by", body = Object, example = json!({
            "error": "Missing deleted_by field"
        })),
        (status = 404, description = "Leave request not found")
    ),
    tag = "Leave"
)]
pub async fn cancel_leave(
    workflow: web::Data<LeaveWorkflow>,
    path: web::Path<String>,
    payload: Option<web::Json<CancelLeave>>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    let deleted_by = payload.and_then(|p| non_blank(p.into_inner().deleted_by));

    let Some(deleted_by) = deleted_by else {
        return Err(HrError::BadRequest("Missing deleted_by field".to_string()).into());
    };

    let leave = blocking(move || workflow.soft_delete(&id, &deleted_by)).await?;
    info!(leave_id = %leave.id, "Leave cancelled via API");

    Ok(written(StatusCode::OK, "Leave request cancelled", leave))
}
