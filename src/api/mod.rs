pub mod accounts;
pub mod attendance;
pub mod branches;
pub mod contracts;
pub mod employees;
pub mod leave_request;
pub mod salaries;
pub mod staff;

use actix_web::{HttpResponse, http::StatusCode, web};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::error::{HrError, HrResult};
use crate::store::StoreError;

/// Runs a store-backed operation on actix's blocking pool.
pub(crate) async fn blocking<F, T>(operation: F) -> HrResult<T>
where
    F: FnOnce() -> HrResult<T> + Send + 'static,
    T: Send + 'static,
{
    web::block(operation).await.map_err(|e| {
        error!(error = %e, "Blocking store task failed");
        HrError::Storage(StoreError::Unavailable)
    })?
}

/// `{message, data}` envelope used by every write endpoint.
pub(crate) fn written<T: Serialize>(status: StatusCode, message: &str, data: T) -> HttpResponse {
    HttpResponse::build(status).json(json!({
        "message": message,
        "data": data,
    }))
}
