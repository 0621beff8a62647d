use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde::Serialize;
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

use crate::store::StoreError;

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    #[schema(example = "employee_id")]
    pub field: String,
    #[schema(example = "Employee ID is required")]
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Display)]
pub enum HrError {
    #[display(fmt = "VALIDATION_ERROR")]
    Validation(Vec<FieldError>),

    /// An open attendance session already exists
    #[display(fmt = "{}", _0)]
    Conflict(String),

    /// Malformed request outside of field validation
    #[display(fmt = "{}", _0)]
    BadRequest(String),

    #[display(fmt = "{}", _0)]
    NotFound(String),

    #[display(fmt = "{}", _0)]
    Storage(StoreError),
}

impl HrError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        HrError::Validation(vec![FieldError::new(field, message)])
    }
}

impl std::error::Error for HrError {}

impl From<StoreError> for HrError {
    fn from(err: StoreError) -> Self {
        HrError::Storage(err)
    }
}

impl ResponseError for HrError {
    fn status_code(&self) -> StatusCode {
        match self {
            HrError::Validation(_) | HrError::Conflict(_) | HrError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            HrError::NotFound(_) => StatusCode::NOT_FOUND,
            HrError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            HrError::Validation(details) => json!({
                "error": "VALIDATION_ERROR",
                "details": details,
            }),
            HrError::Storage(e) => {
                error!(error = %e, "Storage failure");
                json!({ "error": "Internal Server Error" })
            }
            other => json!({ "error": other.to_string() }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

pub type HrResult<T> = Result<T, HrError>;
