use std::str::FromStr;

use actix_web::{HttpResponse, Responder, http::StatusCode, web};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::api::{blocking, written};
use crate::error::FieldError;
use crate::model::contract::ContractType;
use crate::service::{
    clock::Clock,
    contracts::{self, ContractFilter, NewContract},
};
use crate::store::DocumentStore;
use crate::utils::validation::{FieldResult, non_blank, rejected, required_date, required_text};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ContractInput {
    #[schema(example = "E1")]
    pub employee_id: Option<String>,
    #[serde(rename = "type")]
    #[schema(example = "permanent")]
    pub contract_type: Option<String>,
    #[schema(example = "2025-01-01")]
    pub start_date: Option<String>,
    #[schema(example = "2025-12-31")]
    pub end_date: Option<String>,
    #[schema(example = "HR1")]
    pub signed_by: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ContractQuery {
    pub employee_id: Option<String>,
    /// permanent, temporary or intern
    #[serde(rename = "type")]
    pub contract_type: Option<String>,
}

fn contract_type(value: Option<&str>) -> FieldResult<ContractType> {
    value
        .map(str::trim)
        .and_then(|t| ContractType::from_str(t).ok())
        .ok_or_else(|| FieldError::new("type", "Type must be permanent, temporary or intern"))
}

#[utoipa::path(
    post,
    path = "/api/contracts",
    request_body = ContractInput,
    responses(
        (status = 201, description = "Contract added", body = Object, example = json!({
            "message": "Contract added successfully",
            "data": {
                "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
                "employee_id": "E1",
                "type": "permanent",
                "start_date": "2025-01-01",
                "end_date": "2025-12-31",
                "signed_by": "HR1",
                "status": "active",
                "created_at": "2025-01-01T06:00:00Z"
            }
        })),
        (status = 400, description = "Validation failed")
    ),
    tag = "Contract"
)]
pub async fn create_contract(
    store: web::Data<dyn DocumentStore>,
    clock: web::Data<dyn Clock>,
    payload: web::Json<ContractInput>,
) -> actix_web::Result<impl Responder> {
    let input = payload.into_inner();

    let fields = (
        required_text("employee_id", input.employee_id.as_deref(), "Employee ID is required"),
        contract_type(input.contract_type.as_deref()),
        required_date("start_date", input.start_date.as_deref(), "Start date must be a valid date"),
        required_date("end_date", input.end_date.as_deref(), "End date must be a valid date"),
        required_text("signed_by", input.signed_by.as_deref(), "Signed by is required"),
    );
    let contract = match fields {
        (Ok(employee_id), Ok(contract_type), Ok(start_date), Ok(end_date), Ok(signed_by)) => {
            NewContract {
                employee_id,
                contract_type,
                start_date,
                end_date,
                signed_by,
            }
        }
        (e, t, s, d, b) => {
            return Err(rejected([e.err(), t.err(), s.err(), d.err(), b.err()]).into());
        }
    };

    let contract =
        blocking(move || contracts::add(store.get_ref(), clock.get_ref(), contract)).await?;
    Ok(written(StatusCode::CREATED, "Contract added successfully", contract))
}

#[utoipa::path(
    get,
    path = "/api/contracts",
    params(ContractQuery),
    responses(
        (status = 200, description = "Matching contracts, newest first", body = [crate::model::contract::Contract]),
        (status = 400, description = "Unknown contract type")
    ),
    tag = "Contract"
)]
pub async fn list_contracts(
    store: web::Data<dyn DocumentStore>,
    query: web::Query<ContractQuery>,
) -> actix_web::Result<impl Responder> {
    let query = query.into_inner();

    let contract_type = match non_blank(query.contract_type) {
        None => None,
        Some(raw) => Some(contract_type(Some(&raw)).map_err(|e| rejected([Some(e)]))?),
    };
    let filter = ContractFilter {
        employee_id: non_blank(query.employee_id),
        contract_type,
    };

    let list = blocking(move || contracts::list(store.get_ref(), &filter)).await?;
    Ok(HttpResponse::Ok().json(list))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::{Value, json};

    use crate::test_support::{TestState, test_app};

    #[actix_web::test]
    async fn contracts_are_created_active_and_filtered_by_type() {
        let state = TestState::new();
        let app = test::init_service(test_app(&state)).await;

        for kind in ["permanent", "intern"] {
            let req = test::TestRequest::post()
                .uri("/api/contracts")
                .set_json(json!({
                    "employee_id": "E1",
                    "type": kind,
                    "start_date": "2025-01-01",
                    "end_date": "2025-12-31",
                    "signed_by": "HR1"
                }))
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body["data"]["status"], "active");
        }

        let req = test::TestRequest::get().uri("/api/contracts?type=intern").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["type"], "intern");
    }

    #[actix_web::test]
    async fn unknown_type_is_rejected() {
        let state = TestState::new();
        let app = test::init_service(test_app(&state)).await;

        let req = test::TestRequest::post()
            .uri("/api/contracts")
            .set_json(json!({
                "employee_id": "E1",
                "type": "freelance",
                "start_date": "2025-01-01",
                "end_date": "2025-12-31",
                "signed_by": "HR1"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["details"][0]["field"], "type");
    }
}
