use actix_web::{HttpResponse, Responder, http::StatusCode, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::{blocking, written};
use crate::error::HrError;
use crate::service::{
    clock::Clock,
    employees::{self, EmployeeFields},
};
use crate::store::DocumentStore;
use crate::utils::validation::non_blank;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct EmployeeInput {
    #[schema(example = "Jean Uwase")]
    pub name: Option<String>,
    #[schema(example = "jean.uwase@ayateke.com")]
    pub email: Option<String>,
    #[schema(example = "+250788000111")]
    pub tel: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
    #[schema(example = "Accountant")]
    pub role: Option<String>,
    #[schema(example = "Kigali")]
    pub branch: Option<String>,
    pub education: Option<String>,
    pub work_experience: Option<String>,
}

impl From<EmployeeInput> for EmployeeFields {
    fn from(input: EmployeeInput) -> Self {
        Self {
            name: input.name,
            email: input.email,
            tel: input.tel,
            address: input.address,
            gender: input.gender,
            role: input.role,
            branch: input.branch,
            education: input.education,
            work_experience: input.work_experience,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DocumentInput {
    #[schema(example = "National ID")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    #[schema(example = "pdf")]
    pub doc_type: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/employees/init",
    responses(
        (status = 200, description = "Employee collection ensured", body = Object, example = json!({
            "message": "Employees initialized",
            "data": []
        }))
    ),
    tag = "Employee"
)]
pub async fn init_employees(
    store: web::Data<dyn DocumentStore>,
) -> actix_web::Result<impl Responder> {
    let list = blocking(move || employees::init(store.get_ref())).await?;
    Ok(written(StatusCode::OK, "Employees initialized", list))
}

#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees", body = [crate::model::employee::Employee])
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    store: web::Data<dyn DocumentStore>,
) -> actix_web::Result<impl Responder> {
    let list = blocking(move || employees::list(store.get_ref())).await?;
    Ok(HttpResponse::Ok().json(list))
}

#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(
        ("id" = String, Path, description = "Employee id")
    ),
    responses(
        (status = 200, description = "Employee", body = crate::model::employee::Employee),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    let employee = blocking(move || employees::get(store.get_ref(), &id)).await?;
    Ok(HttpResponse::Ok().json(employee))
}

#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = EmployeeInput,
    responses(
        (status = 201, description = "Employee added", body = Object, example = json!({
            "message": "Employee added",
            "data": {
                "id": "lx2k9f3ab12cd",
                "name": "Jean Uwase",
                "email": "",
                "tel": "",
                "address": "",
                "gender": "",
                "role": "",
                "branch": "Kigali",
                "education": "",
                "work_experience": "",
                "documents": []
            }
        })),
        (status = 400, description = "Name missing")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    store: web::Data<dyn DocumentStore>,
    payload: web::Json<EmployeeInput>,
) -> actix_web::Result<impl Responder> {
    let fields = EmployeeFields::from(payload.into_inner());
    let employee = blocking(move || employees::add(store.get_ref(), fields)).await?;
    Ok(written(StatusCode::CREATED, "Employee added", employee))
}

#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(
        ("id" = String, Path, description = "Employee id")
    ),
    request_body(
        content = EmployeeInput,
        description = "Only the fields present are changed"
    ),
    responses(
        (status = 200, description = "Employee updated"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
    payload: web::Json<EmployeeInput>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    let fields = EmployeeFields::from(payload.into_inner());
    let employee = blocking(move || employees::update(store.get_ref(), &id, fields)).await?;
    Ok(written(StatusCode::OK, "Employee updated", employee))
}

#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(
        ("id" = String, Path, description = "Employee id")
    ),
    responses(
        (status = 200, description = "Employee removed"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    let removed = blocking(move || employees::remove(store.get_ref(), &id)).await?;
    Ok(written(StatusCode::OK, "Employee deleted", removed))
}

/// Records document metadata; the file itself is not stored here.
#[utoipa::path(
    post,
    path = "/api/employees/{id}/documents",
    params(
        ("id" = String, Path, description = "Employee id")
    ),
    request_body = DocumentInput,
    responses(
        (status = 201, description = "Document attached, returns all documents", body = [crate::model::employee::EmployeeDocument]),
        (status = 400, description = "Name missing"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn add_document(
    store: web::Data<dyn DocumentStore>,
    clock: web::Data<dyn Clock>,
    path: web::Path<String>,
    payload: web::Json<DocumentInput>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    let input = payload.into_inner();

    let Some(name) = non_blank(input.name) else {
        return Err(HrError::invalid("name", "Document name is required").into());
    };
    let doc_type = non_blank(input.doc_type);

    let documents = blocking(move || {
        employees::add_document(store.get_ref(), clock.get_ref(), &id, name, doc_type)
    })
    .await?;
    Ok(written(StatusCode::CREATED, "Document uploaded", documents))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::{Value, json};

    use crate::test_support::{TestState, test_app};

    #[actix_web::test]
    async fn employee_lifecycle() {
        let state = TestState::new();
        let app = test::init_service(test_app(&state)).await;

        let req = test::TestRequest::post()
            .uri("/api/employees")
            .set_json(json!({ "name": "Jean Uwase", "branch": "Kigali" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let id = body["data"]["id"].as_str().unwrap().to_string();
        assert_eq!(body["data"]["email"], "");

        let req = test::TestRequest::put()
            .uri(&format!("/api/employees/{id}"))
            .set_json(json!({ "role": "Accountant" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["role"], "Accountant");
        assert_eq!(body["data"]["branch"], "Kigali");

        let req = test::TestRequest::post()
            .uri(&format!("/api/employees/{id}/documents"))
            .set_json(json!({ "name": "CV" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"][0]["type"], "Unknown");

        let req = test::TestRequest::delete().uri(&format!("/api/employees/{id}")).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri(&format!("/api/employees/{id}")).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Employee not found");
    }

    #[actix_web::test]
    async fn name_is_required() {
        let state = TestState::new();
        let app = test::init_service(test_app(&state)).await;

        let req = test::TestRequest::post()
            .uri("/api/employees")
            .set_json(json!({ "email": "nobody@ayateke.com" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }
}
