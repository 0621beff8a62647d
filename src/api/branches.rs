use actix_web::{HttpResponse, Responder, http::StatusCode, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::{blocking, written};
use crate::service::branches::{self, EntryFields};
use crate::store::DocumentStore;

/// `role` applies to `staff` rows only.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct EntryInput {
    #[schema(example = "Accountant")]
    pub role: Option<String>,
    #[schema(example = "Eric Mugisha")]
    pub name: Option<String>,
}

impl From<EntryInput> for EntryFields {
    fn from(input: EntryInput) -> Self {
        Self {
            role: input.role,
            name: input.name,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/branches/init",
    responses(
        (status = 200, description = "Every branch exists", body = Object, example = json!({
            "message": "Branches initialized",
            "data": [{ "branch": "Gatsibo", "staff": [], "schemeManagers": [], "plumbers": [] }]
        }))
    ),
    tag = "Branch"
)]
pub async fn init_branches(
    store: web::Data<dyn DocumentStore>,
) -> actix_web::Result<impl Responder> {
    let data = blocking(move || branches::init(store.get_ref())).await?;
    Ok(written(StatusCode::OK, "Branches initialized", data))
}

#[utoipa::path(
    post,
    path = "/api/branches/seed-staff-roles",
    responses(
        (status = 200, description = "Standard role slots added where missing")
    ),
    tag = "Branch"
)]
pub async fn seed_staff_roles(
    store: web::Data<dyn DocumentStore>,
) -> actix_web::Result<impl Responder> {
    let data = blocking(move || branches::seed_staff_roles(store.get_ref())).await?;
    Ok(written(StatusCode::OK, "Staff roles seeded", data))
}

#[utoipa::path(
    get,
    path = "/api/branches",
    responses(
        (status = 200, description = "All branches", body = [crate::model::branch::Branch])
    ),
    tag = "Branch"
)]
pub async fn list_branches(
    store: web::Data<dyn DocumentStore>,
) -> actix_web::Result<impl Responder> {
    let data = blocking(move || branches::list(store.get_ref())).await?;
    Ok(HttpResponse::Ok().json(data))
}

#[utoipa::path(
    get,
    path = "/api/branches/{branch}",
    params(
        ("branch" = String, Path, description = "Gatsibo, Kirehe or Kigali")
    ),
    responses(
        (status = 200, description = "Branch tables", body = crate::model::branch::Branch),
        (status = 404, description = "Branch not found")
    ),
    tag = "Branch"
)]
pub async fn get_branch(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let name = path.into_inner();
    let branch = blocking(move || branches::get(store.get_ref(), &name)).await?;
    Ok(HttpResponse::Ok().json(branch))
}

#[utoipa::path(
    post,
    path = "/api/branches/{branch}/{table}",
    params(
        ("branch" = String, Path, description = "Gatsibo, Kirehe or Kigali"),
        ("table" = String, Path, description = "staff, schemeManagers or plumbers")
    ),
    request_body = EntryInput,
    responses(
        (status = 201, description = "Entry added", body = crate::model::branch::BranchEntry),
        (status = 400, description = "Unknown branch or table, or missing role/name", body = Object, example = json!({
            "error": "Role is required"
        }))
    ),
    tag = "Branch"
)]
pub async fn add_entry(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<(String, String)>,
    payload: web::Json<EntryInput>,
) -> actix_web::Result<impl Responder> {
    let (branch, table) = path.into_inner();
    let fields = EntryFields::from(payload.into_inner());

    let entry =
        blocking(move || branches::add_entry(store.get_ref(), &branch, &table, fields)).await?;
    Ok(written(StatusCode::CREATED, "Entry added", entry))
}

#[utoipa::path(
    put,
    path = "/api/branches/{branch}/{table}/{entry_id}",
    params(
        ("branch" = String, Path, description = "Gatsibo, Kirehe or Kigali"),
        ("table" = String, Path, description = "staff, schemeManagers or plumbers"),
        ("entry_id" = String, Path, description = "Entry id")
    ),
    request_body = EntryInput,
    responses(
        (status = 200, description = "Entry updated", body = crate::model::branch::BranchEntry),
        (status = 400, description = "Unknown branch or table"),
        (status = 404, description = "Entry not found")
    ),
    tag = "Branch"
)]
pub async fn update_entry(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<(String, String, String)>,
    payload: web::Json<EntryInput>,
) -> actix_web::Result<impl Responder> {
    let (branch, table, entry_id) = path.into_inner();
    let fields = EntryFields::from(payload.into_inner());

    let entry = blocking(move || {
        branches::update_entry(store.get_ref(), &branch, &table, &entry_id, fields)
    })
    .await?;
    Ok(written(StatusCode::OK, "Entry updated", entry))
}

#[utoipa::path(
    delete,
    path = "/api/branches/{branch}/{table}/{entry_id}",
    params(
        ("branch" = String, Path, description = "Gatsibo, Kirehe or Kigali"),
        ("table" = String, Path, description = "staff, schemeManagers or plumbers"),
        ("entry_id" = String, Path, description = "Entry id")
    ),
    responses(
        (status = 200, description = "Entry deleted", body = crate::model::branch::BranchEntry),
        (status = 400, description = "Unknown branch or table"),
        (status = 404, description = "Entry not found")
    ),
    tag = "Branch"
)]
pub async fn delete_entry(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<(String, String, String)>,
) -> actix_web::Result<impl Responder> {
    let (branch, table, entry_id) = path.into_inner();

    let removed = blocking(move || {
        branches::delete_entry(store.get_ref(), &branch, &table, &entry_id)
    })
    .await?;
    Ok(written(StatusCode::OK, "Entry deleted", removed))
}
