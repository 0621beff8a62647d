use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::blocking;
use crate::service::staff::{self, StaffFilter};
use crate::store::DocumentStore;
use crate::utils::validation::non_blank;

#[derive(Debug, Deserialize, IntoParams)]
pub struct StaffQuery {
    pub branch: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/staff",
    params(StaffQuery),
    responses(
        (status = 200, description = "Roster entries matching every given filter", body = Object, example = json!([
            { "id": "S1", "name": "Alice", "branch": "Kigali", "role": "Plumber", "status": "active" }
        ]))
    ),
    tag = "Staff"
)]
pub async fn list_staff(
    store: web::Data<dyn DocumentStore>,
    query: web::Query<StaffQuery>,
) -> actix_web::Result<impl Responder> {
    let query = query.into_inner();
    let filter = StaffFilter {
        branch: non_blank(query.branch),
        role: non_blank(query.role),
        status: non_blank(query.status),
    };

    let roster = blocking(move || staff::list(store.get_ref(), &filter)).await?;
    Ok(HttpResponse::Ok().json(roster))
}

#[utoipa::path(
    get,
    path = "/api/staff/{id}",
    params(
        ("id" = String, Path, description = "Staff id")
    ),
    responses(
        (status = 200, description = "Roster entry with its full profile", body = Object),
        (status = 404, description = "Staff not found")
    ),
    tag = "Staff"
)]
pub async fn get_staff(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    let member = blocking(move || staff::get(store.get_ref(), &id)).await?;
    Ok(HttpResponse::Ok().json(member))
}
