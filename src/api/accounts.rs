use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::blocking;
use crate::error::HrError;
use crate::service::accounts;
use crate::store::DocumentStore;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "admin@ayateke.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "admin123")]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Opaque session marker, not verified by any endpoint
    #[schema(example = "session-3f1c0a3e-5b8d-4f54-9a43-1d7c2b9e8f60")]
    pub token: String,
    #[schema(example = "admin")]
    pub role: String,
    #[schema(example = "admin@ayateke.com")]
    pub email: String,
}

/// Login endpoint, rate limited per client IP
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials matched", body = LoginResponse),
        (status = 400, description = "Email or password missing"),
        (status = 401, description = "Invalid credentials", body = Object, example = json!({
            "error": "Invalid credentials"
        })),
        (status = 429, description = "Too many login attempts")
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(store, payload),
    fields(email = %payload.email)
)]
pub async fn login(
    store: web::Data<dyn DocumentStore>,
    payload: web::Json<LoginRequest>,
) -> actix_web::Result<impl Responder> {
    info!("Login request received");

    let LoginRequest { email, password } = payload.into_inner();
    if email.trim().is_empty() || password.is_empty() {
        info!("Validation failed: empty email or password");
        return Err(HrError::BadRequest("Email and password are required".to_string()).into());
    }

    let account =
        blocking(move || accounts::authenticate(store.get_ref(), email.trim(), &password)).await?;

    let Some(account) = account else {
        info!("Invalid credentials");
        return Ok(HttpResponse::Unauthorized().json(json!({ "error": "Invalid credentials" })));
    };

    info!(role = %account.role, "Login successful");
    Ok(HttpResponse::Ok().json(LoginResponse {
        token: format!("session-{}", Uuid::new_v4()),
        role: account.role,
        email: account.email,
    }))
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Accounts without passwords", body = [crate::model::user::UserSummary])
    ),
    tag = "Auth"
)]
pub async fn list_users(store: web::Data<dyn DocumentStore>) -> actix_web::Result<impl Responder> {
    let users = blocking(move || accounts::list_users(store.get_ref())).await?;
    Ok(HttpResponse::Ok().json(users))
}
