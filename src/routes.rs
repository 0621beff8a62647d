use crate::{
    api::{accounts, attendance, branches, contracts, employees, leave_request, salaries, staff},
    config::Config,
    service::{attendance::AttendanceLedger, clock::Clock, leave::LeaveWorkflow},
    store::DocumentStore,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{
    HttpRequest, HttpResponse, error,
    web::{self, Data},
};
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

/// Shared handles every worker gets a clone of.
#[derive(Clone)]
pub struct AppData {
    store: Data<dyn DocumentStore>,
    clock: Data<dyn Clock>,
    ledger: Data<AttendanceLedger>,
    leave: Data<LeaveWorkflow>,
}

impl AppData {
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            ledger: Data::new(AttendanceLedger::new(store.clone(), clock.clone())),
            leave: Data::new(LeaveWorkflow::new(store.clone(), clock.clone())),
            store: Data::from(store),
            clock: Data::from(clock),
        }
    }

    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.store.clone())
            .app_data(self.clock.clone())
            .app_data(self.ledger.clone())
            .app_data(self.leave.clone());
    }
}

fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "Rejected JSON body");
    let body = json!({ "error": err.to_string() });
    error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

fn query_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "Rejected query string");
    let body = json!({ "error": err.to_string() });
    error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

// Per-route limiter keyed by peer IP
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        60_000 / requests_per_min as u64
    };
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .unwrap_or_else(|| {
            warn!(requests_per_min, "Invalid login rate limit, using governor defaults");
            GovernorConfig::default()
        });
    Governor::new(&cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error));

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::resource("/login")
                    .wrap(build_limiter(config.rate_login_per_min))
                    .route(web::post().to(accounts::login)),
            )
            .service(web::resource("/users").route(web::get().to(accounts::list_users)))
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(
                        web::resource("")
                            .route(web::post().to(attendance::add_entry))
                            .route(web::get().to(attendance::list_records)),
                    )
                    .service(web::resource("/checkin").route(web::post().to(attendance::check_in)))
                    // PUT is kept for older clients
                    .service(
                        web::resource("/checkout")
                            .route(web::post().to(attendance::check_out))
                            .route(web::put().to(attendance::check_out)),
                    )
                    .service(web::resource("/today").route(web::get().to(attendance::today))),
            )
            .service(
                web::scope("/leaves")
                    // /leaves
                    .service(
                        web::resource("")
                            .route(web::post().to(leave_request::submit_leave))
                            .route(web::get().to(leave_request::leave_list)),
                    )
                    // /leaves/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(leave_request::get_leave))
                            .route(web::patch().to(leave_request::update_leave_status))
                            .route(web::delete().to(leave_request::cancel_leave)),
                    ),
            )
            .service(
                web::scope("/employees")
                    .service(web::resource("/init").route(web::post().to(employees::init_employees)))
                    .service(
                        web::resource("")
                            .route(web::get().to(employees::list_employees))
                            .route(web::post().to(employees::create_employee)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employees::get_employee))
                            .route(web::put().to(employees::update_employee))
                            .route(web::delete().to(employees::delete_employee)),
                    )
                    .service(
                        web::resource("/{id}/documents")
                            .route(web::post().to(employees::add_document)),
                    ),
            )
            .service(
                web::scope("/contracts").service(
                    web::resource("")
                        .route(web::post().to(contracts::create_contract))
                        .route(web::get().to(contracts::list_contracts)),
                ),
            )
            .service(
                web::scope("/salaries").service(
                    web::resource("")
                        .route(web::post().to(salaries::record_salary))
                        .route(web::get().to(salaries::list_salaries)),
                ),
            )
            .service(
                web::scope("/staff")
                    .service(web::resource("").route(web::get().to(staff::list_staff)))
                    .service(web::resource("/{id}").route(web::get().to(staff::get_staff))),
            )
            .service(
                web::scope("/branches")
                    .service(web::resource("/init").route(web::post().to(branches::init_branches)))
                    .service(
                        web::resource("/seed-staff-roles")
                            .route(web::post().to(branches::seed_staff_roles)),
                    )
                    .service(web::resource("").route(web::get().to(branches::list_branches)))
                    .service(web::resource("/{branch}").route(web::get().to(branches::get_branch)))
                    .service(
                        web::resource("/{branch}/{table}")
                            .route(web::post().to(branches::add_entry)),
                    )
                    .service(
                        web::resource("/{branch}/{table}/{entry_id}")
                            .route(web::put().to(branches::update_entry))
                            .route(web::delete().to(branches::delete_entry)),
                    ),
            ),
    );
}
