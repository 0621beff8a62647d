use std::sync::Arc;

use actix_web::{
    App, Error,
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
};

use crate::config::Config;
use crate::routes::{self, AppData};
use crate::service::clock::SteppingClock;
use crate::store::{DocumentStore, MemoryStore};

/// In-memory store plus a stepping clock starting 2025-01-01T06:00:00Z.
pub struct TestState {
    pub store: Arc<MemoryStore>,
    pub clock: Arc<SteppingClock>,
}

impl TestState {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::seeded()),
            clock: Arc::new(SteppingClock::starting_at("2025-01-01T06:00:00Z")),
        }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}

pub fn test_app(
    state: &TestState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody + use<>>,
        Error = Error,
        InitError = (),
    > + use<>,
> {
    let data = AppData::new(state.store.clone(), state.clock.clone());
    let config = Config::default();

    App::new().configure(|cfg| {
        data.register(cfg);
        routes::configure(cfg, &config);
    })
}
