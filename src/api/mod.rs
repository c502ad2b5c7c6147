pub mod auth;
pub mod extract;
pub mod handlers;
pub mod routes;

pub use auth::{CALLER_ID_HEADER, CALLER_ROLE_HEADER};
pub use routes::*;

use crate::analytics::AnalyticsEngine;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AnalyticsEngine>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(engine: Arc<AnalyticsEngine>) -> Self {
        Self {
            engine,
            request_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
