//! Application state

use gatehouse_auth::{JwtManager, PasswordService};
use gatehouse_db::Database;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt: Arc<JwtManager>,
    pub passwords: Arc<PasswordService>,
}

impl AppState {
    pub fn new(db: Database, jwt: Arc<JwtManager>, passwords: Arc<PasswordService>) -> Self {
        Self { db, jwt, passwords }
    }
}

/// Handle for rendering Prometheus metrics
pub struct MetricsHandle {
    handle: PrometheusHandle,
}

impl MetricsHandle {
    pub fn new(handle: PrometheusHandle) -> Self {
        Self { handle }
    }

    pub fn render(&self) -> String {
        self.handle.render()
    }
}
