//! API routes

mod auth;
mod guard;
mod health;
pub mod metrics;
mod types;
mod users;

use axum::{Router, extract::DefaultBodyLimit};
use std::sync::Arc;

use crate::state::{AppState, MetricsHandle};

/// Maximum request body size; every legitimate payload here is tiny
const MAX_BODY_BYTES: usize = 16 * 1024;

/// Create the main router
pub fn create_router(state: AppState, metrics_handle: Option<Arc<MetricsHandle>>) -> Router {
    let mut router = Router::new()
        // Health check
        .merge(health::routes())
        // Credential endpoints
        .merge(auth::routes())
        // Token-guarded user listing
        .merge(users::routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    // Add metrics endpoint if handle is provided
    if let Some(handle) = metrics_handle {
        router = router.merge(metrics::routes(handle));
    }

    router
}
