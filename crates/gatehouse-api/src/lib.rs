//! Gatehouse REST API
//!
//! This crate provides the Axum-based HTTP API for Gatehouse:
//! credential endpoints (registration, login) and the token-guarded
//! user listing endpoints.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{AppState, MetricsHandle};
