//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`  - Health check (store connectivity)
//! - `POST /`        - Create short link
//! - `GET  /{code}`  - Resolve short link and count the visit
//! - `POST /{link}`  - Single-segment shortening variant
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Timeout** - Per-request deadline
//!
//! Trailing-slash normalization wraps the finished router in [`crate::server`].

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{timeout, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `request_timeout_seconds` - deadline applied to every request
pub fn app_router(state: AppState, request_timeout_seconds: u64) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(api::routes::link_routes())
        .with_state(state)
        .layer(timeout::layer(request_timeout_seconds))
        .layer(tracing::layer())
}
