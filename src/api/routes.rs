//! Link route table.

use crate::api::handlers::{create_link_handler, reduce_link_handler, resolve_link_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Link endpoints.
///
/// # Endpoints
///
/// - `POST /`        - Create (or fetch) the short link for `srcLink`
/// - `GET  /{code}`  - Resolve a code and count the visit
/// - `POST /{link}`  - Single-segment variant returning `{"reduceLink": code}`
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_link_handler))
        .route(
            "/{code}",
            get(resolve_link_handler).post(reduce_link_handler),
        )
}
