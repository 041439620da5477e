//! Handler for short link resolution.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::link::LinkResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a short code to its source link and counts the visit.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look up the link by code (404 if unknown)
/// 2. Atomically increment its visit counter
/// 3. Return the source link, short URL and updated visit count
///
/// If the link disappears between steps 1 and 2 the increment reports
/// not-found and the request fails with 404.
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "srcLink": "https://example.com/page", "shortLink": "http://localhost:8080/aB3dE", "visits": 1 }
/// ```
pub async fn resolve_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let link = state.link_service.get_link(&code).await?;
    let visits = state.link_service.record_visit(&code).await?;

    Ok((
        StatusCode::CREATED,
        Json(LinkResponse {
            src_link: link.source_link,
            short_link: state.link_service.get_short_url(&state.domain, &code),
            visits,
        }),
    ))
}
