//! Handler for the link creation endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::debug;
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, CreateLinkResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a source link, or returns the code it already has.
///
/// # Endpoint
///
/// `POST /`
///
/// # Request Body
///
/// ```json
/// { "srcLink": "https://example.com/page" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "srcLink": "https://example.com/page", "shortLink": "http://localhost:8080/aB3dE" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is malformed or `srcLink` is not URL-like.
/// Returns 500 Internal Server Error on store failures or exhausted retries.
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateLinkResponse>), AppError> {
    let Json(payload) = payload?;

    if let Err(e) = payload.validate() {
        debug!(src_link = %payload.src_link, "link not matched");
        return Err(e.into());
    }

    let code = state.link_service.resolve(&payload.src_link).await?;
    let short_link = state.link_service.get_short_url(&state.domain, &code);

    Ok((
        StatusCode::CREATED,
        Json(CreateLinkResponse {
            src_link: payload.src_link,
            short_link,
        }),
    ))
}
