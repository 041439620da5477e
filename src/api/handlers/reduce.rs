//! Handler for the single-segment shortening variant.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use tracing::debug;

use crate::api::dto::link::ReduceLinkResponse;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_shape::is_url_like;

/// Shortens a link passed as the path segment and returns only the code.
///
/// # Endpoint
///
/// `POST /{link}`
///
/// Since a path segment cannot contain `/`, this only accepts bare domains
/// such as `example.com`; use `POST /` for full URLs.
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "reduceLink": "aB3dE" }
/// ```
pub async fn reduce_link_handler(
    Path(link): Path<String>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ReduceLinkResponse>), AppError> {
    if !is_url_like(&link) {
        debug!(link = %link, "link not matched");
        return Err(AppError::bad_request(
            "error of validate link",
            json!({ "link": link }),
        ));
    }

    let code = state.link_service.resolve(&link).await?;

    Ok((
        StatusCode::CREATED,
        Json(ReduceLinkResponse { reduce_link: code }),
    ))
}
