//! DTOs for link creation and resolution endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::url_shape::SRC_LINK_REGEX;

/// Request to shorten a source link.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    /// The original link; must look like a URL (scheme optional).
    #[validate(regex(path = *SRC_LINK_REGEX, message = "error of validate link"))]
    pub src_link: String,
}

/// Response for a created (or already existing) short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkResponse {
    pub src_link: String,
    pub short_link: String,
}

/// Response for a resolved short link, including the updated visit count.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub src_link: String,
    pub short_link: String,
    pub visits: i64,
}

/// Response of the single-segment variant: only the code is returned.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReduceLinkResponse {
    pub reduce_link: String,
}
