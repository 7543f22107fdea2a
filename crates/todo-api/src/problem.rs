// SPDX-License-Identifier: Apache-2.0

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Reference URI for the HTTP 400 semantics section.
pub const PROBLEM_TYPE_BAD_REQUEST: &str = "https://tools.ietf.org/html/rfc7231#section-6.5.1";

/// Reference URI for the HTTP 404 semantics section.
pub const PROBLEM_TYPE_NOT_FOUND: &str = "https://tools.ietf.org/html/rfc7231#section-6.5.4";

/// Reference URI for the HTTP 500 semantics section.
pub const PROBLEM_TYPE_INTERNAL: &str = "https://tools.ietf.org/html/rfc7231#section-6.6.1";

/// Media type used for problem-details error payloads.
pub const PROBLEM_MEDIA_TYPE: &str = "application/problem+json";

/// Structured error payload returned for every failed request.
///
/// `instance` is declared for wire compatibility but is never populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, ToSchema)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_uri: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetails {
    #[must_use]
    pub fn new(
        type_uri: impl Into<String>,
        title: impl Into<String>,
        status: u16,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status,
            detail: detail.into(),
            instance: None,
        }
    }

    #[must_use]
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(PROBLEM_TYPE_BAD_REQUEST, "Bad Request", 400, detail)
    }

    #[must_use]
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(PROBLEM_TYPE_NOT_FOUND, "Not Found", 404, detail)
    }

    #[must_use]
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(PROBLEM_TYPE_INTERNAL, "Internal Server Error", 500, detail)
    }
}
