// SPDX-License-Identifier: Apache-2.0

//! Document decoration values shared by every backend.
//!
//! Every emitted document must carry the same title root, contact, license,
//! security scheme and document-level tag regardless of which generator
//! produced it.

pub const API_TITLE_ROOT: &str = "Todo API";
pub const API_DESCRIPTION: &str = "An API for managing Todo items.";
pub const API_VERSION: &str = "v1";

pub const CONTACT_NAME: &str = "Todo App";
pub const CONTACT_URL: &str = "https://github.com/todo-app/todo-app";

pub const LICENSE_NAME: &str = "Apache 2.0";
pub const LICENSE_URL: &str = "https://www.apache.org/licenses/LICENSE-2.0";

pub const SECURITY_SCHEME_NAME: &str = "Bearer";
pub const SECURITY_SCHEME_DESCRIPTION: &str = "Bearer authentication using a JWT.";
pub const BEARER_FORMAT: &str = "JSON Web Token";

pub const DOCUMENT_TAG: &str = "TodoApp";

/// The document title for one backend: the shared root plus the backend's
/// name in parentheses.
#[must_use]
pub fn document_title(backend: &str) -> String {
    format!("{API_TITLE_ROOT} ({backend})")
}
