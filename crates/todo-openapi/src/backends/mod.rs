// SPDX-License-Identifier: Apache-2.0

//! One adapter per document-generator backend.
//!
//! Each backend has its own native document representation: utoipa's typed
//! builder graph, oas3's typed 3.1 spec model, and a raw JSON tree fed by
//! schemars-generated component schemas. The adapters translate the shared
//! resolution output into those representations; none of them duplicates
//! resolution logic.

pub mod oas3;
pub mod schemars;
pub mod utoipa;
