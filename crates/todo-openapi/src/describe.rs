// SPDX-License-Identifier: Apache-2.0

use crate::examples::SchemaType;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{OnceLock, RwLock};
use tracing::warn;

/// Symbolic name for a schema type, e.g. `T:todo_api::models::TodoItemModel`.
#[must_use]
pub fn type_symbol(schema: SchemaType) -> String {
    format!("T:{}", schema.path())
}

/// Symbolic name for a type member, e.g.
/// `P:todo_api::models::TodoItemModel::is_completed`. The member part is the
/// declared field name, never the wire name.
#[must_use]
pub fn member_symbol(schema: SchemaType, declared_field: &str) -> String {
    format!("P:{}::{}", schema.path(), declared_field)
}

/// Maps a camelCase wire name back to the declared snake_case field name.
#[must_use]
pub fn declared_field_name(wire_name: &str) -> String {
    let mut declared = String::with_capacity(wire_name.len() + 2);
    for ch in wire_name.chars() {
        if ch.is_ascii_uppercase() {
            declared.push('_');
            declared.push(ch.to_ascii_lowercase());
        } else {
            declared.push(ch);
        }
    }
    declared
}

#[derive(Debug, Deserialize)]
struct DocumentationSource {
    members: HashMap<String, String>,
}

/// Looks up human-authored descriptions from the external documentation
/// source.
///
/// The source is parsed at most once per process, on first use; lookups are
/// cached for the process lifetime (the source is immutable while the
/// process runs). A missing or unparsable source degrades to `None` for
/// every key and logs once.
#[derive(Debug)]
pub struct DescriptionResolver {
    path: PathBuf,
    index: OnceLock<Option<HashMap<String, String>>>,
    cache: RwLock<HashMap<String, Option<String>>>,
}

impl DescriptionResolver {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            index: OnceLock::new(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The description for `symbol`, or `None` if the source has no entry
    /// for it (or no source is available).
    #[must_use]
    pub fn describe(&self, symbol: &str) -> Option<String> {
        if let Ok(cache) = self.cache.read() {
            if let Some(cached) = cache.get(symbol) {
                return cached.clone();
            }
        }

        let resolved = self
            .index()
            .as_ref()
            .and_then(|members| members.get(symbol).cloned());

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(symbol.to_string(), resolved.clone());
        }

        resolved
    }

    fn index(&self) -> &Option<HashMap<String, String>> {
        self.index.get_or_init(|| match Self::load(&self.path) {
            Ok(members) => Some(members),
            Err(reason) => {
                warn!(
                    path = %self.path.display(),
                    %reason,
                    "documentation source unavailable; descriptions disabled"
                );
                None
            }
        })
    }

    fn load(path: &Path) -> Result<HashMap<String, String>, String> {
        let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
        let source: DocumentationSource =
            serde_json::from_slice(&bytes).map_err(|e| e.to_string())?;
        Ok(source.members)
    }
}
