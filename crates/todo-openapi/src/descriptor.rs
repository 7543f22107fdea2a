// SPDX-License-Identifier: Apache-2.0

use crate::examples::{ExampleMetadata, SchemaType};
use serde_json::Value;

/// Generator-neutral view of one operation parameter.
#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    pub name: &'static str,
    pub schema: SchemaType,
    /// Bindings declared directly on this parameter site.
    pub site: Vec<ExampleMetadata>,
}

/// Generator-neutral view of one declared response slot.
///
/// Resolution runs once per (status, media type) tuple, so a schema shared
/// by success and error slots resolves independently for each.
#[derive(Debug, Clone, Copy)]
pub struct ResponseDescriptor {
    pub status: u16,
    pub media_type: &'static str,
    pub schema: Option<SchemaType>,
}

/// Generator-neutral view of one API operation.
///
/// Built fresh per operation by each backend adapter from its own native
/// context paired with the API surface table; never shared across backends.
#[derive(Debug, Clone)]
pub struct OperationDescriptor {
    pub id: &'static str,
    pub parameters: Vec<ParameterDescriptor>,
    pub request_body: Option<SchemaType>,
    pub responses: Vec<ResponseDescriptor>,
    /// Operation-scope bindings followed by the enclosing group's bindings.
    pub metadata: Vec<ExampleMetadata>,
}

impl OperationDescriptor {
    #[must_use]
    pub fn response(&self, status: u16) -> Option<&ResponseDescriptor> {
        self.responses.iter().find(|r| r.status == status)
    }
}

/// Generator-neutral view of one schema with its mutable output slots.
///
/// Adapters seed the slots from their native model, run the shared fill, and
/// copy back whatever changed. Populated slots are never overwritten.
#[derive(Debug, Clone)]
pub struct SchemaDescriptor {
    pub schema: SchemaType,
    pub description: Option<String>,
    pub example: Option<Value>,
}

impl SchemaDescriptor {
    #[must_use]
    pub fn new(schema: SchemaType) -> Self {
        Self {
            schema,
            description: None,
            example: None,
        }
    }
}
