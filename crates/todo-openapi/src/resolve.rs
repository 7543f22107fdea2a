// SPDX-License-Identifier: Apache-2.0

use crate::describe::{type_symbol, DescriptionResolver};
use crate::descriptor::{ParameterDescriptor, SchemaDescriptor};
use crate::examples::{ExampleMetadata, SchemaType};
use crate::registry::ExampleRegistry;

/// Resolves the example binding for a parameter.
///
/// Priority, first match wins:
/// 1. a binding on the parameter site itself;
/// 2. a binding registered for the parameter's schema type;
/// 3. a binding in the operation/group metadata list with the same schema
///    type;
/// 4. none.
///
/// A miss is not an error; the slot stays empty.
#[must_use]
pub fn resolve_for_parameter(
    parameter: &ParameterDescriptor,
    registry: &ExampleRegistry,
    metadata: &[ExampleMetadata],
) -> Option<ExampleMetadata> {
    parameter
        .site
        .iter()
        .find(|m| m.schema() == parameter.schema)
        .copied()
        .or_else(|| registry.for_type(parameter.schema).copied())
        .or_else(|| {
            metadata
                .iter()
                .find(|m| m.schema() == parameter.schema)
                .copied()
        })
}

/// Resolves the example binding for a request-body or response schema type:
/// the type registry first, then the operation/group metadata list.
#[must_use]
pub fn resolve_for_type(
    schema: SchemaType,
    registry: &ExampleRegistry,
    metadata: &[ExampleMetadata],
) -> Option<ExampleMetadata> {
    registry
        .for_type(schema)
        .copied()
        .or_else(|| metadata.iter().find(|m| m.schema() == schema).copied())
}

/// Resolves the example binding for a standalone schema: the type registry
/// only.
#[must_use]
pub fn resolve_for_schema(
    schema: SchemaType,
    registry: &ExampleRegistry,
) -> Option<ExampleMetadata> {
    registry.for_type(schema).copied()
}

/// Fills a schema descriptor's empty slots with the resolved description and
/// example. Populated slots are left untouched.
pub fn fill_schema(
    descriptor: &mut SchemaDescriptor,
    registry: &ExampleRegistry,
    descriptions: &DescriptionResolver,
) {
    if descriptor.description.is_none() {
        descriptor.description = descriptions.describe(&type_symbol(descriptor.schema));
    }

    if descriptor.example.is_none() {
        descriptor.example =
            resolve_for_schema(descriptor.schema, registry).and_then(|m| m.generate());
    }
}
