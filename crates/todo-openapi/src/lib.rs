// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

//! Enrichment engine for the Todo API's OpenAPI documents.
//!
//! Three incompatible generator backends produce documents for the same five
//! operations. This crate owns everything the backends share: the example
//! provider registry, the fixed-priority metadata resolver, the description
//! resolver over the external documentation source, the generator-neutral
//! operation/schema descriptors, and one thin adapter per backend that
//! projects resolved values into that backend's native document model.

pub mod backends;
pub mod decoration;
pub mod describe;
pub mod descriptor;
pub mod examples;
pub mod registry;
pub mod resolve;
pub mod surface;

pub const CRATE_NAME: &str = "todo-openapi";

pub use describe::DescriptionResolver;
pub use examples::{ExampleMetadata, ExampleProvider, SchemaType};
pub use registry::ExampleRegistry;
