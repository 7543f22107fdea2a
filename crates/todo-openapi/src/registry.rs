// SPDX-License-Identifier: Apache-2.0

use crate::examples::{
    ExampleMetadata, ExampleProvider, IdExampleProvider, ProblemDetailsExampleProvider,
    SchemaType,
};
use serde::Serialize;
use std::collections::HashMap;
use todo_api::models::{
    CreateTodoItemModel, CreatedTodoItemModel, TodoItemModel, TodoListViewModel,
};
use todo_api::problem::ProblemDetails;
use uuid::Uuid;

/// Type-scope registration table: schema type → example binding.
///
/// Built once at startup and read-only afterwards. This is the explicit
/// stand-in for attribute discovery: a type "carries" an example by being
/// registered here.
#[derive(Debug, Default)]
pub struct ExampleRegistry {
    by_type: HashMap<SchemaType, ExampleMetadata>,
}

impl ExampleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `P` as the provider for schema type `S`.
    ///
    /// Re-registering a type replaces the previous binding.
    pub fn register<S, P>(&mut self)
    where
        S: Serialize + 'static,
        P: ExampleProvider<S>,
    {
        let metadata = ExampleMetadata::of::<S, P>();
        self.by_type.insert(metadata.schema(), metadata);
    }

    #[must_use]
    pub fn for_type(&self, schema: SchemaType) -> Option<&ExampleMetadata> {
        self.by_type.get(&schema)
    }

    /// Looks a binding up by the short schema name the backends use as
    /// component keys.
    #[must_use]
    pub fn for_name(&self, name: &str) -> Option<&ExampleMetadata> {
        self.by_type
            .values()
            .find(|metadata| metadata.schema().name() == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }

    /// The standard registrations for the Todo API surface.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register::<TodoItemModel, TodoItemModel>();
        registry.register::<TodoListViewModel, TodoListViewModel>();
        registry.register::<CreateTodoItemModel, CreateTodoItemModel>();
        registry.register::<CreatedTodoItemModel, CreatedTodoItemModel>();
        registry.register::<ProblemDetails, ProblemDetailsExampleProvider>();
        registry.register::<Uuid, IdExampleProvider>();
        registry
    }
}
