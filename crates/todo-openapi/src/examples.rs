// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use serde_json::Value;
use std::any::TypeId;
use todo_api::models::{
    CreateTodoItemModel, CreatedTodoItemModel, TodoItemModel, TodoListViewModel,
};
use todo_api::problem::ProblemDetails;
use todo_api::wire::to_wire_value;
use uuid::Uuid;

/// The canonical item identifier used across every document's examples.
pub const EXAMPLE_ID: &str = "a03952ca-880e-4af7-9cfa-630be0feb4a5";

/// Fixed timestamp used by item examples so document output is stable.
pub const EXAMPLE_TIMESTAMP: &str = "2024-08-06 12:00:00Z";

/// Identity of a schema type as the enrichment engine sees it.
///
/// `name` is the short component name the backends key their schemas by;
/// `path` is the declared Rust path used for documentation symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaType {
    id: TypeId,
    name: &'static str,
    path: &'static str,
}

impl SchemaType {
    #[must_use]
    pub fn of<S: 'static>() -> Self {
        let path = std::any::type_name::<S>();
        let name = path.rsplit("::").next().unwrap_or(path);
        Self {
            id: TypeId::of::<S>(),
            name,
            path,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn path(&self) -> &'static str {
        self.path
    }
}

/// Produces the canonical example value for a schema type.
///
/// Implemented either by the schema type itself or by a dedicated provider
/// type when the schema type cannot carry its own example.
pub trait ExampleProvider<S: Serialize> {
    fn generate() -> S;
}

/// Type-erased (schema type, generator) binding.
///
/// Bindings attach at three scopes: a specific parameter site, the type
/// registry, or an operation/group metadata list. Generation is deferred
/// until resolution has picked a binding.
#[derive(Debug, Clone, Copy)]
pub struct ExampleMetadata {
    schema: SchemaType,
    generate: fn() -> Option<Value>,
}

impl ExampleMetadata {
    #[must_use]
    pub fn of<S, P>() -> Self
    where
        S: Serialize + 'static,
        P: ExampleProvider<S>,
    {
        Self {
            schema: SchemaType::of::<S>(),
            generate: generate_encoded::<S, P>,
        }
    }

    #[must_use]
    pub fn schema(&self) -> SchemaType {
        self.schema
    }

    /// The canonical-JSON example, or `None` if encoding failed.
    ///
    /// A `None` here means "no example"; it never interrupts document
    /// assembly.
    #[must_use]
    pub fn generate(&self) -> Option<Value> {
        (self.generate)()
    }
}

fn generate_encoded<S, P>() -> Option<Value>
where
    S: Serialize + 'static,
    P: ExampleProvider<S>,
{
    to_wire_value(&P::generate()).ok()
}

/// Provider for the canonical item identifier.
pub struct IdExampleProvider;

impl ExampleProvider<Uuid> for IdExampleProvider {
    fn generate() -> Uuid {
        uuid::uuid!("a03952ca-880e-4af7-9cfa-630be0feb4a5")
    }
}

/// Provider for the problem-details payload.
///
/// `ProblemDetails` is shared by every error response, so its example lives
/// in a dedicated provider rather than on the type.
pub struct ProblemDetailsExampleProvider;

impl ExampleProvider<ProblemDetails> for ProblemDetailsExampleProvider {
    fn generate() -> ProblemDetails {
        ProblemDetails::not_found("Item not found.")
    }
}

impl ExampleProvider<TodoItemModel> for TodoItemModel {
    fn generate() -> TodoItemModel {
        TodoItemModel {
            id: EXAMPLE_ID.to_string(),
            text: "Buy eggs 🥚".to_string(),
            is_completed: false,
            last_updated: EXAMPLE_TIMESTAMP.to_string(),
        }
    }
}

impl ExampleProvider<TodoListViewModel> for TodoListViewModel {
    fn generate() -> TodoListViewModel {
        TodoListViewModel {
            items: vec![TodoItemModel::generate()],
        }
    }
}

impl ExampleProvider<CreateTodoItemModel> for CreateTodoItemModel {
    fn generate() -> CreateTodoItemModel {
        CreateTodoItemModel {
            text: "Buy eggs 🥚".to_string(),
        }
    }
}

impl ExampleProvider<CreatedTodoItemModel> for CreatedTodoItemModel {
    fn generate() -> CreatedTodoItemModel {
        CreatedTodoItemModel {
            id: EXAMPLE_ID.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_type_uses_the_short_component_name() {
        assert_eq!(SchemaType::of::<TodoItemModel>().name(), "TodoItemModel");
        assert_eq!(SchemaType::of::<Uuid>().name(), "Uuid");
    }

    #[test]
    fn schema_type_equality_tracks_the_underlying_type() {
        assert_eq!(SchemaType::of::<Uuid>(), SchemaType::of::<Uuid>());
        assert_ne!(
            SchemaType::of::<Uuid>(),
            SchemaType::of::<TodoItemModel>()
        );
    }

    #[test]
    fn metadata_generates_the_wire_encoded_example() {
        let metadata = ExampleMetadata::of::<TodoItemModel, TodoItemModel>();
        let value = metadata.generate().expect("item example");

        assert_eq!(value["id"], EXAMPLE_ID);
        assert_eq!(value["isCompleted"], false);
    }

    #[test]
    fn metadata_generation_is_deterministic() {
        let metadata = ExampleMetadata::of::<TodoListViewModel, TodoListViewModel>();
        assert_eq!(metadata.generate(), metadata.generate());
    }

    #[test]
    fn problem_example_is_the_not_found_shape() {
        let metadata =
            ExampleMetadata::of::<ProblemDetails, ProblemDetailsExampleProvider>();
        let value = metadata.generate().expect("problem example");

        assert_eq!(value["status"], 404);
        assert_eq!(value["detail"], "Item not found.");
        assert!(value.get("instance").is_none());
    }
}
