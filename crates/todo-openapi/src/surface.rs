// SPDX-License-Identifier: Apache-2.0

//! The API surface registration table.
//!
//! An explicit table of the five operations, their parameters, bodies,
//! response tuples and scoped example bindings. The table is the single
//! source every backend adapter pairs its native operations against, so the
//! enrichment algorithm is written once and the documents never drift apart.

use crate::descriptor::{
    OperationDescriptor, ParameterDescriptor, ResponseDescriptor,
};
use crate::examples::{
    ExampleMetadata, IdExampleProvider, ProblemDetailsExampleProvider, SchemaType,
};
use todo_api::models::{
    CreateTodoItemModel, CreatedTodoItemModel, TodoItemModel, TodoListViewModel,
};
use todo_api::problem::ProblemDetails;
use uuid::Uuid;

pub const MEDIA_TYPE_JSON: &str = "application/json";

/// A parameter registration: declared name, schema type and any bindings
/// attached directly to the parameter site.
#[derive(Debug, Clone)]
pub struct ParameterRegistration {
    pub name: &'static str,
    pub location: &'static str,
    pub description: &'static str,
    pub schema: SchemaType,
    pub metadata: Vec<ExampleMetadata>,
}

/// A declared (status, media type, schema) response tuple.
#[derive(Debug, Clone, Copy)]
pub struct ResponseRegistration {
    pub status: u16,
    pub description: &'static str,
    pub media_type: &'static str,
    pub schema: Option<SchemaType>,
}

/// One operation's registration: identity, routing, documentation text,
/// parameters, body, responses and operation-scope bindings.
#[derive(Debug, Clone)]
pub struct OperationRegistration {
    pub id: &'static str,
    pub method: &'static str,
    pub path: &'static str,
    pub summary: &'static str,
    pub description: &'static str,
    pub parameters: Vec<ParameterRegistration>,
    pub request_body: Option<SchemaType>,
    pub responses: Vec<ResponseRegistration>,
    pub metadata: Vec<ExampleMetadata>,
}

impl OperationRegistration {
    /// The generator-neutral descriptor for this operation, with the
    /// enclosing group's bindings appended after the operation's own.
    #[must_use]
    pub fn descriptor(&self, group_metadata: &[ExampleMetadata]) -> OperationDescriptor {
        let mut metadata = self.metadata.clone();
        metadata.extend_from_slice(group_metadata);

        OperationDescriptor {
            id: self.id,
            parameters: self
                .parameters
                .iter()
                .map(|p| ParameterDescriptor {
                    name: p.name,
                    schema: p.schema,
                    site: p.metadata.clone(),
                })
                .collect(),
            request_body: self.request_body,
            responses: self
                .responses
                .iter()
                .map(|r| ResponseDescriptor {
                    status: r.status,
                    media_type: r.media_type,
                    schema: r.schema,
                })
                .collect(),
            metadata,
        }
    }
}

/// The whole registered surface: the route group's tag and bindings plus the
/// five operations.
#[derive(Debug, Clone)]
pub struct ApiSurface {
    pub group_tag: &'static str,
    pub group_metadata: Vec<ExampleMetadata>,
    pub operations: Vec<OperationRegistration>,
}

impl ApiSurface {
    #[must_use]
    pub fn operation(&self, id: &str) -> Option<&OperationRegistration> {
        self.operations.iter().find(|op| op.id == id)
    }

    /// Builds the descriptor for the operation with the given id, merging in
    /// the group-scope bindings.
    #[must_use]
    pub fn descriptor_for(&self, id: &str) -> Option<OperationDescriptor> {
        self.operation(id)
            .map(|op| op.descriptor(&self.group_metadata))
    }
}

fn id_parameter() -> ParameterRegistration {
    ParameterRegistration {
        name: "id",
        location: "path",
        description: "The ID of the todo item.",
        schema: SchemaType::of::<Uuid>(),
        metadata: Vec::new(),
    }
}

fn problem_response(status: u16, description: &'static str) -> ResponseRegistration {
    ResponseRegistration {
        status,
        description,
        media_type: MEDIA_TYPE_JSON,
        schema: Some(SchemaType::of::<ProblemDetails>()),
    }
}

fn no_content_response() -> ResponseRegistration {
    ResponseRegistration {
        status: 204,
        description: "No Content",
        media_type: MEDIA_TYPE_JSON,
        schema: None,
    }
}

/// The registered Todo API surface, rebuilt per document pass.
#[must_use]
pub fn api_surface() -> ApiSurface {
    let problem = ExampleMetadata::of::<ProblemDetails, ProblemDetailsExampleProvider>();
    let id = ExampleMetadata::of::<Uuid, IdExampleProvider>();

    ApiSurface {
        group_tag: "TodoApp",
        group_metadata: vec![problem, id],
        operations: vec![
            OperationRegistration {
                id: "ListTodos",
                method: "get",
                path: "/api/items",
                summary: "Get all Todo items",
                description: "Gets all of the current user's todo items.",
                parameters: Vec::new(),
                request_body: None,
                responses: vec![ResponseRegistration {
                    status: 200,
                    description: "OK",
                    media_type: MEDIA_TYPE_JSON,
                    schema: Some(SchemaType::of::<TodoListViewModel>()),
                }],
                metadata: vec![ExampleMetadata::of::<TodoListViewModel, TodoListViewModel>()],
            },
            OperationRegistration {
                id: "GetTodo",
                method: "get",
                path: "/api/items/{id}",
                summary: "Get a specific Todo item",
                description: "Gets the todo item with the specified ID.",
                parameters: vec![id_parameter()],
                request_body: None,
                responses: vec![
                    ResponseRegistration {
                        status: 200,
                        description: "OK",
                        media_type: MEDIA_TYPE_JSON,
                        schema: Some(SchemaType::of::<TodoItemModel>()),
                    },
                    problem_response(404, "Not Found"),
                ],
                metadata: vec![
                    problem,
                    ExampleMetadata::of::<TodoItemModel, TodoItemModel>(),
                ],
            },
            OperationRegistration {
                id: "CreateTodo",
                method: "post",
                path: "/api/items",
                summary: "Create a new Todo item",
                description: "Creates a new todo item for the current user and returns its ID.",
                parameters: Vec::new(),
                request_body: Some(SchemaType::of::<CreateTodoItemModel>()),
                responses: vec![
                    ResponseRegistration {
                        status: 201,
                        description: "Created",
                        media_type: MEDIA_TYPE_JSON,
                        schema: Some(SchemaType::of::<CreatedTodoItemModel>()),
                    },
                    problem_response(400, "Bad Request"),
                ],
                metadata: vec![
                    ExampleMetadata::of::<CreateTodoItemModel, CreateTodoItemModel>(),
                    ExampleMetadata::of::<CreatedTodoItemModel, CreatedTodoItemModel>(),
                    problem,
                ],
            },
            OperationRegistration {
                id: "CompleteTodo",
                method: "post",
                path: "/api/items/{id}/complete",
                summary: "Mark a Todo item as completed",
                description: "Marks the todo item with the specified ID as complete.",
                parameters: vec![id_parameter()],
                request_body: None,
                responses: vec![
                    no_content_response(),
                    problem_response(400, "Bad Request"),
                    problem_response(404, "Not Found"),
                ],
                metadata: vec![problem],
            },
            OperationRegistration {
                id: "DeleteTodo",
                method: "delete",
                path: "/api/items/{id}",
                summary: "Delete a Todo item",
                description: "Deletes the todo item with the specified ID.",
                parameters: vec![id_parameter()],
                request_body: None,
                responses: vec![no_content_response(), problem_response(404, "Not Found")],
                metadata: vec![problem],
            },
        ],
    }
}
