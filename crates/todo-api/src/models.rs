// SPDX-License-Identifier: Apache-2.0

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single todo item as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoItemModel {
    /// The ID of the todo item.
    pub id: String,
    /// The text of the todo item.
    pub text: String,
    /// Whether the todo item has been completed.
    pub is_completed: bool,
    /// The date and time the todo item was last updated.
    pub last_updated: String,
}

/// The current user's todo items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoListViewModel {
    /// The todo items, incomplete first, then by creation time.
    pub items: Vec<TodoItemModel>,
}

/// Request payload for creating a new todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTodoItemModel {
    /// The text of the todo item to create.
    pub text: String,
}

/// Response payload for a newly-created todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedTodoItemModel {
    /// The ID of the created todo item.
    pub id: String,
}
