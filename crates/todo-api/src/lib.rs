// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

pub mod models;
pub mod problem;
pub mod wire;

pub const CRATE_NAME: &str = "todo-api";

pub use models::{CreateTodoItemModel, CreatedTodoItemModel, TodoItemModel, TodoListViewModel};
pub use problem::ProblemDetails;
