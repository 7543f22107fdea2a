use crate::AppState;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use todo_api::models::{
    CreateTodoItemModel, CreatedTodoItemModel, TodoItemModel, TodoListViewModel,
};
use todo_api::problem::{ProblemDetails, PROBLEM_MEDIA_TYPE};
use tracing::error;
use uuid::Uuid;

pub(crate) fn problem_response(problem: ProblemDetails) -> Response {
    let status =
        StatusCode::from_u16(problem.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, PROBLEM_MEDIA_TYPE)],
        Json(problem),
    )
        .into_response()
}

fn internal_problem(context: &str, error: &crate::store::StoreError) -> Response {
    error!(%error, context, "repository call failed");
    problem_response(ProblemDetails::internal("An internal error occurred."))
}

/// Get all Todo items
///
/// Gets all of the current user's todo items.
#[utoipa::path(
    get,
    path = "/api/items",
    operation_id = "ListTodos",
    tag = "TodoApp",
    responses(
        (status = 200, description = "OK", body = TodoListViewModel)
    )
)]
pub async fn list_todos(State(state): State<AppState>) -> Response {
    match state.service.list().await {
        Ok(list) => Json(list).into_response(),
        Err(e) => internal_problem("list", &e),
    }
}

/// Get a specific Todo item
///
/// Gets the todo item with the specified ID.
#[utoipa::path(
    get,
    path = "/api/items/{id}",
    operation_id = "GetTodo",
    tag = "TodoApp",
    params(
        ("id" = Uuid, Path, description = "The ID of the todo item.")
    ),
    responses(
        (status = 200, description = "OK", body = TodoItemModel),
        (
            status = 404,
            description = "Not Found",
            body = ProblemDetails,
            content_type = "application/problem+json"
        )
    )
)]
pub async fn get_todo(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.service.get(id).await {
        Ok(Some(item)) => Json(item).into_response(),
        Ok(None) => problem_response(ProblemDetails::not_found("Item not found.")),
        Err(e) => internal_problem("get", &e),
    }
}

/// Create a new Todo item
///
/// Creates a new todo item for the current user and returns its ID.
#[utoipa::path(
    post,
    path = "/api/items",
    operation_id = "CreateTodo",
    tag = "TodoApp",
    request_body = CreateTodoItemModel,
    responses(
        (status = 201, description = "Created", body = CreatedTodoItemModel),
        (
            status = 400,
            description = "Bad Request",
            body = ProblemDetails,
            content_type = "application/problem+json"
        )
    )
)]
pub async fn create_todo(
    State(state): State<AppState>,
    Json(model): Json<CreateTodoItemModel>,
) -> Response {
    if model.text.trim().is_empty() {
        return problem_response(ProblemDetails::bad_request("No item text specified."));
    }

    match state.service.add_item(&model.text).await {
        Ok(id) => {
            let location = format!("/api/items/{id}");
            (
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(CreatedTodoItemModel { id }),
            )
                .into_response()
        }
        Err(e) => internal_problem("create", &e),
    }
}

/// Mark a Todo item as completed
///
/// Marks the todo item with the specified ID as complete.
#[utoipa::path(
    post,
    path = "/api/items/{id}/complete",
    operation_id = "CompleteTodo",
    tag = "TodoApp",
    params(
        ("id" = Uuid, Path, description = "The ID of the todo item.")
    ),
    responses(
        (status = 204, description = "No Content"),
        (
            status = 400,
            description = "Bad Request",
            body = ProblemDetails,
            content_type = "application/problem+json"
        ),
        (
            status = 404,
            description = "Not Found",
            body = ProblemDetails,
            content_type = "application/problem+json"
        )
    )
)]
pub async fn complete_todo(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.service.complete_item(id).await {
        Ok(Some(true)) => StatusCode::NO_CONTENT.into_response(),
        Ok(Some(false)) => {
            problem_response(ProblemDetails::bad_request("Item already completed."))
        }
        Ok(None) => problem_response(ProblemDetails::not_found("Item not found.")),
        Err(e) => internal_problem("complete", &e),
    }
}

/// Delete a Todo item
///
/// Deletes the todo item with the specified ID.
#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    operation_id = "DeleteTodo",
    tag = "TodoApp",
    params(
        ("id" = Uuid, Path, description = "The ID of the todo item.")
    ),
    responses(
        (status = 204, description = "No Content"),
        (
            status = 404,
            description = "Not Found",
            body = ProblemDetails,
            content_type = "application/problem+json"
        )
    )
)]
pub async fn delete_todo(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.service.delete_item(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => problem_response(ProblemDetails::not_found("Item not found.")),
        Err(e) => internal_problem("delete", &e),
    }
}
