//! Per-backend document assembly.
//!
//! Each bootstrap registers its backend's adapters and produces that
//! backend's document; the documents are generated fresh per request.

use crate::http::items::problem_response;
use crate::AppState;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use std::path::PathBuf;
use todo_api::problem::ProblemDetails;
use todo_openapi::backends::oas3::{self as oas3_backend, SpecTransformer};
use todo_openapi::backends::schemars as schemars_backend;
use todo_openapi::backends::utoipa as utoipa_backend;
use todo_openapi::describe::DescriptionResolver;
use todo_openapi::registry::ExampleRegistry;
use todo_openapi::surface::api_surface;
use tracing::error;
use utoipa::{Modify, OpenApi};

/// Shared enrichment state: the provider registry, the description resolver
/// and the development-mode server addresses.
pub struct DocsContext {
    pub registry: ExampleRegistry,
    pub descriptions: DescriptionResolver,
    pub dev_servers: Vec<String>,
}

impl DocsContext {
    #[must_use]
    pub fn new(descriptions_path: impl Into<PathBuf>, dev_servers: Vec<String>) -> Self {
        Self {
            registry: ExampleRegistry::with_defaults(),
            descriptions: DescriptionResolver::new(descriptions_path),
            dev_servers,
        }
    }
}

/// OpenAPI document generator for the utoipa backend.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::http::items::list_todos,
        crate::http::items::get_todo,
        crate::http::items::create_todo,
        crate::http::items::complete_todo,
        crate::http::items::delete_todo,
    ),
    components(schemas(
        todo_api::models::TodoItemModel,
        todo_api::models::TodoListViewModel,
        todo_api::models::CreateTodoItemModel,
        todo_api::models::CreatedTodoItemModel,
        todo_api::problem::ProblemDetails,
    )),
    tags((name = "TodoApp"))
)]
pub struct ApiDoc;

/// The utoipa document with the enrichment and decoration passes applied.
#[must_use]
pub fn utoipa_document(cx: &DocsContext) -> utoipa::openapi::OpenApi {
    let surface = api_surface();
    let mut document = ApiDoc::openapi();

    utoipa_backend::AddExamples {
        registry: &cx.registry,
        surface: &surface,
    }
    .modify(&mut document);
    utoipa_backend::EnrichSchemas {
        registry: &cx.registry,
        descriptions: &cx.descriptions,
    }
    .modify(&mut document);
    utoipa_backend::DecorateDocument {
        dev_servers: cx.dev_servers.clone(),
    }
    .modify(&mut document);

    document
}

/// The oas3 document with its transformer passes applied.
pub fn oas3_document(cx: &DocsContext) -> Result<oas3::Spec, oas3_backend::DocumentError> {
    let surface = api_surface();
    let mut spec = oas3_backend::base_document(&surface, &cx.dev_servers)?;

    let transformers: Vec<Box<dyn SpecTransformer + '_>> = vec![
        Box::new(oas3_backend::AddExamples {
            registry: &cx.registry,
            surface: &surface,
        }),
        Box::new(oas3_backend::EnrichSchemas {
            registry: &cx.registry,
            descriptions: &cx.descriptions,
        }),
        Box::new(oas3_backend::UpdateProblemMediaType),
    ];
    for transformer in &transformers {
        transformer.transform(&mut spec);
    }

    Ok(spec)
}

/// The schemars document built with the standard processor set.
#[must_use]
pub fn schemars_document(cx: &DocsContext) -> Value {
    let surface = api_surface();
    schemars_backend::standard_builder(
        &surface,
        &cx.registry,
        &cx.descriptions,
        cx.dev_servers.clone(),
    )
    .build()
}

pub async fn utoipa_document_handler(State(state): State<AppState>) -> Response {
    Json(utoipa_document(&state.docs)).into_response()
}

pub async fn oas3_document_handler(State(state): State<AppState>) -> Response {
    match oas3_document(&state.docs) {
        Ok(spec) => Json(spec).into_response(),
        Err(e) => {
            error!(%e, "oas3 document generation failed");
            problem_response(ProblemDetails::internal("An internal error occurred."))
        }
    }
}

pub async fn schemars_document_handler(State(state): State<AppState>) -> Response {
    Json(schemars_document(&state.docs)).into_response()
}
