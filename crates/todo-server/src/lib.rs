#![forbid(unsafe_code)]

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub mod config;
pub mod docs;
pub mod http;
pub mod service;
pub mod store;

pub use config::AppConfig;
pub use docs::DocsContext;
pub use service::TodoService;
pub use store::{
    Clock, SqliteTodoRepository, StoreError, SystemClock, TodoItem, TodoRepository,
};

pub const CRATE_NAME: &str = "todo-server";

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TodoService>,
    pub docs: Arc<DocsContext>,
}

impl AppState {
    #[must_use]
    pub fn new(repository: Arc<dyn TodoRepository>, config: &AppConfig) -> Self {
        let dev_servers = if config.development {
            vec![format!("http://{}", config.bind_address())]
        } else {
            Vec::new()
        };

        Self {
            service: Arc::new(TodoService::new(repository)),
            docs: Arc::new(DocsContext::new(&config.descriptions_path, dev_servers)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/items",
            get(http::items::list_todos).post(http::items::create_todo),
        )
        .route(
            "/api/items/:id",
            get(http::items::get_todo).delete(http::items::delete_todo),
        )
        .route("/api/items/:id/complete", post(http::items::complete_todo))
        .route("/api-docs/openapi.json", get(docs::utoipa_document_handler))
        .route("/oas3/v1.json", get(docs::oas3_document_handler))
        .route("/openapi/v1.json", get(docs::schemars_document_handler))
        .with_state(state)
}
