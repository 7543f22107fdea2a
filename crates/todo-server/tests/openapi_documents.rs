use serde_json::Value;
use todo_openapi::examples::ExampleProvider;
use todo_server::docs::{oas3_document, schemars_document, utoipa_document, DocsContext};

fn docs_context() -> DocsContext {
    DocsContext::new(
        concat!(env!("CARGO_MANIFEST_DIR"), "/assets/api-descriptions.json"),
        Vec::new(),
    )
}

fn all_documents() -> Vec<(&'static str, Value)> {
    let cx = docs_context();
    vec![
        (
            "utoipa",
            serde_json::to_value(utoipa_document(&cx)).expect("serialize utoipa document"),
        ),
        (
            "oas3",
            serde_json::to_value(oas3_document(&cx).expect("oas3 document"))
                .expect("serialize oas3 document"),
        ),
        ("schemars", schemars_document(&cx)),
    ]
}

fn media_example<'a>(document: &'a Value, pointer: &str) -> &'a Value {
    let media = document.pointer(pointer).unwrap_or(&Value::Null);
    media.get("example").unwrap_or(&Value::Null)
}

const PROBLEM_404_POINTER: &str =
    "/paths/~1api~1items~1{id}/get/responses/404/content/application~1problem+json";
const LIST_200_POINTER: &str = "/paths/~1api~1items/get/responses/200/content/application~1json";
const CREATE_BODY_POINTER: &str =
    "/paths/~1api~1items/post/requestBody/content/application~1json";

#[test]
fn every_backend_serves_the_five_operations() {
    for (backend, document) in all_documents() {
        let paths = document["paths"].as_object().expect("paths object");

        let mut operations = Vec::new();
        for (path, methods) in paths {
            for (method, operation) in methods.as_object().expect("methods object") {
                operations.push((
                    path.clone(),
                    method.clone(),
                    operation["operationId"].as_str().unwrap_or_default().to_string(),
                ));
            }
        }
        operations.sort();

        assert_eq!(
            operations,
            vec![
                ("/api/items".to_string(), "get".to_string(), "ListTodos".to_string()),
                ("/api/items".to_string(), "post".to_string(), "CreateTodo".to_string()),
                ("/api/items/{id}".to_string(), "delete".to_string(), "DeleteTodo".to_string()),
                ("/api/items/{id}".to_string(), "get".to_string(), "GetTodo".to_string()),
                ("/api/items/{id}/complete".to_string(), "post".to_string(), "CompleteTodo".to_string()),
            ],
            "backend: {backend}"
        );
    }
}

#[test]
fn all_backends_encode_identical_examples_for_the_same_schema() {
    let documents = all_documents();

    let problem_examples: Vec<&Value> = documents
        .iter()
        .map(|(_, doc)| media_example(doc, PROBLEM_404_POINTER))
        .collect();
    let list_examples: Vec<&Value> = documents
        .iter()
        .map(|(_, doc)| media_example(doc, LIST_200_POINTER))
        .collect();
    let body_examples: Vec<&Value> = documents
        .iter()
        .map(|(_, doc)| media_example(doc, CREATE_BODY_POINTER))
        .collect();

    for examples in [&problem_examples, &list_examples, &body_examples] {
        assert!(!examples[0].is_null(), "missing example in first document");
        for example in examples.iter() {
            assert_eq!(*example, examples[0]);
        }
    }

    assert_eq!(problem_examples[0]["detail"], "Item not found.");
    assert_eq!(list_examples[0]["items"][0]["isCompleted"], false);
    assert_eq!(body_examples[0]["text"], "Buy eggs 🥚");
}

#[test]
fn id_parameters_carry_the_canonical_example_in_every_backend() {
    for (backend, document) in all_documents() {
        let parameters = document
            .pointer("/paths/~1api~1items~1{id}/get/parameters")
            .and_then(Value::as_array)
            .expect("parameters array");
        let id = parameters
            .iter()
            .find(|p| p["name"] == "id")
            .expect("id parameter");

        assert_eq!(
            id["example"], "a03952ca-880e-4af7-9cfa-630be0feb4a5",
            "backend: {backend}"
        );
    }
}

#[test]
fn documents_share_title_root_license_contact_security_and_tag() {
    for (backend, document) in all_documents() {
        let info = &document["info"];
        let title = info["title"].as_str().expect("title");
        assert!(title.starts_with("Todo API ("), "backend: {backend}, title: {title}");

        assert_eq!(info["contact"]["name"], "Todo App", "backend: {backend}");
        assert_eq!(
            info["contact"]["url"], "https://github.com/todo-app/todo-app",
            "backend: {backend}"
        );
        assert_eq!(info["license"]["name"], "Apache 2.0", "backend: {backend}");
        assert_eq!(
            info["license"]["url"], "https://www.apache.org/licenses/LICENSE-2.0",
            "backend: {backend}"
        );

        let scheme = &document["components"]["securitySchemes"]["Bearer"];
        assert_eq!(scheme["type"], "http", "backend: {backend}");
        assert_eq!(scheme["scheme"], "bearer", "backend: {backend}");
        assert_eq!(scheme["bearerFormat"], "JSON Web Token", "backend: {backend}");

        let security = document["security"].as_array().expect("security");
        assert!(
            security.iter().any(|s| s.get("Bearer").is_some()),
            "backend: {backend}"
        );

        let tags = document["tags"].as_array().expect("tags");
        assert!(
            tags.iter().any(|t| t["name"] == "TodoApp"),
            "backend: {backend}"
        );
    }
}

fn is_relaxed(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(relaxed)) => *relaxed,
        Some(Value::Object(object)) => object.is_empty(),
        _ => false,
    }
}

#[test]
fn only_the_problem_schema_relaxes_additional_properties() {
    for (backend, document) in all_documents() {
        let schemas = document["components"]["schemas"]
            .as_object()
            .expect("schemas object");

        for (name, schema) in schemas {
            let relaxed = is_relaxed(schema.get("additionalProperties"));
            assert_eq!(
                relaxed,
                name == "ProblemDetails",
                "backend: {backend}, schema: {name}"
            );
        }
    }
}

#[test]
fn error_responses_use_the_problem_media_type_and_schema() {
    for (backend, document) in all_documents() {
        for (path, method, status) in [
            ("~1api~1items~1{id}", "get", "404"),
            ("~1api~1items", "post", "400"),
            ("~1api~1items~1{id}~1complete", "post", "400"),
            ("~1api~1items~1{id}~1complete", "post", "404"),
            ("~1api~1items~1{id}", "delete", "404"),
        ] {
            let pointer = format!("/paths/{path}/{method}/responses/{status}/content");
            let content = document.pointer(&pointer).expect("response content");

            let media = content
                .get("application/problem+json")
                .unwrap_or(&Value::Null);
            assert!(
                !media.is_null(),
                "backend: {backend}, pointer: {pointer}"
            );
            assert_eq!(
                media["schema"]["$ref"], "#/components/schemas/ProblemDetails",
                "backend: {backend}, pointer: {pointer}"
            );
        }
    }
}

#[test]
fn schemas_are_described_in_every_backend() {
    for (backend, document) in all_documents() {
        for name in ["TodoItemModel", "TodoListViewModel", "CreateTodoItemModel"] {
            let description = document["components"]["schemas"][name]["description"]
                .as_str()
                .unwrap_or_default();
            assert!(
                !description.is_empty(),
                "backend: {backend}, schema: {name}"
            );
        }
    }
}

#[test]
fn list_example_round_trips_to_the_provider_value() {
    for (backend, document) in all_documents() {
        let example = media_example(&document, LIST_200_POINTER).clone();
        let decoded: todo_api::models::TodoListViewModel =
            serde_json::from_value(example).expect("decode list example");

        assert_eq!(
            decoded,
            todo_api::models::TodoListViewModel::generate(),
            "backend: {backend}"
        );
    }
}

#[test]
fn development_mode_adds_the_live_server_address_to_every_backend() {
    let cx = DocsContext::new(
        concat!(env!("CARGO_MANIFEST_DIR"), "/assets/api-descriptions.json"),
        vec!["http://127.0.0.1:3000".to_string()],
    );

    let documents = vec![
        (
            "utoipa",
            serde_json::to_value(utoipa_document(&cx)).expect("serialize utoipa document"),
        ),
        (
            "oas3",
            serde_json::to_value(oas3_document(&cx).expect("oas3 document"))
                .expect("serialize oas3 document"),
        ),
        ("schemars", schemars_document(&cx)),
    ];

    for (backend, document) in documents {
        let servers = document["servers"].as_array().expect("servers array");
        assert_eq!(
            servers[0]["url"], "http://127.0.0.1:3000",
            "backend: {backend}"
        );
    }
}

#[test]
fn document_generation_is_deterministic() {
    let first = all_documents();
    let second = all_documents();

    for ((backend, a), (_, b)) in first.iter().zip(second.iter()) {
        assert_eq!(a, b, "backend: {backend}");
    }
}

#[test]
fn documents_pass_the_structural_lint() {
    for (backend, document) in all_documents() {
        assert!(
            document["info"]["title"].is_string(),
            "backend: {backend}: missing title"
        );
        assert!(
            document["info"]["version"].is_string(),
            "backend: {backend}: missing version"
        );

        let schemas = document["components"]["schemas"]
            .as_object()
            .expect("schemas object");

        let paths = document["paths"].as_object().expect("paths object");
        for (path, methods) in paths {
            for (method, operation) in methods.as_object().expect("methods object") {
                let where_ = format!("backend: {backend}, {method} {path}");

                let responses = operation["responses"].as_object().expect("responses");
                assert!(!responses.is_empty(), "{where_}: no responses");
                for (status, response) in responses {
                    assert!(
                        response["description"].is_string(),
                        "{where_}: response {status} has no description"
                    );
                }

                if let Some(parameters) = operation.get("parameters") {
                    for parameter in parameters.as_array().expect("parameters array") {
                        assert!(parameter["name"].is_string(), "{where_}: unnamed parameter");
                        assert!(parameter["in"].is_string(), "{where_}: parameter without location");
                        assert!(
                            parameter.get("schema").is_some(),
                            "{where_}: parameter without schema"
                        );
                    }
                }
            }
        }

        // Every reference in the document resolves to a declared schema.
        fn collect_refs(value: &Value, refs: &mut Vec<String>) {
            match value {
                Value::Object(object) => {
                    for (key, entry) in object {
                        if key == "$ref" {
                            if let Some(target) = entry.as_str() {
                                refs.push(target.to_string());
                            }
                        } else {
                            collect_refs(entry, refs);
                        }
                    }
                }
                Value::Array(items) => {
                    for item in items {
                        collect_refs(item, refs);
                    }
                }
                _ => {}
            }
        }

        let mut refs = Vec::new();
        collect_refs(&document, &mut refs);
        assert!(!refs.is_empty(), "backend: {backend}: no references at all");
        for target in refs {
            let name = target
                .strip_prefix("#/components/schemas/")
                .unwrap_or_else(|| panic!("backend: {backend}: non-local ref {target}"));
            assert!(
                schemas.contains_key(name),
                "backend: {backend}: dangling ref {target}"
            );
        }
    }
}
