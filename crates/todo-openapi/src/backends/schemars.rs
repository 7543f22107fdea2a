// SPDX-License-Identifier: Apache-2.0

//! The schemars-backed document generator.
//!
//! Component schemas come from a `schemars` generator configured for
//! OpenAPI 3.0; the rest of the document is assembled as a raw
//! `serde_json::Value` tree from the API surface table. Extension points are
//! processor objects registered on the builder, run over each operation and
//! schema and then over the whole document.

use crate::decoration;
use crate::describe::{declared_field_name, member_symbol, DescriptionResolver};
use crate::descriptor::{OperationDescriptor, SchemaDescriptor};
use crate::registry::ExampleRegistry;
use crate::resolve;
use crate::surface::{ApiSurface, OperationRegistration};
use ::schemars::gen::SchemaSettings;
use serde_json::{json, Map, Value};
use todo_api::models::{
    CreateTodoItemModel, CreatedTodoItemModel, TodoItemModel, TodoListViewModel,
};
use todo_api::problem::ProblemDetails;

/// Name this generator attaches to body-binding metadata; stripped again by
/// [`RemoveBindingExtensions`] before the document is emitted.
pub const EXT_BODY_NAME: &str = "x-body-name";
pub const EXT_PARAMETER_INDEX: &str = "x-parameter-index";

/// Processor over one native operation object.
pub trait OperationProcessor {
    fn process(&self, operation: &mut Value, context: &OperationDescriptor);
}

/// Processor over one native component schema object.
pub trait SchemaProcessor {
    fn process(&self, name: &str, schema: &mut Value);
}

/// Processor over the fully-assembled document.
pub trait DocumentProcessor {
    fn process(&self, document: &mut Value);
}

/// Per-document builder: assembles the skeleton and runs the registered
/// processors.
pub struct DocumentBuilder<'a> {
    surface: &'a ApiSurface,
    dev_servers: Vec<String>,
    operation_processors: Vec<Box<dyn OperationProcessor + 'a>>,
    schema_processors: Vec<Box<dyn SchemaProcessor + 'a>>,
    document_processors: Vec<Box<dyn DocumentProcessor + 'a>>,
}

impl<'a> DocumentBuilder<'a> {
    #[must_use]
    pub fn new(surface: &'a ApiSurface) -> Self {
        Self {
            surface,
            dev_servers: Vec::new(),
            operation_processors: Vec::new(),
            schema_processors: Vec::new(),
            document_processors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_dev_servers(mut self, servers: Vec<String>) -> Self {
        self.dev_servers = servers;
        self
    }

    #[must_use]
    pub fn with_operation_processor(
        mut self,
        processor: Box<dyn OperationProcessor + 'a>,
    ) -> Self {
        self.operation_processors.push(processor);
        self
    }

    #[must_use]
    pub fn with_schema_processor(mut self, processor: Box<dyn SchemaProcessor + 'a>) -> Self {
        self.schema_processors.push(processor);
        self
    }

    #[must_use]
    pub fn with_document_processor(
        mut self,
        processor: Box<dyn DocumentProcessor + 'a>,
    ) -> Self {
        self.document_processors.push(processor);
        self
    }

    /// Assembles the document and runs every registered processor.
    #[must_use]
    pub fn build(&self) -> Value {
        let mut paths = Map::new();
        for registration in &self.surface.operations {
            let mut operation = operation_skeleton(registration, self.surface.group_tag);

            if let Some(context) = self.surface.descriptor_for(registration.id) {
                for processor in &self.operation_processors {
                    processor.process(&mut operation, &context);
                }
            }

            let entry = paths
                .entry(registration.path.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Some(methods) = entry.as_object_mut() {
                methods.insert(registration.method.to_string(), operation);
            }
        }

        let mut schemas = component_schemas();
        if let Some(schemas) = schemas.as_object_mut() {
            for (name, schema) in schemas.iter_mut() {
                for processor in &self.schema_processors {
                    processor.process(name, schema);
                }
            }
        }

        let mut document = json!({
            "openapi": "3.0.3",
            "info": {
                "title": decoration::document_title("schemars"),
                "description": decoration::API_DESCRIPTION,
                "version": decoration::API_VERSION,
                "contact": {
                    "name": decoration::CONTACT_NAME,
                    "url": decoration::CONTACT_URL,
                },
                "license": {
                    "name": decoration::LICENSE_NAME,
                    "url": decoration::LICENSE_URL,
                },
            },
            "paths": paths,
            "components": {
                "schemas": schemas,
                "securitySchemes": {
                    (decoration::SECURITY_SCHEME_NAME): {
                        "type": "http",
                        "scheme": "bearer",
                        "bearerFormat": decoration::BEARER_FORMAT,
                        "description": decoration::SECURITY_SCHEME_DESCRIPTION,
                    }
                }
            },
            "security": [ { (decoration::SECURITY_SCHEME_NAME): [] } ],
            "tags": [ { "name": decoration::DOCUMENT_TAG } ],
        });

        if !self.dev_servers.is_empty() {
            let servers: Vec<Value> = self
                .dev_servers
                .iter()
                .map(|url| json!({ "url": url }))
                .collect();
            if let Some(object) = document.as_object_mut() {
                object.insert("servers".to_string(), Value::Array(servers));
            }
        }

        for processor in &self.document_processors {
            processor.process(&mut document);
        }

        document
    }
}

/// The standard processor set for this backend.
#[must_use]
pub fn standard_builder<'a>(
    surface: &'a ApiSurface,
    registry: &'a ExampleRegistry,
    descriptions: &'a DescriptionResolver,
    dev_servers: Vec<String>,
) -> DocumentBuilder<'a> {
    DocumentBuilder::new(surface)
        .with_dev_servers(dev_servers)
        .with_operation_processor(Box::new(AddExamples { registry }))
        .with_schema_processor(Box::new(EnrichSchemas {
            registry,
            descriptions,
        }))
        .with_document_processor(Box::new(UpdateProblemMediaType))
        .with_document_processor(Box::new(RemoveBindingExtensions))
}

fn component_schemas() -> Value {
    let mut generator = SchemaSettings::openapi3().into_generator();
    generator.subschema_for::<TodoItemModel>();
    generator.subschema_for::<TodoListViewModel>();
    generator.subschema_for::<CreateTodoItemModel>();
    generator.subschema_for::<CreatedTodoItemModel>();
    generator.subschema_for::<ProblemDetails>();

    let definitions = generator.take_definitions();
    serde_json::to_value(definitions).unwrap_or_else(|_| Value::Object(Map::new()))
}

fn schema_reference(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

fn parameter_schema(type_name: &str) -> Value {
    match type_name {
        "Uuid" => json!({ "type": "string", "format": "uuid" }),
        "String" => json!({ "type": "string" }),
        other => schema_reference(other),
    }
}

fn operation_skeleton(registration: &OperationRegistration, group_tag: &str) -> Value {
    let mut operation = Map::new();
    operation.insert("tags".into(), json!([group_tag]));
    operation.insert("summary".into(), json!(registration.summary));
    operation.insert("description".into(), json!(registration.description));
    operation.insert("operationId".into(), json!(registration.id));

    if !registration.parameters.is_empty() {
        let parameters: Vec<Value> = registration
            .parameters
            .iter()
            .map(|p| {
                json!({
                    "name": p.name,
                    "in": p.location,
                    "description": p.description,
                    "required": true,
                    "schema": parameter_schema(p.schema.name()),
                })
            })
            .collect();
        operation.insert("parameters".into(), Value::Array(parameters));
    }

    if let Some(body) = registration.request_body {
        operation.insert(
            "requestBody".into(),
            json!({
                "content": {
                    "application/json": { "schema": schema_reference(body.name()) }
                },
                "required": true,
                (EXT_BODY_NAME): "model",
                (EXT_PARAMETER_INDEX): registration.parameters.len(),
            }),
        );
    }

    let mut responses = Map::new();
    for response in &registration.responses {
        let mut entry = Map::new();
        entry.insert("description".into(), json!(response.description));
        if let Some(schema) = response.schema {
            entry.insert(
                "content".into(),
                json!({
                    (response.media_type): { "schema": schema_reference(schema.name()) }
                }),
            );
        }
        responses.insert(response.status.to_string(), Value::Object(entry));
    }
    operation.insert("responses".into(), Value::Object(responses));

    Value::Object(operation)
}

/// Writes resolved examples into empty parameter, request-body and response
/// slots of one operation.
pub struct AddExamples<'a> {
    pub registry: &'a ExampleRegistry,
}

impl OperationProcessor for AddExamples<'_> {
    fn process(&self, operation: &mut Value, context: &OperationDescriptor) {
        if let Some(parameters) = operation
            .get_mut("parameters")
            .and_then(Value::as_array_mut)
        {
            for parameter in parameters.iter_mut() {
                let Some(name) = parameter.get("name").and_then(Value::as_str) else {
                    continue;
                };
                let Some(descriptor) = context.parameters.iter().find(|p| p.name == name)
                else {
                    continue;
                };
                let Some(slot) = parameter.as_object_mut() else {
                    continue;
                };
                if slot.contains_key("example") {
                    continue;
                }
                let resolved =
                    resolve::resolve_for_parameter(descriptor, self.registry, &context.metadata)
                        .and_then(|m| m.generate());
                if let Some(example) = resolved {
                    slot.insert("example".to_string(), example);
                }
            }
        }

        if let Some(body) = context.request_body {
            let media = operation
                .get_mut("requestBody")
                .and_then(|b| b.get_mut("content"))
                .and_then(|c| c.get_mut("application/json"))
                .and_then(Value::as_object_mut);
            if let Some(media) = media {
                if !media.contains_key("example") {
                    let resolved =
                        resolve::resolve_for_type(body, self.registry, &context.metadata)
                            .and_then(|m| m.generate());
                    if let Some(example) = resolved {
                        media.insert("example".to_string(), example);
                    }
                }
            }
        }

        for response in &context.responses {
            let Some(schema) = response.schema else { continue };
            let status = response.status.to_string();
            let media = operation
                .get_mut("responses")
                .and_then(|r| r.get_mut(status.as_str()))
                .and_then(|r| r.get_mut("content"))
                .and_then(|c| c.get_mut(response.media_type))
                .and_then(Value::as_object_mut);
            if let Some(media) = media {
                if !media.contains_key("example") {
                    let resolved =
                        resolve::resolve_for_type(schema, self.registry, &context.metadata)
                            .and_then(|m| m.generate());
                    if let Some(example) = resolved {
                        media.insert("example".to_string(), example);
                    }
                }
            }
        }
    }
}

/// Writes resolved descriptions and examples into empty schema slots, and
/// relaxes the problem-details schema's additional-properties constraint
/// (its examples carry extension fields its strict shape does not declare).
pub struct EnrichSchemas<'a> {
    pub registry: &'a ExampleRegistry,
    pub descriptions: &'a DescriptionResolver,
}

impl SchemaProcessor for EnrichSchemas<'_> {
    fn process(&self, name: &str, schema: &mut Value) {
        let Some(schema_type) = self.registry.for_name(name).map(|m| m.schema()) else {
            return;
        };

        let mut descriptor = SchemaDescriptor::new(schema_type);
        descriptor.description = schema
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string);
        descriptor.example = schema.get("example").cloned();

        resolve::fill_schema(&mut descriptor, self.registry, self.descriptions);

        let Some(slot) = schema.as_object_mut() else { return };
        if !slot.contains_key("description") {
            if let Some(description) = descriptor.description {
                slot.insert("description".to_string(), Value::String(description));
            }
        }
        if !slot.contains_key("example") {
            if let Some(example) = descriptor.example {
                slot.insert("example".to_string(), example);
            }
        }

        if name == "ProblemDetails" {
            slot.insert("additionalProperties".to_string(), Value::Bool(true));
        }

        if let Some(properties) = slot.get_mut("properties").and_then(Value::as_object_mut) {
            for (wire_name, property) in properties.iter_mut() {
                let Some(property) = property.as_object_mut() else { continue };
                if property.contains_key("description") || property.contains_key("$ref") {
                    continue;
                }
                let declared = declared_field_name(wire_name);
                let symbol = member_symbol(schema_type, &declared);
                if let Some(description) = self.descriptions.describe(&symbol) {
                    property.insert("description".to_string(), Value::String(description));
                }
            }
        }
    }
}

/// Renames the generic JSON media type of every non-2xx response to the
/// problem-details media type; this generator does not distinguish error
/// payload content types on its own.
pub struct UpdateProblemMediaType;

impl DocumentProcessor for UpdateProblemMediaType {
    fn process(&self, document: &mut Value) {
        for_each_operation(document, |operation| {
            let Some(responses) = operation
                .get_mut("responses")
                .and_then(Value::as_object_mut)
            else {
                return;
            };
            for (status, response) in responses.iter_mut() {
                if !status.starts_with('4') {
                    continue;
                }
                let Some(content) = response.get_mut("content").and_then(Value::as_object_mut)
                else {
                    continue;
                };
                if let Some(media) = content.remove("application/json") {
                    content.insert("application/problem+json".to_string(), media);
                }
            }
        });
    }
}

/// Strips the builder's internal body-binding metadata so the emitted
/// document matches the other backends' shape.
pub struct RemoveBindingExtensions;

impl DocumentProcessor for RemoveBindingExtensions {
    fn process(&self, document: &mut Value) {
        for_each_operation(document, |operation| {
            if let Some(body) = operation
                .get_mut("requestBody")
                .and_then(Value::as_object_mut)
            {
                body.remove(EXT_BODY_NAME);
                body.remove(EXT_PARAMETER_INDEX);
            }
        });
    }
}

fn for_each_operation(document: &mut Value, mut apply: impl FnMut(&mut Value)) {
    let Some(paths) = document.get_mut("paths").and_then(Value::as_object_mut) else {
        return;
    };
    for path_item in paths.values_mut() {
        let Some(methods) = path_item.as_object_mut() else { continue };
        for operation in methods.values_mut() {
            apply(operation);
        }
    }
}
