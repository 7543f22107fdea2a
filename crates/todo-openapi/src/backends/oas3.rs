// SPDX-License-Identifier: Apache-2.0

//! Adapters for the oas3 generator backend.
//!
//! This backend produces an OpenAPI 3.1 document held in `oas3::spec`'s
//! typed object model. The skeleton is generated from the API surface table
//! and loaded into the typed model; extension points are transformer passes
//! over the typed `Spec` applied before the document is served.

use crate::decoration;
use crate::describe::{declared_field_name, member_symbol, DescriptionResolver};
use crate::descriptor::SchemaDescriptor;
use crate::registry::ExampleRegistry;
use crate::resolve;
use crate::surface::{ApiSurface, OperationRegistration};
use ::oas3::spec::{
    MediaTypeExamples, ObjectOrReference, ObjectSchema, Operation, PathItem, Schema, Spec,
};
use serde_json::{json, Map, Value};

/// Failure to produce the typed base document. Generation-time only; never
/// seen by enrichment.
#[derive(Debug)]
pub struct DocumentError(pub String);

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "oas3 document generation failed: {}", self.0)
    }
}

impl std::error::Error for DocumentError {}

/// A transformer pass over the typed document.
pub trait SpecTransformer {
    fn transform(&self, spec: &mut Spec);
}

/// Generates the typed base document for the registered surface.
pub fn base_document(
    surface: &ApiSurface,
    dev_servers: &[String],
) -> Result<Spec, DocumentError> {
    let skeleton = document_skeleton(surface, dev_servers);
    serde_json::from_value(skeleton).map_err(|e| DocumentError(e.to_string()))
}

fn document_skeleton(surface: &ApiSurface, dev_servers: &[String]) -> Value {
    let mut paths = Map::new();
    for registration in &surface.operations {
        let entry = paths
            .entry(registration.path.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Some(methods) = entry.as_object_mut() {
            methods.insert(
                registration.method.to_string(),
                operation_skeleton(registration, surface.group_tag),
            );
        }
    }

    let mut document = json!({
        "openapi": "3.1.0",
        "info": {
            "title": decoration::document_title("oas3"),
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
            "schemas": component_schemas(),
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

    if !dev_servers.is_empty() {
        let servers: Vec<Value> = dev_servers.iter().map(|url| json!({ "url": url })).collect();
        if let Some(object) = document.as_object_mut() {
            object.insert("servers".to_string(), Value::Array(servers));
        }
    }

    document
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

fn component_schemas() -> Value {
    json!({
        "TodoItemModel": {
            "type": "object",
            "required": ["id", "text", "isCompleted", "lastUpdated"],
            "properties": {
                "id": { "type": "string" },
                "text": { "type": "string" },
                "isCompleted": { "type": "boolean" },
                "lastUpdated": { "type": "string" },
            },
        },
        "TodoListViewModel": {
            "type": "object",
            "required": ["items"],
            "properties": {
                "items": {
                    "type": "array",
                    "items": { "$ref": "#/components/schemas/TodoItemModel" },
                },
            },
        },
        "CreateTodoItemModel": {
            "type": "object",
            "required": ["text"],
            "additionalProperties": false,
            "properties": {
                "text": { "type": "string" },
            },
        },
        "CreatedTodoItemModel": {
            "type": "object",
            "required": ["id"],
            "properties": {
                "id": { "type": "string" },
            },
        },
        "ProblemDetails": {
            "type": "object",
            "required": ["type", "title", "status", "detail"],
            "properties": {
                "type": { "type": "string" },
                "title": { "type": "string" },
                "status": { "type": "integer" },
                "detail": { "type": "string" },
                "instance": { "type": "string" },
            },
        },
    })
}

fn operations_mut(path_item: &mut PathItem) -> impl Iterator<Item = &mut Operation> {
    [
        path_item.get.as_mut(),
        path_item.post.as_mut(),
        path_item.put.as_mut(),
        path_item.patch.as_mut(),
        path_item.delete.as_mut(),
    ]
    .into_iter()
    .flatten()
}

/// Writes resolved examples into empty parameter, request-body and response
/// slots of every operation in the typed document.
pub struct AddExamples<'a> {
    pub registry: &'a ExampleRegistry,
    pub surface: &'a ApiSurface,
}

impl SpecTransformer for AddExamples<'_> {
    fn transform(&self, spec: &mut Spec) {
        let Some(paths) = spec.paths.as_mut() else { return };

        for path_item in paths.values_mut() {
            for operation in operations_mut(path_item) {
                let Some(context) = operation
                    .operation_id
                    .as_deref()
                    .and_then(|id| self.surface.descriptor_for(id))
                else {
                    continue;
                };

                for parameter in operation.parameters.iter_mut() {
                    let ObjectOrReference::Object(parameter) = parameter else { continue };
                    let Some(descriptor) =
                        context.parameters.iter().find(|p| p.name == parameter.name)
                    else {
                        continue;
                    };
                    if parameter.example.is_some() {
                        continue;
                    }
                    parameter.example = resolve::resolve_for_parameter(
                        descriptor,
                        self.registry,
                        &context.metadata,
                    )
                    .and_then(|m| m.generate());
                }

                if let Some(body) = context.request_body {
                    if let Some(ObjectOrReference::Object(request_body)) =
                        operation.request_body.as_mut()
                    {
                        if let Some(media) = request_body.content.get_mut("application/json")
                        {
                            if media.examples.is_none() {
                                media.examples = resolve::resolve_for_type(
                                    body,
                                    self.registry,
                                    &context.metadata,
                                )
                                .and_then(|m| m.generate())
                                .map(|example| MediaTypeExamples::Example { example });
                            }
                        }
                    }
                }

                if let Some(responses) = operation.responses.as_mut() {
                    for response in &context.responses {
                        let Some(schema) = response.schema else { continue };
                        let status = response.status.to_string();
                        let Some(ObjectOrReference::Object(declared)) =
                            responses.get_mut(&status)
                        else {
                            continue;
                        };
                        for media in declared.content.values_mut() {
                            if media.examples.is_none() {
                                media.examples = resolve::resolve_for_type(
                                    schema,
                                    self.registry,
                                    &context.metadata,
                                )
                                .and_then(|m| m.generate())
                                .map(|example| MediaTypeExamples::Example { example });
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Writes resolved descriptions and examples into empty schema slots and
/// relaxes the problem-details schema's additional-properties constraint.
pub struct EnrichSchemas<'a> {
    pub registry: &'a ExampleRegistry,
    pub descriptions: &'a DescriptionResolver,
}

impl SpecTransformer for EnrichSchemas<'_> {
    fn transform(&self, spec: &mut Spec) {
        let Some(components) = spec.components.as_mut() else { return };

        for (name, schema) in components.schemas.iter_mut() {
            let ObjectOrReference::Object(schema) = schema else { continue };
            let Some(schema_type) = self.registry.for_name(name).map(|m| m.schema()) else {
                continue;
            };

            let mut descriptor = SchemaDescriptor::new(schema_type);
            descriptor.description = schema.description.clone();
            descriptor.example = schema.example.clone();

            resolve::fill_schema(&mut descriptor, self.registry, self.descriptions);

            if schema.description.is_none() {
                schema.description = descriptor.description;
            }
            if schema.example.is_none() {
                schema.example = descriptor.example;
            }

            if name == "ProblemDetails" {
                schema.additional_properties = Some(Schema::Object(Box::new(
                    ObjectOrReference::Object(ObjectSchema::default()),
                )));
            }

            for (wire_name, property) in schema.properties.iter_mut() {
                let ObjectOrReference::Object(property) = property else { continue };
                if property.description.is_some() {
                    continue;
                }
                let declared = declared_field_name(wire_name);
                property.description = self
                    .descriptions
                    .describe(&member_symbol(schema_type, &declared));
            }
        }
    }
}

/// Renames the generic JSON media type of every non-2xx response to the
/// problem-details media type; this generator defaults every response to the
/// same content type.
pub struct UpdateProblemMediaType;

impl SpecTransformer for UpdateProblemMediaType {
    fn transform(&self, spec: &mut Spec) {
        let Some(paths) = spec.paths.as_mut() else { return };

        for path_item in paths.values_mut() {
            for operation in operations_mut(path_item) {
                let Some(responses) = operation.responses.as_mut() else { continue };
                for (status, response) in responses.iter_mut() {
                    if !status.starts_with('4') {
                        continue;
                    }
                    let ObjectOrReference::Object(response) = response else { continue };
                    if let Some(media) = response.content.remove("application/json") {
                        response
                            .content
                            .insert("application/problem+json".to_string(), media);
                    }
                }
            }
        }
    }
}
