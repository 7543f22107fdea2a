// SPDX-License-Identifier: Apache-2.0

//! Adapters for the utoipa generator backend.
//!
//! utoipa derives its document from path/schema attributes; these adapters
//! are `Modify` passes run over the derived `utoipa::openapi` graph before
//! the document is served.

use crate::decoration;
use crate::describe::{declared_field_name, member_symbol, DescriptionResolver};
use crate::descriptor::SchemaDescriptor;
use crate::registry::ExampleRegistry;
use crate::resolve;
use crate::surface::ApiSurface;
use ::utoipa::openapi::path::ParameterBuilder;
use ::utoipa::openapi::schema::AdditionalProperties;
use ::utoipa::openapi::security::{
    HttpAuthScheme, HttpBuilder, SecurityRequirement, SecurityScheme,
};
use ::utoipa::openapi::{
    Components, ContactBuilder, LicenseBuilder, OpenApi, RefOr, Schema, Server,
};
use ::utoipa::Modify;

/// Writes resolved examples into empty parameter, request-body and response
/// slots of every derived operation.
pub struct AddExamples<'a> {
    pub registry: &'a ExampleRegistry,
    pub surface: &'a ApiSurface,
}

impl Modify for AddExamples<'_> {
    fn modify(&self, openapi: &mut OpenApi) {
        for path_item in openapi.paths.paths.values_mut() {
            for operation in path_item.operations.values_mut() {
                let Some(context) = operation
                    .operation_id
                    .as_deref()
                    .and_then(|id| self.surface.descriptor_for(id))
                else {
                    continue;
                };

                if let Some(parameters) = operation.parameters.as_mut() {
                    for parameter in parameters.iter_mut() {
                        let Some(descriptor) =
                            context.parameters.iter().find(|p| p.name == parameter.name)
                        else {
                            continue;
                        };
                        // utoipa keeps `Parameter::example` private behind its
                        // builder; read the current value through serialization
                        // and write it back through `ParameterBuilder`.
                        let has_example = serde_json::to_value(&*parameter)
                            .ok()
                            .and_then(|value| value.get("example").cloned())
                            .is_some();
                        if has_example {
                            continue;
                        }
                        if let Some(example) = resolve::resolve_for_parameter(
                            descriptor,
                            self.registry,
                            &context.metadata,
                        )
                        .and_then(|m| m.generate())
                        {
                            *parameter = ParameterBuilder::from(parameter.clone())
                                .example(Some(example))
                                .build();
                        }
                    }
                }

                if let Some(body) = context.request_body {
                    if let Some(request_body) = operation.request_body.as_mut() {
                        if let Some(content) =
                            request_body.content.get_mut("application/json")
                        {
                            if content.example.is_none() {
                                content.example = resolve::resolve_for_type(
                                    body,
                                    self.registry,
                                    &context.metadata,
                                )
                                .and_then(|m| m.generate());
                            }
                        }
                    }
                }

                for response in &context.responses {
                    let Some(schema) = response.schema else { continue };
                    let status = response.status.to_string();
                    let Some(RefOr::T(declared)) =
                        operation.responses.responses.get_mut(&status)
                    else {
                        continue;
                    };
                    for content in declared.content.values_mut() {
                        if content.example.is_none() {
                            content.example = resolve::resolve_for_type(
                                schema,
                                self.registry,
                                &context.metadata,
                            )
                            .and_then(|m| m.generate());
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

impl Modify for EnrichSchemas<'_> {
    fn modify(&self, openapi: &mut OpenApi) {
        let Some(components) = openapi.components.as_mut() else { return };

        for (name, schema) in components.schemas.iter_mut() {
            let RefOr::T(Schema::Object(object)) = schema else { continue };
            let Some(schema_type) = self.registry.for_name(name).map(|m| m.schema()) else {
                continue;
            };

            let mut descriptor = SchemaDescriptor::new(schema_type);
            descriptor.description = object.description.clone();
            descriptor.example = object.example.clone();

            resolve::fill_schema(&mut descriptor, self.registry, self.descriptions);

            if object.description.is_none() {
                object.description = descriptor.description;
            }
            if object.example.is_none() {
                object.example = descriptor.example;
            }

            if name == "ProblemDetails" {
                object.additional_properties =
                    Some(Box::new(AdditionalProperties::FreeForm(true)));
            }

            for (wire_name, property) in object.properties.iter_mut() {
                let RefOr::T(Schema::Object(property)) = property else { continue };
                if property.description.is_some() {
                    continue;
                }
                let declared = declared_field_name(wire_name);
                property.description =
                    self.descriptions.describe(&member_symbol(schema_type, &declared));
            }
        }
    }
}

/// Applies the shared document decoration: title, contact, license, bearer
/// security scheme and (in development) the live server addresses.
pub struct DecorateDocument {
    pub dev_servers: Vec<String>,
}

impl Modify for DecorateDocument {
    fn modify(&self, openapi: &mut OpenApi) {
        openapi.info.title = decoration::document_title("utoipa");
        openapi.info.description = Some(decoration::API_DESCRIPTION.to_string());
        openapi.info.version = decoration::API_VERSION.to_string();
        openapi.info.contact = Some(
            ContactBuilder::new()
                .name(Some(decoration::CONTACT_NAME))
                .url(Some(decoration::CONTACT_URL))
                .build(),
        );
        openapi.info.license = Some(
            LicenseBuilder::new()
                .name(decoration::LICENSE_NAME)
                .url(Some(decoration::LICENSE_URL))
                .build(),
        );

        let components = openapi.components.get_or_insert_with(Components::default);
        components.add_security_scheme(
            decoration::SECURITY_SCHEME_NAME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format(decoration::BEARER_FORMAT)
                    .description(Some(decoration::SECURITY_SCHEME_DESCRIPTION.to_string()))
                    .build(),
            ),
        );
        openapi.security = Some(vec![SecurityRequirement::new(
            decoration::SECURITY_SCHEME_NAME,
            Vec::<String>::new(),
        )]);

        if !self.dev_servers.is_empty() {
            openapi.servers = Some(
                self.dev_servers
                    .iter()
                    .map(|address| Server::new(address.clone()))
                    .collect(),
            );
        }
    }
}
