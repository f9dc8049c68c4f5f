use oas3::{
  Spec,
  spec::{ObjectOrReference, ObjectSchema},
};
use serde_json::{Value, json};

use crate::generator::{config::OperationFilter, operation_registry::OperationRegistry};

mod definitions;
mod type_mapper;

/// A document with the given paths and component schemas.
pub(super) fn document(paths: Value, schemas: Value) -> Spec {
  parse(json!({
    "openapi": "3.1.0",
    "info": { "title": "Test", "version": "1.0.0" },
    "paths": paths,
    "components": { "schemas": schemas }
  }))
}

pub(super) fn parse(value: Value) -> Spec {
  serde_json::from_value(value).expect("valid document")
}

pub(super) fn schema(value: Value) -> ObjectOrReference<ObjectSchema> {
  serde_json::from_value(value).expect("valid schema")
}

pub(super) fn schema_ref(name: &str) -> Value {
  json!({ "$ref": format!("#/components/schemas/{name}") })
}

/// A response map with a single JSON body per status code.
pub(super) fn ok_response(body: Value) -> Value {
  json!({
    "200": {
      "description": "ok",
      "content": { "application/json": { "schema": body } }
    }
  })
}

pub(super) fn registry(spec: &Spec) -> OperationRegistry<'_> {
  OperationRegistry::new(spec, &OperationFilter::default())
}
