use serde_json::json;

use super::{document, schema, schema_ref};
use crate::{
  error::ModelError,
  generator::{
    metrics::{GenerationWarning, OpaqueReason},
    schema_graph::SchemaGraph,
    type_mapper::{MappedType, TypeMapper},
  },
  model::{DefaultValue, EnumEntry, PrimitiveKind, TypeDescriptor, TypeKind, TypeName},
};

fn components() -> oas3::Spec {
  document(
    json!({}),
    json!({
      "Pet": { "type": "object", "properties": { "name": { "type": "string" } } },
      "Owner": { "type": "object" },
      "Status": { "type": "string", "enum": ["on", "off"] },
      "Companion": { "type": "object" }
    }),
  )
}

fn map(value: serde_json::Value) -> MappedType {
  let spec = components();
  let graph = SchemaGraph::new(&spec);
  TypeMapper::new(&graph, None).map_type("Context", &schema(value)).unwrap()
}

fn named(name: &str) -> TypeDescriptor {
  TypeDescriptor::named(TypeName::new(name, None))
}

#[test]
fn test_primitives() {
  let cases = [
    (json!({ "type": "string" }), TypeDescriptor::string()),
    (json!({ "type": "string", "format": "date-time" }), TypeDescriptor::string()),
    (json!({ "type": "number" }), TypeDescriptor::primitive(PrimitiveKind::Double)),
    (
      json!({ "type": "number", "format": "float" }),
      TypeDescriptor::primitive(PrimitiveKind::Float),
    ),
    (json!({ "type": "integer" }), TypeDescriptor::primitive(PrimitiveKind::Int64)),
    (
      json!({ "type": "integer", "format": "int32" }),
      TypeDescriptor::primitive(PrimitiveKind::Int32),
    ),
    (json!({ "type": "boolean" }), TypeDescriptor::primitive(PrimitiveKind::Bool)),
  ];

  for (input, expected) in cases {
    assert_eq!(map(input.clone()).descriptor, expected, "input: {input}");
  }
}

#[test]
fn test_null_in_type_list_is_nullable() {
  let mapped = map(json!({ "type": ["integer", "null"] }));
  assert_eq!(
    mapped.descriptor,
    TypeDescriptor::primitive(PrimitiveKind::Int64).with_nullable(true)
  );
}

#[test]
fn test_reference_maps_to_named_type() {
  assert_eq!(map(schema_ref("Pet")).descriptor, named("Pet"));
}

#[test]
fn test_reserved_name_is_force_qualified() {
  let spec = components();
  let graph = SchemaGraph::new(&spec);
  let mapper = TypeMapper::new(&graph, Some("com.example"));

  let mapped = mapper.map_type("Context", &schema(schema_ref("Companion"))).unwrap();
  assert_eq!(mapped.descriptor.to_string(), "com.example.Companion");

  let pet = mapper.map_type("Context", &schema(schema_ref("Pet"))).unwrap();
  assert_eq!(pet.descriptor.to_string(), "Pet");
  assert_eq!(pet.descriptor.as_named().and_then(|name| name.package.as_deref()), Some("com.example"));
}

#[test]
fn test_arrays_and_sets() {
  assert_eq!(
    map(json!({ "type": "array", "items": schema_ref("Pet") })).descriptor,
    TypeDescriptor::array_of(named("Pet"))
  );
  assert_eq!(
    map(json!({ "type": "array", "items": { "type": "string" }, "uniqueItems": true })).descriptor,
    TypeDescriptor::set_of(TypeDescriptor::string())
  );
}

#[test]
fn test_array_without_items_fails() {
  let spec = components();
  let graph = SchemaGraph::new(&spec);
  let err = TypeMapper::new(&graph, None)
    .map_type("ListPetsResponse200", &schema(json!({ "type": "array" })))
    .unwrap_err();
  assert!(matches!(err, ModelError::MissingArrayItems { ref context } if context == "ListPetsResponse200"));
}

#[test]
fn test_objects() {
  assert_eq!(
    map(json!({ "type": "object", "additionalProperties": { "type": "integer" } })).descriptor,
    TypeDescriptor::map_of(TypeDescriptor::primitive(PrimitiveKind::Int64))
  );

  let free_form = map(json!({ "type": "object" }));
  assert_eq!(free_form.descriptor, TypeDescriptor::opaque());
  assert!(free_form.warnings.is_empty());

  let inline = map(json!({ "type": "object", "properties": { "a": { "type": "string" } } }));
  assert_eq!(inline.descriptor, TypeDescriptor::opaque());
  assert_eq!(
    inline.warnings,
    vec![GenerationWarning::OpaqueFallback {
      context: "Context".to_string(),
      reason: OpaqueReason::UnmappedProperties,
    }]
  );
}

#[test]
fn test_boolean_additional_properties_fails() {
  let spec = components();
  let graph = SchemaGraph::new(&spec);
  let err = TypeMapper::new(&graph, None)
    .map_type("Context", &schema(json!({ "type": "object", "additionalProperties": true })))
    .unwrap_err();
  assert!(matches!(err, ModelError::BooleanAdditionalProperties { .. }));
}

#[test]
fn test_string_enum_synthesizes_type_named_after_context() {
  let spec = components();
  let graph = SchemaGraph::new(&spec);
  let mapped = TypeMapper::new(&graph, None)
    .map_type(
      "findPetsStatus",
      &schema(json!({ "type": "string", "enum": ["active", "in-active", "active"] })),
    )
    .unwrap();

  assert_eq!(mapped.descriptor, named("FindPetsStatus"));
  assert_eq!(mapped.synthesized.len(), 1);
  assert_eq!(
    mapped.synthesized[0].entries,
    vec![
      EnumEntry {
        value: "active".to_string(),
        constant: "ACTIVE".to_string(),
      },
      EnumEntry {
        value: "in-active".to_string(),
        constant: "IN_ACTIVE".to_string(),
      },
    ]
  );
}

#[test]
fn test_non_string_enum_is_plain_type() {
  let mapped = map(json!({ "type": "integer", "enum": [1, 2, 3] }));
  assert_eq!(mapped.descriptor, TypeDescriptor::primitive(PrimitiveKind::Int64));
  assert!(mapped.synthesized.is_empty());
}

#[test]
fn test_single_variant_union_with_null() {
  let mapped = map(json!({ "oneOf": [schema_ref("Pet"), { "type": "null" }] }));
  assert_eq!(mapped.descriptor, named("Pet").with_nullable(true));
  assert!(mapped.warnings.is_empty());

  let any = map(json!({ "anyOf": [{ "type": "string" }] }));
  assert_eq!(any.descriptor, TypeDescriptor::string());
}

#[test]
fn test_multiple_variants_are_opaque() {
  let mapped = map(json!({ "oneOf": [schema_ref("Pet"), schema_ref("Owner")] }));
  assert_eq!(mapped.descriptor, TypeDescriptor::opaque());
  assert_eq!(
    mapped.warnings,
    vec![GenerationWarning::OpaqueFallback {
      context: "Context".to_string(),
      reason: OpaqueReason::MultipleVariants,
    }]
  );

  let nullable = map(json!({ "anyOf": [{ "type": "string" }, { "type": "integer" }, { "type": "null" }] }));
  assert_eq!(nullable.descriptor, TypeDescriptor::opaque().with_nullable(true));
}

#[test]
fn test_untyped_schemas() {
  assert_eq!(map(json!({})).descriptor, TypeDescriptor::opaque());
  assert!(matches!(
    map(json!({ "additionalProperties": { "type": "boolean" } })).descriptor.kind,
    TypeKind::MapOf { .. }
  ));
  assert_eq!(map(json!({ "enum": ["x", "y"] })).descriptor, named("Context"));
}

#[test]
fn test_mapping_is_deterministic() {
  let input = json!({
    "type": "array",
    "items": { "oneOf": [{ "type": "string", "enum": ["a", "b"] }, { "type": "null" }] }
  });
  assert_eq!(map(input.clone()), map(input));
}

#[test]
fn test_default_literals() {
  let spec = components();
  let graph = SchemaGraph::new(&spec);
  let mapper = TypeMapper::new(&graph, None);

  let mut int32 = mapper
    .map_type("limit", &schema(json!({ "type": "integer", "format": "int32" })))
    .unwrap();
  assert_eq!(
    mapper.default_literal("limit", &json!(20), &mut int32),
    Some(DefaultValue::Integer(20))
  );
  assert_eq!(mapper.default_literal("limit", &json!(5_000_000_000_i64), &mut int32), None);
  assert!(matches!(
    int32.warnings.as_slice(),
    [GenerationWarning::IncompatibleDefault { context, type_name, .. }] if context == "limit" && type_name == "Int32"
  ));

  let mut flag = mapper.map_type("flag", &schema(json!({ "type": "boolean" }))).unwrap();
  assert_eq!(mapper.default_literal("flag", &json!(true), &mut flag), Some(DefaultValue::Bool(true)));
  assert_eq!(mapper.default_literal("flag", &json!("yes"), &mut flag), None);

  let mut ratio = mapper.map_type("ratio", &schema(json!({ "type": "number" }))).unwrap();
  assert_eq!(mapper.default_literal("ratio", &json!(0.5), &mut ratio), Some(DefaultValue::Number(0.5)));
}

#[test]
fn test_null_default_requires_nullable_type() {
  let spec = components();
  let graph = SchemaGraph::new(&spec);
  let mapper = TypeMapper::new(&graph, None);

  let mut plain = mapper.map_type("name", &schema(json!({ "type": "string" }))).unwrap();
  assert_eq!(mapper.default_literal("name", &json!(null), &mut plain), None);

  let mut nullable = mapper
    .map_type("name", &schema(json!({ "type": ["string", "null"] })))
    .unwrap();
  assert_eq!(
    mapper.default_literal("name", &json!(null), &mut nullable),
    Some(DefaultValue::Null)
  );
}

#[test]
fn test_enum_default_literals() {
  let spec = components();
  let graph = SchemaGraph::new(&spec);
  let mapper = TypeMapper::new(&graph, None);

  let mut inline = mapper
    .map_type("status", &schema(json!({ "type": "string", "enum": ["active", "inactive"] })))
    .unwrap();
  assert_eq!(
    mapper.default_literal("status", &json!("inactive"), &mut inline),
    Some(DefaultValue::EnumEntry {
      type_name: TypeName::new("Status", None),
      constant: "INACTIVE".to_string(),
    })
  );
  assert_eq!(mapper.default_literal("status", &json!("unknown"), &mut inline), None);

  let mut component = mapper.map_type("mode", &schema(schema_ref("Status"))).unwrap();
  assert_eq!(
    mapper.default_literal("mode", &json!("off"), &mut component),
    Some(DefaultValue::EnumEntry {
      type_name: TypeName::new("Status", None),
      constant: "OFF".to_string(),
    })
  );

  let mut object = mapper.map_type("pet", &schema(schema_ref("Pet"))).unwrap();
  assert_eq!(mapper.default_literal("pet", &json!("x"), &mut object), None);
}
