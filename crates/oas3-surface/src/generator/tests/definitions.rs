use std::collections::BTreeSet;

use serde_json::{Value, json};

use super::{document, schema_ref};
use crate::{
  error::ModelError,
  generator::{
    definitions::{BuiltDefinitions, DefinitionBuilder},
    schema_graph::SchemaGraph,
    type_mapper::TypeMapper,
  },
  model::{DefaultValue, EnumEntry, FieldDef, NamedTypeDef, NamedTypeKind, PrimitiveKind, TypeDescriptor, TypeName},
};

fn build(schemas: Value) -> Result<BuiltDefinitions, ModelError> {
  let spec = document(json!({}), schemas);
  let graph = SchemaGraph::new(&spec);
  let names = graph.schema_names().map(str::to_string).collect::<BTreeSet<_>>();
  DefinitionBuilder::new(&graph, TypeMapper::new(&graph, None)).build(&names)
}

fn find<'a>(built: &'a BuiltDefinitions, name: &str) -> &'a NamedTypeDef {
  built
    .definitions
    .iter()
    .find(|def| def.schema_name == name)
    .unwrap_or_else(|| panic!("no definition for {name}"))
}

fn fields(def: &NamedTypeDef) -> &[FieldDef] {
  match &def.kind {
    NamedTypeKind::Struct { fields } => fields,
    other => panic!("expected struct, got {other:?}"),
  }
}

fn field<'a>(def: &'a NamedTypeDef, name: &str) -> &'a FieldDef {
  fields(def).iter().find(|field| field.name == name).unwrap()
}

fn named(name: &str) -> TypeDescriptor {
  TypeDescriptor::named(TypeName::new(name, None))
}

fn pet_schema() -> Value {
  json!({
    "type": "object",
    "description": "A pet",
    "required": ["name"],
    "properties": {
      "name": { "type": "string" },
      "tag": { "type": "string", "deprecated": true },
      "status": { "type": "string", "enum": ["available", "sold"], "default": "available" }
    }
  })
}

#[test]
fn test_struct_fields_follow_required() {
  let built = build(json!({ "Pet": pet_schema() })).unwrap();
  let pet = find(&built, "Pet");

  assert_eq!(pet.description.as_deref(), Some("A pet"));
  let names = fields(pet).iter().map(|field| field.name.as_str()).collect::<Vec<_>>();
  assert_eq!(names, ["name", "status", "tag"]);

  assert_eq!(field(pet, "name").ty, TypeDescriptor::string());
  assert_eq!(field(pet, "tag").ty, TypeDescriptor::string().with_nullable(true));
  assert!(field(pet, "tag").deprecated);
}

#[test]
fn test_nullability_law() {
  let built = build(json!({
    "Pair": {
      "type": "object",
      "required": ["a"],
      "properties": {
        "a": { "type": "integer" },
        "b": { "type": "integer" },
        "c": { "type": ["integer", "null"] }
      }
    },
    "Both": {
      "type": "object",
      "required": ["c"],
      "properties": { "c": { "type": ["integer", "null"] } }
    }
  }))
  .unwrap();

  let pair = find(&built, "Pair");
  assert!(!field(pair, "a").ty.nullable);
  assert!(field(pair, "b").ty.nullable);
  assert!(field(pair, "c").ty.nullable);

  let both = find(&built, "Both");
  assert_eq!(
    field(both, "c").ty,
    TypeDescriptor::primitive(PrimitiveKind::Int64).with_nullable(true)
  );
}

#[test]
fn test_inline_property_enum_is_nested() {
  let built = build(json!({ "Pet": pet_schema() })).unwrap();
  let pet = find(&built, "Pet");

  assert_eq!(pet.nested.len(), 1);
  assert_eq!(pet.nested[0].name.name, "PetStatus");
  assert_eq!(
    pet.nested[0].entries,
    vec![
      EnumEntry {
        value: "available".to_string(),
        constant: "AVAILABLE".to_string(),
      },
      EnumEntry {
        value: "sold".to_string(),
        constant: "SOLD".to_string(),
      },
    ]
  );

  let status = field(pet, "status");
  assert_eq!(status.ty, named("PetStatus").with_nullable(true));
  assert_eq!(
    status.default,
    Some(DefaultValue::EnumEntry {
      type_name: TypeName::new("PetStatus", None),
      constant: "AVAILABLE".to_string(),
    })
  );
}

#[test]
fn test_nested_enum_avoids_named_types() {
  let built = build(json!({
    "Pet": pet_schema(),
    "PetStatus": { "type": "string", "enum": ["x"] }
  }))
  .unwrap();
  let pet = find(&built, "Pet");

  assert_eq!(pet.nested[0].name.name, "PetStatus2");
  assert_eq!(field(pet, "status").ty, named("PetStatus2").with_nullable(true));
  assert!(matches!(
    &field(pet, "status").default,
    Some(DefaultValue::EnumEntry { type_name, .. }) if type_name.name == "PetStatus2"
  ));
}

#[test]
fn test_string_enum_component() {
  let built = build(json!({ "Status": { "type": "string", "enum": ["on", "off", null] } })).unwrap();
  assert_eq!(
    find(&built, "Status").kind,
    NamedTypeKind::Enum {
      entries: vec![
        EnumEntry {
          value: "on".to_string(),
          constant: "ON".to_string(),
        },
        EnumEntry {
          value: "off".to_string(),
          constant: "OFF".to_string(),
        },
      ],
    }
  );
}

#[test]
fn test_aliases() {
  let built = build(json!({
    "Pet": pet_schema(),
    "PetAlias": schema_ref("Pet"),
    "Ids": { "type": "array", "items": { "type": "string" } },
    "Levels": { "type": "array", "items": { "type": "string", "enum": ["low", "high"] } }
  }))
  .unwrap();

  assert_eq!(find(&built, "PetAlias").kind, NamedTypeKind::Alias { target: named("Pet") });
  assert_eq!(
    find(&built, "Ids").kind,
    NamedTypeKind::Alias {
      target: TypeDescriptor::array_of(TypeDescriptor::string()),
    }
  );

  let levels = find(&built, "Levels");
  assert_eq!(
    levels.kind,
    NamedTypeKind::Alias {
      target: TypeDescriptor::array_of(named("LevelsValue")),
    }
  );
  assert_eq!(levels.nested[0].name.name, "LevelsValue");
}

#[test]
fn test_all_of_members_are_merged() {
  let built = build(json!({
    "Pet": pet_schema(),
    "Dog": {
      "allOf": [
        schema_ref("Pet"),
        { "type": "object", "required": ["bark"], "properties": { "bark": { "type": "boolean" } } }
      ]
    }
  }))
  .unwrap();
  let dog = find(&built, "Dog");

  let names = fields(dog).iter().map(|field| field.name.as_str()).collect::<Vec<_>>();
  assert_eq!(names, ["bark", "name", "status", "tag"]);
  assert_eq!(field(dog, "bark").ty, TypeDescriptor::primitive(PrimitiveKind::Bool));
  assert!(!field(dog, "name").ty.nullable);
  assert_eq!(dog.nested[0].name.name, "DogStatus");
}

#[test]
fn test_self_referencing_all_of_terminates() {
  let built = build(json!({
    "Loop": {
      "allOf": [ schema_ref("Loop") ],
      "properties": { "id": { "type": "string" } }
    }
  }))
  .unwrap();
  assert_eq!(fields(find(&built, "Loop")).len(), 1);
}

#[test]
fn test_errors_name_the_schema() {
  let err = build(json!({ "Bad": { "type": "object", "properties": { "list": { "type": "array" } } } })).unwrap_err();
  assert_eq!(err.to_string(), "failed to convert schema 'Bad'");
  assert!(matches!(
    err.root_cause(),
    ModelError::MissingArrayItems { context } if context == "BadList"
  ));
}

#[test]
fn test_definitions_are_ordered_by_name() {
  let built = build(json!({
    "Zebra": { "type": "string" },
    "Aardvark": { "type": "string" },
    "Mole": { "type": "string" }
  }))
  .unwrap();
  let names = built
    .definitions
    .iter()
    .map(|def| def.schema_name.as_str())
    .collect::<Vec<_>>();
  assert_eq!(names, ["Aardvark", "Mole", "Zebra"]);
}

#[test]
fn test_referenced_schema_default_is_kept_on_field() {
  let built = build(json!({
    "SortOrder": { "type": "string", "enum": ["asc", "desc"], "default": "desc" },
    "Query": {
      "type": "object",
      "properties": { "order": schema_ref("SortOrder") }
    }
  }))
  .unwrap();

  let order = field(find(&built, "Query"), "order");
  assert_eq!(order.ty, named("SortOrder").with_nullable(true));
  assert_eq!(
    order.default,
    Some(DefaultValue::EnumEntry {
      type_name: TypeName::new("SortOrder", None),
      constant: "DESC".to_string(),
    })
  );
  assert!(built.warnings.is_empty());
}
