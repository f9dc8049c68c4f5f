use std::collections::BTreeMap;

use oas3::spec::{ObjectOrReference, Parameter};
use serde_json::json;

use crate::{
  error::{ComponentKind, ModelError},
  utils::{Resolved, extract_schema_ref_name, parse_ref_name, resolve_component},
};

fn reference<T>(path: &str) -> ObjectOrReference<T> {
  ObjectOrReference::Ref {
    ref_path: path.to_string(),
    summary: None,
    description: None,
  }
}

fn parameters() -> BTreeMap<String, ObjectOrReference<Parameter>> {
  let limit: Parameter = serde_json::from_value(json!({
    "name": "limit",
    "in": "query",
    "schema": { "type": "integer" }
  }))
  .unwrap();

  BTreeMap::from([
    ("Limit".to_string(), ObjectOrReference::Object(limit)),
    ("LimitAlias".to_string(), reference("#/components/parameters/Limit")),
    ("Loop".to_string(), reference("#/components/parameters/Loop")),
  ])
}

#[test]
fn test_parse_ref_name_uses_trailing_segment() {
  assert_eq!(parse_ref_name("#/components/schemas/Pet"), "Pet");
  assert_eq!(parse_ref_name("#/definitions/Pet"), "Pet");
  assert_eq!(parse_ref_name("#/components/schemas/a~1b~0c"), "a/b~c");
  assert_eq!(parse_ref_name("Pet"), "Pet");
}

#[test]
fn test_extract_schema_ref_name() {
  assert_eq!(
    extract_schema_ref_name(&reference("#/components/schemas/Pet")).as_deref(),
    Some("Pet")
  );
  assert_eq!(
    extract_schema_ref_name(&ObjectOrReference::Object(oas3::spec::ObjectSchema::default())),
    None
  );
}

#[test]
fn test_resolve_component_follows_chains() {
  let components = parameters();
  let item = reference("#/components/parameters/LimitAlias");

  let resolved = resolve_component(&item, Some(&components), ComponentKind::Parameters).unwrap();
  let Resolved::Object(param) = resolved else {
    panic!("expected a parameter, got {resolved:?}");
  };
  assert_eq!(param.name, "limit");
}

#[test]
fn test_resolve_component_detects_self_reference() {
  let components = parameters();
  let item = reference("#/components/parameters/Loop");

  let resolved = resolve_component(&item, Some(&components), ComponentKind::Parameters).unwrap();
  assert!(matches!(resolved, Resolved::Cycle(ref path) if path == "#/components/parameters/Loop"));
}

#[test]
fn test_resolve_component_dangling_reference_is_error() {
  let components = parameters();
  let item = reference("#/components/parameters/Missing");

  let err = resolve_component(&item, Some(&components), ComponentKind::Parameters).unwrap_err();
  assert!(matches!(
    err,
    ModelError::UnresolvedReference {
      kind: ComponentKind::Parameters,
      ..
    }
  ));

  let err = resolve_component(&item, None, ComponentKind::Parameters).unwrap_err();
  assert!(matches!(err, ModelError::UnresolvedReference { .. }));
}
