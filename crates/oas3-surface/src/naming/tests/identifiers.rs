use std::collections::BTreeSet;

use crate::naming::identifiers::{
  capitalize, constant_name, ensure_unique, kebab_to_camel, needs_wire_name, snake_to_camel,
  to_identifier, to_type_name, uncapitalize,
};

#[test]
fn test_to_identifier() {
  assert_eq!(to_identifier("pet_id"), "petId");
  assert_eq!(to_identifier("petId"), "petId");
  assert_eq!(to_identifier("X-Request-ID"), "xRequestID");
  assert_eq!(to_identifier("user.name"), "userName");
  assert_eq!(to_identifier("2fa"), "_2fa");
  assert_eq!(to_identifier("café"), "cafe");
}

#[test]
fn test_to_identifier_empty_input() {
  assert_eq!(to_identifier(""), "unnamed");
  assert_eq!(to_identifier("--"), "unnamed");
}

#[test]
fn test_needs_wire_name() {
  assert!(!needs_wire_name("petId"));
  assert!(!needs_wire_name("limit"));
  assert!(needs_wire_name("pet_id"));
  assert!(needs_wire_name("X-Request-ID"));
  assert!(needs_wire_name("filter[name]"));
}

#[test]
fn test_snake_and_kebab_to_camel() {
  assert_eq!(snake_to_camel("pet_id"), "petId");
  assert_eq!(snake_to_camel("a_b_c"), "aBC");
  assert_eq!(snake_to_camel("trailing_"), "trailing");
  assert_eq!(snake_to_camel("kebab-case"), "kebab-case");
  assert_eq!(kebab_to_camel("x-request-id"), "xRequestId");
  assert_eq!(kebab_to_camel("snake_case"), "snake_case");
}

#[test]
fn test_constant_name() {
  assert_eq!(constant_name("X-Request-ID"), "X_REQUEST_ID");
  assert_eq!(constant_name("--api key--"), "API_KEY");
  assert_eq!(constant_name("requestId"), "REQUESTID");
  assert_eq!(constant_name("in-progress"), "IN_PROGRESS");
}

#[test]
fn test_constant_name_is_always_usable() {
  assert_eq!(constant_name("1st"), "_1ST");
  assert_eq!(constant_name(""), "EMPTY");
  assert_eq!(constant_name("---"), "EMPTY");
  assert_eq!(constant_name("X-Café"), "X_CAFE");
}

#[test]
fn test_capitalization() {
  assert_eq!(capitalize("status"), "Status");
  assert_eq!(uncapitalize("Status"), "status");
  assert_eq!(capitalize(""), "");
  assert_eq!(to_type_name("status"), "Status");
  assert_eq!(to_type_name("pet_store"), "PetStore");
}

#[test]
fn test_ensure_unique() {
  let used = BTreeSet::from(["Foo".to_string(), "Foo2".to_string()]);
  assert_eq!(ensure_unique("Bar", &used), "Bar");
  assert_eq!(ensure_unique("Foo", &used), "Foo3");
}
