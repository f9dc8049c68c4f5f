use std::collections::{BTreeMap, BTreeSet};

use oas3::spec::{ObjectOrReference, ObjectSchema};

use crate::error::{ComponentKind, ModelError, ModelResult};

/// Extracts the component name from a `$ref` pointer.
///
/// Only the trailing segment is used, the `#/components/<kind>/` prefix is not
/// validated. JSON pointer escapes are decoded.
///
/// # Example
///
/// ```text
/// "#/components/schemas/Pet"      => "Pet"
/// "#/components/schemas/a~1b~0c"  => "a/b~c"
/// ```
pub fn parse_ref_name(ref_path: &str) -> String {
  let segment = ref_path.rsplit('/').next().unwrap_or(ref_path);
  segment.replace("~1", "/").replace("~0", "~")
}

/// Returns the referenced schema name when the node is a `$ref`.
pub fn extract_schema_ref_name(obj_ref: &ObjectOrReference<ObjectSchema>) -> Option<String> {
  match obj_ref {
    ObjectOrReference::Ref { ref_path, .. } => Some(parse_ref_name(ref_path)),
    ObjectOrReference::Object(_) => None,
  }
}

/// Outcome of following a component reference chain.
#[derive(Debug)]
pub enum Resolved<'a, T> {
  Object(&'a T),
  /// The chain came back to a pointer it had already followed.
  Cycle(String),
}

/// Follows `$ref` indirections through one component section until an inline value is found.
///
/// A reference chain that revisits a pointer is reported as [`Resolved::Cycle`] instead of
/// looping. A pointer to a missing entry is an error.
pub fn resolve_component<'a, T>(
  item: &'a ObjectOrReference<T>,
  components: Option<&'a BTreeMap<String, ObjectOrReference<T>>>,
  kind: ComponentKind,
) -> ModelResult<Resolved<'a, T>> {
  let mut current = item;
  let mut visited = BTreeSet::new();

  loop {
    match current {
      ObjectOrReference::Object(value) => return Ok(Resolved::Object(value)),
      ObjectOrReference::Ref { ref_path, .. } => {
        if !visited.insert(ref_path.as_str()) {
          return Ok(Resolved::Cycle(ref_path.clone()));
        }
        let name = parse_ref_name(ref_path);
        current = components
          .and_then(|entries| entries.get(&name))
          .ok_or_else(|| ModelError::UnresolvedReference {
            kind,
            reference: ref_path.clone(),
          })?;
      }
    }
  }
}
