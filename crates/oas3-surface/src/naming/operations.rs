use inflections::Inflect;

use crate::naming::{
  constants::PATH_PARAM_PREFIX,
  identifiers::{ensure_unique_with, to_identifier},
};

/// Returns the stable identifier for an operation: the explicit `operationId` when
/// present, otherwise one derived from the verb and path.
pub fn compute_stable_id<S>(method: S, path: S, operation_id: Option<S>) -> String
where
  S: AsRef<str>,
{
  operation_id.map_or_else(
    || generate_operation_id(method, path),
    |id| to_identifier(id.as_ref()),
  )
}

/// Derives an identifier from the HTTP verb and path template.
///
/// # Example
///
/// ```text
/// ("GET", "/pets/{petId}/toys") => "getPetsByPetIdToys"
/// ("DELETE", "/")               => "delete"
/// ```
pub fn generate_operation_id<S>(method: S, path: S) -> String
where
  S: AsRef<str>,
{
  let segments = path
    .as_ref()
    .split('/')
    .filter(|s| !s.is_empty())
    .map(|s| match template_name(s) {
      Some(name) => format!("{PATH_PARAM_PREFIX}_{}", name.to_snake_case()),
      None => s.to_snake_case(),
    })
    .collect::<Vec<_>>();

  let method = method.as_ref().to_lowercase();
  if segments.is_empty() {
    to_identifier(&method)
  } else {
    to_identifier(&format!("{method}_{}", segments.join("_")))
  }
}

/// Makes an operation identifier unique against the already registered ones.
pub fn ensure_unique_operation_id<F>(base_id: &str, is_taken: F) -> String
where
  F: Fn(&str) -> bool,
{
  ensure_unique_with(base_id, is_taken)
}

fn template_name(segment: &str) -> Option<&str> {
  segment.strip_prefix('{').and_then(|s| s.strip_suffix('}'))
}

/// Yields every `{name}` placeholder of a path template in order of appearance.
pub fn extract_template_params(path: &str) -> impl Iterator<Item = &str> {
  path.split('{').skip(1).filter_map(|rest| {
    let (name, _) = rest.split_once('}')?;
    (!name.is_empty()).then_some(name)
  })
}
