use http::Method;
use indexmap::IndexMap;
use oas3::{
  Spec,
  spec::{ObjectOrReference, Operation, Parameter},
};

use crate::{
  generator::config::{ClientGrouping, OperationFilter},
  naming::{
    constants::DEFAULT_CLIENT_NAME,
    identifiers::to_type_name,
    operations::{compute_stable_id, ensure_unique_operation_id},
  },
};

/// A single operation selected from the document.
#[derive(Debug, Clone)]
pub struct OperationEntry<'a> {
  /// Stable camelCase identifier, unique across the registry.
  pub stable_id: String,
  pub method: Method,
  /// The URL path template (e.g., `/users/{id}`).
  pub path: String,
  pub operation: &'a Operation,
  /// Parameters declared on the enclosing path item.
  pub path_parameters: &'a [ObjectOrReference<Parameter>],
}

impl OperationEntry<'_> {
  /// Output unit the operation belongs to.
  pub fn client_name(&self, grouping: ClientGrouping) -> String {
    match grouping {
      ClientGrouping::Single => DEFAULT_CLIENT_NAME.to_string(),
      ClientGrouping::ByTag => self
        .operation
        .tags
        .first()
        .map_or_else(|| DEFAULT_CLIENT_NAME.to_string(), |tag| to_type_name(tag)),
    }
  }
}

#[derive(Debug, Default)]
struct RegistrationContext<'a> {
  entries: IndexMap<String, OperationEntry<'a>>,
}

impl<'a> RegistrationContext<'a> {
  fn register(&mut self, entry: OperationEntry<'a>) {
    self.entries.insert(entry.stable_id.clone(), entry);
  }

  fn contains_id(&self, id: &str) -> bool {
    self.entries.contains_key(id)
  }

  fn into_entries(self) -> Vec<OperationEntry<'a>> {
    self.entries.into_values().collect()
  }
}

/// Registry of the HTTP operations taking part in a run, in document order.
///
/// Webhooks and callbacks are not enumerated.
#[derive(Debug)]
pub struct OperationRegistry<'a> {
  entries: Vec<OperationEntry<'a>>,
}

impl<'a> OperationRegistry<'a> {
  #[must_use]
  pub fn new(spec: &'a Spec, filter: &OperationFilter) -> Self {
    let mut context = RegistrationContext::default();

    for (path, method, operation) in spec.operations() {
      let base_id = compute_stable_id(method.as_str(), path.as_str(), operation.operation_id.as_deref());

      if !filter.accepts_id(&base_id) {
        continue;
      }

      let stable_id = ensure_unique_operation_id(&base_id, |id| context.contains_id(id));
      let path_parameters = spec
        .paths
        .as_ref()
        .and_then(|paths| paths.get(&path))
        .map_or(&[][..], |item| item.parameters.as_slice());

      let entry = OperationEntry {
        stable_id,
        method,
        path,
        operation,
        path_parameters,
      };

      if filter.accepts_entry(&entry) {
        context.register(entry);
      }
    }

    Self {
      entries: context.into_entries(),
    }
  }

  pub fn operations(&self) -> impl Iterator<Item = &OperationEntry<'a>> {
    self.entries.iter()
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Splits the operations into output units, in first-seen order.
  pub fn group(&self, grouping: ClientGrouping) -> IndexMap<String, Vec<&OperationEntry<'a>>> {
    let mut groups = IndexMap::<String, Vec<_>>::new();
    for entry in &self.entries {
      groups.entry(entry.client_name(grouping)).or_default().push(entry);
    }
    groups
  }
}
