use std::collections::{BTreeMap, BTreeSet, VecDeque};

use oas3::{
  Spec,
  spec::{ObjectOrReference, ObjectSchema},
};
use petgraph::{algo::kosaraju_scc, graphmap::DiGraphMap};

use crate::{
  error::{ComponentKind, ModelError, ModelResult},
  generator::operation_registry::OperationEntry,
  utils::{Resolved, parse_ref_name, resolve_component, schema_ext::schema_object},
};

/// Reference graph over the document's component schemas.
#[derive(Debug)]
pub struct SchemaGraph<'a> {
  components: Option<&'a BTreeMap<String, ObjectOrReference<ObjectSchema>>>,
  /// schema name -> other named schemas it references directly
  dependencies: BTreeMap<&'a str, BTreeSet<String>>,
  self_referential: BTreeSet<&'a str>,
}

impl<'a> SchemaGraph<'a> {
  #[must_use]
  pub fn new(spec: &'a Spec) -> Self {
    let components = spec.components.as_ref().map(|components| &components.schemas);

    let mut dependencies = BTreeMap::new();
    let mut self_referential = BTreeSet::new();
    for (name, schema) in components.into_iter().flatten() {
      let mut refs = BTreeSet::new();
      collect_refs(schema, &mut refs);
      if refs.remove(name) {
        self_referential.insert(name.as_str());
      }
      dependencies.insert(name.as_str(), refs);
    }

    Self {
      components,
      dependencies,
      self_referential,
    }
  }

  #[must_use]
  pub fn contains(&self, name: &str) -> bool {
    self.dependencies.contains_key(name)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.dependencies.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.dependencies.is_empty()
  }

  pub fn schema_names(&self) -> impl Iterator<Item = &'a str> + '_ {
    self.dependencies.keys().copied()
  }

  #[must_use]
  pub fn get(&self, name: &str) -> Option<&'a ObjectOrReference<ObjectSchema>> {
    self.components?.get(name)
  }

  pub fn dependencies(&self, name: &str) -> impl Iterator<Item = &String> {
    self.dependencies.get(name).into_iter().flatten()
  }

  /// Follows component references until an inline schema is found. Returns None for a
  /// reference chain that loops back on itself.
  pub fn resolve(&self, node: &'a ObjectOrReference<ObjectSchema>) -> ModelResult<Option<&'a ObjectSchema>> {
    match resolve_component(node, self.components, ComponentKind::Schemas)? {
      Resolved::Object(schema) => Ok(Some(schema)),
      Resolved::Cycle(_) => Ok(None),
    }
  }

  /// Computes every schema transitively reachable from `roots` (name -> referrer).
  ///
  /// A name already in the result is never expanded again, so cyclic references terminate.
  /// A reference to a name missing from the components fails with the referrer that named it.
  pub fn closure(&self, roots: &BTreeMap<String, String>) -> ModelResult<BTreeSet<String>> {
    let mut visited = BTreeSet::new();
    let mut worklist = roots
      .iter()
      .map(|(name, referrer)| (name.clone(), referrer.clone()))
      .collect::<VecDeque<_>>();

    while let Some((name, referrer)) = worklist.pop_front() {
      if visited.contains(&name) {
        continue;
      }
      let Some(deps) = self.dependencies.get(name.as_str()) else {
        return Err(ModelError::DanglingReference { referrer, name });
      };
      for dep in deps.iter().filter(|dep| !visited.contains(*dep)) {
        worklist.push_back((dep.clone(), name.clone()));
      }
      visited.insert(name);
    }

    Ok(visited)
  }

  /// Strongly connected components of the reference graph restricted to `within`,
  /// including schemas that reference themselves.
  pub fn detect_cycles(&self, within: &BTreeSet<String>) -> Vec<Vec<String>> {
    let mut graph = DiGraphMap::<&str, ()>::new();
    for (&node, deps) in self.dependencies.iter().filter(|(node, _)| within.contains(**node)) {
      graph.add_node(node);
      for dep in deps.iter().filter(|dep| within.contains(*dep)) {
        graph.add_edge(node, dep.as_str(), ());
      }
      if self.self_referential.contains(&node) {
        graph.add_edge(node, node, ());
      }
    }

    let mut cycles = kosaraju_scc(&graph)
      .into_iter()
      .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
      .map(|scc| {
        let mut cycle = scc.into_iter().map(String::from).collect::<Vec<_>>();
        cycle.sort();
        cycle
      })
      .collect::<Vec<_>>();
    cycles.sort();
    cycles
  }
}

/// Collects the schema names referenced by an operation's parameters, request body and
/// responses, stopping at the first named reference of each path.
///
/// Only the first content type of a body is considered, matching what the operation uses.
pub fn collect_operation_refs(spec: &Spec, entry: &OperationEntry<'_>) -> ModelResult<BTreeSet<String>> {
  let components = spec.components.as_ref();
  let mut refs = BTreeSet::new();

  for param_ref in entry.operation.parameters.iter().chain(entry.path_parameters) {
    let parameters = components.map(|c| &c.parameters);
    if let Resolved::Object(param) = resolve_component(param_ref, parameters, ComponentKind::Parameters)?
      && let Some(schema) = &param.schema
    {
      collect_refs(schema, &mut refs);
    }
  }

  if let Some(body_ref) = &entry.operation.request_body {
    let bodies = components.map(|c| &c.request_bodies);
    if let Resolved::Object(body) = resolve_component(body_ref, bodies, ComponentKind::RequestBodies)?
      && let Some(schema) = body.content.values().next().and_then(|media| media.schema.as_ref())
    {
      collect_refs(schema, &mut refs);
    }
  }

  for response_ref in entry.operation.responses.iter().flat_map(BTreeMap::values) {
    let responses = components.map(|c| &c.responses);
    if let Resolved::Object(response) = resolve_component(response_ref, responses, ComponentKind::Responses)?
      && let Some(schema) = response.content.values().next().and_then(|media| media.schema.as_ref())
    {
      collect_refs(schema, &mut refs);
    }
  }

  Ok(refs)
}

/// Adds the named references of a schema node, recursing into anonymous schemas.
pub(crate) fn collect_refs(node: &ObjectOrReference<ObjectSchema>, refs: &mut BTreeSet<String>) {
  match node {
    ObjectOrReference::Ref { ref_path, .. } => {
      refs.insert(parse_ref_name(ref_path));
    }
    ObjectOrReference::Object(schema) => collect_schema_refs(schema, refs),
  }
}

fn collect_schema_refs(schema: &ObjectSchema, refs: &mut BTreeSet<String>) {
  let children = schema
    .properties
    .values()
    .chain(&schema.one_of)
    .chain(&schema.any_of)
    .chain(&schema.all_of);
  for child in children {
    collect_refs(child, refs);
  }

  let slots = [schema.items.as_deref(), schema.additional_properties.as_ref()];
  for child in slots.into_iter().flatten().filter_map(schema_object) {
    collect_refs(child, refs);
  }
}
