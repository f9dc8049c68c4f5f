//! Pipeline from a parsed document to the [`SurfaceModel`].
//!
//! 1. Registers the selected operations and groups them into clients.
//! 2. Computes the schema closure reachable from those operations.
//! 3. Builds a named type definition for each schema in the closure.
//! 4. Converts each client's operations, then resolves inline type collisions per client.
//! 5. Verifies that every named reference points at a type in the model.

use std::collections::{BTreeMap, BTreeSet};

use oas3::Spec;

use crate::{
  error::{ModelError, ModelResult},
  generator::{
    config::{Customizer, ModelConfig, SchemaScope},
    dedup::TypeDeduplicator,
    definitions::DefinitionBuilder,
    metrics::GenerationStats,
    operation_registry::{OperationEntry, OperationRegistry},
    operations::OperationConverter,
    schema_graph::{SchemaGraph, collect_operation_refs},
    type_mapper::TypeMapper,
  },
  model::{ClientModel, HeaderConstant, NamedTypeDef, OperationDescriptor, SurfaceModel},
  naming::identifiers::ensure_unique_with,
};

/// The model together with what happened while building it.
#[derive(Debug)]
pub struct ModelOutput {
  pub model: SurfaceModel,
  pub stats: GenerationStats,
}

/// Builds a [`SurfaceModel`] from a parsed document.
///
/// Configuration is fixed at construction; customizers run before anything is built.
pub struct Orchestrator {
  spec: Spec,
  config: ModelConfig,
}

impl Orchestrator {
  #[must_use]
  pub fn new(spec: Spec, config: ModelConfig) -> Self {
    Self { spec, config }
  }

  #[must_use]
  pub fn with_customizers(spec: Spec, config: ModelConfig, customizers: &[Customizer]) -> Self {
    Self::new(spec, config.customized(customizers))
  }

  #[must_use]
  pub fn config(&self) -> &ModelConfig {
    &self.config
  }

  #[must_use]
  pub fn spec(&self) -> &Spec {
    &self.spec
  }

  /// The operations selected by the configured filter.
  #[must_use]
  pub fn registry(&self) -> OperationRegistry<'_> {
    OperationRegistry::new(&self.spec, &self.config.filter)
  }

  /// Runs the whole pipeline. The first structural error aborts the run.
  pub fn build(&self) -> ModelResult<ModelOutput> {
    let mut stats = GenerationStats::default();
    let registry = self.registry();
    let graph = SchemaGraph::new(&self.spec);

    let roots = self.closure_roots(&registry, &graph)?;
    let closure = graph.closure(&roots)?;
    stats.record_pruned_schemas(graph.len().saturating_sub(closure.len()));
    stats.record_cycles(graph.detect_cycles(&closure));

    let mapper = TypeMapper::new(&graph, self.config.base_package.as_deref());
    let built = DefinitionBuilder::new(&graph, mapper).build(&closure)?;
    stats.record_warnings(built.warnings);
    stats.record_named_types(&built.definitions);

    let reserved = emitted_type_names(&built.definitions);
    let converter = OperationConverter::new(&self.spec, mapper);
    let deduplicator = TypeDeduplicator::new(&reserved);

    let mut clients = vec![];
    for (name, entries) in registry.group(self.config.grouping) {
      let converted = entries
        .into_iter()
        .map(|entry| converter.convert(entry))
        .collect::<ModelResult<Vec<_>>>()?;

      let mut outcome = deduplicator.run(converted);
      let header_constants = header_constants(&mut outcome.operations);
      stats.record_warnings(outcome.warnings);
      stats.record_client(
        outcome.operations.len(),
        outcome.synthesized.len(),
        outcome.renamed,
        header_constants.len(),
      );

      clients.push(ClientModel {
        name,
        operations: outcome.operations,
        synthesized: outcome.synthesized,
        header_constants,
      });
    }

    let model = SurfaceModel {
      base_package: self.config.base_package.clone(),
      types: built.definitions,
      clients,
    };
    verify_references(&model, &reserved)?;

    Ok(ModelOutput { model, stats })
  }

  /// Seeds the closure with every schema an operation references (keyed to the operation
  /// id), plus every component schema when all schemas are kept.
  fn closure_roots(
    &self,
    registry: &OperationRegistry<'_>,
    graph: &SchemaGraph<'_>,
  ) -> ModelResult<BTreeMap<String, String>> {
    let mut roots = BTreeMap::new();

    for entry in registry.operations() {
      for name in operation_refs(&self.spec, entry)? {
        roots.entry(name).or_insert_with(|| entry.stable_id.clone());
      }
    }

    if self.config.schema_scope == SchemaScope::All {
      for name in graph.schema_names() {
        roots.entry(name.to_string()).or_insert_with(|| name.to_string());
      }
    }

    Ok(roots)
  }
}

fn operation_refs(spec: &Spec, entry: &OperationEntry<'_>) -> ModelResult<BTreeSet<String>> {
  collect_operation_refs(spec, entry).map_err(|err| err.in_operation(&entry.stable_id))
}

fn emitted_type_names(definitions: &[NamedTypeDef]) -> BTreeSet<String> {
  definitions
    .iter()
    .flat_map(|def| std::iter::once(&def.name).chain(def.nested.iter().map(|nested| &nested.name)))
    .map(|name| name.name.clone())
    .collect()
}

/// Header wire names used by the client, ordered by constant name.
///
/// Wire names that normalize to the same constant get numbered constants, and their
/// parameters are pointed at the constant holding their own wire name.
fn header_constants(operations: &mut [OperationDescriptor]) -> Vec<HeaderConstant> {
  let mut constants = BTreeMap::<String, String>::new();
  let mut by_wire = BTreeMap::<String, String>::new();

  for param in operations.iter_mut().flat_map(|operation| operation.parameters.iter_mut()) {
    let Some(base) = param.header_constant.as_deref() else {
      continue;
    };
    let name = if let Some(existing) = by_wire.get(&param.name) {
      existing.clone()
    } else {
      let unique = ensure_unique_with(base, |candidate| constants.contains_key(candidate));
      constants.insert(unique.clone(), param.name.clone());
      by_wire.insert(param.name.clone(), unique.clone());
      unique
    };
    param.header_constant = Some(name);
  }

  constants
    .into_iter()
    .map(|(name, value)| HeaderConstant { name, value })
    .collect()
}

/// Every named reference must point at a named type, a nested enum, or an inline type of
/// the same client.
fn verify_references(model: &SurfaceModel, emitted: &BTreeSet<String>) -> ModelResult<()> {
  for def in &model.types {
    for target in def.type_descriptors().into_iter().flat_map(|ty| ty.named_targets()) {
      if !emitted.contains(&target.name) {
        return Err(ModelError::UnknownTypeReference {
          referrer: def.schema_name.clone(),
          name: target.name.clone(),
        });
      }
    }
  }

  for client in &model.clients {
    let local = client
      .synthesized
      .iter()
      .map(|ty| ty.name.name.as_str())
      .collect::<BTreeSet<_>>();

    for operation in &client.operations {
      for target in operation.type_descriptors().flat_map(|ty| ty.named_targets()) {
        if !emitted.contains(&target.name) && !local.contains(target.name.as_str()) {
          return Err(ModelError::UnknownTypeReference {
            referrer: operation.id.clone(),
            name: target.name.clone(),
          });
        }
      }
    }
  }

  Ok(())
}
