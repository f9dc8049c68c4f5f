use std::collections::{BTreeMap, BTreeSet};

use crate::{
  generator::{
    metrics::GenerationWarning,
    operations::{ConvertedOperation, TypeSite},
  },
  model::{OperationDescriptor, SynthesizedType, TypeName},
  naming::identifiers::ensure_unique_with,
};

/// Renames one use of an inline type in one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypePatch {
  pub operation: usize,
  pub site: TypeSite,
  pub from: String,
  pub to: TypeName,
}

#[derive(Debug, Default)]
pub struct DedupPlan {
  /// Types to emit for the client, ordered by name.
  pub synthesized: Vec<SynthesizedType>,
  pub patches: Vec<TypePatch>,
  pub renamed: usize,
  pub warnings: Vec<GenerationWarning>,
}

#[derive(Debug)]
pub struct DedupOutcome {
  pub operations: Vec<OperationDescriptor>,
  pub synthesized: Vec<SynthesizedType>,
  pub renamed: usize,
  pub warnings: Vec<GenerationWarning>,
}

/// One operation's definition of an inline type name, with every site using it.
struct Claim<'o> {
  operation: usize,
  ty: &'o SynthesizedType,
  sites: Vec<TypeSite>,
}

/// Resolves name collisions between inline types of the operations of one client.
///
/// A name produced by a single operation is emitted once, unqualified. A name produced by
/// several operations, or equal to a named type, is qualified with each owning operation's
/// type name, and the owners' uses are patched to the new name. Structurally identical types
/// of different operations are not merged.
#[derive(Debug, Clone, Copy)]
pub struct TypeDeduplicator<'a> {
  reserved: &'a BTreeSet<String>,
}

impl<'a> TypeDeduplicator<'a> {
  /// `reserved` holds the names of the named types every client shares.
  #[must_use]
  pub fn new(reserved: &'a BTreeSet<String>) -> Self {
    Self { reserved }
  }

  pub fn plan(&self, operations: &[ConvertedOperation]) -> DedupPlan {
    let mut by_name = BTreeMap::<&str, Vec<Claim<'_>>>::new();
    for (index, converted) in operations.iter().enumerate() {
      for inline in &converted.inline_types {
        let claims = by_name.entry(inline.ty.name.name.as_str()).or_default();
        match claims
          .iter_mut()
          .find(|claim| claim.operation == index && claim.ty.entries == inline.ty.entries)
        {
          Some(claim) if !claim.sites.contains(&inline.site) => claim.sites.push(inline.site),
          Some(_) => {}
          None => claims.push(Claim {
            operation: index,
            ty: &inline.ty,
            sites: vec![inline.site],
          }),
        }
      }
    }

    let mut plan = DedupPlan::default();
    let mut used = BTreeSet::<String>::new();

    for (name, claims) in by_name {
      let owners = claims.iter().map(|claim| claim.operation).collect::<BTreeSet<_>>();
      let qualify = owners.len() > 1 || self.reserved.contains(name);
      let mut seen_owners = BTreeSet::new();

      for claim in claims {
        let owner = &operations[claim.operation].descriptor;
        let base = if qualify {
          format!("{}{name}", owner.type_name)
        } else {
          name.to_string()
        };
        let unique = ensure_unique_with(&base, |candidate| {
          used.contains(candidate) || self.reserved.contains(candidate)
        });

        if !seen_owners.insert(claim.operation) {
          plan.warnings.push(GenerationWarning::ConflictingSynthesizedType {
            operation_id: owner.id.clone(),
            type_name: name.to_string(),
            renamed: unique.clone(),
          });
        }

        let type_name = claim.ty.name.renamed(unique.as_str());
        if unique != name {
          plan.renamed += 1;
          plan.patches.extend(claim.sites.iter().map(|site| TypePatch {
            operation: claim.operation,
            site: *site,
            from: name.to_string(),
            to: type_name.clone(),
          }));
        }

        used.insert(unique);
        plan.synthesized.push(SynthesizedType {
          name: type_name,
          entries: claim.ty.entries.clone(),
        });
      }
    }

    plan.synthesized.sort_by(|a, b| a.name.name.cmp(&b.name.name));
    plan
  }

  /// Plans the renames and produces the final descriptors with their patches applied.
  pub fn run(&self, operations: Vec<ConvertedOperation>) -> DedupOutcome {
    let plan = self.plan(&operations);

    let mut warnings = vec![];
    let operations = operations
      .into_iter()
      .enumerate()
      .map(|(index, mut converted)| {
        warnings.append(&mut converted.warnings);
        let patches = plan
          .patches
          .iter()
          .filter(|patch| patch.operation == index)
          .collect::<Vec<_>>();
        patched(converted.descriptor, &patches)
      })
      .collect();
    warnings.extend(plan.warnings);

    DedupOutcome {
      operations,
      synthesized: plan.synthesized,
      renamed: plan.renamed,
      warnings,
    }
  }
}

/// Returns the descriptor with the type and default-literal references at each patched site
/// pointing at the renamed type.
pub fn patched(descriptor: OperationDescriptor, patches: &[&TypePatch]) -> OperationDescriptor {
  let mut descriptor = descriptor;
  for patch in patches {
    match patch.site {
      TypeSite::Parameter(index) => {
        if let Some(param) = descriptor.parameters.get_mut(index) {
          param.ty = param.ty.retarget(&patch.from, &patch.to);
          param.default = param.default.as_ref().map(|value| value.retarget(&patch.from, &patch.to));
        }
      }
      TypeSite::RequestBody => {
        if let Some(body) = descriptor.request_body.as_mut() {
          body.ty = body.ty.as_ref().map(|ty| ty.retarget(&patch.from, &patch.to));
        }
      }
      TypeSite::Response(index) => {
        if let Some(variant) = descriptor.responses.get_mut(index) {
          variant.body = variant.body.as_ref().map(|ty| ty.retarget(&patch.from, &patch.to));
        }
      }
    }
  }
  descriptor
}

