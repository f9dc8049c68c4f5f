use std::collections::{BTreeMap, BTreeSet};

use oas3::spec::{ObjectOrReference, ObjectSchema, SchemaType};

use crate::{
  error::{ModelError, ModelResult},
  generator::{
    metrics::GenerationWarning,
    schema_graph::SchemaGraph,
    type_mapper::{TypeMapper, enum_entries},
  },
  model::{FieldDef, NamedTypeDef, NamedTypeKind, SynthesizedType},
  naming::identifiers::{ensure_unique_with, needs_wire_name, to_identifier, to_type_name},
  utils::{SchemaExt, extract_schema_ref_name},
};

/// Properties and required names gathered from a schema and its `allOf` members.
#[derive(Default)]
struct MergeAccumulator<'s> {
  properties: BTreeMap<&'s str, &'s ObjectOrReference<ObjectSchema>>,
  required: BTreeSet<&'s str>,
}

impl<'s> MergeAccumulator<'s> {
  /// Later sources override earlier properties of the same name.
  fn merge_from(&mut self, source: &'s ObjectSchema) {
    for (name, prop) in &source.properties {
      self.properties.insert(name.as_str(), prop);
    }
    self.required.extend(source.required.iter().map(String::as_str));
  }
}

#[derive(Debug, Default)]
pub struct BuiltDefinitions {
  pub definitions: Vec<NamedTypeDef>,
  pub warnings: Vec<GenerationWarning>,
}

/// Builds a named type definition for each schema in the output set.
#[derive(Debug, Clone, Copy)]
pub struct DefinitionBuilder<'a> {
  graph: &'a SchemaGraph<'a>,
  mapper: TypeMapper<'a>,
}

impl<'a> DefinitionBuilder<'a> {
  #[must_use]
  pub fn new(graph: &'a SchemaGraph<'a>, mapper: TypeMapper<'a>) -> Self {
    Self { graph, mapper }
  }

  /// Builds definitions in name order. Errors name the schema.
  pub fn build(&self, names: &BTreeSet<String>) -> ModelResult<BuiltDefinitions> {
    let mut built = BuiltDefinitions::default();
    let mut nested_used = BTreeSet::new();

    for name in names {
      let definition = self
        .build_definition(name, names, &mut nested_used, &mut built.warnings)
        .map_err(|err| err.in_schema(name))?;
      built.definitions.push(definition);
    }

    Ok(built)
  }

  fn build_definition(
    &self,
    name: &str,
    named: &BTreeSet<String>,
    nested_used: &mut BTreeSet<String>,
    warnings: &mut Vec<GenerationWarning>,
  ) -> ModelResult<NamedTypeDef> {
    let node = self.graph.get(name).ok_or_else(|| ModelError::DanglingReference {
      referrer: name.to_string(),
      name: name.to_string(),
    })?;

    let ObjectOrReference::Object(schema) = node else {
      let target = self.mapper.map_type(name, node)?.descriptor;
      return Ok(NamedTypeDef {
        name: self.mapper.type_name(name),
        schema_name: name.to_string(),
        description: None,
        deprecated: false,
        kind: NamedTypeKind::Alias { target },
        nested: vec![],
      });
    };

    let mut nested = vec![];
    let (schema_type, _) = schema.effective_type();
    let kind = if let Some(values) = schema.string_enum_values()
      && matches!(schema_type, Some(SchemaType::String) | None)
    {
      NamedTypeKind::Enum {
        entries: enum_entries(&values),
      }
    } else if !schema.properties.is_empty() || !schema.all_of.is_empty() {
      NamedTypeKind::Struct {
        fields: self.build_fields(name, schema, named, nested_used, &mut nested, warnings)?,
      }
    } else {
      let context = format!("{}Value", to_type_name(name));
      let mut mapped = self.mapper.map_type(&context, node)?;
      warnings.append(&mut mapped.warnings);

      let mut target = mapped.descriptor;
      for synthesized in mapped.synthesized {
        let original = synthesized.name.name.clone();
        let (claimed, renamed) = claim_nested(synthesized, named, nested_used);
        if renamed {
          target = target.retarget(&original, &claimed.name);
        }
        nested.push(claimed);
      }
      NamedTypeKind::Alias { target }
    };

    Ok(NamedTypeDef {
      name: self.mapper.type_name(name),
      schema_name: name.to_string(),
      description: schema.description.clone(),
      deprecated: schema.is_deprecated(),
      kind,
      nested,
    })
  }

  fn build_fields(
    &self,
    name: &str,
    schema: &'a ObjectSchema,
    named: &BTreeSet<String>,
    nested_used: &mut BTreeSet<String>,
    nested: &mut Vec<SynthesizedType>,
    warnings: &mut Vec<GenerationWarning>,
  ) -> ModelResult<Vec<FieldDef>> {
    let mut acc = MergeAccumulator::default();
    let mut visited = BTreeSet::from([name.to_string()]);
    self.merge_all_of(schema, &mut acc, &mut visited)?;

    let type_name = to_type_name(name);
    let mut fields = Vec::with_capacity(acc.properties.len());

    for (prop_name, prop) in acc.properties {
      let context = format!("{type_name}{}", to_type_name(prop_name));
      let mut mapped = self.mapper.map_type(&context, prop)?;

      let inline = match prop {
        ObjectOrReference::Object(inline) => Some(inline),
        ObjectOrReference::Ref { .. } => None,
      };
      let mut default = self
        .mapper
        .declared_default(prop)?
        .and_then(|value| self.mapper.default_literal(&format!("{name}.{prop_name}"), &value, &mut mapped));
      warnings.append(&mut mapped.warnings);

      let mut ty = mapped.descriptor;
      for synthesized in mapped.synthesized {
        let original = synthesized.name.name.clone();
        let (claimed, renamed) = claim_nested(synthesized, named, nested_used);
        if renamed {
          ty = ty.retarget(&original, &claimed.name);
          default = default.map(|value| value.retarget(&original, &claimed.name));
        }
        nested.push(claimed);
      }

      let required = acc.required.contains(&prop_name);
      let nullable = ty.nullable || !required;
      fields.push(FieldDef {
        name: prop_name.to_string(),
        identifier: to_identifier(prop_name),
        needs_wire_name: needs_wire_name(prop_name),
        ty: ty.with_nullable(nullable),
        default,
        description: inline.and_then(|inline| inline.description.clone()),
        deprecated: inline.is_some_and(|inline| inline.is_deprecated()),
      });
    }

    Ok(fields)
  }

  /// Merges `allOf` members depth-first, then the schema's own properties. A named member
  /// already being merged is skipped.
  fn merge_all_of(
    &self,
    schema: &'a ObjectSchema,
    acc: &mut MergeAccumulator<'a>,
    visited: &mut BTreeSet<String>,
  ) -> ModelResult<()> {
    for member in &schema.all_of {
      if let Some(member_name) = extract_schema_ref_name(member)
        && !visited.insert(member_name)
      {
        continue;
      }
      if let Some(member_schema) = self.graph.resolve(member)? {
        self.merge_all_of(member_schema, acc, visited)?;
      }
    }
    acc.merge_from(schema);
    Ok(())
  }
}

/// Gives a nested enum a name that no named type or other nested enum uses.
fn claim_nested(
  synthesized: SynthesizedType,
  named: &BTreeSet<String>,
  nested_used: &mut BTreeSet<String>,
) -> (SynthesizedType, bool) {
  let unique = ensure_unique_with(&synthesized.name.name, |candidate| {
    named.contains(candidate) || nested_used.contains(candidate)
  });
  nested_used.insert(unique.clone());

  if unique == synthesized.name.name {
    (synthesized, false)
  } else {
    let name = synthesized.name.renamed(unique);
    (
      SynthesizedType {
        name,
        entries: synthesized.entries,
      },
      true,
    )
  }
}
