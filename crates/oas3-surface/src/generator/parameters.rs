use std::collections::BTreeSet;

use oas3::{
  Spec,
  spec::{ObjectOrReference, Parameter, ParameterIn},
};

use crate::{
  error::{ComponentKind, ModelResult},
  generator::{metrics::GenerationWarning, operation_registry::OperationEntry, type_mapper::TypeMapper},
  model::{DefaultValue, ParameterDescriptor, ParameterLocation, SynthesizedType, TypeDescriptor},
  naming::{
    identifiers::{constant_name, needs_wire_name, to_identifier},
    operations::extract_template_params,
  },
  utils::{Resolved, resolve_component},
};

/// An operation's parameter entries after reference resolution, operation-level entries first.
#[derive(Debug)]
pub struct ResolvedParameters<'a> {
  parameters: Vec<&'a Parameter>,
  pub warnings: Vec<GenerationWarning>,
}

impl<'a> ResolvedParameters<'a> {
  fn at(&self, location: ParameterLocation) -> impl Iterator<Item = &'a Parameter> + '_ {
    self
      .parameters
      .iter()
      .copied()
      .filter(move |param| location_of(param) == Some(location))
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedParameter {
  pub descriptor: ParameterDescriptor,
  pub synthesized: Vec<SynthesizedType>,
}

#[derive(Debug, Default)]
pub struct ExtractedParameters {
  pub parameters: Vec<ExtractedParameter>,
  pub warnings: Vec<GenerationWarning>,
}

/// Extracts normalized parameter descriptors for one location at a time.
#[derive(Debug, Clone, Copy)]
pub struct ParameterExtractor<'a> {
  spec: &'a Spec,
  mapper: TypeMapper<'a>,
}

impl<'a> ParameterExtractor<'a> {
  #[must_use]
  pub fn new(spec: &'a Spec, mapper: TypeMapper<'a>) -> Self {
    Self { spec, mapper }
  }

  /// Resolves every parameter entry of the operation and its path item.
  ///
  /// A reference chain that loops back on itself is skipped with a warning. A reference to a
  /// missing component is an error. Cookie parameters are reported and dropped.
  pub fn resolve(&self, entry: &OperationEntry<'a>) -> ModelResult<ResolvedParameters<'a>> {
    let components = self.spec.components.as_ref().map(|c| &c.parameters);
    let mut resolved = ResolvedParameters {
      parameters: vec![],
      warnings: vec![],
    };

    let entries: Vec<&'a ObjectOrReference<Parameter>> =
      entry.operation.parameters.iter().chain(entry.path_parameters).collect();
    for param_ref in entries {
      match resolve_component(param_ref, components, ComponentKind::Parameters)? {
        Resolved::Object(param) if location_of(param).is_none() => {
          resolved.warnings.push(GenerationWarning::CookieParameterSkipped {
            operation_id: entry.stable_id.clone(),
            parameter: param.name.clone(),
          });
        }
        Resolved::Object(param) => resolved.parameters.push(param),
        Resolved::Cycle(reference) => resolved.warnings.push(GenerationWarning::UnresolvedParameter {
          operation_id: entry.stable_id.clone(),
          reference,
        }),
      }
    }

    Ok(resolved)
  }

  /// Descriptors for one location, first occurrence of each name winning.
  ///
  /// For path parameters, template placeholders without a declaration are appended as
  /// required strings.
  pub fn extract(
    &self,
    entry: &OperationEntry<'a>,
    resolved: &ResolvedParameters<'a>,
    location: ParameterLocation,
  ) -> ModelResult<ExtractedParameters> {
    let mut extracted = ExtractedParameters::default();
    let mut seen = BTreeSet::new();

    for param in resolved.at(location) {
      if !seen.insert(param.name.as_str()) {
        continue;
      }
      extracted.parameters.push(self.convert(entry, param, location, &mut extracted.warnings)?);
    }

    if location == ParameterLocation::Path {
      for name in extract_template_params(&entry.path) {
        if !seen.insert(name) {
          continue;
        }
        extracted.warnings.push(GenerationWarning::UndeclaredPathParameter {
          operation_id: entry.stable_id.clone(),
          parameter: name.to_string(),
        });
        extracted.parameters.push(ExtractedParameter {
          descriptor: undeclared_path_parameter(name),
          synthesized: vec![],
        });
      }
    }

    Ok(extracted)
  }

  fn convert(
    &self,
    entry: &OperationEntry<'a>,
    param: &Parameter,
    location: ParameterLocation,
    warnings: &mut Vec<GenerationWarning>,
  ) -> ModelResult<ExtractedParameter> {
    // path parameters are always required
    let required = location == ParameterLocation::Path || param.required.unwrap_or(false);

    let Some(schema_ref) = param.schema.as_ref() else {
      warnings.push(GenerationWarning::MissingParameterSchema {
        operation_id: entry.stable_id.clone(),
        parameter: param.name.clone(),
      });
      let ty = TypeDescriptor::string().with_nullable(!required);
      return Ok(ExtractedParameter {
        descriptor: declared_parameter(param, location, ty, required, None),
        synthesized: vec![],
      });
    };

    let mut mapped = self.mapper.map_type(&param.name, schema_ref)?;
    let default = self
      .mapper
      .declared_default(schema_ref)?
      .and_then(|value| self.mapper.default_literal(&param.name, &value, &mut mapped));

    let nullable = mapped.descriptor.nullable || (!required && default.is_none());
    let ty = mapped.descriptor.clone().with_nullable(nullable);
    warnings.append(&mut mapped.warnings);

    Ok(ExtractedParameter {
      descriptor: declared_parameter(param, location, ty, required, default),
      synthesized: mapped.synthesized,
    })
  }
}

/// A parameter with a default literal is never optional, it is defaulted.
fn declared_parameter(
  param: &Parameter,
  location: ParameterLocation,
  ty: TypeDescriptor,
  required: bool,
  default: Option<DefaultValue>,
) -> ParameterDescriptor {
  ParameterDescriptor::builder()
    .name(param.name.as_str())
    .identifier(to_identifier(&param.name))
    .needs_wire_name(needs_wire_name(&param.name))
    .location(location)
    .ty(ty)
    .required(required)
    .optional(!required && default.is_none())
    .maybe_default(default)
    .maybe_header_constant((location == ParameterLocation::Header).then(|| constant_name(&param.name)))
    .maybe_description(param.description.clone())
    .deprecated(param.deprecated.unwrap_or(false))
    .build()
}

fn undeclared_path_parameter(name: &str) -> ParameterDescriptor {
  ParameterDescriptor::builder()
    .name(name)
    .identifier(to_identifier(name))
    .needs_wire_name(needs_wire_name(name))
    .location(ParameterLocation::Path)
    .ty(TypeDescriptor::string())
    .required(true)
    .build()
}

/// Location of a supported parameter, None for cookies.
fn location_of(param: &Parameter) -> Option<ParameterLocation> {
  match param.location {
    ParameterIn::Path => Some(ParameterLocation::Path),
    ParameterIn::Query => Some(ParameterLocation::Query),
    ParameterIn::Header => Some(ParameterLocation::Header),
    ParameterIn::Cookie => None,
  }
}
