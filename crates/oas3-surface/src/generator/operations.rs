use oas3::Spec;

use crate::{
  error::{ComponentKind, ModelError, ModelResult},
  generator::{
    metrics::GenerationWarning,
    operation_registry::OperationEntry,
    parameters::{ExtractedParameter, ParameterExtractor},
    responses::ResponseClassifier,
    type_mapper::TypeMapper,
  },
  model::{OperationDescriptor, ParameterLocation, RequestBodyDescriptor, SynthesizedType},
  naming::{constants::REQUEST_SUFFIX, identifiers::to_type_name},
  utils::{Resolved, resolve_component},
};

/// Where an inline type is used within an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TypeSite {
  /// Index into [`OperationDescriptor::parameters`].
  Parameter(usize),
  RequestBody,
  /// Index into [`OperationDescriptor::responses`].
  Response(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct InlineType {
  pub site: TypeSite,
  pub ty: SynthesizedType,
}

/// An operation descriptor together with the inline types it produced. The descriptor is not
/// final until collisions between inline types of a client are resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedOperation {
  pub descriptor: OperationDescriptor,
  pub inline_types: Vec<InlineType>,
  pub warnings: Vec<GenerationWarning>,
}

#[derive(Debug, Clone, Copy)]
pub struct OperationConverter<'a> {
  spec: &'a Spec,
  mapper: TypeMapper<'a>,
  parameters: ParameterExtractor<'a>,
  responses: ResponseClassifier<'a>,
}

impl<'a> OperationConverter<'a> {
  #[must_use]
  pub fn new(spec: &'a Spec, mapper: TypeMapper<'a>) -> Self {
    Self {
      spec,
      mapper,
      parameters: ParameterExtractor::new(spec, mapper),
      responses: ResponseClassifier::new(spec, mapper),
    }
  }

  /// Builds the descriptor of one operation. Errors name the operation.
  pub fn convert(&self, entry: &OperationEntry<'a>) -> ModelResult<ConvertedOperation> {
    self
      .convert_entry(entry)
      .map_err(|err| err.in_operation(&entry.stable_id))
  }

  fn convert_entry(&self, entry: &OperationEntry<'a>) -> ModelResult<ConvertedOperation> {
    let operation_type = to_type_name(&entry.stable_id);
    let mut resolved = self.parameters.resolve(entry)?;
    let mut warnings = std::mem::take(&mut resolved.warnings);

    let mut extracted: Vec<ExtractedParameter> = vec![];
    for location in [ParameterLocation::Path, ParameterLocation::Query, ParameterLocation::Header] {
      let mut batch = self.parameters.extract(entry, &resolved, location)?;
      warnings.append(&mut batch.warnings);
      extracted.append(&mut batch.parameters);
    }
    extracted.sort_by(|a, b| {
      a.descriptor
        .location
        .cmp(&b.descriptor.location)
        .then_with(|| a.descriptor.name.cmp(&b.descriptor.name))
    });

    let mut inline_types = vec![];
    let mut parameters = Vec::with_capacity(extracted.len());
    for (index, param) in extracted.into_iter().enumerate() {
      inline_types.extend(param.synthesized.into_iter().map(|ty| InlineType {
        site: TypeSite::Parameter(index),
        ty,
      }));
      parameters.push(param.descriptor);
    }

    let request_body = self.request_body(entry, &operation_type, &mut inline_types, &mut warnings)?;

    let mut classified = self
      .responses
      .classify(&entry.stable_id, &operation_type, entry.operation)?;
    warnings.append(&mut classified.warnings);
    inline_types.extend(classified.synthesized.into_iter().map(|(index, ty)| InlineType {
      site: TypeSite::Response(index),
      ty,
    }));

    let operation = entry.operation;
    Ok(ConvertedOperation {
      descriptor: OperationDescriptor {
        id: entry.stable_id.clone(),
        type_name: operation_type,
        method: entry.method.as_str().to_string(),
        path: entry.path.clone(),
        summary: operation.summary.clone(),
        description: operation.description.clone(),
        deprecated: operation.deprecated.unwrap_or(false),
        parameters,
        request_body,
        responses: classified.variants,
      },
      inline_types,
      warnings,
    })
  }

  fn request_body(
    &self,
    entry: &OperationEntry<'a>,
    operation_type: &str,
    inline_types: &mut Vec<InlineType>,
    warnings: &mut Vec<GenerationWarning>,
  ) -> ModelResult<Option<RequestBodyDescriptor>> {
    let Some(body_ref) = entry.operation.request_body.as_ref() else {
      return Ok(None);
    };

    let components = self.spec.components.as_ref().map(|c| &c.request_bodies);
    let body = match resolve_component(body_ref, components, ComponentKind::RequestBodies)? {
      Resolved::Object(body) => body,
      Resolved::Cycle(reference) => {
        return Err(ModelError::UnresolvedReference {
          kind: ComponentKind::RequestBodies,
          reference,
        });
      }
    };

    let Some((content_type, media_type)) = body.content.iter().next() else {
      return Ok(None);
    };
    if body.content.len() > 1 {
      warnings.push(GenerationWarning::MultipleContentTypes {
        operation_id: entry.stable_id.clone(),
        location: "request body".to_string(),
        count: body.content.len(),
        used: content_type.clone(),
      });
    }

    let required = body.required.unwrap_or(false);
    let ty = match media_type.schema.as_ref() {
      Some(schema_ref) => {
        let mut mapped = self
          .mapper
          .map_type(&format!("{operation_type}{REQUEST_SUFFIX}"), schema_ref)?;
        warnings.append(&mut mapped.warnings);
        inline_types.extend(mapped.synthesized.into_iter().map(|ty| InlineType {
          site: TypeSite::RequestBody,
          ty,
        }));
        let nullable = mapped.descriptor.nullable || !required;
        Some(mapped.descriptor.with_nullable(nullable))
      }
      None => None,
    };

    Ok(Some(RequestBodyDescriptor {
      content_type: content_type.clone(),
      ty,
      required,
    }))
  }
}
