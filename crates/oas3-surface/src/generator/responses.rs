use itertools::Itertools;
use oas3::{
  Spec,
  spec::{ObjectOrReference, Operation, Response},
};

use crate::{
  error::{ComponentKind, ModelError, ModelResult},
  generator::{metrics::GenerationWarning, type_mapper::TypeMapper},
  model::{ResponseVariant, SynthesizedType, TypeDescriptor, VariantKind},
  naming::{
    constants::RESPONSE_SUFFIX,
    responses::{is_success_status, unknown_failure_name, variant_name, variant_suffix},
  },
  utils::{Resolved, resolve_component},
};

#[derive(Debug, Default)]
pub struct ClassifiedResponses {
  /// Declared variants in ascending status order, followed by the unknown-failure variant.
  pub variants: Vec<ResponseVariant>,
  /// Inline types paired with the index of the variant whose body uses them.
  pub synthesized: Vec<(usize, SynthesizedType)>,
  pub warnings: Vec<GenerationWarning>,
}

struct StatusEntry {
  code: u16,
  body: Option<TypeDescriptor>,
  synthesized: Vec<SynthesizedType>,
}

/// Partitions an operation's responses into named success and failure variants.
#[derive(Debug, Clone, Copy)]
pub struct ResponseClassifier<'a> {
  spec: &'a Spec,
  mapper: TypeMapper<'a>,
}

impl<'a> ResponseClassifier<'a> {
  #[must_use]
  pub fn new(spec: &'a Spec, mapper: TypeMapper<'a>) -> Self {
    Self { spec, mapper }
  }

  /// Classifies the responses of an operation.
  ///
  /// Entries are sorted by status code and consecutive entries with the same body type and
  /// success class are merged into one variant. A synthetic unknown-failure variant is always
  /// appended.
  pub fn classify(
    &self,
    operation_id: &str,
    operation_type: &str,
    operation: &'a Operation,
  ) -> ModelResult<ClassifiedResponses> {
    let responses = operation
      .responses
      .as_ref()
      .filter(|responses| !responses.is_empty())
      .ok_or(ModelError::MissingResponses)?;

    let mut classified = ClassifiedResponses::default();
    let mut entries = Vec::with_capacity(responses.len());

    for (status, response_ref) in responses {
      let code = status.trim().parse::<u16>().map_err(|_| ModelError::InvalidStatusCode {
        status: status.clone(),
      })?;
      let response = self.resolve_response(response_ref)?;
      let (body, synthesized) = self.map_body(operation_id, operation_type, code, response, &mut classified.warnings)?;
      entries.push(StatusEntry {
        code,
        body,
        synthesized,
      });
    }

    entries.sort_by_key(|entry| entry.code);
    entries.dedup_by_key(|entry| entry.code);

    let chunks = entries
      .into_iter()
      .chunk_by(|entry| (entry.body.clone(), is_success_status(entry.code)));
    let groups = chunks
      .into_iter()
      .map(|((body, success), group)| (body, success, group.collect::<Vec<_>>()))
      .collect::<Vec<_>>();

    for (index, (body, success, group)) in groups.iter().enumerate() {
      let first_code = group.first().map_or(0, |entry| entry.code);
      let next_success = groups.get(index + 1).map(|(_, next, _)| *next);
      let suffix = variant_suffix(*success, first_code, next_success);

      classified.variants.push(ResponseVariant {
        name: variant_name(operation_type, &suffix),
        kind: VariantKind::Declared,
        status_codes: group.iter().map(|entry| entry.code).collect(),
        success: *success,
        body: body.clone(),
      });
      classified.synthesized.extend(
        group
          .iter()
          .flat_map(|entry| entry.synthesized.iter().cloned())
          .map(|ty| (index, ty)),
      );
    }

    classified.variants.push(ResponseVariant {
      name: unknown_failure_name(operation_type),
      kind: VariantKind::UnknownFailure,
      status_codes: vec![],
      success: false,
      body: None,
    });

    Ok(classified)
  }

  fn resolve_response(&self, response_ref: &'a ObjectOrReference<Response>) -> ModelResult<&'a Response> {
    let components = self.spec.components.as_ref().map(|c| &c.responses);
    match resolve_component(response_ref, components, ComponentKind::Responses)? {
      Resolved::Object(response) => Ok(response),
      Resolved::Cycle(reference) => Err(ModelError::UnresolvedReference {
        kind: ComponentKind::Responses,
        reference,
      }),
    }
  }

  /// Maps the first declared content type's schema. Additional content types are ignored
  /// with a warning.
  fn map_body(
    &self,
    operation_id: &str,
    operation_type: &str,
    code: u16,
    response: &Response,
    warnings: &mut Vec<GenerationWarning>,
  ) -> ModelResult<(Option<TypeDescriptor>, Vec<SynthesizedType>)> {
    let Some((content_type, media_type)) = response.content.iter().next() else {
      return Ok((None, vec![]));
    };

    if response.content.len() > 1 {
      warnings.push(GenerationWarning::MultipleContentTypes {
        operation_id: operation_id.to_string(),
        location: format!("response {code}"),
        count: response.content.len(),
        used: content_type.clone(),
      });
    }

    let Some(schema_ref) = media_type.schema.as_ref() else {
      return Ok((None, vec![]));
    };

    let context = format!("{operation_type}{RESPONSE_SUFFIX}{code}");
    let mut mapped = self.mapper.map_type(&context, schema_ref)?;
    warnings.append(&mut mapped.warnings);
    Ok((Some(mapped.descriptor), mapped.synthesized))
  }
}
