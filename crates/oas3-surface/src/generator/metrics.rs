use strum::Display;

use crate::model::{NamedTypeDef, NamedTypeKind};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub types_generated: usize,
  pub structs_generated: usize,
  pub enums_generated: usize,
  pub type_aliases_generated: usize,
  pub nested_enums_generated: usize,
  pub synthesized_types_generated: usize,
  pub synthesized_types_renamed: usize,
  pub operations_converted: usize,
  pub clients_generated: usize,
  pub header_constants_generated: usize,
  pub schemas_pruned: usize,
  pub cycles_detected: usize,
  pub cycle_details: Vec<Vec<String>>,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_named_type(&mut self, def: &NamedTypeDef) {
    self.types_generated += 1;
    match def.kind {
      NamedTypeKind::Struct { .. } => self.structs_generated += 1,
      NamedTypeKind::Enum { .. } => self.enums_generated += 1,
      NamedTypeKind::Alias { .. } => self.type_aliases_generated += 1,
    }
    self.nested_enums_generated += def.nested.len();
  }

  pub fn record_named_types(&mut self, defs: &[NamedTypeDef]) {
    for def in defs {
      self.record_named_type(def);
    }
  }

  pub fn record_client(&mut self, operations: usize, synthesized: usize, renamed: usize, headers: usize) {
    self.clients_generated += 1;
    self.operations_converted += operations;
    self.synthesized_types_generated += synthesized;
    self.synthesized_types_renamed += renamed;
    self.header_constants_generated += headers;
  }

  pub fn record_pruned_schemas(&mut self, count: usize) {
    self.schemas_pruned += count;
  }

  pub fn record_cycle(&mut self, cycle: Vec<String>) {
    self.cycles_detected += 1;
    self.cycle_details.push(cycle);
  }

  pub fn record_cycles(&mut self, cycles: Vec<Vec<String>>) {
    for cycle in cycles {
      self.record_cycle(cycle);
    }
  }

  pub fn record_warning(&mut self, warning: GenerationWarning) {
    self.warnings.push(warning);
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    self.warnings.extend(warnings);
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum OpaqueReason {
  #[strum(to_string = "oneOf/anyOf with several variants")]
  MultipleVariants,
  #[strum(to_string = "object properties without additionalProperties")]
  UnmappedProperties,
}

/// Degraded mappings. None of these abort a run.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "[{operation_id}] {location} declares {count} content types, using '{used}'")]
  MultipleContentTypes {
    operation_id: String,
    location: String,
    count: usize,
    used: String,
  },
  #[strum(to_string = "'{context}' mapped to an opaque value: {reason}")]
  OpaqueFallback { context: String, reason: OpaqueReason },
  #[strum(to_string = "[{operation_id}] parameter '{parameter}' has no schema, using string")]
  MissingParameterSchema { operation_id: String, parameter: String },
  #[strum(to_string = "[{operation_id}] parameter reference '{reference}' refers to itself and was skipped")]
  UnresolvedParameter { operation_id: String, reference: String },
  #[strum(to_string = "[{operation_id}] path placeholder '{parameter}' is not declared, using a required string")]
  UndeclaredPathParameter { operation_id: String, parameter: String },
  #[strum(to_string = "[{operation_id}] cookie parameter '{parameter}' is not supported and was skipped")]
  CookieParameterSkipped { operation_id: String, parameter: String },
  #[strum(to_string = "default {value} of '{context}' does not fit type {type_name} and was dropped")]
  IncompatibleDefault {
    context: String,
    value: String,
    type_name: String,
  },
  #[strum(to_string = "[{operation_id}] conflicting inline types named '{type_name}', renamed to '{renamed}'")]
  ConflictingSynthesizedType {
    operation_id: String,
    type_name: String,
    renamed: String,
  },
}

impl GenerationWarning {
  /// Operation the warning was raised for, when it concerns a single operation.
  pub fn operation_id(&self) -> Option<&str> {
    match self {
      Self::MultipleContentTypes { operation_id, .. }
      | Self::MissingParameterSchema { operation_id, .. }
      | Self::UnresolvedParameter { operation_id, .. }
      | Self::UndeclaredPathParameter { operation_id, .. }
      | Self::CookieParameterSkipped { operation_id, .. }
      | Self::ConflictingSynthesizedType { operation_id, .. } => Some(operation_id),
      Self::OpaqueFallback { .. } | Self::IncompatibleDefault { .. } => None,
    }
  }
}
