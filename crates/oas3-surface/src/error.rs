use strum::Display;
use thiserror::Error;

/// Component section a `$ref` is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "camelCase")]
pub enum ComponentKind {
  Schemas,
  Parameters,
  Responses,
  RequestBodies,
}

/// Structural errors in the input document. Any of these aborts the whole run.
#[derive(Debug, Error)]
pub enum ModelError {
  #[error("'{referrer}' references schema '{name}' which is not defined in components/schemas")]
  DanglingReference { referrer: String, name: String },

  #[error("reference '{reference}' cannot be resolved in components/{kind}")]
  UnresolvedReference { kind: ComponentKind, reference: String },

  #[error("no response specified")]
  MissingResponses,

  #[error("status code '{status}' is not numeric")]
  InvalidStatusCode { status: String },

  #[error("array '{context}' has no item schema")]
  MissingArrayItems { context: String },

  #[error("'{context}' declares a boolean additionalProperties")]
  BooleanAdditionalProperties { context: String },

  #[error("'{referrer}' references type '{name}' which is not part of the model")]
  UnknownTypeReference { referrer: String, name: String },

  #[error("failed to convert operation '{operation_id}'")]
  Operation {
    operation_id: String,
    #[source]
    source: Box<ModelError>,
  },

  #[error("failed to convert schema '{name}'")]
  Schema {
    name: String,
    #[source]
    source: Box<ModelError>,
  },
}

pub type ModelResult<T> = Result<T, ModelError>;

impl ModelError {
  #[must_use]
  pub fn in_operation(self, operation_id: &str) -> Self {
    Self::Operation {
      operation_id: operation_id.to_string(),
      source: Box::new(self),
    }
  }

  #[must_use]
  pub fn in_schema(self, name: &str) -> Self {
    Self::Schema {
      name: name.to_string(),
      source: Box::new(self),
    }
  }

  /// Innermost error, skipping operation and schema context.
  #[must_use]
  pub fn root_cause(&self) -> &ModelError {
    match self {
      Self::Operation { source, .. } | Self::Schema { source, .. } => source.root_cause(),
      other => other,
    }
  }
}
