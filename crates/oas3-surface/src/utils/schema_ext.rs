use oas3::spec::{ObjectOrReference, ObjectSchema, Schema, SchemaType, SchemaTypeSet};

/// Extension methods for `ObjectSchema` to query its type properties conveniently.
pub(crate) trait SchemaExt {
  /// Returns the single `SchemaType` if exactly one is defined, None otherwise.
  fn single_type(&self) -> Option<SchemaType>;

  /// Returns the concrete type and whether `null` is admitted.
  ///
  /// # Example
  /// ```text
  /// "string"            => (Some(String), false)
  /// ["string", "null"]  => (Some(String), true)
  /// ["string", "integer"] => (None, false)
  /// ```
  fn effective_type(&self) -> (Option<SchemaType>, bool);

  /// Returns true if the schema is explicitly null type.
  fn is_null(&self) -> bool;

  /// Returns the enum values when every non-null value is a string.
  fn string_enum_values(&self) -> Option<Vec<&str>>;

  fn is_deprecated(&self) -> bool;

  /// Returns an iterator over all union variants (`oneOf` and `anyOf`) in a schema.
  fn union_variants(&self) -> impl Iterator<Item = &ObjectOrReference<ObjectSchema>>;
}

impl SchemaExt for ObjectSchema {
  fn single_type(&self) -> Option<SchemaType> {
    match &self.schema_type {
      Some(SchemaTypeSet::Single(t)) => Some(*t),
      _ => None,
    }
  }

  fn effective_type(&self) -> (Option<SchemaType>, bool) {
    match &self.schema_type {
      None => (None, false),
      Some(SchemaTypeSet::Single(SchemaType::Null)) => (None, true),
      Some(SchemaTypeSet::Single(t)) => (Some(*t), false),
      Some(SchemaTypeSet::Multiple(types)) => {
        let nullable = types.contains(&SchemaType::Null);
        let mut concrete = types.iter().filter(|t| **t != SchemaType::Null);
        match (concrete.next(), concrete.next()) {
          (Some(t), None) => (Some(*t), nullable),
          _ => (None, nullable),
        }
      }
    }
  }

  fn is_null(&self) -> bool {
    matches!(&self.schema_type, Some(SchemaTypeSet::Single(SchemaType::Null)))
  }

  fn string_enum_values(&self) -> Option<Vec<&str>> {
    if self.enum_values.is_empty() {
      return None;
    }
    let values = self
      .enum_values
      .iter()
      .filter(|value| !value.is_null())
      .map(serde_json::Value::as_str)
      .collect::<Option<Vec<_>>>()?;
    (!values.is_empty()).then_some(values)
  }

  fn is_deprecated(&self) -> bool {
    self.deprecated.unwrap_or(false)
  }

  fn union_variants(&self) -> impl Iterator<Item = &ObjectOrReference<ObjectSchema>> {
    self.one_of.iter().chain(&self.any_of)
  }
}

/// Returns the schema node behind an `items`/`additionalProperties` slot, or None for a boolean schema.
pub(crate) fn schema_object(schema: &Schema) -> Option<&ObjectOrReference<ObjectSchema>> {
  match schema {
    Schema::Object(obj_ref) => Some(obj_ref.as_ref()),
    Schema::Boolean(_) => None,
  }
}
