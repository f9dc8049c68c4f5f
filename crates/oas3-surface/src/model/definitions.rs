use serde::Serialize;

use crate::model::types::{DefaultValue, TypeDescriptor, TypeName};

/// One constant of a string enum: the wire value and its constant name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EnumEntry {
  pub value: String,
  pub constant: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
  /// Property name as written in the document.
  pub name: String,
  pub identifier: String,
  pub needs_wire_name: bool,
  #[serde(rename = "type")]
  pub ty: TypeDescriptor,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub default: Option<DefaultValue>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub deprecated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NamedTypeKind {
  Struct { fields: Vec<FieldDef> },
  Enum { entries: Vec<EnumEntry> },
  Alias { target: TypeDescriptor },
}

/// A type emitted for a component schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedTypeDef {
  pub name: TypeName,
  /// Component key the definition was built from.
  pub schema_name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub deprecated: bool,
  #[serde(flatten)]
  pub kind: NamedTypeKind,
  /// Enums synthesized for inline property schemas.
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub nested: Vec<SynthesizedType>,
}

impl NamedTypeDef {
  /// Every type descriptor appearing in the definition.
  pub fn type_descriptors(&self) -> Vec<&TypeDescriptor> {
    match &self.kind {
      NamedTypeKind::Struct { fields } => fields.iter().map(|field| &field.ty).collect(),
      NamedTypeKind::Alias { target } => vec![target],
      NamedTypeKind::Enum { .. } => vec![],
    }
  }
}

/// An enum type that has no component schema of its own and was named from its usage site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SynthesizedType {
  pub name: TypeName,
  pub entries: Vec<EnumEntry>,
}
