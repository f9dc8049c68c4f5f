use std::collections::BTreeSet;

use itertools::Itertools;
use oas3::spec::{ObjectOrReference, ObjectSchema, Schema, SchemaType};
use serde_json::Value;

use crate::{
  error::{ModelError, ModelResult},
  generator::{
    metrics::{GenerationWarning, OpaqueReason},
    schema_graph::SchemaGraph,
  },
  model::{DefaultValue, EnumEntry, PrimitiveKind, SynthesizedType, TypeDescriptor, TypeName},
  naming::{
    constants::RESERVED_TYPE_NAME,
    identifiers::{constant_name, ensure_unique, to_type_name},
  },
  utils::{SchemaExt, parse_ref_name, schema_ext::schema_object},
};

/// Result of mapping one schema node.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedType {
  pub descriptor: TypeDescriptor,
  /// Enums named after the mapping context.
  pub synthesized: Vec<SynthesizedType>,
  pub warnings: Vec<GenerationWarning>,
}

#[derive(Default)]
struct Collected {
  synthesized: Vec<SynthesizedType>,
  warnings: Vec<GenerationWarning>,
}

/// Maps schema nodes to type descriptors.
///
/// Precedence: references, strings (enums synthesize a named type), numbers, integers,
/// booleans, arrays, objects, then untyped or composite schemas. Polymorphic and free-form
/// schemas map to [`TypeDescriptor::opaque`].
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper<'a> {
  graph: &'a SchemaGraph<'a>,
  package: Option<&'a str>,
}

impl<'a> TypeMapper<'a> {
  #[must_use]
  pub fn new(graph: &'a SchemaGraph<'a>, package: Option<&'a str>) -> Self {
    Self { graph, package }
  }

  #[must_use]
  pub fn package(&self) -> Option<&'a str> {
    self.package
  }

  /// Type name for a component schema, used verbatim.
  #[must_use]
  pub fn type_name(&self, name: &str) -> TypeName {
    let type_name = TypeName::new(name, self.package);
    if name == RESERVED_TYPE_NAME {
      type_name.force_qualified()
    } else {
      type_name
    }
  }

  /// Maps a schema or reference. Nullability only reflects `null` in the schema itself,
  /// callers add optionality.
  pub fn map_type(&self, context: &str, node: &ObjectOrReference<ObjectSchema>) -> ModelResult<MappedType> {
    let mut collected = Collected::default();
    let descriptor = self.map_node(context, node, &mut collected)?;
    Ok(MappedType {
      descriptor,
      synthesized: collected.synthesized,
      warnings: collected.warnings,
    })
  }

  fn map_node(
    &self,
    context: &str,
    node: &ObjectOrReference<ObjectSchema>,
    out: &mut Collected,
  ) -> ModelResult<TypeDescriptor> {
    match node {
      ObjectOrReference::Ref { ref_path, .. } => Ok(TypeDescriptor::named(self.type_name(&parse_ref_name(ref_path)))),
      ObjectOrReference::Object(schema) => self.map_schema(context, schema, out),
    }
  }

  fn map_schema(&self, context: &str, schema: &ObjectSchema, out: &mut Collected) -> ModelResult<TypeDescriptor> {
    let (schema_type, nullable) = schema.effective_type();
    let descriptor = match schema_type {
      Some(SchemaType::String) => self.map_string(context, schema, out),
      Some(SchemaType::Number) => TypeDescriptor::primitive(if schema.format.as_deref() == Some("float") {
        PrimitiveKind::Float
      } else {
        PrimitiveKind::Double
      }),
      Some(SchemaType::Integer) => TypeDescriptor::primitive(if schema.format.as_deref() == Some("int32") {
        PrimitiveKind::Int32
      } else {
        PrimitiveKind::Int64
      }),
      Some(SchemaType::Boolean) => TypeDescriptor::primitive(PrimitiveKind::Bool),
      Some(SchemaType::Array) => self.map_array(context, schema, out)?,
      Some(SchemaType::Object) => self.map_object(context, schema, out)?,
      Some(SchemaType::Null) | None => self.map_untyped(context, schema, out)?,
    };

    Ok(if nullable {
      descriptor.with_nullable(true)
    } else {
      descriptor
    })
  }

  fn map_string(&self, context: &str, schema: &ObjectSchema, out: &mut Collected) -> TypeDescriptor {
    let Some(values) = schema.string_enum_values() else {
      return TypeDescriptor::string();
    };

    let name = TypeName::new(to_type_name(context), self.package);
    out.synthesized.push(SynthesizedType {
      name: name.clone(),
      entries: enum_entries(&values),
    });
    TypeDescriptor::named(name)
  }

  fn map_array(&self, context: &str, schema: &ObjectSchema, out: &mut Collected) -> ModelResult<TypeDescriptor> {
    let Some(items) = schema.items.as_deref() else {
      return Err(ModelError::MissingArrayItems {
        context: context.to_string(),
      });
    };

    let item = match schema_object(items) {
      Some(node) => self.map_node(context, node, out)?,
      None => TypeDescriptor::opaque(),
    };

    Ok(if schema.unique_items == Some(true) {
      TypeDescriptor::set_of(item)
    } else {
      TypeDescriptor::array_of(item)
    })
  }

  fn map_object(&self, context: &str, schema: &ObjectSchema, out: &mut Collected) -> ModelResult<TypeDescriptor> {
    match &schema.additional_properties {
      None => {
        if !schema.properties.is_empty() {
          out.warnings.push(GenerationWarning::OpaqueFallback {
            context: context.to_string(),
            reason: OpaqueReason::UnmappedProperties,
          });
        }
        Ok(TypeDescriptor::opaque())
      }
      Some(Schema::Boolean(_)) => Err(ModelError::BooleanAdditionalProperties {
        context: context.to_string(),
      }),
      Some(Schema::Object(node)) => Ok(TypeDescriptor::map_of(self.map_node(context, node, out)?)),
    }
  }

  fn map_untyped(&self, context: &str, schema: &ObjectSchema, out: &mut Collected) -> ModelResult<TypeDescriptor> {
    if schema.string_enum_values().is_some() {
      return Ok(self.map_string(context, schema, out));
    }

    let declared = schema.union_variants().count();
    let variants = schema
      .union_variants()
      .filter(|variant| !is_null_variant(variant))
      .collect::<Vec<_>>();
    let has_null_variant = variants.len() < declared;

    match variants.as_slice() {
      [single] => {
        let descriptor = self.map_node(context, single, out)?;
        let nullable = descriptor.nullable || has_null_variant;
        Ok(descriptor.with_nullable(nullable))
      }
      [_, _, ..] => {
        out.warnings.push(GenerationWarning::OpaqueFallback {
          context: context.to_string(),
          reason: OpaqueReason::MultipleVariants,
        });
        Ok(TypeDescriptor::opaque().with_nullable(has_null_variant))
      }
      [] if declared == 0 && (!schema.properties.is_empty() || schema.additional_properties.is_some()) => {
        self.map_object(context, schema, out)
      }
      [] => Ok(TypeDescriptor::opaque().with_nullable(has_null_variant)),
    }
  }

  /// Default declared on an inline schema, or on the component schema a reference resolves to.
  pub fn declared_default(&self, node: &ObjectOrReference<ObjectSchema>) -> ModelResult<Option<Value>> {
    match node {
      ObjectOrReference::Object(schema) => Ok(schema.default.clone()),
      ObjectOrReference::Ref { ref_path, .. } => {
        let Some(target) = self.graph.get(&parse_ref_name(ref_path)) else {
          return Ok(None);
        };
        Ok(self.graph.resolve(target)?.and_then(|schema| schema.default.clone()))
      }
    }
  }

  /// Literal for a declared default, when it fits the mapped type. An unusable default is
  /// dropped and reported on `mapped`.
  pub fn default_literal(&self, context: &str, value: &Value, mapped: &mut MappedType) -> Option<DefaultValue> {
    let literal = self.literal_for(value, mapped);
    if literal.is_none() {
      mapped.warnings.push(GenerationWarning::IncompatibleDefault {
        context: context.to_string(),
        value: value.to_string(),
        type_name: mapped.descriptor.to_string(),
      });
    }
    literal
  }

  fn literal_for(&self, value: &Value, mapped: &MappedType) -> Option<DefaultValue> {
    let descriptor = &mapped.descriptor;
    if value.is_null() {
      return descriptor.nullable.then_some(DefaultValue::Null);
    }

    if let Some(target) = descriptor.as_named() {
      let text = value.as_str()?;
      let entries = self.enum_entries_of(target, &mapped.synthesized)?;
      return entries
        .into_iter()
        .find(|entry| entry.value == text)
        .map(|entry| DefaultValue::EnumEntry {
          type_name: target.clone(),
          constant: entry.constant,
        });
    }

    match (descriptor.as_primitive()?, value) {
      (PrimitiveKind::String, Value::String(text)) => Some(DefaultValue::String(text.clone())),
      (PrimitiveKind::Bool, Value::Bool(flag)) => Some(DefaultValue::Bool(*flag)),
      (PrimitiveKind::Int32, Value::Number(number)) => number
        .as_i64()
        .filter(|n| i32::try_from(*n).is_ok())
        .map(DefaultValue::Integer),
      (PrimitiveKind::Int64, Value::Number(number)) => number.as_i64().map(DefaultValue::Integer),
      (PrimitiveKind::Float | PrimitiveKind::Double, Value::Number(number)) => {
        number.as_f64().map(DefaultValue::Number)
      }
      _ => None,
    }
  }

  /// Entries of an enum type: synthesized by this mapping, or a string enum component.
  fn enum_entries_of(&self, target: &TypeName, synthesized: &[SynthesizedType]) -> Option<Vec<EnumEntry>> {
    if let Some(local) = synthesized.iter().find(|ty| ty.name == *target) {
      return Some(local.entries.clone());
    }
    let node = self.graph.get(&target.name)?;
    let schema = self.graph.resolve(node).ok().flatten()?;
    schema.string_enum_values().map(|values| enum_entries(&values))
  }
}

/// Builds enum entries in declaration order, dropping repeated values and keeping constant
/// names unique.
pub(crate) fn enum_entries(values: &[&str]) -> Vec<EnumEntry> {
  let mut used = BTreeSet::new();
  values
    .iter()
    .unique()
    .map(|value| {
      let constant = ensure_unique(&constant_name(value), &used);
      used.insert(constant.clone());
      EnumEntry {
        value: (*value).to_string(),
        constant,
      }
    })
    .collect()
}

fn is_null_variant(variant: &ObjectOrReference<ObjectSchema>) -> bool {
  matches!(variant, ObjectOrReference::Object(schema) if schema.is_null())
}
