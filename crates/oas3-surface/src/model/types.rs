use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// Scalar kinds a schema can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, strum::Display)]
#[serde(rename_all = "camelCase")]
pub enum PrimitiveKind {
  String,
  Float,
  Double,
  Int32,
  Int64,
  Bool,
}

/// Name of an emitted type.
///
/// `package` is only carried for emitters to qualify references. `force_qualified` marks
/// names that must always be written fully qualified because they collide with a name every
/// emitted type reserves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeName {
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub package: Option<String>,
  #[serde(skip_serializing_if = "std::ops::Not::not")]
  pub force_qualified: bool,
}

impl TypeName {
  pub fn new(name: impl Into<String>, package: Option<&str>) -> Self {
    Self {
      name: name.into(),
      package: package.map(str::to_string),
      force_qualified: false,
    }
  }

  #[must_use]
  pub fn force_qualified(mut self) -> Self {
    self.force_qualified = true;
    self
  }

  /// Same name in the same package, used when a type is renamed.
  #[must_use]
  pub fn renamed(&self, name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      package: self.package.clone(),
      force_qualified: self.force_qualified,
    }
  }

  #[must_use]
  pub fn qualified(&self) -> String {
    match &self.package {
      Some(package) => format!("{package}.{}", self.name),
      None => self.name.clone(),
    }
  }
}

impl Display for TypeName {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    if self.force_qualified {
      f.write_str(&self.qualified())
    } else {
      f.write_str(&self.name)
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeKind {
  Primitive { primitive: PrimitiveKind },
  ArrayOf { item: Box<TypeDescriptor> },
  SetOf { item: Box<TypeDescriptor> },
  MapOf { key: Box<TypeDescriptor>, value: Box<TypeDescriptor> },
  Named { target: TypeName },
  /// Untyped JSON value, used when no single concrete type describes the schema.
  Opaque,
}

/// Target type of a schema with a nullability flag independent of its kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeDescriptor {
  #[serde(flatten)]
  pub kind: TypeKind,
  pub nullable: bool,
}

impl TypeDescriptor {
  #[must_use]
  pub fn new(kind: TypeKind) -> Self {
    Self { kind, nullable: false }
  }

  #[must_use]
  pub fn primitive(primitive: PrimitiveKind) -> Self {
    Self::new(TypeKind::Primitive { primitive })
  }

  #[must_use]
  pub fn string() -> Self {
    Self::primitive(PrimitiveKind::String)
  }

  #[must_use]
  pub fn array_of(item: TypeDescriptor) -> Self {
    Self::new(TypeKind::ArrayOf { item: Box::new(item) })
  }

  #[must_use]
  pub fn set_of(item: TypeDescriptor) -> Self {
    Self::new(TypeKind::SetOf { item: Box::new(item) })
  }

  /// A map keyed by strings.
  #[must_use]
  pub fn map_of(value: TypeDescriptor) -> Self {
    Self::new(TypeKind::MapOf {
      key: Box::new(Self::string()),
      value: Box::new(value),
    })
  }

  #[must_use]
  pub fn named(target: TypeName) -> Self {
    Self::new(TypeKind::Named { target })
  }

  #[must_use]
  pub fn opaque() -> Self {
    Self::new(TypeKind::Opaque)
  }

  #[must_use]
  pub fn with_nullable(mut self, nullable: bool) -> Self {
    self.nullable = nullable;
    self
  }

  #[must_use]
  pub fn as_primitive(&self) -> Option<PrimitiveKind> {
    match &self.kind {
      TypeKind::Primitive { primitive } => Some(*primitive),
      _ => None,
    }
  }

  #[must_use]
  pub fn as_named(&self) -> Option<&TypeName> {
    match &self.kind {
      TypeKind::Named { target } => Some(target),
      _ => None,
    }
  }

  /// Every named type this descriptor refers to, including through containers.
  pub fn named_targets(&self) -> Vec<&TypeName> {
    let mut targets = vec![];
    self.collect_named(&mut targets);
    targets
  }

  fn collect_named<'a>(&'a self, targets: &mut Vec<&'a TypeName>) {
    match &self.kind {
      TypeKind::Named { target } => targets.push(target),
      TypeKind::ArrayOf { item } | TypeKind::SetOf { item } => item.collect_named(targets),
      TypeKind::MapOf { key, value } => {
        key.collect_named(targets);
        value.collect_named(targets);
      }
      TypeKind::Primitive { .. } | TypeKind::Opaque => {}
    }
  }

  /// Rewrites every reference to the type called `from`, including through containers.
  #[must_use]
  pub fn retarget(&self, from: &str, to: &TypeName) -> Self {
    let kind = match &self.kind {
      TypeKind::Named { target } if target.name == from => TypeKind::Named { target: to.clone() },
      TypeKind::ArrayOf { item } => TypeKind::ArrayOf {
        item: Box::new(item.retarget(from, to)),
      },
      TypeKind::SetOf { item } => TypeKind::SetOf {
        item: Box::new(item.retarget(from, to)),
      },
      TypeKind::MapOf { key, value } => TypeKind::MapOf {
        key: Box::new(key.retarget(from, to)),
        value: Box::new(value.retarget(from, to)),
      },
      other => other.clone(),
    };
    Self {
      kind,
      nullable: self.nullable,
    }
  }
}

impl Display for TypeDescriptor {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match &self.kind {
      TypeKind::Primitive { primitive } => write!(f, "{primitive}")?,
      TypeKind::ArrayOf { item } => write!(f, "List<{item}>")?,
      TypeKind::SetOf { item } => write!(f, "Set<{item}>")?,
      TypeKind::MapOf { key, value } => write!(f, "Map<{key}, {value}>")?,
      TypeKind::Named { target } => write!(f, "{target}")?,
      TypeKind::Opaque => f.write_str("Any")?,
    }
    if self.nullable {
      f.write_str("?")?;
    }
    Ok(())
  }
}

/// Language-agnostic default literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum DefaultValue {
  String(String),
  Bool(bool),
  Integer(i64),
  Number(f64),
  Null,
  /// A constant of a named enum type.
  #[serde(rename_all = "camelCase")]
  EnumEntry { type_name: TypeName, constant: String },
}

impl DefaultValue {
  /// Points an enum default at a renamed type. Other literals are returned unchanged.
  #[must_use]
  pub fn retarget(&self, from: &str, to: &TypeName) -> Self {
    match self {
      Self::EnumEntry { type_name, constant } if type_name.name == from => Self::EnumEntry {
        type_name: to.clone(),
        constant: constant.clone(),
      },
      other => other.clone(),
    }
  }
}
