//! The client surface model handed to code emitters.

pub mod client;
pub mod definitions;
pub mod operation;
pub mod types;


pub use client::{ClientModel, HeaderConstant, SurfaceModel};
pub use definitions::{EnumEntry, FieldDef, NamedTypeDef, NamedTypeKind, SynthesizedType};
pub use operation::{
  OperationDescriptor, ParameterDescriptor, ParameterLocation, RequestBodyDescriptor, ResponseVariant, VariantKind,
};
pub use types::{DefaultValue, PrimitiveKind, TypeDescriptor, TypeKind, TypeName};
