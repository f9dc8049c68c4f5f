use bon::Builder;
use serde::Serialize;

use crate::model::types::{DefaultValue, TypeDescriptor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, strum::Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "lowercase")]
pub enum ParameterLocation {
  Path,
  Query,
  Header,
}

#[derive(Debug, Clone, PartialEq, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDescriptor {
  /// Name as written in the document.
  #[builder(into)]
  pub name: String,
  #[builder(into)]
  pub identifier: String,
  #[builder(default)]
  pub needs_wire_name: bool,
  pub location: ParameterLocation,
  #[serde(rename = "type")]
  pub ty: TypeDescriptor,
  #[builder(default)]
  pub required: bool,
  /// Not required and without a default literal, so callers may omit it.
  #[builder(default)]
  pub optional: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub default: Option<DefaultValue>,
  /// Constant holding the wire name of a header parameter.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub header_constant: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[builder(default)]
  pub deprecated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBodyDescriptor {
  pub content_type: String,
  /// Absent when the body declares no schema.
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  pub ty: Option<TypeDescriptor>,
  pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum VariantKind {
  Declared,
  /// Fallback for any status code no declared variant covers. Carries only the numeric code.
  UnknownFailure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseVariant {
  pub name: String,
  pub kind: VariantKind,
  /// Ascending and disjoint from every other variant of the operation.
  pub status_codes: Vec<u16>,
  pub success: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub body: Option<TypeDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDescriptor {
  /// Stable identifier, unique across the document.
  pub id: String,
  /// Capitalized identifier used to prefix every type owned by the operation.
  pub type_name: String,
  pub method: String,
  pub path: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub summary: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub deprecated: bool,
  /// Ordered by location, then name.
  pub parameters: Vec<ParameterDescriptor>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub request_body: Option<RequestBodyDescriptor>,
  pub responses: Vec<ResponseVariant>,
}

impl OperationDescriptor {
  /// Every type descriptor appearing in the operation.
  pub fn type_descriptors(&self) -> impl Iterator<Item = &TypeDescriptor> {
    let parameters = self.parameters.iter().map(|param| &param.ty);
    let body = self.request_body.iter().filter_map(|body| body.ty.as_ref());
    let responses = self.responses.iter().filter_map(|variant| variant.body.as_ref());
    parameters.chain(body).chain(responses)
  }

  pub fn parameters_in(&self, location: ParameterLocation) -> impl Iterator<Item = &ParameterDescriptor> {
    self.parameters.iter().filter(move |param| param.location == location)
  }
}
