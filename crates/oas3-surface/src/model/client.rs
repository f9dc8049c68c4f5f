use serde::Serialize;

use crate::model::{definitions::NamedTypeDef, definitions::SynthesizedType, operation::OperationDescriptor};

/// Named constant for a header wire name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct HeaderConstant {
  pub name: String,
  pub value: String,
}

/// One output unit: a group of operations emitted together.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientModel {
  pub name: String,
  pub operations: Vec<OperationDescriptor>,
  /// Anonymous types produced by the operations, after collision renaming.
  pub synthesized: Vec<SynthesizedType>,
  pub header_constants: Vec<HeaderConstant>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceModel {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub base_package: Option<String>,
  /// Named types shared by every client, ordered by schema name.
  pub types: Vec<NamedTypeDef>,
  pub clients: Vec<ClientModel>,
}

impl SurfaceModel {
  pub fn find_type(&self, name: &str) -> Option<&NamedTypeDef> {
    self.types.iter().find(|def| def.name.name == name)
  }

  pub fn find_client(&self, name: &str) -> Option<&ClientModel> {
    self.clients.iter().find(|client| client.name == name)
  }

  pub fn operations(&self) -> impl Iterator<Item = &OperationDescriptor> {
    self.clients.iter().flat_map(|client| &client.operations)
  }

  pub fn find_operation(&self, id: &str) -> Option<&OperationDescriptor> {
    self.operations().find(|operation| operation.id == id)
  }
}
