#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
//! Compiles a parsed OpenAPI v3 document into a resolved, typed client surface model.
//!
//! ```no_run
//! use oas3_surface::{ModelConfig, Orchestrator};
//!
//! # fn example() -> anyhow::Result<()> {
//! let spec = oas3::from_json(std::fs::read_to_string("openapi.json")?)?;
//! let output = Orchestrator::new(spec, ModelConfig::default()).build()?;
//! for client in &output.model.clients {
//!   println!("{}: {} operations", client.name, client.operations.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod generator;
pub mod model;
pub mod naming;
pub mod utils;

pub use error::{ModelError, ModelResult};
pub use generator::{
  config::{ClientGrouping, Customizer, ModelConfig, OperationFilter, SchemaScope},
  metrics::{GenerationStats, GenerationWarning},
  orchestrator::{ModelOutput, Orchestrator},
};
pub use model::SurfaceModel;
