use std::{collections::HashSet, path::PathBuf};

use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use oas3_surface::{
  ClientGrouping, GenerationStats, ModelConfig, ModelOutput, OperationFilter, Orchestrator, SchemaScope,
  utils::spec::SpecLoader,
};

use crate::ui::{Colors, GenerateCommand};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input: PathBuf,
  pub output: PathBuf,
  pub base_package: Option<String>,
  pub grouping: ClientGrouping,
  pub verbose: bool,
  pub quiet: bool,
  pub all_schemas: bool,
  pub only_operations: Option<HashSet<String>>,
  pub excluded_operations: Option<HashSet<String>>,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let GenerateCommand {
      input,
      output,
      base_package,
      group_by,
      verbose,
      quiet,
      all_schemas,
      only,
      exclude,
    } = command;

    if verbose && quiet {
      anyhow::bail!("--verbose and --quiet cannot be combined");
    }

    Ok(Self {
      input,
      output,
      base_package: base_package.filter(|package| !package.is_empty()),
      grouping: group_by.into(),
      verbose,
      quiet,
      all_schemas,
      only_operations: only.map(|ops| ops.into_iter().collect()),
      excluded_operations: exclude.map(|ops| ops.into_iter().collect()),
    })
  }

  fn model_config(&self) -> ModelConfig {
    let schema_scope = if self.all_schemas {
      SchemaScope::All
    } else {
      SchemaScope::ReferencedOnly
    };

    ModelConfig::builder()
      .maybe_base_package(self.base_package.clone())
      .schema_scope(schema_scope)
      .grouping(self.grouping)
      .filter(OperationFilter::new(
        self.only_operations.as_ref(),
        self.excluded_operations.as_ref(),
      ))
      .build()
  }

  async fn open_spec(&self) -> anyhow::Result<SpecLoader> {
    SpecLoader::open(&self.input).await
  }

  async fn write_output(&self, output: &ModelOutput) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&output.model)?;
    if let Some(parent) = self.output.parent() {
      tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&self.output, json).await?;
    Ok(())
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading OpenAPI spec from: {}", self.config.input.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_loaded(&self, loader: &SpecLoader) {
    self.stat("Document format:", loader.format().to_string());
    self.stat("Document size:", format!("{} bytes", loader.len()));
  }

  fn log_building(&self) {
    self.info(&"Building client surface model...".with(self.colors.primary()).to_string());
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Types generated:", stats.types_generated.to_string());
    self.stat("", format!("{} structs", stats.structs_generated));
    self.stat(
      "",
      format!(
        "{} enums, {} nested",
        stats.enums_generated, stats.nested_enums_generated
      ),
    );
    self.stat("", format!("{} type aliases", stats.type_aliases_generated));
    self.stat("Clients generated:", stats.clients_generated.to_string());
    self.stat("Operations converted:", stats.operations_converted.to_string());
    if stats.synthesized_types_renamed > 0 {
      self.stat(
        "Inline types:",
        format!(
          "{}, {} renamed",
          stats.synthesized_types_generated, stats.synthesized_types_renamed
        ),
      );
    } else {
      self.stat("Inline types:", stats.synthesized_types_generated.to_string());
    }
    if stats.header_constants_generated > 0 {
      self.stat("Headers generated:", stats.header_constants_generated.to_string());
    }
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    self.print_cycles(stats);
    self.print_pruned_schemas(stats);
    self.print_warnings(stats);
  }

  fn print_cycles(&self, stats: &GenerationStats) {
    if stats.cycles_detected == 0 {
      return;
    }

    self.stat("Cycles:", stats.cycles_detected.to_string());

    if self.config.verbose {
      for (i, cycle) in stats.cycle_details.iter().enumerate() {
        println!(
          "              {}: {}",
          format!("Cycle {}", i + 1).with(self.colors.accent()),
          cycle.join(" -> ").with(self.colors.info())
        );
      }
    }
  }

  fn print_pruned_schemas(&self, stats: &GenerationStats) {
    if stats.schemas_pruned > 0 && self.config.verbose {
      self.stat("Unreferenced schemas:", stats.schemas_pruned.to_string());
    }
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    if stats.warnings.is_empty() || !self.config.verbose {
      return;
    }

    println!();
    for warning in &stats.warnings {
      eprintln!(
        "{} {}",
        "Warning:".with(self.colors.accent()),
        warning.to_string().with(self.colors.primary())
      );
    }
  }

  fn log_writing(&self) {
    self.info(
      &format!("Writing to: {}", self.config.output.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_success(&self) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        "Successfully generated client surface model".with(self.colors.success())
      );
    }
  }
}

pub async fn generate_model(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let loader = config.open_spec().await?;
  logger.log_loaded(&loader);
  let spec = loader.parse()?;

  logger.log_building();
  let output = Orchestrator::new(spec, config.model_config()).build()?;
  logger.print_statistics(&output.stats);

  logger.log_writing();
  config.write_output(&output).await?;

  logger.log_success();
  Ok(())
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use super::*;
  use crate::ui::GroupBy;

  fn command() -> GenerateCommand {
    GenerateCommand {
      input: PathBuf::from("openapi.yaml"),
      output: PathBuf::from("out/model.json"),
      base_package: None,
      group_by: GroupBy::Tag,
      verbose: false,
      quiet: false,
      all_schemas: false,
      only: None,
      exclude: None,
    }
  }

  #[test]
  fn test_from_command_defaults() {
    let config = GenerateConfig::from_command(command()).unwrap();
    assert_eq!(config.input, Path::new("openapi.yaml"));
    assert_eq!(config.grouping, ClientGrouping::ByTag);
    assert!(config.only_operations.is_none());

    let model_config = config.model_config();
    assert_eq!(model_config.schema_scope, SchemaScope::ReferencedOnly);
    assert!(model_config.base_package.is_none());
  }

  #[test]
  fn test_from_command_maps_options() {
    let config = GenerateConfig::from_command(GenerateCommand {
      base_package: Some("com.example.api".to_string()),
      group_by: GroupBy::Single,
      all_schemas: true,
      only: Some(vec!["listPets".to_string(), "getPet".to_string()]),
      exclude: Some(vec!["deletePet".to_string()]),
      ..command()
    })
    .unwrap();

    assert_eq!(config.grouping, ClientGrouping::Single);
    assert_eq!(config.only_operations.as_ref().map(HashSet::len), Some(2));

    let model_config = config.model_config();
    assert_eq!(model_config.schema_scope, SchemaScope::All);
    assert_eq!(model_config.base_package.as_deref(), Some("com.example.api"));
    assert!(model_config.filter.accepts_id("listPets"));
    assert!(!model_config.filter.accepts_id("deletePet"));
    assert!(!model_config.filter.accepts_id("createPet"));
  }

  #[test]
  fn test_empty_base_package_is_ignored() {
    let config = GenerateConfig::from_command(GenerateCommand {
      base_package: Some(String::new()),
      ..command()
    })
    .unwrap();
    assert!(config.base_package.is_none());
  }

  #[test]
  fn test_verbose_and_quiet_conflict() {
    let err = GenerateConfig::from_command(GenerateCommand {
      verbose: true,
      quiet: true,
      ..command()
    })
    .unwrap_err();
    assert!(err.to_string().contains("cannot be combined"));
  }

  #[tokio::test]
  async fn test_generate_writes_model_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("openapi.json");
    let output = dir.path().join("nested").join("model.json");
    let spec = serde_json::json!({
      "openapi": "3.0.3",
      "info": { "title": "Pets", "version": "1.0.0" },
      "paths": {
        "/pets": {
          "get": {
            "operationId": "listPets",
            "tags": ["pets"],
            "responses": {
              "200": {
                "description": "ok",
                "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } } }
              }
            }
          }
        }
      },
      "components": {
        "schemas": {
          "Pet": { "type": "object", "properties": { "name": { "type": "string" } } }
        }
      }
    });
    tokio::fs::write(&input, spec.to_string()).await.unwrap();

    let config = GenerateConfig::from_command(GenerateCommand {
      input,
      output: output.clone(),
      quiet: true,
      ..command()
    })
    .unwrap();
    generate_model(config, &Colors::new(false, crate::ui::colors::Theme::Dark))
      .await
      .unwrap();

    let written: serde_json::Value = serde_json::from_str(&tokio::fs::read_to_string(&output).await.unwrap()).unwrap();
    assert_eq!(written["types"][0]["name"]["name"], "Pet");
    assert_eq!(written["clients"][0]["name"], "Pets");
    assert_eq!(written["clients"][0]["operations"][0]["id"], "listPets");
  }
}
