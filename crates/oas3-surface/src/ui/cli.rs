use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use oas3_surface::ClientGrouping;

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "oas3-surface")]
#[command(author, version, about = "OpenAPI to client surface model compiler")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from OpenAPI specification
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Compile an OpenAPI specification into a client surface model (JSON)
  Generate(GenerateCommand),
}

#[derive(Args, Debug)]
pub struct GenerateCommand {
  /// Path to the OpenAPI specification file (.json, .yaml or .yml)
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Path where the model will be written
  #[arg(short, long, value_name = "FILE")]
  pub output: PathBuf,

  /// Package used to qualify every named type reference
  #[arg(long, value_name = "PACKAGE")]
  pub base_package: Option<String>,

  /// How operations are split into clients
  #[arg(long, value_enum, default_value = "tag")]
  pub group_by: GroupBy,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,

  /// Model all schemas defined in the spec, including unreferenced schemas.
  /// When combined with --only or --exclude, this includes all schemas even if they
  /// are not referenced by the filtered operations (default: only schemas reachable
  /// from included operations)
  #[arg(long, default_value_t = false)]
  pub all_schemas: bool,

  /// Include only specific operations (comma-separated stable IDs)
  #[arg(long, value_name = "IDS", value_delimiter = ',')]
  pub only: Option<Vec<String>>,

  /// Exclude specific operations (comma-separated stable IDs)
  #[arg(long, value_name = "IDS", value_delimiter = ',')]
  pub exclude: Option<Vec<String>>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupBy {
  /// One client per first tag
  Tag,
  /// A single client for every operation
  Single,
}

impl From<GroupBy> for ClientGrouping {
  fn from(group_by: GroupBy) -> Self {
    match group_by {
      GroupBy::Tag => Self::ByTag,
      GroupBy::Single => Self::Single,
    }
  }
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List all operations defined in the OpenAPI specification
  Operations {
    /// Path to the OpenAPI specification file
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// How operations are split into clients
    #[arg(long, value_enum, default_value = "tag")]
    group_by: GroupBy,
  },
}
