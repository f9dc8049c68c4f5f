use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use oas3_surface::{OperationFilter, generator::operation_registry::OperationRegistry, utils::spec::SpecLoader};

use crate::ui::{Colors, GroupBy, term_width};

pub async fn list_operations(input: &Path, group_by: GroupBy, colors: &Colors) -> anyhow::Result<()> {
  let spec = SpecLoader::open(input).await?.parse()?;
  let registry = OperationRegistry::new(&spec, &OperationFilter::default());

  let mut operations = registry
    .operations()
    .map(|entry| {
      (
        entry.client_name(group_by.into()),
        entry.stable_id.clone(),
        entry.method.as_str().to_string(),
        entry.path.clone(),
      )
    })
    .collect::<Vec<_>>();
  operations.sort();

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut header = Row::new();
  for title in ["CLIENT", "OPERATION ID", "METHOD", "PATH"] {
    header.add_cell(Cell::new(title).fg(Colors::cell(colors.label())));
  }
  table.set_header(header);

  for (client, operation_id, method, path) in operations {
    let mut row = Row::new();
    row.add_cell(Cell::new(client).fg(Colors::cell(colors.info())));
    row.add_cell(
      Cell::new(operation_id)
        .fg(Colors::cell(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(
      Cell::new(method)
        .fg(Colors::cell(colors.accent()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(path).fg(Colors::cell(colors.primary())));
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}
