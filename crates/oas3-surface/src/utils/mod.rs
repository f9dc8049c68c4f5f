pub mod refs;
pub mod schema_ext;
pub mod spec;

#[cfg(test)]
mod tests;

pub(crate) use refs::{Resolved, extract_schema_ref_name, parse_ref_name, resolve_component};
pub(crate) use schema_ext::SchemaExt;
