pub mod config;
pub mod dedup;
pub mod definitions;
pub mod metrics;
pub mod operation_registry;
pub mod operations;
pub mod orchestrator;
pub mod parameters;
pub mod responses;
pub mod schema_graph;
pub mod type_mapper;

#[cfg(test)]
mod tests;
