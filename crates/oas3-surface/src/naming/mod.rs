pub mod constants;
pub mod identifiers;
pub mod operations;
pub mod responses;

#[cfg(test)]
mod tests;
