//! Shared application domain, persistence and rendering modules.

pub mod context;
pub mod database;
pub mod domain;
pub mod ids;
pub mod pdf;

#[cfg(test)]
mod test;
