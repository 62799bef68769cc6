//! Invoices

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;
pub mod statement;

pub use errors::InvoicesServiceError;
pub use service::*;
pub use statement::{InvoiceStatement, StatementBuilder, StatementError};
