//! Settings

pub mod errors;
pub mod presentation;
pub mod records;
mod repository;
pub mod service;

pub use errors::SettingsServiceError;
pub use presentation::InvoicePresentation;
pub use service::*;
