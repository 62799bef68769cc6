//! Billable Domain Concerns

pub mod clients;
pub mod invoices;
pub mod lifecycle;
pub mod projects;
pub mod settings;
pub mod timesheets;
