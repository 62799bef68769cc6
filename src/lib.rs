//! Billable
//!
//! Billable is the domain core of a freelancer business-management system: form field
//! validation, invoice total computation, typed settings values and money presentation.
//!
//! Nothing in this crate performs I/O. Persistence and HTTP live in the `billable-app` and
//! `billable-web` crates, which depend on the types defined here.

pub mod money;
pub mod prelude;
pub mod settings;
pub mod totals;
pub mod validation;
