//! Clients

pub(crate) mod errors;
pub(crate) mod form;
pub(crate) mod handlers;
pub(crate) mod views;

pub(crate) use handlers::*;
