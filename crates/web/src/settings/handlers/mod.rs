//! Settings Handlers

pub(crate) mod index;
pub(crate) mod update;
