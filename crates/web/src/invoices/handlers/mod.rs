//! Invoice Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod print;
pub(crate) mod update;
pub(crate) mod view;
