//! Extension traits

mod depot;
mod request;
mod response;
mod result;

pub(crate) use depot::DepotExt as _;
pub(crate) use request::RequestExt as _;
pub(crate) use response::RedirectExt as _;
pub(crate) use result::ResultExt as _;
