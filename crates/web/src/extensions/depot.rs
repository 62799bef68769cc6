//! Depot helper extensions.

use std::sync::Arc;

use salvo::prelude::{Depot, StatusError};
use tracing::error;

use crate::state::State;

pub(crate) trait DepotExt {
    /// Shared application state injected by the router.
    fn state(&self) -> Result<&Arc<State>, StatusError>;
}

impl DepotExt for Depot {
    fn state(&self) -> Result<&Arc<State>, StatusError> {
        self.obtain::<Arc<State>>().map_err(|_missing| {
            error!("application state was not injected");

            StatusError::internal_server_error()
        })
    }
}
