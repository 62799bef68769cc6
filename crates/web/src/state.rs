//! State

use std::sync::Arc;

use salvo::http::StatusError;

use billable_app::{
    context::AppContext,
    domain::settings::{InvoicePresentation, presentation::defaults},
};

use crate::{settings::errors::into_status_error, templates::Templates};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) templates: Templates,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, templates: Templates) -> Self {
        Self { app, templates }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, templates: Templates) -> Arc<Self> {
        Arc::new(Self::new(app, templates))
    }

    /// Current presentation settings, with defaults for anything missing.
    pub(crate) async fn presentation(&self) -> Result<InvoicePresentation, StatusError> {
        let settings = self
            .app
            .settings
            .get_all(&defaults())
            .await
            .map_err(into_status_error)?;

        Ok(InvoicePresentation::from_settings(&settings))
    }
}
