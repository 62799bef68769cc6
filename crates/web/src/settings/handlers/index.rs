//! Settings List Handler

use salvo::prelude::*;
use tera::Context;

use crate::{
    extensions::*,
    settings::{errors::into_status_error, views::SettingView},
};

#[handler]
#[tracing::instrument(name = "settings.index", skip_all, err)]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    let state = depot.state()?;

    let settings: Vec<SettingView> = state
        .app
        .settings
        .list_settings()
        .await
        .map_err(into_status_error)?
        .iter()
        .map(SettingView::from)
        .collect();

    let mut context = Context::new();
    context.insert("settings", &settings);

    state.templates.write(res, "settings/index.html", &context)
}
