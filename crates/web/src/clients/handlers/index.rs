//! Client List Handler

use salvo::prelude::*;
use tera::Context;

use crate::{
    clients::{errors::into_status_error, views::ClientView},
    extensions::*,
};

/// Home page: every active client by name.
#[handler]
#[tracing::instrument(name = "clients.index", skip_all, err)]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    let state = depot.state()?;

    let clients: Vec<ClientView> = state
        .app
        .clients
        .list_clients()
        .await
        .map_err(into_status_error)?
        .iter()
        .map(ClientView::from)
        .collect();

    let mut context = Context::new();
    context.insert("clients", &clients);

    state.templates.write(res, "clients/index.html", &context)
}
