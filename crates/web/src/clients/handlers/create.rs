//! Create Client Handlers

use salvo::prelude::*;
use tracing::info;

use billable::validation::FieldErrors;

use crate::{
    clients::{errors::into_status_error, form::ClientForm},
    extensions::*,
    templates::FormPage,
};

fn page() -> FormPage {
    FormPage {
        template: "clients/form.html",
        title: "New client".to_string(),
        action: "/client/create".to_string(),
        cancel: "/".to_string(),
    }
}

/// Empty client form, rate taken from the `default_hourly_rate` setting.
#[handler]
#[tracing::instrument(name = "clients.create.form", skip_all, err)]
pub(crate) async fn show_form(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    let state = depot.state()?;
    let presentation = state.presentation().await?;

    let form = ClientForm::with_rate(presentation.default_hourly_rate_f64());
    let page = page();

    state
        .templates
        .write(res, page.template, &page.context(&form, &FieldErrors::new()))
}

#[handler]
#[tracing::instrument(
    name = "clients.create",
    skip_all,
    fields(client_id = tracing::field::Empty),
    err
)]
pub(crate) async fn submit(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let form: ClientForm = req.form_or_400().await?;

    let details = match form.validate() {
        Ok(details) => details,
        Err(errors) => {
            let page = page();

            res.status_code(StatusCode::UNPROCESSABLE_ENTITY);

            return state
                .templates
                .write(res, page.template, &page.context(&form, &errors));
        }
    };

    let client = state
        .app
        .clients
        .insert_client(details)
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("client_id", tracing::field::display(client));

    info!(client_id = %client, "created client");

    res.see_other(&format!("/client/view/{client}"))
}
