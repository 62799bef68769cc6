//! Update Client Handlers

use salvo::prelude::*;
use tracing::info;

use billable::validation::FieldErrors;
use billable_app::domain::clients::records::ClientId;

use crate::{
    clients::{errors::into_status_error, form::ClientForm},
    extensions::*,
    templates::FormPage,
};

fn page(client: ClientId) -> FormPage {
    FormPage {
        template: "clients/form.html",
        title: "Edit client".to_string(),
        action: format!("/client/update/{client}"),
        cancel: format!("/client/view/{client}"),
    }
}

#[handler]
#[tracing::instrument(
    name = "clients.update.form",
    skip_all,
    fields(client_id = tracing::field::Empty),
    err
)]
pub(crate) async fn show_form(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let id: ClientId = req.id_or_404("id")?;

    tracing::Span::current().record("client_id", tracing::field::display(id));

    let client = state
        .app
        .clients
        .get_client(id)
        .await
        .map_err(into_status_error)?;

    let page = page(id);

    state.templates.write(
        res,
        page.template,
        &page.context(&ClientForm::from_details(&client.details), &FieldErrors::new()),
    )
}

#[handler]
#[tracing::instrument(
    name = "clients.update",
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
    let id: ClientId = req.id_or_404("id")?;

    tracing::Span::current().record("client_id", tracing::field::display(id));

    state
        .app
        .clients
        .get_client(id)
        .await
        .map_err(into_status_error)?;

    let form: ClientForm = req.form_or_400().await?;

    let details = match form.validate() {
        Ok(details) => details,
        Err(errors) => {
            let page = page(id);

            res.status_code(StatusCode::UNPROCESSABLE_ENTITY);

            return state
                .templates
                .write(res, page.template, &page.context(&form, &errors));
        }
    };

    state
        .app
        .clients
        .update_client(id, details)
        .await
        .map_err(into_status_error)?;

    info!(client_id = %id, "updated client");

    res.see_other(&format!("/client/view/{id}"))
}
