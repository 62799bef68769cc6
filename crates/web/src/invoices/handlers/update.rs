//! Update Invoice Handlers

use salvo::prelude::*;
use tracing::info;

use billable::validation::FieldErrors;
use billable_app::domain::{
    invoices::records::{InvoiceId, InvoiceRecord},
    projects::records::ProjectRecord,
};

use crate::{
    extensions::*,
    invoices::{
        errors::into_status_error,
        form::InvoiceForm,
        handlers::create::{form_context, load_project},
    },
    state::State,
    templates::FormPage,
};

fn page(invoice: InvoiceId) -> FormPage {
    FormPage {
        template: "invoices/form.html",
        title: "Edit invoice".to_string(),
        action: format!("/invoice/update/{invoice}"),
        cancel: format!("/invoice/view/{invoice}"),
    }
}

async fn load(state: &State, id: InvoiceId) -> Result<(InvoiceRecord, ProjectRecord), StatusError> {
    let invoice = state
        .app
        .invoices
        .get_invoice(id)
        .await
        .map_err(into_status_error)?;

    let project = load_project(state, invoice.project).await?;

    Ok((invoice, project))
}

#[handler]
#[tracing::instrument(
    name = "invoices.update.form",
    skip_all,
    fields(invoice_id = tracing::field::Empty),
    err
)]
pub(crate) async fn show_form(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let id: InvoiceId = req.id_or_404("id")?;

    tracing::Span::current().record("invoice_id", tracing::field::display(id));

    let (invoice, project) = load(state, id).await?;
    let page = page(id);

    state.templates.write(
        res,
        page.template,
        &form_context(
            &page,
            &project,
            &InvoiceForm::from_details(&invoice.details),
            &FieldErrors::new(),
        ),
    )
}

/// Update an invoice, which is also how a payment is recorded.
#[handler]
#[tracing::instrument(
    name = "invoices.update",
    skip_all,
    fields(invoice_id = tracing::field::Empty),
    err
)]
pub(crate) async fn submit(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let id: InvoiceId = req.id_or_404("id")?;

    tracing::Span::current().record("invoice_id", tracing::field::display(id));

    let (_, project) = load(state, id).await?;
    let form: InvoiceForm = req.form_or_400().await?;

    let details = match form.validate() {
        Ok(details) => details,
        Err(errors) => {
            let page = page(id);

            res.status_code(StatusCode::UNPROCESSABLE_ENTITY);

            return state.templates.write(
                res,
                page.template,
                &form_context(&page, &project, &form, &errors),
            );
        }
    };

    let paid = details.date_paid.is_some();

    state
        .app
        .invoices
        .update_invoice(id, details)
        .await
        .map_err(into_status_error)?;

    info!(invoice_id = %id, paid, "updated invoice");

    res.see_other(&format!("/invoice/view/{id}"))
}
