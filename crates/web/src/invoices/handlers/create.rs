//! Create Invoice Handlers

use jiff::Zoned;
use salvo::prelude::*;
use tera::Context;
use tracing::info;

use billable::{money::round_cents, validation::FieldErrors};
use billable_app::domain::{
    invoices::data::NewInvoice,
    projects::records::{ProjectId, ProjectRecord},
};

use crate::{
    extensions::*,
    invoices::{errors::into_status_error, form::InvoiceForm},
    projects,
    state::State,
    templates::FormPage,
    timesheets,
};

fn page(project: ProjectId) -> FormPage {
    FormPage {
        template: "invoices/form.html",
        title: "New invoice".to_string(),
        action: format!("/project/{project}/invoice/create"),
        cancel: format!("/project/view/{project}"),
    }
}

pub(super) fn form_context(
    page: &FormPage,
    project: &ProjectRecord,
    form: &InvoiceForm,
    errors: &FieldErrors,
) -> Context {
    let mut context = page.context(form, errors);

    context.insert("project_name", &project.details.name);

    context
}

pub(super) async fn load_project(state: &State, id: ProjectId) -> Result<ProjectRecord, StatusError> {
    state
        .app
        .projects
        .get_project(id)
        .await
        .map_err(projects::errors::into_status_error)
}

/// Invoice form dated today for the value of every logged hour.
#[handler]
#[tracing::instrument(
    name = "invoices.create.form",
    skip_all,
    fields(project_id = tracing::field::Empty),
    err
)]
pub(crate) async fn show_form(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let id: ProjectId = req.id_or_404("id")?;

    tracing::Span::current().record("project_id", tracing::field::display(id));

    let project = load_project(state, id).await?;

    let logged: f64 = state
        .app
        .timesheets
        .get_timesheets_by_project(id)
        .await
        .map_err(timesheets::errors::into_status_error)?
        .iter()
        .map(|timesheet| timesheet.line_total())
        .sum();

    let form = InvoiceForm::new(Zoned::now().date(), round_cents(logged));
    let page = page(id);

    state.templates.write(
        res,
        page.template,
        &form_context(&page, &project, &form, &FieldErrors::new()),
    )
}

#[handler]
#[tracing::instrument(
    name = "invoices.create",
    skip_all,
    fields(project_id = tracing::field::Empty, invoice_id = tracing::field::Empty),
    err
)]
pub(crate) async fn submit(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let id: ProjectId = req.id_or_404("id")?;

    let span = tracing::Span::current();
    span.record("project_id", tracing::field::display(id));

    let project = load_project(state, id).await?;
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

    let invoice = state
        .app
        .invoices
        .insert_invoice(NewInvoice {
            project: id,
            details,
        })
        .await
        .map_err(into_status_error)?;

    span.record("invoice_id", tracing::field::display(invoice));

    info!(project_id = %id, invoice_id = %invoice, "created invoice");

    res.see_other(&format!("/invoice/view/{invoice}"))
}
