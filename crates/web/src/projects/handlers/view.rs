//! View Project Handler

use salvo::prelude::*;
use tera::Context;

use billable_app::domain::projects::records::ProjectId;

use crate::{
    clients::{self, views::ClientView},
    extensions::*,
    invoices::{self, views::InvoiceView},
    projects::{errors::into_status_error, views::ProjectView},
    timesheets::{self, views::TimesheetView},
};

/// Project details with its timesheets and invoices.
#[handler]
#[tracing::instrument(
    name = "projects.view",
    skip_all,
    fields(project_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let id: ProjectId = req.id_or_404("id")?;

    tracing::Span::current().record("project_id", tracing::field::display(id));

    let project = state
        .app
        .projects
        .get_project(id)
        .await
        .map_err(into_status_error)?;

    let client = state
        .app
        .clients
        .get_client(project.client)
        .await
        .map_err(clients::errors::into_status_error)?;

    let timesheets = state
        .app
        .timesheets
        .get_timesheets_by_project(id)
        .await
        .map_err(timesheets::errors::into_status_error)?;

    let invoices: Vec<InvoiceView> = state
        .app
        .invoices
        .get_invoices_by_project(id)
        .await
        .map_err(invoices::errors::into_status_error)?
        .iter()
        .map(InvoiceView::from)
        .collect();

    let total_hours: f64 = timesheets
        .iter()
        .map(|timesheet| timesheet.details.hours_worked)
        .sum();

    let total_amount: f64 = timesheets.iter().map(|timesheet| timesheet.line_total()).sum();

    let timesheets: Vec<TimesheetView> = timesheets.iter().map(TimesheetView::from).collect();

    let mut context = Context::new();
    context.insert("project", &ProjectView::from(&project));
    context.insert("client", &ClientView::from(&client));
    context.insert("timesheets", &timesheets);
    context.insert("invoices", &invoices);
    context.insert("total_hours", &format!("{total_hours:.2}"));
    context.insert("total_amount", &format!("{total_amount:.2}"));

    state.templates.write(res, "projects/view.html", &context)
}
