//! View Timesheet Handler

use salvo::prelude::*;
use tera::Context;

use billable_app::domain::timesheets::records::TimesheetId;

use crate::{
    extensions::*,
    projects::{self, views::ProjectView},
    timesheets::{errors::into_status_error, views::TimesheetView},
};

#[handler]
#[tracing::instrument(
    name = "timesheets.view",
    skip_all,
    fields(timesheet_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let id: TimesheetId = req.id_or_404("id")?;

    tracing::Span::current().record("timesheet_id", tracing::field::display(id));

    let timesheet = state
        .app
        .timesheets
        .get_timesheet(id)
        .await
        .map_err(into_status_error)?;

    let project = state
        .app
        .projects
        .get_project(timesheet.project)
        .await
        .map_err(projects::errors::into_status_error)?;

    let mut context = Context::new();
    context.insert("timesheet", &TimesheetView::from(&timesheet));
    context.insert("project", &ProjectView::from(&project));

    state.templates.write(res, "timesheets/view.html", &context)
}
