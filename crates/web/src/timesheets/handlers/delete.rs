//! Delete Timesheet Handler

use salvo::prelude::*;

use billable_app::domain::timesheets::{TimesheetsServiceError, records::TimesheetId};

use crate::{extensions::*, timesheets::errors::into_status_error};

/// Soft-delete a timesheet and go back to its project.
#[handler]
#[tracing::instrument(
    name = "timesheets.delete",
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

    let back = match state.app.timesheets.get_timesheet(id).await {
        Ok(timesheet) => format!("/project/view/{}", timesheet.project),
        Err(TimesheetsServiceError::NotFound) => "/".to_string(),
        Err(error) => return Err(into_status_error(error)),
    };

    state
        .app
        .timesheets
        .soft_delete_timesheet(id)
        .await
        .map_err(into_status_error)?;

    res.see_other(&back)
}
