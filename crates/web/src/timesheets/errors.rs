//! Timesheet Errors

use salvo::http::StatusError;
use tracing::error;

use billable_app::domain::timesheets::TimesheetsServiceError;

pub(crate) fn into_status_error(error: TimesheetsServiceError) -> StatusError {
    match error {
        TimesheetsServiceError::NotFound => {
            StatusError::not_found().brief("Timesheet not found")
        }
        TimesheetsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Timesheet already exists")
        }
        TimesheetsServiceError::InvalidReference => {
            StatusError::not_found().brief("Project not found")
        }
        TimesheetsServiceError::MissingRequiredData | TimesheetsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid timesheet data")
        }
        TimesheetsServiceError::Sql(source) => {
            error!("timesheet storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
