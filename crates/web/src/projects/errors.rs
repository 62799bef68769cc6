//! Project Errors

use salvo::http::StatusError;
use tracing::error;

use billable_app::domain::projects::ProjectsServiceError;

pub(crate) fn into_status_error(error: ProjectsServiceError) -> StatusError {
    match error {
        ProjectsServiceError::NotFound => StatusError::not_found().brief("Project not found"),
        ProjectsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Project already exists")
        }
        ProjectsServiceError::InvalidReference => {
            StatusError::not_found().brief("Client not found")
        }
        ProjectsServiceError::MissingRequiredData | ProjectsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid project data")
        }
        ProjectsServiceError::Sql(source) => {
            error!("project storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
