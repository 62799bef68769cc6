//! Client Errors

use salvo::http::StatusError;
use tracing::error;

use billable_app::domain::clients::ClientsServiceError;

pub(crate) fn into_status_error(error: ClientsServiceError) -> StatusError {
    match error {
        ClientsServiceError::NotFound => StatusError::not_found().brief("Client not found"),
        ClientsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Client already exists")
        }
        ClientsServiceError::InvalidReference
        | ClientsServiceError::MissingRequiredData
        | ClientsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid client data")
        }
        ClientsServiceError::Sql(source) => {
            error!("client storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
