//! Invoice Errors

use salvo::http::StatusError;
use tracing::error;

use billable_app::domain::invoices::{InvoicesServiceError, StatementError};

pub(crate) fn into_status_error(error: InvoicesServiceError) -> StatusError {
    match error {
        InvoicesServiceError::NotFound => StatusError::not_found().brief("Invoice not found"),
        InvoicesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Invoice already exists")
        }
        InvoicesServiceError::InvalidReference => {
            StatusError::not_found().brief("Project not found")
        }
        InvoicesServiceError::MissingRequiredData | InvoicesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid invoice data")
        }
        InvoicesServiceError::Sql(source) => {
            error!("invoice storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// A statement is only as present as the invoice, project and client behind it.
pub(crate) fn statement_status_error(error: StatementError) -> StatusError {
    match error {
        StatementError::InvoiceNotFound => StatusError::not_found().brief("Invoice not found"),
        StatementError::ProjectNotFound => StatusError::not_found().brief("Project not found"),
        StatementError::ClientNotFound => StatusError::not_found().brief("Client not found"),
        other => {
            error!(error = ?other, "failed to build invoice statement");

            StatusError::internal_server_error()
        }
    }
}
