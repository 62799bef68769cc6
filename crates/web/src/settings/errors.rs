//! Settings Errors

use salvo::http::StatusError;
use tracing::error;

use billable_app::domain::settings::SettingsServiceError;

pub(crate) fn into_status_error(error: SettingsServiceError) -> StatusError {
    match error {
        SettingsServiceError::NotFound => StatusError::not_found().brief("Setting not found"),
        SettingsServiceError::InvalidValue(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        SettingsServiceError::MissingRequiredData | SettingsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid setting data")
        }
        SettingsServiceError::Sql(source) => {
            error!("settings storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
