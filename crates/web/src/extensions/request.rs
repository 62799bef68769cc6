//! Request helper extensions.

use salvo::prelude::{Request, StatusError};
use serde::de::DeserializeOwned;
use tracing::warn;

use billable_app::ids::TypedId;

/// Path and form extraction that fails with the HTTP status the handlers need.
pub(crate) trait RequestExt {
    /// Typed id from a path segment. Anything that is not an integer is a 404.
    fn id_or_404<T>(&self, name: &str) -> Result<TypedId<T>, StatusError>;

    /// Decode an url-encoded form body.
    async fn form_or_400<T>(&mut self) -> Result<T, StatusError>
    where
        T: DeserializeOwned + Send;
}

impl RequestExt for Request {
    fn id_or_404<T>(&self, name: &str) -> Result<TypedId<T>, StatusError> {
        self.param::<String>(name)
            .and_then(|raw| raw.parse().ok())
            .ok_or_else(StatusError::not_found)
    }

    async fn form_or_400<T>(&mut self) -> Result<T, StatusError>
    where
        T: DeserializeOwned + Send,
    {
        self.parse_form::<T>().await.map_err(|error| {
            warn!("failed to decode form body: {error}");

            StatusError::bad_request().brief("Malformed form body")
        })
    }
}
