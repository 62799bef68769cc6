//! Structured logging and per-request tracing.

use thiserror::Error;

mod init;
mod logging;
mod request;

pub(crate) use init::Observability;
pub(crate) use request::RequestLogging;

#[derive(Debug, Error)]
pub(crate) enum ObservabilityError {
    #[error("a global tracing subscriber is already installed: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}
