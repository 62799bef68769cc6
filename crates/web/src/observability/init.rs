//! Observability lifecycle.

use std::time::Duration;

use tracing::info;

use crate::config::ServerConfig;

use super::{ObservabilityError, RequestLogging, logging};

/// Installed once at startup; hands out the request middleware.
#[derive(Debug)]
pub(crate) struct Observability {
    slow_request_threshold: Duration,
}

impl Observability {
    pub(crate) fn init(config: &ServerConfig) -> Result<Self, ObservabilityError> {
        logging::init_subscriber(config)?;

        Ok(Self {
            slow_request_threshold: Duration::from_millis(
                config.logging.slow_request_threshold_ms,
            ),
        })
    }

    /// Middleware that logs every request against this process's slow threshold.
    pub(crate) fn request_logging(&self) -> RequestLogging {
        RequestLogging::new(self.slow_request_threshold)
    }

    pub(crate) fn shutdown(self) {
        info!("server stopped");
    }
}
