//! Graceful shutdown on Ctrl+C or SIGTERM

use std::io;

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
#[error("failed to install {signal} handler: {source}")]
pub(crate) struct ShutdownSignalError {
    signal: &'static str,
    #[source]
    source: io::Error,
}

#[cfg(unix)]
async fn sigterm() -> Result<(), ShutdownSignalError> {
    let mut stream = signal::unix::signal(signal::unix::SignalKind::terminate()).map_err(
        |source| ShutdownSignalError {
            signal: "SIGTERM",
            source,
        },
    )?;

    stream.recv().await;

    Ok(())
}

#[cfg(not(unix))]
async fn sigterm() -> Result<(), ShutdownSignalError> {
    std::future::pending().await
}

/// Block until the process is asked to stop, then drain in-flight requests.
pub(crate) async fn listen(handle: ServerHandle) -> Result<(), ShutdownSignalError> {
    let received = tokio::select! {
        result = signal::ctrl_c() => {
            result.map_err(|source| ShutdownSignalError { signal: "Ctrl+C", source })?;
            "ctrl_c"
        }
        result = sigterm() => {
            result?;
            "sigterm"
        }
    };

    info!(signal = received, "shutting down");

    handle.stop_graceful(None);

    Ok(())
}
