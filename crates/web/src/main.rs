//! Billable Web Server
//!
//! Server-rendered HTML for managing clients, projects, timesheets and invoices, plus
//! printable PDF invoices.

use std::process;

use salvo::{affix_state::inject, prelude::*, trailing_slash::remove_slash};
use tracing::{error, info};

use billable_app::context::AppContext;

use crate::{
    config::ServerConfig, observability::Observability, router::app_router, state::State,
    templates::Templates,
};

mod clients;
mod config;
mod extensions;
mod forms;
mod healthcheck;
mod invoices;
mod observability;
mod projects;
mod router;
mod settings;
mod shutdown;
mod state;
mod templates;
#[cfg(test)]
mod test_helpers;
mod timesheets;

/// Billable web server entry point
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    let observability = Observability::init(&config).unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Observability error: {e}");
        }

        process::exit(1);
    });

    let templates = match Templates::load() {
        Ok(templates) => templates,
        Err(load_error) => {
            error!("failed to load templates: {load_error:?}");

            process::exit(1);
        }
    };

    let app = match AppContext::from_database_url(&config.database_url).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app, templates)))
        .hoop(observability.request_logging())
        .push(app_router());

    let server = Server::new(listener);

    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;

    observability.shutdown();
}
