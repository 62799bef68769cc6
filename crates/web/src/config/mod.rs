//! Server configuration module

use clap::Parser;

use crate::config::logging::LoggingConfig;

pub(crate) mod logging;

/// Billable web server configuration
#[derive(Debug, Parser)]
#[command(name = "billable-web", about = "Billable web server", long_about = None)]
pub struct ServerConfig {
    /// Interface to listen on
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(short, long, env = "SERVER_PORT", default_value_t = 8698)]
    pub port: u16,

    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl ServerConfig {
    /// Parse flags, falling back to the environment and then `.env`.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is missing or malformed.
    pub fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
