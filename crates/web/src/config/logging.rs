//! Logging Config

use clap::{Args, ValueEnum};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormat {
    /// One line per event, for terminals.
    Compact,

    /// Newline-delimited JSON, for log shippers.
    Json,
}

/// Log output and request timing.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` holds no directives of its own
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Requests slower than this are logged at warn
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000_u64)]
    pub slow_request_threshold_ms: u64,
}
